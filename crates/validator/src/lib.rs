//! # verdict
//!
//! A declarative validation engine: rules are immutable trees of member
//! selectors, properties, comparison operators and logical aggregations,
//! evaluated against any object that implements [`Target`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use verdict::prelude::*;
//! use serde_json::json;
//!
//! let validator = Validator::new(and([
//!     member("field1").gte(10),
//!     member("items").all().size().gte(5),
//! ]));
//!
//! let outcome = validator.validate(&json!({"field1": 1, "items": []}));
//! assert_eq!(outcome.status, Status::Fail);
//! assert_eq!(outcome.text, "field1 must be greater than or equal to 10");
//! ```
//!
//! ## Results
//!
//! Every evaluation answers with a tri-state [`Status`]: `Success`, `Fail`
//! or `Ignore` when the rule did not apply (missing optional member,
//! incomparable operands, `ANY` over nothing). On failure the report names
//! the failing condition in the configured [`Locale`](report::Locale) and
//! lists the failing members.
//!
//! ## Architecture
//!
//! - [`combinators`]: the rule tree and the aggregation engine
//! - [`adapter`]: the layer chain every leaf and aggregation runs through
//!   (existence policy, reporting, single-member, prevalidation)
//! - [`path`] / [`property`]: member paths and how they resolve
//! - [`report`]: grammar-aware text rendering
//! - [`Validator`]: the façade bundling a rule with its configuration
//!
//! Implement [`Target`] for your own types by hand, or with [`record!`].

pub mod adapter;
pub mod combinators;
pub mod foundation;
pub mod json;
mod macros;
pub mod operators;
pub mod path;
pub mod prelude;
pub mod property;
pub mod report;
pub mod validator;

pub use foundation::{Status, Target};
pub use validator::{Outcome, Validator};
