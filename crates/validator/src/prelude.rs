//! Prelude module for convenient imports.
//!
//! Provides a single `use verdict::prelude::*;` import that brings in the
//! rule-building DSL, the façade and the types needed to inspect results.
//!
//! # Examples
//!
//! ```rust,ignore
//! use verdict::prelude::*;
//!
//! let rule = and([
//!     member("name").length().gte(3),
//!     member("tags").all().ne(""),
//!     not(member("age").lt(18)),
//! ]);
//! let validator = Validator::new(rule).with_config(EvaluationConfig::strict());
//! ```

// ============================================================================
// FOUNDATION: Status, values, object model, errors, config
// ============================================================================

pub use crate::foundation::{
    EvaluationConfig, ExistencePolicy, Interval, RuleError, Status, Target, ValidationError,
    Value, interval, range,
};

// ============================================================================
// PATHS & PROPERTIES
// ============================================================================

pub use crate::path::{Key, Member, Quantifier, TreeSpec, member, this};
pub use crate::property::{Property, PropertyRegistry};

// ============================================================================
// OPERATORS & COMBINATORS
// ============================================================================

pub use crate::combinators::{Node, Operand, all, and, any, explain, not, or, tree};
pub use crate::operators::{Case, LexKind, Operator};

// ============================================================================
// REPORTING & FAÇADE
// ============================================================================

pub use crate::report::{GrammarCategories, Locale, TranslationTable};
pub use crate::validator::{Outcome, Validator};
