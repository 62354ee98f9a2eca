//! Foundation types
//!
//! - **Status**: the tri-state result every operation answers with
//! - **Value**: owned scalars, intervals and ranges compared by operators
//! - **Target**: the reflection interface the engine walks objects through
//! - **Errors**: `ValidationError`, `RuleError`
//! - **Config**: `EvaluationConfig`, `ExistencePolicy`

pub mod config;
pub mod error;
mod impls;
pub mod status;
pub mod traits;
pub mod value;

pub use config::{EvaluationConfig, ExistencePolicy};
pub use error::{RuleError, ValidationError};
pub use status::Status;
pub use traits::{Elements, Target};
pub use value::{Interval, Value, interval, range};
