//! Human-readable reports
//!
//! - **Grammar**: categories used for agreement between phrases
//! - **Translation**: `Translator`, `TranslationTable`, `Locale`
//! - **Formatting**: member, condition and existence phrases
//! - **Reporter**: frame stack turning a validation pass into text plus the
//!   list of failing members

pub mod format;
pub mod grammar;
pub mod reporter;
pub mod translate;

pub use format::Formatter;
pub use grammar::GrammarCategories;
pub use reporter::{FailedMembers, FrameKind, Report, Reporter};
pub use translate::{Locale, Phrase, TranslationEntry, TranslationTable, Translator};
