//! Translation of report phrases
//!
//! Every piece of report text (member names, operator descriptions, the
//! conjunction words) is looked up through a [`Translator`] together with
//! the grammatical categories of the phrase before it. A phrase without a
//! translation is used verbatim.
//!
//! [`TranslationTable`] is the stock translator. A phrase may have several
//! forms; the lookup picks the most specific form whose required categories
//! are all present:
//!
//! ```json
//! {
//!   "name": "ru",
//!   "property_first": false,
//!   "phrases": {
//!     "size": {"text": "размер", "grammar": ["masculine"]},
//!     "must be greater than": [
//!       {"text": "должен быть больше", "requires": ["masculine"]},
//!       {"text": "должна быть больше", "requires": ["feminine"]}
//!     ]
//!   }
//! }
//! ```

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::foundation::RuleError;
use crate::report::GrammarCategories;

/// Translated text with its own grammatical categories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Phrase {
    pub text: String,
    pub grammar: GrammarCategories,
}

impl Phrase {
    pub fn new(text: impl Into<String>, grammar: GrammarCategories) -> Self {
        Self {
            text: text.into(),
            grammar,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for Phrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Source of translated phrases.
pub trait Translator: Send + Sync {
    /// Translates `phrase` in the context of the preceding phrase's
    /// `grammar`. `None` keeps the phrase as it is.
    fn lookup(&self, phrase: &str, grammar: GrammarCategories) -> Option<Phrase>;
}

// ============================================================================
// TRANSLATION TABLE
// ============================================================================

/// One form of a translated phrase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationEntry {
    pub text: String,
    /// Categories the context must carry for this form to apply.
    #[serde(default)]
    pub requires: GrammarCategories,
    /// Categories of the translated phrase itself.
    #[serde(default)]
    pub grammar: GrammarCategories,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntries {
    Text(String),
    One(TranslationEntry),
    Many(Vec<TranslationEntry>),
}

impl From<RawEntries> for Vec<TranslationEntry> {
    fn from(raw: RawEntries) -> Self {
        match raw {
            RawEntries::Text(text) => vec![TranslationEntry {
                text,
                ..TranslationEntry::default()
            }],
            RawEntries::One(entry) => vec![entry],
            RawEntries::Many(entries) => entries,
        }
    }
}

/// Phrase table keyed by the untranslated text.
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    entries: HashMap<String, Vec<TranslationEntry>>,
}

impl TranslationTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a form for `phrase`.
    pub fn insert(&mut self, phrase: impl Into<String>, entry: TranslationEntry) -> &mut Self {
        self.entries.entry(phrase.into()).or_default().push(entry);
        self
    }

    /// Adds a plain translation valid in every context.
    #[must_use = "builder methods must be chained or built"]
    pub fn with(mut self, phrase: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(
            phrase,
            TranslationEntry {
                text: text.into(),
                ..TranslationEntry::default()
            },
        );
        self
    }

    /// Adds a form carrying grammar and context requirements.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_entry(mut self, phrase: impl Into<String>, entry: TranslationEntry) -> Self {
        self.insert(phrase, entry);
        self
    }

    /// Parses a `{"phrase": text | entry | [entry, ...]}` object.
    pub fn from_json(json: &str) -> Result<Self, RuleError> {
        let raw: HashMap<String, RawEntries> = serde_json::from_str(json)?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: HashMap<String, RawEntries>) -> Self {
        Self {
            entries: raw.into_iter().map(|(k, v)| (k, v.into())).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Translator for TranslationTable {
    fn lookup(&self, phrase: &str, grammar: GrammarCategories) -> Option<Phrase> {
        self.entries
            .get(phrase)?
            .iter()
            .filter(|entry| grammar.contains(entry.requires))
            // the first of equally specific forms wins
            .rev()
            .max_by_key(|entry| entry.requires.count())
            .map(|entry| Phrase::new(entry.text.clone(), entry.grammar))
    }
}

// ============================================================================
// LOCALE
// ============================================================================

#[derive(Deserialize)]
struct RawLocale {
    name: String,
    #[serde(default = "default_property_first")]
    property_first: bool,
    #[serde(default)]
    phrases: HashMap<String, RawEntries>,
}

const fn default_property_first() -> bool {
    true
}

/// Translator plus the word-order conventions of a language.
#[derive(Clone)]
pub struct Locale {
    name: Cow<'static, str>,
    property_first: bool,
    translator: Arc<dyn Translator>,
}

impl Locale {
    pub fn new(name: impl Into<Cow<'static, str>>, translator: impl Translator + 'static) -> Self {
        Self {
            name: name.into(),
            property_first: true,
            translator: Arc::new(translator),
        }
    }

    /// English: phrases are used verbatim, properties come first
    /// ("size of field1").
    #[must_use]
    pub fn english() -> Self {
        Self::new("en", TranslationTable::new())
    }

    /// Loads `{"name", "property_first", "phrases"}`.
    pub fn from_json(json: &str) -> Result<Self, RuleError> {
        let raw: RawLocale = serde_json::from_str(json)?;
        Ok(Self::new(raw.name, TranslationTable::from_raw(raw.phrases))
            .with_property_first(raw.property_first))
    }

    /// `true`: "size of field1"; `false`: "field1 size".
    #[must_use = "builder methods must be chained or built"]
    pub fn with_property_first(mut self, property_first: bool) -> Self {
        self.property_first = property_first;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn property_first(&self) -> bool {
        self.property_first
    }

    pub fn translator(&self) -> &dyn Translator {
        self.translator.as_ref()
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::english()
    }
}

impl fmt::Debug for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Locale")
            .field("name", &self.name)
            .field("property_first", &self.property_first)
            .finish_non_exhaustive()
    }
}
