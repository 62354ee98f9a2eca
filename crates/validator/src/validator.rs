//! Validator façade
//!
//! A [`Validator`] owns a rule tree together with the configuration,
//! property registry and locale it is evaluated with. Each call builds a
//! fresh adapter chain and reporter, so one validator can be shared between
//! threads and used for any number of objects.
//!
//! # Examples
//!
//! ```rust,ignore
//! use verdict::prelude::*;
//! use serde_json::json;
//!
//! let validator = Validator::new(member("field1").gte(10));
//! let outcome = validator.validate(&json!({"field1": 1}));
//!
//! assert_eq!(outcome.status, Status::Fail);
//! assert_eq!(outcome.text, "field1 must be greater than or equal to 10");
//! ```

use std::cell::RefCell;

use tracing::{debug, debug_span};

use crate::adapter::AdapterBuilder;
use crate::combinators::Node;
use crate::foundation::{EvaluationConfig, Status, Target, ValidationError};
use crate::path::Member;
use crate::property::PropertyRegistry;
use crate::report::{FailedMembers, Locale, Reporter};

// ============================================================================
// OUTCOME
// ============================================================================

/// Result of one validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub status: Status,
    /// Report text; empty unless something failed.
    pub text: String,
    /// Dotted paths of failing members in recording order. Leaves that
    /// failed inside a passing `OR`, `ANY` or `NOT` are listed too.
    pub failed_members: FailedMembers,
}

impl Outcome {
    /// Only `Fail` is a failure; `Ignore` passes.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.status.is_fail()
    }

    /// `Err` carrying the report when the status is `Fail`.
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.is_valid() {
            return Ok(());
        }
        Err(ValidationError::rule_failed(
            self.text,
            self.failed_members.into_iter().collect(),
        ))
    }
}

// ============================================================================
// VALIDATOR
// ============================================================================

/// Member filter applied for one pass.
#[derive(Clone, Copy)]
enum Filter<'c> {
    Everything,
    Member(&'c Member),
    Candidate {
        member: &'c Member,
        candidate: &'c dyn Target,
        strict_any: bool,
    },
}

/// A rule tree ready to be evaluated.
#[derive(Debug, Clone)]
pub struct Validator {
    root: Node,
    config: EvaluationConfig,
    properties: PropertyRegistry,
    locale: Locale,
}

impl Validator {
    /// Default configuration (`Safe` existence policy), the built-in
    /// properties and English text.
    #[must_use]
    pub fn new(root: Node) -> Self {
        Self {
            root,
            config: EvaluationConfig::default(),
            properties: PropertyRegistry::default(),
            locale: Locale::english(),
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_config(mut self, config: EvaluationConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_properties(mut self, properties: PropertyRegistry) -> Self {
        self.properties = properties;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn rule(&self) -> &Node {
        &self.root
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    pub fn properties(&self) -> &PropertyRegistry {
        &self.properties
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Evaluates the whole rule and renders the report.
    pub fn validate(&self, object: &dyn Target) -> Outcome {
        self.run(object, Filter::Everything)
    }

    /// Status only.
    pub fn status(&self, object: &dyn Target) -> Status {
        self.validate(object).status
    }

    /// `Err` with the rendered report when the object fails.
    pub fn check(&self, object: &dyn Target) -> Result<(), ValidationError> {
        self.validate(object).into_result()
    }

    /// Evaluates only the conditions on `member`; every other leaf passes.
    ///
    /// A condition counts as being on `member` when `member` is a prefix of
    /// its path: selecting `a` also re-checks `a.b` and `size of a`, and
    /// `member("items").all()` selects every element of `items`.
    pub fn validate_member(&self, object: &dyn Target, member: &Member) -> Outcome {
        self.run(object, Filter::Member(member))
    }

    /// Evaluates the rules on `member` as if `candidate` were stored there.
    /// The object itself is not modified.
    pub fn prevalidate(
        &self,
        object: &dyn Target,
        member: &Member,
        candidate: &dyn Target,
    ) -> Outcome {
        self.run(
            object,
            Filter::Candidate {
                member,
                candidate,
                strict_any: false,
            },
        )
    }

    /// Like [`prevalidate`](Self::prevalidate), but an `ANY` over the
    /// member's container only succeeds through the candidate itself.
    pub fn prevalidate_strict_any(
        &self,
        object: &dyn Target,
        member: &Member,
        candidate: &dyn Target,
    ) -> Outcome {
        self.run(
            object,
            Filter::Candidate {
                member,
                candidate,
                strict_any: true,
            },
        )
    }

    fn run(&self, object: &dyn Target, filter: Filter<'_>) -> Outcome {
        let span = debug_span!(
            "validate",
            locale = self.locale.name(),
            nodes = self.root.size()
        );
        let _entered = span.enter();

        let reporter = RefCell::new(Reporter::new(&self.locale));
        let status = {
            let builder = AdapterBuilder::new(&self.config, &self.properties).reporting(&reporter);
            let builder = match filter {
                Filter::Everything => builder,
                Filter::Member(member) => builder.single_member(member),
                Filter::Candidate {
                    member,
                    candidate,
                    strict_any,
                } => builder.prevalidation(member, candidate, strict_any),
            };
            let chain = builder.build();
            chain.adapter(object).validate_node(&self.root)
        };
        let report = reporter.into_inner().finish();

        debug!(
            %status,
            failed_members = report.failed_members.len(),
            "validation finished"
        );

        Outcome {
            status,
            text: report.text,
            failed_members: report.failed_members,
        }
    }
}
