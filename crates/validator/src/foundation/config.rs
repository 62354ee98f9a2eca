//! Evaluation configuration
//!
//! Controls how the engine treats members that do not exist, what `ALL` over
//! an empty container means, and how deep tree aggregations may descend.

use serde::{Deserialize, Serialize};

use crate::foundation::{RuleError, Status};

/// How missing members are handled before a leaf is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExistencePolicy {
    /// Resolve directly; a failed lookup degrades to `Ignore`.
    Optimistic,
    /// Check existence before every leaf; a missing member yields `Ignore`.
    #[default]
    Safe,
    /// Check existence before every leaf; a missing member fails with
    /// "<member> must exist".
    Abort,
}

impl ExistencePolicy {
    fn parse(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "optimistic" => Some(Self::Optimistic),
            "safe" => Some(Self::Safe),
            "abort" => Some(Self::Abort),
            _ => None,
        }
    }
}

/// Configuration for one [`Validator`](crate::Validator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    pub existence: ExistencePolicy,
    /// Status of `ALL` over an empty container.
    pub all_empty: Status,
    /// Maximum depth below the root visited by tree aggregations.
    pub max_tree_depth: Option<usize>,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            existence: ExistencePolicy::Safe,
            all_empty: Status::Success,
            max_tree_depth: None,
        }
    }
}

impl EvaluationConfig {
    /// Missing members fail with a canned "must exist" message.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            existence: ExistencePolicy::Abort,
            ..Self::default()
        }
    }

    /// No existence checks; anything unresolvable is ignored.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            existence: ExistencePolicy::Optimistic,
            ..Self::default()
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_existence(mut self, existence: ExistencePolicy) -> Self {
        self.existence = existence;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_all_empty(mut self, status: Status) -> Self {
        self.all_empty = status;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_max_tree_depth(mut self, depth: usize) -> Self {
        self.max_tree_depth = Some(depth);
        self
    }

    /// Parses a JSON document; missing fields take their default.
    pub fn from_json(json: &str) -> Result<Self, RuleError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads `VERDICT_EXISTENCE`, `VERDICT_ALL_EMPTY` and
    /// `VERDICT_MAX_TREE_DEPTH` on top of the defaults.
    pub fn from_env() -> Result<Self, RuleError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, RuleError> {
        let mut config = Self::default();

        if let Some(value) = lookup("VERDICT_EXISTENCE") {
            config.existence =
                ExistencePolicy::parse(&value).ok_or_else(|| RuleError::InvalidEnv {
                    variable: "VERDICT_EXISTENCE",
                    value: value.clone(),
                })?;
        }

        if let Some(value) = lookup("VERDICT_ALL_EMPTY") {
            config.all_empty = match value.trim().to_ascii_lowercase().as_str() {
                "success" => Status::Success,
                "fail" => Status::Fail,
                "ignore" => Status::Ignore,
                _ => {
                    return Err(RuleError::InvalidEnv {
                        variable: "VERDICT_ALL_EMPTY",
                        value,
                    });
                }
            };
        }

        if let Some(value) = lookup("VERDICT_MAX_TREE_DEPTH") {
            let depth = value.trim().parse().map_err(|_| RuleError::InvalidEnv {
                variable: "VERDICT_MAX_TREE_DEPTH",
                value: value.clone(),
            })?;
            config.max_tree_depth = Some(depth);
        }

        Ok(config)
    }
}
