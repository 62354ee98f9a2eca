//! Composition of adapter chains

use std::cell::RefCell;

use crate::adapter::{
    Chain, ExistenceGuard, Layer, PrevalidationLayer, ReportingLayer, SingleMemberLayer,
};
use crate::foundation::{EvaluationConfig, Target};
use crate::path::Member;
use crate::property::PropertyRegistry;
use crate::report::Reporter;

/// Builds a [`Chain`] with layers in a fixed order, outermost first:
///
/// 1. custom layers, in insertion order
/// 2. the member filter (single-member or prevalidation)
/// 3. the existence guard (`Safe` / `Abort` policies only)
/// 4. reporting
///
/// # Examples
///
/// ```rust,ignore
/// let chain = AdapterBuilder::new(&config, &properties)
///     .single_member(&member("field1"))
///     .reporting(&reporter)
///     .build();
/// let status = chain.adapter(&object).validate_node(&rule);
/// ```
pub struct AdapterBuilder<'a> {
    config: &'a EvaluationConfig,
    properties: &'a PropertyRegistry,
    custom: Vec<Box<dyn Layer + 'a>>,
    filter: Option<Box<dyn Layer + 'a>>,
    reporting: Option<Box<dyn Layer + 'a>>,
}

impl<'a> AdapterBuilder<'a> {
    pub fn new(config: &'a EvaluationConfig, properties: &'a PropertyRegistry) -> Self {
        Self {
            config,
            properties,
            custom: Vec::new(),
            filter: None,
            reporting: None,
        }
    }

    /// Only rules on `member` can fail.
    #[must_use = "builder methods must be chained or built"]
    pub fn single_member(mut self, member: &Member) -> Self {
        self.filter = Some(Box::new(SingleMemberLayer::new(member)));
        self
    }

    /// Evaluates as if `candidate` were stored at `member`.
    #[must_use = "builder methods must be chained or built"]
    pub fn prevalidation(
        mut self,
        member: &Member,
        candidate: &'a dyn Target,
        strict_any: bool,
    ) -> Self {
        let layer = PrevalidationLayer::new(member, candidate).strict_any(strict_any);
        self.filter = Some(Box::new(layer));
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn reporting<'l: 'a>(mut self, reporter: &'a RefCell<Reporter<'l>>) -> Self {
        self.reporting = Some(Box::new(ReportingLayer::new(reporter)));
        self
    }

    /// Adds a custom layer outside the built-in ones.
    #[must_use = "builder methods must be chained or built"]
    pub fn layer(mut self, layer: impl Layer + 'a) -> Self {
        self.custom.push(Box::new(layer));
        self
    }

    pub fn build(self) -> Chain<'a> {
        let mut layers = self.custom;
        layers.extend(self.filter);
        if let Some(guard) = ExistenceGuard::for_policy(self.config.existence) {
            layers.push(Box::new(guard));
        }
        layers.extend(self.reporting);
        Chain::new(layers, self.config, self.properties)
    }
}
