//! Operation kind configuration.
//!
//! Each kind is configured once, through [`OperationKind::builder`], with its
//! neutral element, order key, simplification stages and binary rules. The
//! builder rejects configurations that could only fail later.

use std::fmt;
use std::sync::Arc;

use termalg_core::{ConfigError, Expr, Head, Kind, OperationClass, Operands, OrderKey};

use crate::binary::BinaryRule;
use crate::pipeline::{self, ConstructOptions};
use crate::rules::Simplification;

/// The static configuration of an operation kind.
pub struct OperationKind {
    name: Arc<str>,
    neutral_element: Option<Expr>,
    order_key: Option<OrderKey>,
    simplifications: Vec<Simplification>,
    binary_rules: Vec<BinaryRule>,
}

impl OperationKind {
    /// Starts configuring a kind named `name`.
    #[must_use]
    pub fn builder(name: &str) -> OperationKindBuilder {
        OperationKindBuilder {
            name: Arc::from(name),
            neutral_element: None,
            order_key: None,
            simplifications: Vec::new(),
            binary_rules: Vec::new(),
        }
    }

    /// Returns the kind name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn shared_name(&self) -> Arc<str> {
        self.name.clone()
    }

    /// Returns the neutral element, if any.
    #[must_use]
    pub fn neutral_element(&self) -> Option<&Expr> {
        self.neutral_element.as_ref()
    }

    /// Returns the order key, if any.
    #[must_use]
    pub fn order_key(&self) -> Option<OrderKey> {
        self.order_key
    }

    /// Returns the stages in pipeline order.
    #[must_use]
    pub fn simplifications(&self) -> &[Simplification] {
        &self.simplifications
    }

    /// Returns the binary rules in priority order.
    #[must_use]
    pub fn binary_rules(&self) -> &[BinaryRule] {
        &self.binary_rules
    }

    /// Returns true if the kind sorts its operands.
    #[must_use]
    pub fn is_orderless(&self) -> bool {
        self.simplifications.contains(&Simplification::Reorder)
    }

    /// Returns every head referenced by the binary rule patterns.
    #[must_use]
    pub fn referenced_heads(&self) -> Vec<Head> {
        let mut heads: Vec<Head> = self
            .binary_rules
            .iter()
            .flat_map(|rule| rule.pattern().heads())
            .collect();
        heads.sort();
        heads.dedup();
        heads
    }

    /// Returns the tag stored in composites of this kind.
    #[must_use]
    pub fn kind(self: &Arc<Self>) -> Kind {
        Kind::new(self.clone())
    }

    /// Constructs a canonical expression with default options.
    ///
    /// # Errors
    ///
    /// See [`pipeline::construct`].
    pub fn create(
        self: &Arc<Self>,
        operands: impl IntoIterator<Item = Expr>,
    ) -> Result<Expr, ConfigError> {
        pipeline::construct(self, operands, &ConstructOptions::default())
    }
}

impl OperationClass for OperationKind {
    fn name(&self) -> &str {
        &self.name
    }

    fn rebuild(&self, kind: &Kind, operands: Operands) -> Result<Expr, ConfigError> {
        pipeline::run(self, kind, operands, &ConstructOptions::default())
    }
}

impl fmt::Debug for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationKind")
            .field("name", &self.name)
            .field("neutral_element", &self.neutral_element)
            .field("order_key", &self.order_key.is_some())
            .field("simplifications", &self.simplifications)
            .field("binary_rules", &self.binary_rules.len())
            .finish()
    }
}

/// Builder for [`OperationKind`].
pub struct OperationKindBuilder {
    name: Arc<str>,
    neutral_element: Option<Expr>,
    order_key: Option<OrderKey>,
    simplifications: Vec<Simplification>,
    binary_rules: Vec<BinaryRule>,
}

impl OperationKindBuilder {
    /// Sets the neutral element.
    #[must_use]
    pub fn neutral_element(mut self, neutral: Expr) -> Self {
        self.neutral_element = Some(neutral);
        self
    }

    /// Sets the order key.
    #[must_use]
    pub fn order_key(mut self, key: OrderKey) -> Self {
        self.order_key = Some(key);
        self
    }

    /// Appends a stage.
    #[must_use]
    pub fn simplification(mut self, stage: Simplification) -> Self {
        self.simplifications.push(stage);
        self
    }

    /// Appends several stages in order.
    #[must_use]
    pub fn simplifications(mut self, stages: impl IntoIterator<Item = Simplification>) -> Self {
        self.simplifications.extend(stages);
        self
    }

    /// Appends a binary rule at the lowest priority so far.
    #[must_use]
    pub fn binary_rule(mut self, rule: BinaryRule) -> Self {
        self.binary_rules.push(rule);
        self
    }

    /// Appends several binary rules in priority order.
    #[must_use]
    pub fn binary_rules(mut self, rules: impl IntoIterator<Item = BinaryRule>) -> Self {
        self.binary_rules.extend(rules);
        self
    }

    /// Validates the configuration and freezes it.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingOrderKey`] if a reorder stage has no key
    /// - [`ConfigError::MissingNeutralElement`] if a filter-neutral stage has no neutral element
    /// - [`ConfigError::BinaryWithoutFlatten`] if the binary stage is not preceded by flatten
    /// - [`ConfigError::BinaryRuleArity`] if a binary pattern is not a pair
    /// - [`ConfigError::InconsistentWildcard`] if a pattern redeclares a wildcard differently
    pub fn build(self) -> Result<Arc<OperationKind>, ConfigError> {
        self.validate()?;
        Ok(Arc::new(OperationKind {
            name: self.name,
            neutral_element: self.neutral_element,
            order_key: self.order_key,
            simplifications: self.simplifications,
            binary_rules: self.binary_rules,
        }))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let kind = || self.name.to_string();
        let mut flattened = false;
        for stage in &self.simplifications {
            match stage {
                Simplification::Flatten => flattened = true,
                Simplification::Reorder if self.order_key.is_none() => {
                    return Err(ConfigError::MissingOrderKey {
                        kind: kind(),
                        stage: "reorder",
                    });
                }
                Simplification::FilterNeutral if self.neutral_element.is_none() => {
                    return Err(ConfigError::MissingNeutralElement { kind: kind() });
                }
                Simplification::MatchReplaceBinary if !flattened => {
                    return Err(ConfigError::BinaryWithoutFlatten { kind: kind() });
                }
                _ => {}
            }
        }

        for (index, rule) in self.binary_rules.iter().enumerate() {
            let arity = rule.pattern().arity().unwrap_or(1);
            if arity != 2 {
                return Err(ConfigError::BinaryRuleArity {
                    kind: kind(),
                    index,
                    arity,
                });
            }
            rule.pattern().check_wildcards()?;
        }
        Ok(())
    }
}
