use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::tolerance::ToleranceRule;

// ---------------------------------------------------------------------------
// Operation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    #[default]
    Sum,
    Difference,
    Product,
    Quotient,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Sum,
        Operation::Difference,
        Operation::Product,
        Operation::Quotient,
    ];

    /// How this operation interprets the tolerance.
    pub fn tolerance_rule(self) -> ToleranceRule {
        match self {
            Self::Sum | Self::Difference => ToleranceRule::Absolute,
            Self::Product => ToleranceRule::RelativeToTarget,
            Self::Quotient => ToleranceRule::RelativeCloseness,
        }
    }

    /// Infix symbol used when rendering a solution as a formula.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Sum => "+",
            Self::Difference => "−",
            Self::Product => "×",
            Self::Quotient => "÷",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sum => write!(f, "sum"),
            Self::Difference => write!(f, "difference"),
            Self::Product => write!(f, "product"),
            Self::Quotient => write!(f, "quotient"),
        }
    }
}

impl std::str::FromStr for Operation {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sum" => Ok(Self::Sum),
            "difference" | "diff" => Ok(Self::Difference),
            "product" => Ok(Self::Product),
            "quotient" => Ok(Self::Quotient),
            other => Err(SearchError::ConfigValidation(format!(
                "unknown operation '{other}' (expected sum, difference, product or quotient)"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    #[serde(default)]
    pub operation: Operation,
    /// Absolute for sum/difference, relative for product/quotient.
    #[serde(default)]
    pub tolerance: f64,
    /// Largest subset the sum search will build. `None` = unbounded.
    #[serde(default)]
    pub max_subset_size: Option<usize>,
    /// Candidate evaluations allowed per target. `None` = unbounded.
    #[serde(default)]
    pub max_nodes: Option<u64>,
    /// Search targets on the rayon pool.
    #[serde(default)]
    pub parallel: bool,
    #[serde(default)]
    pub targets: Vec<f64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            operation: Operation::Sum,
            tolerance: 0.0,
            max_subset_size: None,
            max_nodes: None,
            parallel: false,
            targets: Vec::new(),
        }
    }
}

/// Search limits copied out of the config for the strategies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    pub max_subset_size: Option<usize>,
    pub max_nodes: Option<u64>,
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl SearchConfig {
    pub fn new(operation: Operation, tolerance: f64) -> Self {
        Self {
            operation,
            tolerance,
            ..Self::default()
        }
    }

    pub fn from_toml(input: &str) -> Result<Self, SearchError> {
        let config: SearchConfig =
            toml::from_str(input).map_err(|e| SearchError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(SearchError::InvalidTolerance(self.tolerance));
        }

        if self.max_subset_size == Some(0) {
            return Err(SearchError::ConfigValidation(
                "max_subset_size must be at least 1".into(),
            ));
        }

        if self.max_nodes == Some(0) {
            return Err(SearchError::ConfigValidation(
                "max_nodes must be at least 1".into(),
            ));
        }

        for (index, &value) in self.targets.iter().enumerate() {
            if !value.is_finite() {
                return Err(SearchError::NonFiniteTarget { index, value });
            }
        }

        Ok(())
    }

    pub fn limits(&self) -> SearchLimits {
        SearchLimits {
            max_subset_size: self.max_subset_size,
            max_nodes: self.max_nodes,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
