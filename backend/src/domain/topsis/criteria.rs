//! Per-criterion weights and impact directions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Splits a comma-separated form value into trimmed, non-empty tokens.
pub fn tokenize(input: &str) -> Vec<&str> {
    input
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect()
}

/// Preference direction of a criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    /// Larger values are better.
    Benefit,
    /// Smaller values are better.
    Cost,
}

impl Impact {
    /// Returns the form symbol (`+` or `-`).
    pub fn symbol(&self) -> &'static str {
        match self {
            Impact::Benefit => "+",
            Impact::Cost => "-",
        }
    }

    /// Returns the opposite direction.
    pub fn reversed(&self) -> Self {
        match self {
            Impact::Benefit => Impact::Cost,
            Impact::Cost => Impact::Benefit,
        }
    }
}

impl FromStr for Impact {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Impact::Benefit),
            "-" => Ok(Impact::Cost),
            other => Err(ValidationError::InvalidImpact {
                token: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One impact direction per criterion column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Impact>")]
pub struct ImpactVector(Vec<Impact>);

impl TryFrom<Vec<Impact>> for ImpactVector {
    type Error = ValidationError;

    fn try_from(impacts: Vec<Impact>) -> Result<Self, Self::Error> {
        if impacts.is_empty() {
            return Err(ValidationError::missing_field("impacts"));
        }
        Ok(Self(impacts))
    }
}

impl ImpactVector {
    pub fn new(impacts: Vec<Impact>) -> Self {
        Self(impacts)
    }

    /// Parses a comma-separated list of `+`/`-` tokens.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        Self::from_tokens(&tokenize(input))
    }

    /// Builds from pre-split tokens; each must be exactly `+` or `-`.
    pub fn from_tokens(tokens: &[&str]) -> Result<Self, ValidationError> {
        if tokens.is_empty() {
            return Err(ValidationError::missing_field("impacts"));
        }
        tokens
            .iter()
            .map(|token| token.parse::<Impact>())
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// Flips every direction (benefit <-> cost).
    pub fn reversed(&self) -> Self {
        Self(self.0.iter().map(Impact::reversed).collect())
    }

    pub fn as_slice(&self) -> &[Impact] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One positive weight per criterion column. Need not sum to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>")]
pub struct WeightVector(Vec<f64>);

impl TryFrom<Vec<f64>> for WeightVector {
    type Error = ValidationError;

    fn try_from(weights: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(weights)
    }
}

impl WeightVector {
    /// Creates a weight vector, rejecting non-finite and non-positive entries.
    pub fn new(weights: Vec<f64>) -> Result<Self, ValidationError> {
        if weights.is_empty() {
            return Err(ValidationError::missing_field("weights"));
        }
        for weight in &weights {
            Self::check(*weight, &weight.to_string())?;
        }
        Ok(Self(weights))
    }

    /// Parses a comma-separated list of numbers.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        Self::from_tokens(&tokenize(input))
    }

    /// Builds from pre-split tokens.
    pub fn from_tokens(tokens: &[&str]) -> Result<Self, ValidationError> {
        if tokens.is_empty() {
            return Err(ValidationError::missing_field("weights"));
        }
        let mut weights = Vec::with_capacity(tokens.len());
        for token in tokens {
            let weight = token
                .parse::<f64>()
                .map_err(|_| ValidationError::invalid_weight(*token, "not a number"))?;
            Self::check(weight, token)?;
            weights.push(weight);
        }
        Ok(Self(weights))
    }

    fn check(weight: f64, token: &str) -> Result<(), ValidationError> {
        if !weight.is_finite() {
            return Err(ValidationError::invalid_weight(token, "must be finite"));
        }
        if weight <= 0.0 {
            return Err(ValidationError::invalid_weight(token, "must be positive"));
        }
        Ok(())
    }

    /// Multiplies every weight by `factor`.
    pub fn scaled(&self, factor: f64) -> Result<Self, ValidationError> {
        Self::new(self.0.iter().map(|w| w * factor).collect())
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
