//! Evaluation coefficients handed to move generation and scoring.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseWeightsError {
    #[error("no weights given")]
    Empty,
    #[error("invalid weight `{0}`")]
    InvalidNumber(String),
}

/// An ordered list of heuristic weights. Each game decides what the
/// individual slots mean; missing slots read as zero.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Weights(Vec<f64>);

impl Weights {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn get(&self, index: usize) -> f64 {
        self.0.get(index).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl From<Vec<f64>> for Weights {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl FromStr for Weights {
    type Err = ParseWeightsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(ParseWeightsError::Empty);
        }

        s.split(',')
            .map(|part| {
                let part = part.trim();
                part.parse::<f64>()
                    .ok()
                    .filter(|value| value.is_finite())
                    .ok_or_else(|| ParseWeightsError::InvalidNumber(part.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl fmt::Display for Weights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|w| w.to_string()).collect();
        write!(f, "{}", parts.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_weights() {
        let weights: Weights = "1, 10.5,-2".parse().unwrap();
        assert_eq!(weights.as_slice(), &[1.0, 10.5, -2.0]);
        assert_eq!(weights.to_string(), "1,10.5,-2");
    }

    #[test]
    fn test_parse_weights_rejects_garbage() {
        assert_eq!("".parse::<Weights>(), Err(ParseWeightsError::Empty));
        assert_eq!(
            "1,abc".parse::<Weights>(),
            Err(ParseWeightsError::InvalidNumber("abc".to_string()))
        );
        assert_eq!(
            "1,NaN".parse::<Weights>(),
            Err(ParseWeightsError::InvalidNumber("NaN".to_string()))
        );
    }

    #[test]
    fn test_missing_weight_reads_as_zero() {
        let weights = Weights::new(vec![3.0]);
        assert_eq!(weights.get(0), 3.0);
        assert_eq!(weights.get(5), 0.0);
    }
}
