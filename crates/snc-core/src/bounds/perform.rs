//! Performance metrics and their target values.

use crate::error::{NcError, Result};
use serde::{Deserialize, Serialize};
use snc_config::ValidationError;
use std::fmt;

/// Quantity a bound is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformMetric {
    /// Delay reached with violation probability `value`.
    Delay,
    /// Probability that the delay exceeds `value`.
    DelayProb,
    /// Backlog reached with violation probability `value`.
    Backlog,
    /// Probability that the backlog exceeds `value`.
    BacklogProb,
    /// MGF bound of the departures over an interval of length `value`.
    Output,
}

impl PerformMetric {
    pub const ALL: &'static [PerformMetric] = &[
        PerformMetric::Delay,
        PerformMetric::DelayProb,
        PerformMetric::Backlog,
        PerformMetric::BacklogProb,
        PerformMetric::Output,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PerformMetric::Delay => "delay",
            PerformMetric::DelayProb => "delay_prob",
            PerformMetric::Backlog => "backlog",
            PerformMetric::BacklogProb => "backlog_prob",
            PerformMetric::Output => "output",
        }
    }

    /// Whether the target value is a violation probability.
    pub fn takes_probability(&self) -> bool {
        matches!(self, PerformMetric::Delay | PerformMetric::Backlog)
    }
}

impl fmt::Display for PerformMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PerformMetric {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        PerformMetric::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == normalized)
            .ok_or_else(|| ValidationError::UnknownName {
                kind: "performance metric",
                name: s.to_string(),
            })
    }
}

fn check_value(metric: PerformMetric, value: f64) -> Result<f64> {
    let ok = if metric.takes_probability() {
        value > 0.0 && value < 1.0
    } else {
        value.is_finite() && value >= 0.0
    };
    if !ok {
        return Err(NcError::InvalidParameter {
            process: "PerformParameter",
            field: "value",
            value,
            reason: if metric.takes_probability() {
                "violation probability must be in (0, 1)"
            } else {
                "must be finite and >= 0"
            },
        });
    }
    Ok(value)
}

/// A metric together with its target value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PerformParameter {
    metric: PerformMetric,
    value: f64,
}

impl PerformParameter {
    pub fn new(metric: PerformMetric, value: f64) -> Result<Self> {
        Ok(Self {
            metric,
            value: check_value(metric, value)?,
        })
    }

    pub fn metric(&self) -> PerformMetric {
        self.metric
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl fmt::Display for PerformParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.metric, self.value)
    }
}

/// One metric swept over several target values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformParamList {
    metric: PerformMetric,
    values: Vec<f64>,
}

impl PerformParamList {
    pub fn new(metric: PerformMetric, values: Vec<f64>) -> Result<Self> {
        for &value in &values {
            check_value(metric, value)?;
        }
        Ok(Self { metric, values })
    }

    pub fn metric(&self) -> PerformMetric {
        self.metric
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<PerformParameter> {
        self.values.get(i).map(|&value| PerformParameter {
            metric: self.metric,
            value,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = PerformParameter> + '_ {
        self.values.iter().map(move |&value| PerformParameter {
            metric: self.metric,
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_parse() {
        assert_eq!("delay_prob".parse::<PerformMetric>().unwrap(), PerformMetric::DelayProb);
        assert_eq!("Backlog-Prob".parse::<PerformMetric>().unwrap(), PerformMetric::BacklogProb);
        let err = "jitter".parse::<PerformMetric>().unwrap_err();
        assert_eq!(err.code(), 64);
    }

    #[test]
    fn test_probability_metrics_validate_range() {
        assert!(PerformParameter::new(PerformMetric::Delay, 1e-3).is_ok());
        assert!(PerformParameter::new(PerformMetric::Delay, 1.0).is_err());
        assert!(PerformParameter::new(PerformMetric::Backlog, 0.0).is_err());
    }

    #[test]
    fn test_time_metrics_validate_range() {
        assert!(PerformParameter::new(PerformMetric::Output, 0.0).is_ok());
        assert!(PerformParameter::new(PerformMetric::DelayProb, -1.0).is_err());
        assert!(PerformParameter::new(PerformMetric::BacklogProb, f64::INFINITY).is_err());
    }

    #[test]
    fn test_param_list() {
        let list = PerformParamList::new(PerformMetric::Output, vec![4.0, 5.0, 6.0]).unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list.get(1).unwrap().value(), 5.0);
        assert!(list.get(3).is_none());
        assert_eq!(list.iter().count(), 3);
        assert!(PerformParamList::new(PerformMetric::Delay, vec![0.1, 2.0]).is_err());
    }
}
