//! Standard vs. mitigated bound rows.

use crate::bounds::{PerformParamList, PerformParameter};
use crate::error::Result;
use crate::optimize::{BoundObjective, OptimizationResult, Optimizer, SearchRegion};
use crate::setting::Setting;
use serde::Serialize;
use snc_config::{OptMethod, StrategyConfig};
use tracing::debug;

const THETA_BOUNDS: (f64, f64) = (0.1, 5.0);
const L_BOUNDS: (f64, f64) = (1.0, 6.0);
const THETA_START: f64 = 0.5;
const L_START: f64 = 2.0;
const P_BOUNDS: (f64, f64) = (1.1, 10.0);
const P_START: f64 = 2.0;

/// Optimized standard and mitigated bound for one performance value.
///
/// Infeasible bounds stay `f64::INFINITY` (serialized as `null`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundComparison {
    pub value: f64,
    pub standard_bound: f64,
    pub mitigated_bound: f64,
}

impl BoundComparison {
    /// `standard / mitigated`, when both bounds are finite.
    pub fn improvement(&self) -> Option<f64> {
        if self.standard_bound.is_finite()
            && self.mitigated_bound.is_finite()
            && self.mitigated_bound != 0.0
        {
            Some(self.standard_bound / self.mitigated_bound)
        } else {
            None
        }
    }
}

/// `θ`, then `l` when mitigated, then one Hölder exponent per split.
fn region(method: OptMethod, mitigated: bool, splits: usize) -> SearchRegion {
    let split_bounds = std::iter::repeat(P_BOUNDS).take(splits);
    let split_starts = std::iter::repeat(P_START).take(splits);
    match (method.needs_bounds(), mitigated) {
        (true, false) => SearchRegion::Bounds([THETA_BOUNDS].into_iter().chain(split_bounds).collect()),
        (true, true) => {
            SearchRegion::Bounds([THETA_BOUNDS, L_BOUNDS].into_iter().chain(split_bounds).collect())
        }
        (false, false) => SearchRegion::Start([THETA_START].into_iter().chain(split_starts).collect()),
        (false, true) => {
            SearchRegion::Start([THETA_START, L_START].into_iter().chain(split_starts).collect())
        }
    }
}

fn run(
    objective: &BoundObjective<'_>,
    method: OptMethod,
    mitigated: bool,
    splits: usize,
) -> Result<OptimizationResult> {
    Optimizer::new(objective)
        .with_warnings(false)
        .optimize(&StrategyConfig::default_for(method), &region(method, mitigated, splits))
}

/// Minimize both bounds of `setting` with the default config of `method`.
pub fn compute_improvement(setting: &dyn Setting, method: OptMethod) -> Result<BoundComparison> {
    let splits = setting.split_parameters();
    let standard = run(&BoundObjective::standard(setting), method, false, splits)?;
    let mitigated = run(&BoundObjective::mitigated(setting), method, true, splits)?;
    let row = BoundComparison {
        value: setting.perform_param().value(),
        standard_bound: standard.best_value,
        mitigated_bound: mitigated.best_value,
    };
    debug!(
        %method,
        value = row.value,
        standard = row.standard_bound,
        mitigated = row.mitigated_bound,
        "bound comparison"
    );
    Ok(row)
}

/// One comparison row per value of `params`.
pub fn compare_over_params<S, F>(
    build: F,
    params: &PerformParamList,
    method: OptMethod,
) -> Result<Vec<BoundComparison>>
where
    S: Setting,
    F: Fn(PerformParameter) -> S,
{
    params
        .iter()
        .map(|param| compute_improvement(&build(param), method))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arrivals::DM1;
    use crate::bounds::PerformMetric;
    use crate::server::ConstantRateServer;
    use crate::setting::SingleServerPerform;
    use std::sync::Arc;

    fn setting(param: PerformParameter) -> SingleServerPerform {
        SingleServerPerform::new(
            Arc::new(DM1::new(1.0, 1).unwrap()),
            Arc::new(ConstantRateServer::new(10.0).unwrap()),
            param,
        )
    }

    #[test]
    fn test_improvement_ratio() {
        let row = BoundComparison {
            value: 4.0,
            standard_bound: 0.5,
            mitigated_bound: 0.25,
        };
        assert_eq!(row.improvement(), Some(2.0));
        let row = BoundComparison {
            mitigated_bound: f64::INFINITY,
            ..row
        };
        assert_eq!(row.improvement(), None);
    }

    #[test]
    fn test_grid_mitigated_never_worse() {
        let param = PerformParameter::new(PerformMetric::DelayProb, 6.0).unwrap();
        let row = compute_improvement(&setting(param), OptMethod::GridSearch).unwrap();
        assert_eq!(row.value, 6.0);
        assert!(row.standard_bound.is_finite());
        assert!(row.mitigated_bound <= row.standard_bound * (1.0 + 1e-12));
        assert!(row.improvement().unwrap() >= 1.0 - 1e-12);
    }

    #[test]
    fn test_rows_follow_param_list() {
        let params = PerformParamList::new(PerformMetric::DelayProb, vec![2.0, 4.0, 6.0]).unwrap();
        let rows = compare_over_params(setting, &params, OptMethod::PatternSearch).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows.iter().map(|r| r.value).collect::<Vec<_>>(), vec![2.0, 4.0, 6.0]);
        // Violation probability falls as the delay target grows.
        assert!(rows[2].standard_bound < rows[0].standard_bound);
    }

    #[test]
    fn test_region_appends_holder_exponents() {
        assert_eq!(
            region(OptMethod::GridSearch, true, 1),
            SearchRegion::Bounds(vec![THETA_BOUNDS, L_BOUNDS, P_BOUNDS])
        );
        assert_eq!(
            region(OptMethod::NelderMead, false, 1),
            SearchRegion::Start(vec![THETA_START, P_START])
        );
        assert_eq!(
            region(OptMethod::PatternSearch, true, 0),
            SearchRegion::Start(vec![THETA_START, L_START])
        );
    }

    #[test]
    fn test_holder_search_row_is_finite() {
        let param = PerformParameter::new(PerformMetric::DelayProb, 6.0).unwrap();
        let dependent = SingleServerPerform::new(
            Arc::new(DM1::new(4.0, 1).unwrap()),
            Arc::new(ConstantRateServer::new(40.0).unwrap()),
            param,
        )
        .with_holder_search();
        let row = compute_improvement(&dependent, OptMethod::PatternSearch).unwrap();
        assert!(row.standard_bound.is_finite());
        assert!(row.mitigated_bound.is_finite());
    }

    #[test]
    fn test_unstable_setting_gives_infinite_row() {
        let param = PerformParameter::new(PerformMetric::DelayProb, 2.0).unwrap();
        let unstable = SingleServerPerform::new(
            Arc::new(DM1::new(0.5, 1).unwrap()),
            Arc::new(ConstantRateServer::new(1.0).unwrap()),
            param,
        );
        let row = compute_improvement(&unstable, OptMethod::NelderMead).unwrap();
        assert_eq!(row.standard_bound, f64::INFINITY);
        assert_eq!(row.improvement(), None);
    }
}
