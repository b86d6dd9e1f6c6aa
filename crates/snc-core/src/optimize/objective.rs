//! Objective functions seen by the optimizers.

use crate::setting::Setting;
use tracing::trace;

/// A function to minimize.
///
/// Infeasible points evaluate to `f64::INFINITY`; implementations never
/// return NaN.
pub trait Objective: Sync {
    fn evaluate(&self, param: &[f64]) -> f64;

    /// Required length of the parameter vector, if fixed.
    fn dimension(&self) -> Option<usize> {
        None
    }

    /// Cheap feasibility test run before any search. `false` short-circuits
    /// to the infeasible result.
    fn precheck(&self) -> bool {
        true
    }
}

impl<F> Objective for F
where
    F: Fn(&[f64]) -> f64 + Sync,
{
    fn evaluate(&self, param: &[f64]) -> f64 {
        sanitize(self(param))
    }
}

/// Map NaN and non-finite values onto the infeasibility sentinel.
#[inline]
pub fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        f64::INFINITY
    }
}

/// Which bound of a setting is minimized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundVariant {
    /// `[θ]`, plus searched exponents
    Standard,
    /// `[θ, l]`, plus searched exponents
    Mitigated,
}

/// A setting's bound as an objective.
#[derive(Clone, Copy)]
pub struct BoundObjective<'a> {
    setting: &'a dyn Setting,
    variant: BoundVariant,
}

impl<'a> BoundObjective<'a> {
    pub fn new(setting: &'a dyn Setting, variant: BoundVariant) -> Self {
        Self { setting, variant }
    }

    pub fn standard(setting: &'a dyn Setting) -> Self {
        Self::new(setting, BoundVariant::Standard)
    }

    pub fn mitigated(setting: &'a dyn Setting) -> Self {
        Self::new(setting, BoundVariant::Mitigated)
    }

    pub fn variant(&self) -> BoundVariant {
        self.variant
    }
}

impl Objective for BoundObjective<'_> {
    fn evaluate(&self, param: &[f64]) -> f64 {
        let result = match self.variant {
            BoundVariant::Standard => self.setting.bound(param),
            BoundVariant::Mitigated => self.setting.mitigated_bound(param),
        };
        match result {
            Ok(value) => sanitize(value),
            Err(reason) => {
                trace!(?param, %reason, "parameter out of bounds");
                f64::INFINITY
            }
        }
    }

    fn dimension(&self) -> Option<usize> {
        Some(match self.variant {
            BoundVariant::Standard => self.setting.standard_dimension(),
            BoundVariant::Mitigated => self.setting.mitigated_dimension(),
        })
    }

    fn precheck(&self) -> bool {
        self.setting.is_stable_on_average()
    }
}
