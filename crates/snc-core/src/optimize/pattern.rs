use super::{Objective, Probe};
use snc_config::PatternSearchConfig;
use tracing::trace;

/// Coordinate pattern search.
///
/// Polls `x ± delta e_i` for each coordinate and moves to the first strictly
/// better neighbour. A round without any move contracts the step; the search
/// ends once the step drops below `delta_min`. Returns the final point.
pub(super) fn search<O: Objective + ?Sized>(
    probe: &mut Probe<'_, O>,
    start: &[f64],
    config: &PatternSearchConfig,
) -> (Vec<f64>, f64) {
    let mut x = start.to_vec();
    let mut fx = probe.eval(&x);
    let mut delta = config.delta;
    let mut candidate = x.clone();

    for iteration in 0..config.max_iterations {
        if delta < config.delta_min {
            break;
        }
        let mut moved = false;
        for i in 0..x.len() {
            for step in [delta, -delta] {
                candidate.copy_from_slice(&x);
                candidate[i] += step;
                let value = probe.eval(&candidate);
                if value < fx {
                    x.copy_from_slice(&candidate);
                    fx = value;
                    moved = true;
                    break;
                }
            }
        }
        if !moved {
            delta *= config.contraction;
            trace!(iteration, delta, "pattern contracted");
        }
    }
    (x, fx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PatternSearchConfig {
        PatternSearchConfig {
            delta: 1.0,
            delta_min: 1e-4,
            ..Default::default()
        }
    }

    #[test]
    fn test_converges_on_quadratic_bowl() {
        let f = |x: &[f64]| (x[0] - 0.3).powi(2) + 2.0 * (x[1] + 1.2).powi(2);
        let mut probe = Probe::new(&f);
        let (x, fx) = search(&mut probe, &[2.0, 2.0], &config());
        assert!((x[0] - 0.3).abs() < 1e-3, "{x:?}");
        assert!((x[1] + 1.2).abs() < 1e-3, "{x:?}");
        assert!(fx < 1e-6);
    }

    #[test]
    fn test_walks_out_of_infeasible_start() {
        // Feasible only right of 1; start left of the wall.
        let f = |x: &[f64]| if x[0] <= 1.0 { f64::INFINITY } else { x[0] };
        let mut probe = Probe::new(&f);
        let (x, fx) = search(&mut probe, &[0.5], &config());
        assert!(fx.is_finite());
        assert!(x[0] > 1.0 && x[0] < 1.01, "{x:?}");
    }

    #[test]
    fn test_iteration_cap() {
        let f = |x: &[f64]| -x[0];
        let mut probe = Probe::new(&f);
        let cfg = PatternSearchConfig {
            max_iterations: 5,
            ..config()
        };
        let (x, _) = search(&mut probe, &[0.0], &cfg);
        assert_eq!(x[0], 5.0);
        assert_eq!(probe.evaluations, 6);
    }
}
