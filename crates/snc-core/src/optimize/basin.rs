use super::{metropolis, pattern, perturb, seeded_rng, Objective, Probe};
use snc_config::BasinHoppingConfig;
use tracing::trace;

/// Basin hopping: random hop, local pattern refinement, Metropolis
/// acceptance of the refined basin.
pub(super) fn search<O: Objective + ?Sized>(
    probe: &mut Probe<'_, O>,
    start: &[f64],
    config: &BasinHoppingConfig,
) {
    let mut rng = seeded_rng(config.seed);
    let (mut x, mut fx) = pattern::search(probe, start, &config.local);

    for hop in 0..config.hops {
        let jumped = perturb(&mut rng, &x, config.step_size);
        let (candidate, value) = pattern::search(probe, &jumped, &config.local);
        if metropolis(&mut rng, fx, value, config.temperature) {
            trace!(hop, value, "basin accepted");
            x = candidate;
            fx = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snc_config::PatternSearchConfig;

    #[test]
    fn test_escapes_local_minimum() {
        // Local minimum near x = 0.96 (f ≈ 0.69), global minimum near x = -1.04 (f ≈ 0.09).
        let f = |x: &[f64]| {
            let v = x[0];
            (v * v - 1.0).powi(2) + 0.3 * v + 0.4
        };
        let config = BasinHoppingConfig {
            hops: 60,
            step_size: 1.5,
            temperature: 0.5,
            local: PatternSearchConfig {
                delta: 0.25,
                delta_min: 1e-4,
                ..Default::default()
            },
            seed: Some(3),
        };
        let mut probe = Probe::new(&f);
        search(&mut probe, &[1.0], &config);
        let (x, _) = probe.best.unwrap();
        assert!(x[0] < 0.0, "stuck at {x:?}");
    }
}
