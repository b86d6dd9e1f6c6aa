use super::{metropolis, perturb, seeded_rng, Objective, Probe};
use snc_config::SimulatedAnnealingConfig;

/// Simulated annealing with uniform proposals and geometric cooling.
///
/// The probe keeps the best point ever visited, which need not be the
/// final state of the chain.
pub(super) fn search<O: Objective + ?Sized>(
    probe: &mut Probe<'_, O>,
    start: &[f64],
    config: &SimulatedAnnealingConfig,
) {
    let mut rng = seeded_rng(config.seed);
    let mut x = start.to_vec();
    let mut fx = probe.eval(&x);
    let mut temperature = config.temp_start;

    for _ in 0..config.rep_max {
        let candidate = perturb(&mut rng, &x, config.search_radius);
        let value = probe.eval(&candidate);
        if metropolis(&mut rng, fx, value, temperature) {
            x = candidate;
            fx = value;
        }
        temperature *= config.cooling_factor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(seed: u64) -> SimulatedAnnealingConfig {
        SimulatedAnnealingConfig {
            rep_max: 400,
            temp_start: 1.0,
            cooling_factor: 0.97,
            search_radius: 0.5,
            seed: Some(seed),
        }
    }

    #[test]
    fn test_improves_on_start() {
        let f = |x: &[f64]| (x[0] - 2.0).powi(2);
        let mut probe = Probe::new(&f);
        search(&mut probe, &[-3.0], &config(7));
        let (_, best) = probe.best.clone().unwrap();
        assert!(best < 0.1, "best {best}");
        assert_eq!(probe.evaluations, 401);
    }

    #[test]
    fn test_seed_reproducible() {
        let f = |x: &[f64]| x[0].sin() + 0.1 * x[0] * x[0];
        let run = |seed| {
            let mut probe = Probe::new(&f);
            search(&mut probe, &[1.0], &config(seed));
            probe.best.unwrap()
        };
        assert_eq!(run(42), run(42));
    }
}
