use super::{seeded_rng, Objective, Probe};
use rand::Rng;
use snc_config::DifferentialEvolutionConfig;
use tracing::trace;

/// Smallest population that still leaves two distinct donors per member.
const MIN_POPULATION: usize = 4;

/// Differential evolution, best/1/bin.
///
/// The mutation constant is dithered uniformly in
/// `[mutation_min, mutation_max]` once per generation. Trial vectors are
/// clipped into the bounds. The search stops when the spread of the finite
/// population energies falls to `tolerance · |mean|` or after
/// `max_generations`.
pub(super) fn search<O: Objective + ?Sized>(
    probe: &mut Probe<'_, O>,
    bounds: &[(f64, f64)],
    config: &DifferentialEvolutionConfig,
) {
    let mut rng = seeded_rng(config.seed);
    let dim = bounds.len();
    let size = (config.population_factor * dim).max(MIN_POPULATION);

    let mut population: Vec<Vec<f64>> = (0..size)
        .map(|_| {
            bounds
                .iter()
                .map(|&(low, high)| low + rng.random::<f64>() * (high - low))
                .collect()
        })
        .collect();
    let mut energies: Vec<f64> = population.iter().map(|x| probe.eval(x)).collect();
    let mut best = argmin(&energies);

    let mut trial = vec![0.0; dim];
    for generation in 0..config.max_generations {
        let scale = if config.mutation_min < config.mutation_max {
            rng.random_range(config.mutation_min..=config.mutation_max)
        } else {
            config.mutation_min
        };

        for i in 0..size {
            let (r1, r2) = donors(&mut rng, size, i);
            let forced = rng.random_range(0..dim);
            for j in 0..dim {
                trial[j] = if j == forced || rng.random::<f64>() < config.crossover {
                    population[best][j] + scale * (population[r1][j] - population[r2][j])
                } else {
                    population[i][j]
                };
                trial[j] = trial[j].clamp(bounds[j].0, bounds[j].1);
            }
            let value = probe.eval(&trial);
            if value <= energies[i] {
                population[i].copy_from_slice(&trial);
                energies[i] = value;
                if value < energies[best] {
                    best = i;
                }
            }
        }

        if converged(&energies, config.tolerance) {
            trace!(generation, "population converged");
            break;
        }
    }
}

/// Two distinct indices, both different from `i`.
fn donors<R: Rng>(rng: &mut R, size: usize, i: usize) -> (usize, usize) {
    let mut r1 = rng.random_range(0..size);
    while r1 == i {
        r1 = rng.random_range(0..size);
    }
    let mut r2 = rng.random_range(0..size);
    while r2 == i || r2 == r1 {
        r2 = rng.random_range(0..size);
    }
    (r1, r2)
}

fn argmin(values: &[f64]) -> usize {
    values
        .iter()
        .enumerate()
        .fold(0, |best, (i, v)| if *v < values[best] { i } else { best })
}

fn converged(energies: &[f64], tolerance: f64) -> bool {
    let finite: Vec<f64> = energies.iter().copied().filter(|e| e.is_finite()).collect();
    if finite.len() < 2 || finite.len() < energies.len() {
        return false;
    }
    let n = finite.len() as f64;
    let mean = finite.iter().sum::<f64>() / n;
    let variance = finite.iter().map(|e| (e - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt() <= tolerance * mean.abs()
}
