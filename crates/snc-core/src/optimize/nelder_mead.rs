use super::{Objective, Probe};
use snc_config::NelderMeadConfig;

const REFLECTION: f64 = 1.0;
const EXPANSION: f64 = 2.0;
const CONTRACTION: f64 = 0.5;
const SHRINK: f64 = 0.5;

/// Step used for start coordinates equal to zero.
const ZERO_STEP: f64 = 0.00025;

/// Downhill simplex with the standard coefficients.
pub(super) fn search<O: Objective + ?Sized>(
    probe: &mut Probe<'_, O>,
    start: &[f64],
    config: &NelderMeadConfig,
) {
    let n = start.len();
    let mut simplex: Vec<Vec<f64>> = Vec::with_capacity(n + 1);
    simplex.push(start.to_vec());
    for i in 0..n {
        let mut vertex = start.to_vec();
        vertex[i] = if vertex[i] != 0.0 {
            vertex[i] * (1.0 + config.initial_step)
        } else {
            ZERO_STEP
        };
        simplex.push(vertex);
    }
    let mut values: Vec<f64> = simplex.iter().map(|v| probe.eval(v)).collect();

    for _ in 0..config.max_iterations {
        sort_simplex(&mut simplex, &mut values);
        if has_converged(&simplex, &values, config) {
            break;
        }

        let centroid = centroid(&simplex[..n]);
        let worst = &simplex[n];
        let reflected = affine(&centroid, worst, -REFLECTION);
        let f_reflected = probe.eval(&reflected);

        if f_reflected < values[0] {
            let expanded = affine(&centroid, worst, -REFLECTION * EXPANSION);
            let f_expanded = probe.eval(&expanded);
            if f_expanded < f_reflected {
                simplex[n] = expanded;
                values[n] = f_expanded;
            } else {
                simplex[n] = reflected;
                values[n] = f_reflected;
            }
            continue;
        }
        if f_reflected < values[n - 1] {
            simplex[n] = reflected;
            values[n] = f_reflected;
            continue;
        }

        let (contracted, f_contracted) = if f_reflected < values[n] {
            let c = affine(&centroid, worst, -REFLECTION * CONTRACTION);
            let f = probe.eval(&c);
            (c, f)
        } else {
            let c = affine(&centroid, worst, CONTRACTION);
            let f = probe.eval(&c);
            (c, f)
        };
        if f_contracted < f_reflected.min(values[n]) {
            simplex[n] = contracted;
            values[n] = f_contracted;
            continue;
        }

        let best = simplex[0].clone();
        for k in 1..=n {
            simplex[k] = affine(&best, &simplex[k], SHRINK);
            values[k] = probe.eval(&simplex[k]);
        }
    }
}

/// `c + t (p - c)`.
fn affine(c: &[f64], p: &[f64], t: f64) -> Vec<f64> {
    c.iter().zip(p).map(|(ci, pi)| ci + t * (pi - ci)).collect()
}

fn centroid(points: &[Vec<f64>]) -> Vec<f64> {
    let n = points.len() as f64;
    let mut c = vec![0.0; points[0].len()];
    for p in points {
        for (ci, pi) in c.iter_mut().zip(p) {
            *ci += pi / n;
        }
    }
    c
}

fn sort_simplex(simplex: &mut Vec<Vec<f64>>, values: &mut Vec<f64>) {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
    *simplex = order.iter().map(|&i| simplex[i].clone()).collect();
    *values = order.iter().map(|&i| values[i]).collect();
}

fn has_converged(simplex: &[Vec<f64>], values: &[f64], config: &NelderMeadConfig) -> bool {
    if !values[0].is_finite() {
        return false;
    }
    let x_spread = simplex[1..]
        .iter()
        .flat_map(|v| v.iter().zip(&simplex[0]).map(|(a, b)| (a - b).abs()))
        .fold(0.0, f64::max);
    let f_spread = values[1..]
        .iter()
        .map(|v| (v - values[0]).abs())
        .fold(0.0, f64::max);
    x_spread <= config.x_tolerance && f_spread <= config.f_tolerance
}
