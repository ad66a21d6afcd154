//! Runs the classic DIRECT test battery with known optima and prints one
//! result block per problem.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example battery --release
//!
//! Set `RUST_LOG=debug` to see one line per round.

use direct_search::{direct_optimize, DirectOptions, GlobalMin};
use log::info;
use std::time::Instant;

// ──────────────────────────────────────────────────────────────────────────────
// Objective Functions
// ──────────────────────────────────────────────────────────────────────────────

fn goldstein_price(x: &[f64]) -> f64 {
    let (a, b) = (x[0], x[1]);
    (1.0 + (a + b + 1.0).powi(2)
        * (19.0 - 14.0 * a + 3.0 * a * a - 14.0 * b + 6.0 * a * b + 3.0 * b * b))
        * (30.0
            + (2.0 * a - 3.0 * b).powi(2)
                * (18.0 - 32.0 * a + 12.0 * a * a + 48.0 * b - 36.0 * a * b + 27.0 * b * b))
}

fn rosenbrock(x: &[f64]) -> f64 {
    let mut sum = 0.0;
    for i in 0..x.len() - 1 {
        let t1 = x[i + 1] - x[i] * x[i];
        let t2 = 1.0 - x[i];
        sum += 100.0 * t1 * t1 + t2 * t2;
    }
    sum
}

fn six_hump_camel(x: &[f64]) -> f64 {
    let (a, b) = (x[0], x[1]);
    (4.0 - 2.1 * a * a + a.powi(4) / 3.0) * a * a + a * b + (-4.0 + 4.0 * b * b) * b * b
}

fn rastrigin_variant(x: &[f64]) -> f64 {
    x.iter().map(|&xi| xi * xi - (18.0 * xi).cos()).sum()
}

fn griewank(x: &[f64]) -> f64 {
    let sum: f64 = x.iter().map(|xi| xi * xi).sum::<f64>() / 4000.0;
    let prod: f64 = x
        .iter()
        .enumerate()
        .map(|(i, &xi)| (xi / ((i + 1) as f64).sqrt()).cos())
        .product();
    sum - prod + 1.0
}

fn hartmann6(x: &[f64]) -> f64 {
    const ALPHA: [f64; 4] = [1.0, 1.2, 3.0, 3.2];
    const A: [[f64; 6]; 4] = [
        [10.0, 3.0, 17.0, 3.5, 1.7, 8.0],
        [0.05, 10.0, 17.0, 0.1, 8.0, 14.0],
        [3.0, 3.5, 1.7, 10.0, 17.0, 8.0],
        [17.0, 8.0, 0.05, 10.0, 0.1, 14.0],
    ];
    const P: [[f64; 6]; 4] = [
        [0.1312, 0.1696, 0.5569, 0.0124, 0.8283, 0.5886],
        [0.2329, 0.4135, 0.8307, 0.3736, 0.1004, 0.9991],
        [0.2348, 0.1451, 0.3522, 0.2883, 0.3047, 0.6650],
        [0.4047, 0.8828, 0.8732, 0.5743, 0.1091, 0.0381],
    ];
    let mut total = 0.0;
    for i in 0..4 {
        let inner: f64 = (0..6).map(|j| A[i][j] * (x[j] - P[i][j]).powi(2)).sum();
        total += ALPHA[i] * (-inner).exp();
    }
    -total
}

// ──────────────────────────────────────────────────────────────────────────────
// Driver
// ──────────────────────────────────────────────────────────────────────────────

type Problem = (&'static str, fn(&[f64]) -> f64, Vec<(f64, f64)>, f64);

fn main() {
    env_logger::init();

    let problems: Vec<Problem> = vec![
        ("Goldstein-Price", goldstein_price, vec![(-2.0, 2.0); 2], 3.0),
        ("Rosenbrock", rosenbrock, vec![(-5.0, 5.0), (-2.0, 8.0)], 0.0),
        ("Six-hump camelback", six_hump_camel, vec![(-3.0, 2.0); 2], -1.031628453489877),
        ("Rastrigin variant", rastrigin_variant, vec![(-1.0, 1.0); 2], -2.0),
        ("Griewank", griewank, vec![(-600.0, 600.0); 2], 0.0),
        ("Hartmann-6", hartmann6, vec![(0.0, 1.0); 6], -3.32237),
    ];

    for (name, f, bounds, optimum) in problems {
        info!("running {}", name);
        let opts = DirectOptions {
            globalmin: GlobalMin::known(optimum),
            ..Default::default()
        };
        let start = Instant::now();
        match direct_optimize(f, &bounds, opts) {
            Ok(result) => {
                println!("test {} results ({:.2?}):", name, start.elapsed());
                println!("{}\n", result);
            }
            Err(e) => eprintln!("test {} failed: {}", name, e),
        }
    }
}
