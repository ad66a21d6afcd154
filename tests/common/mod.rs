//! Test problems with known global minima.

#![allow(dead_code)]

pub struct Problem {
    pub name: &'static str,
    pub f: fn(&[f64]) -> f64,
    pub bounds: Vec<(f64, f64)>,
    pub optimum: f64,
}

pub fn sphere(x: &[f64]) -> f64 {
    x.iter().map(|xi| xi * xi).sum()
}

pub fn goldstein_price(x: &[f64]) -> f64 {
    let (a, b) = (x[0], x[1]);
    let t1 = 1.0
        + (a + b + 1.0).powi(2)
            * (19.0 - 14.0 * a + 3.0 * a * a - 14.0 * b + 6.0 * a * b + 3.0 * b * b);
    let t2 = 30.0
        + (2.0 * a - 3.0 * b).powi(2)
            * (18.0 - 32.0 * a + 12.0 * a * a + 48.0 * b - 36.0 * a * b + 27.0 * b * b);
    t1 * t2
}

pub fn rosenbrock(x: &[f64]) -> f64 {
    x.windows(2)
        .map(|w| 100.0 * (w[1] - w[0] * w[0]).powi(2) + (1.0 - w[0]).powi(2))
        .sum()
}

pub fn six_hump_camel(x: &[f64]) -> f64 {
    let (a, b) = (x[0], x[1]);
    (4.0 - 2.1 * a * a + a.powi(4) / 3.0) * a * a + a * b + (-4.0 + 4.0 * b * b) * b * b
}

/// `x² + y² - cos(18x) - cos(18y)`, minimum -2 at the origin.
pub fn rastrigin_variant(x: &[f64]) -> f64 {
    x.iter().map(|&xi| xi * xi - (18.0 * xi).cos()).sum()
}

pub fn griewank(x: &[f64]) -> f64 {
    let sum: f64 = x.iter().map(|xi| xi * xi).sum::<f64>() / 4000.0;
    let prod: f64 = x
        .iter()
        .enumerate()
        .map(|(i, &xi)| (xi / ((i + 1) as f64).sqrt()).cos())
        .product();
    sum - prod + 1.0
}

pub fn hartmann6(x: &[f64]) -> f64 {
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
    -(0..4)
        .map(|i| {
            let inner: f64 = (0..6).map(|j| A[i][j] * (x[j] - P[i][j]).powi(2)).sum();
            ALPHA[i] * (-inner).exp()
        })
        .sum::<f64>()
}

pub fn battery() -> Vec<Problem> {
    vec![
        Problem {
            name: "goldstein-price",
            f: goldstein_price,
            bounds: vec![(-2.0, 2.0); 2],
            optimum: 3.0,
        },
        Problem {
            name: "rosenbrock",
            f: rosenbrock,
            bounds: vec![(-5.0, 5.0), (-2.0, 8.0)],
            optimum: 0.0,
        },
        Problem {
            name: "six-hump-camel",
            f: six_hump_camel,
            bounds: vec![(-3.0, 2.0); 2],
            optimum: -1.031628453489877,
        },
        Problem {
            name: "rastrigin-variant",
            f: rastrigin_variant,
            bounds: vec![(-1.0, 1.0); 2],
            optimum: -2.0,
        },
        Problem {
            name: "griewank",
            f: griewank,
            bounds: vec![(-600.0, 600.0); 2],
            optimum: 0.0,
        },
        Problem {
            name: "hartmann6",
            f: hartmann6,
            bounds: vec![(0.0, 1.0); 6],
            optimum: -3.32237,
        },
    ]
}

/// Relative error, or the raw value when the optimum is zero.
pub fn rel_error(value: f64, optimum: f64) -> f64 {
    if optimum != 0.0 {
        (value - optimum) / optimum.abs()
    } else {
        value
    }
}
