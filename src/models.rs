use serde::{Deserialize, Serialize};

/// Anything that exposes a posterior mean.
pub trait HasMean {
    fn mean(&self) -> f64;
}

/// Anything that exposes a posterior variance.
pub trait HasVariance {
    fn variance(&self) -> f64;

    fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }
}

/// Univariate Gaussian posterior, summarised by mean and variance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gaussian {
    pub mean: f64,
    pub variance: f64,
}

impl Gaussian {
    pub fn new(mean: f64, variance: f64) -> Self {
        Self { mean, variance }
    }

    /// Degenerate distribution at `x` (zero variance).
    pub fn point_mass(x: f64) -> Self {
        Self::new(x, 0.0)
    }
}

impl HasMean for Gaussian {
    fn mean(&self) -> f64 {
        self.mean
    }
}

impl HasVariance for Gaussian {
    fn variance(&self) -> f64 {
        self.variance
    }
}

/// Multivariate Gaussian posterior over a whole vector (e.g. one coefficient vector).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorGaussian {
    pub mean: Vec<f64>,
    /// Row-major covariance, `mean.len()` × `mean.len()`.
    pub covariance: Vec<Vec<f64>>,
}

impl VectorGaussian {
    /// Independent (diagonal) approximation: one marginal per component.
    ///
    /// Components without a matching diagonal entry get zero variance.
    pub fn independent_approximation(&self) -> Vec<Gaussian> {
        self.mean
            .iter()
            .enumerate()
            .map(|(i, &m)| {
                let var = self
                    .covariance
                    .get(i)
                    .and_then(|row| row.get(i))
                    .copied()
                    .unwrap_or(0.0);
                Gaussian::new(m, var)
            })
            .collect()
    }
}

/// An observed signal paired with its estimated (posterior) reconstruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reconstruction {
    pub signal: Vec<f64>,
    pub estimate: Vec<Gaussian>,
}

impl Reconstruction {
    /// Reconstruction from plain point estimates.
    pub fn from_point_estimates(signal: Vec<f64>, estimate: &[f64]) -> Self {
        Self {
            signal,
            estimate: estimate.iter().copied().map(Gaussian::point_mass).collect(),
        }
    }
}

pub fn means<T: HasMean>(row: &[T]) -> Vec<f64> {
    row.iter().map(HasMean::mean).collect()
}

pub fn std_devs<T: HasVariance>(row: &[T]) -> Vec<f64> {
    row.iter().map(HasVariance::std_dev).collect()
}

pub fn mean_matrix<T: HasMean>(rows: &[Vec<T>]) -> Vec<Vec<f64>> {
    rows.iter().map(|r| means(r)).collect()
}

/// Transpose a rectangular matrix of rows; ragged rows are cut to the shortest one.
pub fn transpose<T: Clone>(rows: &[Vec<T>]) -> Vec<Vec<T>> {
    let width = rows.iter().map(Vec::len).min().unwrap_or(0);
    (0..width)
        .map(|c| rows.iter().map(|r| r[c].clone()).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn std_dev_is_root_of_variance() {
        let g = Gaussian::new(1.0, 4.0);
        assert_eq!(g.std_dev(), 2.0);
        assert_eq!(Gaussian::point_mass(3.0).std_dev(), 0.0);
    }

    #[test]
    fn independent_approximation_takes_diagonal() {
        let vg = VectorGaussian {
            mean: vec![1.0, 2.0],
            covariance: vec![vec![0.25, 0.1], vec![0.1, 9.0]],
        };
        let marg = vg.independent_approximation();
        assert_eq!(marg, vec![Gaussian::new(1.0, 0.25), Gaussian::new(2.0, 9.0)]);
    }

    #[test]
    fn transpose_swaps_axes() {
        let m = vec![vec![1, 2, 3], vec![4, 5, 6]];
        assert_eq!(transpose(&m), vec![vec![1, 4], vec![2, 5], vec![3, 6]]);
        assert!(transpose::<i32>(&[]).is_empty());
    }
}
