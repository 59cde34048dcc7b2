//! INAR(1) path simulation.
//!
//! Draws synthetic realizations of the Poisson INAR(1) process for a given
//! parameter set and design matrix: each step thins the previous count
//! through a Binomial survival draw and adds an independent Poisson arrival
//! draw with rate `mu_t = exp(x_t · beta)`. Driven by any `rand::Rng`, so
//! seeded generators give reproducible paths for tests and experiments.
use crate::counts::{
    core::params::InarParams,
    errors::{CountError, CountResult},
};
use ndarray::{Array1, Array2};
use rand::Rng;
use rand_distr::{Binomial, Distribution, Poisson};

/// Simulate one INAR(1) sample path.
///
/// The path has `x.nrows()` observations; `y0` seeds index 0 and each
/// subsequent count is `Binomial(y_{t-1}, rho) + Poisson(mu_t)` with
/// `mu_t` taken from row `t` of the design matrix (row 0 is carried for
/// alignment but never drives an innovation draw, matching the likelihood
/// convention).
///
/// # Errors
/// - [`CountError::RegressorCountMismatch`] when the design-matrix column
///   count differs from the coefficient count.
/// - [`CountError::InvalidPoissonRate`] when some `mu_t` is not a valid
///   Poisson rate (non-finite or non-positive regressor combinations).
/// - [`CountError::InvalidThinningProb`] if the thinning probability is
///   rejected by the sampler (unreachable for validated parameters).
pub fn simulate<R: Rng + ?Sized>(
    params: &InarParams, x: &Array2<f64>, y0: u64, rng: &mut R,
) -> CountResult<Array1<u64>> {
    if x.ncols() != params.coefficients.len() {
        return Err(CountError::RegressorCountMismatch {
            expected: params.coefficients.len(),
            actual: x.ncols(),
        });
    }
    let rho = params.rho();
    let eta = x.dot(&params.coefficients);
    let mut path = Array1::<u64>::zeros(x.nrows());
    if path.is_empty() {
        return Ok(path);
    }
    path[0] = y0;
    for t in 1..x.nrows() {
        let mu = eta[t].exp();
        let survivors = Binomial::new(path[t - 1], rho)
            .map_err(|_| CountError::InvalidThinningProb)?
            .sample(rng);
        let arrivals: f64 =
            Poisson::new(mu).map_err(|_| CountError::InvalidPoissonRate)?.sample(rng);
        path[t] = survivors + arrivals as u64;
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::{rngs::StdRng, SeedableRng};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover reproducibility under a fixed seed, agreement of
    // the long-run sample mean with the stationary mean, and the shape
    // check. Simulate-then-fit recovery lives in the integration tests.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that the same seed reproduces the same path and a different
    // seed does not.
    //
    // Given
    // -----
    // - An intercept-only model, T = 50, seeds 42/42/43.
    //
    // Expect
    // ------
    // - Paths from seed 42 are identical; the seed-43 path differs.
    fn simulate_is_reproducible_under_a_seed() {
        let params = InarParams::new(array![0.5], 0.4, 1).unwrap();
        let x = Array2::from_elem((50, 1), 1.0);

        let a = simulate(&params, &x, 2, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = simulate(&params, &x, 2, &mut StdRng::seed_from_u64(42)).unwrap();
        let c = simulate(&params, &x, 2, &mut StdRng::seed_from_u64(43)).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    // Purpose
    // -------
    // Check the long-run sample mean against the stationary mean
    // mu / (1 - rho) of the INAR(1) process.
    //
    // Given
    // -----
    // - beta0 = 0.5 (mu = e^0.5 ~ 1.65), rho = 0.6, T = 4000, seeded rng.
    //
    // Expect
    // ------
    // - The sample mean lies within 0.5 of e^0.5 / 0.4 ~ 4.12.
    fn simulate_matches_stationary_mean() {
        let gamma = (0.6_f64 / 0.4).ln();
        let params = InarParams::new(array![0.5], gamma, 1).unwrap();
        let n = 4000;
        let x = Array2::from_elem((n, 1), 1.0);

        let path = simulate(&params, &x, 4, &mut StdRng::seed_from_u64(7)).unwrap();

        let mean = path.iter().map(|&v| v as f64).sum::<f64>() / n as f64;
        let stationary = 0.5_f64.exp() / (1.0 - 0.6);
        assert!(
            (mean - stationary).abs() < 0.5,
            "sample mean {mean:.3} should be near stationary mean {stationary:.3}"
        );
    }

    #[test]
    // Purpose
    // -------
    // Ensure a design matrix with the wrong column count is rejected.
    //
    // Given
    // -----
    // - One coefficient against a two-column matrix.
    //
    // Expect
    // ------
    // - Err(RegressorCountMismatch { expected: 1, actual: 2 }).
    fn simulate_rejects_column_mismatch() {
        let params = InarParams::new(array![0.5], 0.0, 1).unwrap();
        let x = Array2::from_elem((10, 2), 1.0);

        let err = simulate(&params, &x, 0, &mut StdRng::seed_from_u64(1)).unwrap_err();

        assert_eq!(err, CountError::RegressorCountMismatch { expected: 1, actual: 2 });
    }
}
