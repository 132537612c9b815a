//! Per-cell Welch's t-test between two raw sample stacks.

use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::grid::Grid3;

/// Welch's two-sample t-statistic and two-sided p-value.
///
/// Non-finite values are filtered from each sample independently (pairwise
/// per-cell exclusion). Returns `None` when the test is undefined: fewer
/// than 2 finite values in either sample, zero variance in both with equal
/// means, or a degenerate degrees-of-freedom estimate. Two constant
/// samples with different means yield `(±inf, 0.0)`: every observation in
/// one exceeds every observation in the other. The sign of `t` follows
/// `mean(a) - mean(b)`.
pub(crate) fn welch_t(a: &[f64], b: &[f64]) -> Option<(f64, f64)> {
    let a: Vec<f64> = a.iter().copied().filter(|v| v.is_finite()).collect();
    let b: Vec<f64> = b.iter().copied().filter(|v| v.is_finite()).collect();
    if a.len() < 2 || b.len() < 2 {
        return None;
    }

    let na = a.len() as f64;
    let nb = b.len() as f64;
    let ma = a.iter().sum::<f64>() / na;
    let mb = b.iter().sum::<f64>() / nb;
    let va = a.iter().map(|&x| (x - ma) * (x - ma)).sum::<f64>() / (na - 1.0);
    let vb = b.iter().map(|&x| (x - mb) * (x - mb)).sum::<f64>() / (nb - 1.0);

    let se2 = va / na + vb / nb;
    if se2 <= 0.0 {
        // Both samples constant. Equal means carry no information; a mean
        // difference with no spread is maximally significant.
        if ma == mb {
            return None;
        }
        return Some((f64::INFINITY.copysign(ma - mb), 0.0));
    }

    let t = (ma - mb) / se2.sqrt();

    // Welch–Satterthwaite degrees of freedom.
    let dof = se2 * se2
        / ((va / na) * (va / na) / (na - 1.0) + (vb / nb) * (vb / nb) / (nb - 1.0));
    if !dof.is_finite() || dof <= 0.0 {
        return None;
    }

    let dist = StudentsT::new(0.0, 1.0, dof).ok()?;
    let p = 2.0 * dist.cdf(-t.abs());
    Some((t, p))
}

/// Per-cell time series of a 3-D grid, in time order.
pub(crate) fn cell_series(grid: &Grid3, i: usize, j: usize) -> Vec<f64> {
    (0..grid.time_len())
        .map(|t| grid.values()[[t, i, j]])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn identical_samples_not_significant() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let (t, p) = welch_t(&a, &a).unwrap();
        assert_relative_eq!(t, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn known_value_against_scipy() {
        // scipy.stats.ttest_ind([1,2,3,4,5], [3,4,5,6,7], equal_var=False)
        // -> statistic = -2.0, pvalue = 0.0805...
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let b = [3.0, 4.0, 5.0, 6.0, 7.0];
        let (t, p) = welch_t(&a, &b).unwrap();
        assert_relative_eq!(t, -2.0, epsilon = 1e-10);
        assert_relative_eq!(p, 0.0805, epsilon = 1e-3);
    }

    #[test]
    fn sign_follows_mean_difference() {
        let lo = [0.0, 0.1, 0.2, 0.1, 0.0];
        let hi = [10.0, 10.1, 10.2, 10.1, 10.0];
        let (t, p) = welch_t(&hi, &lo).unwrap();
        assert!(t > 0.0);
        assert!(p < 1e-6, "p = {p}");
        let (t_rev, _) = welch_t(&lo, &hi).unwrap();
        assert!(t_rev < 0.0);
    }

    #[test]
    fn nan_values_excluded() {
        let a = [1.0, f64::NAN, 3.0, 4.0, 5.0];
        let b = [1.0, 3.0, 4.0, 5.0];
        let clean = [1.0, 3.0, 4.0, 5.0];
        let (t, p) = welch_t(&a, &b).unwrap();
        let (t_clean, p_clean) = welch_t(&clean, &b).unwrap();
        assert_relative_eq!(t, t_clean, epsilon = 1e-12);
        assert_relative_eq!(p, p_clean, epsilon = 1e-12);
    }

    #[test]
    fn too_few_finite_values_undefined() {
        assert!(welch_t(&[1.0], &[1.0, 2.0, 3.0]).is_none());
        assert!(welch_t(&[1.0, f64::NAN], &[1.0, 2.0, 3.0]).is_none());
        assert!(welch_t(&[], &[]).is_none());
    }

    #[test]
    fn constant_equal_samples_undefined() {
        // Zero variance and equal means: nothing to test.
        assert!(welch_t(&[2.0, 2.0, 2.0], &[2.0, 2.0, 2.0]).is_none());
    }

    #[test]
    fn constant_unequal_samples_maximally_significant() {
        // scipy's ttest_ind on constant unequal samples gives
        // statistic=-inf, pvalue=0.0.
        let (t, p) = welch_t(&[2.0, 2.0, 2.0], &[5.0, 5.0, 5.0]).unwrap();
        assert!(t.is_infinite() && t < 0.0, "t = {t}");
        assert_relative_eq!(p, 0.0, epsilon = 1e-15);

        let (t_rev, _) = welch_t(&[5.0, 5.0, 5.0], &[2.0, 2.0, 2.0]).unwrap();
        assert!(t_rev.is_infinite() && t_rev > 0.0, "t = {t_rev}");
    }

    #[test]
    fn one_constant_sample_still_tests() {
        let constant = [3.0, 3.0, 3.0, 3.0];
        let varying = [1.0, 2.0, 4.0, 5.0];
        let (t, p) = welch_t(&constant, &varying).unwrap();
        assert!(t.is_finite());
        assert!((0.0..=1.0).contains(&p));
    }
}
