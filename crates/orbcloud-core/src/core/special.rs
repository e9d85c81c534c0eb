//! Scalar special-function routines backing the closed-form hydrogen wavefunction.
//!
//! All three are short upward recurrences over `f64`; quantum numbers stay small
//! (n rarely above 10), so no asymptotic machinery is needed.

/// Factorial as `f64`. Exact up to 170!; quantum numbers keep us far below that.
pub fn factorial(k: u32) -> f64 {
    (1..=k).map(f64::from).product()
}

/// Associated Legendre function `P_l^m(x)` for `m >= 0`, including the
/// Condon-Shortley phase `(-1)^m` (the `lpmv` convention).
///
/// Upward recurrence: seed `P_m^m`, lift to `P_{m+1}^m`, then raise the degree
/// with the standard three-term relation.
pub fn associated_legendre(l: u32, m: u32, x: f64) -> f64 {
    debug_assert!(m <= l, "order must not exceed degree");
    debug_assert!((-1.0..=1.0).contains(&x), "argument outside [-1, 1]");

    // P_m^m = (-1)^m (2m-1)!! (1-x^2)^(m/2)
    let mut pmm = 1.0;
    if m > 0 {
        let somx2 = ((1.0 - x) * (1.0 + x)).sqrt();
        let mut odd = 1.0;
        for _ in 1..=m {
            pmm *= -odd * somx2;
            odd += 2.0;
        }
    }
    if l == m {
        return pmm;
    }

    let mut pm1 = x * f64::from(2 * m + 1) * pmm;
    if l == m + 1 {
        return pm1;
    }

    let mut pll = 0.0;
    for ll in (m + 2)..=l {
        pll = (f64::from(2 * ll - 1) * x * pm1 - f64::from(ll + m - 1) * pmm) / f64::from(ll - m);
        pmm = pm1;
        pm1 = pll;
    }
    pll
}

/// Generalized Laguerre polynomial `L_k^alpha(x)` via the three-term recurrence
/// `k L_k = (2k - 1 + alpha - x) L_{k-1} - (k - 1 + alpha) L_{k-2}`.
pub fn generalized_laguerre(k: u32, alpha: u32, x: f64) -> f64 {
    let alpha = f64::from(alpha);
    if k == 0 {
        return 1.0;
    }
    let mut prev = 1.0;
    let mut curr = 1.0 + alpha - x;
    for j in 2..=k {
        let j = f64::from(j);
        let next = ((2.0 * j - 1.0 + alpha - x) * curr - (j - 1.0 + alpha) * prev) / j;
        prev = curr;
        curr = next;
    }
    curr
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn factorial_small_values() {
        assert_eq!(factorial(0), 1.0);
        assert_eq!(factorial(1), 1.0);
        assert_eq!(factorial(5), 120.0);
        assert_eq!(factorial(10), 3_628_800.0);
    }

    #[test]
    fn legendre_matches_closed_forms() {
        let x = 0.3_f64;
        // P_0^0 = 1, P_1^0 = x, P_2^0 = (3x^2 - 1)/2
        assert!((associated_legendre(0, 0, x) - 1.0).abs() < TOL);
        assert!((associated_legendre(1, 0, x) - x).abs() < TOL);
        assert!((associated_legendre(2, 0, x) - 0.5 * (3.0 * x * x - 1.0)).abs() < TOL);
    }

    #[test]
    fn legendre_carries_condon_shortley_phase() {
        let x = 0.3_f64;
        let s = (1.0 - x * x).sqrt();
        // P_1^1 = -sqrt(1-x^2), P_2^1 = -3x sqrt(1-x^2), P_2^2 = 3(1-x^2)
        assert!((associated_legendre(1, 1, x) + s).abs() < TOL);
        assert!((associated_legendre(2, 1, x) + 3.0 * x * s).abs() < TOL);
        assert!((associated_legendre(2, 2, x) - 3.0 * (1.0 - x * x)).abs() < TOL);
    }

    #[test]
    fn legendre_endpoints_vanish_for_positive_order() {
        for l in 1..=4u32 {
            for m in 1..=l {
                assert!(associated_legendre(l, m, 1.0).abs() < TOL);
                assert!(associated_legendre(l, m, -1.0).abs() < TOL);
            }
        }
    }

    #[test]
    fn laguerre_matches_closed_forms() {
        let x = 0.7_f64;
        // L_0^a = 1, L_1^a = 1 + a - x, L_2^1 = (x^2 - 6x + 6)/2
        assert!((generalized_laguerre(0, 3, x) - 1.0).abs() < TOL);
        assert!((generalized_laguerre(1, 3, x) - (4.0 - x)).abs() < TOL);
        assert!((generalized_laguerre(2, 1, x) - 0.5 * (x * x - 6.0 * x + 6.0)).abs() < TOL);
    }

    #[test]
    fn laguerre_at_zero_equals_binomial() {
        // L_k^alpha(0) = C(k + alpha, k)
        assert!((generalized_laguerre(2, 2, 0.0) - 6.0).abs() < TOL);
        assert!((generalized_laguerre(3, 1, 0.0) - 4.0).abs() < TOL);
    }
}
