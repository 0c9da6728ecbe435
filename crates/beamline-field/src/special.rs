//! Special functions for beam-mode profiles.
//!
//! The Laguerre-Gauss and Hermite-Gauss transverse profiles need the
//! generalised Laguerre polynomials L_p^l and the physicists' Hermite
//! polynomials H_n. Both are evaluated by their three-term recurrences.

/// n! as a float. Mode indices are small, so overflow is not a concern.
pub fn factorial(n: u32) -> f64 {
    (2..=n).map(f64::from).product()
}

/// Generalised Laguerre polynomial L_p^l(x).
///
/// Recurrence: k·L_k = (2k − 1 + l − x)·L_{k−1} − (k − 1 + l)·L_{k−2}.
pub fn generalized_laguerre(p: u32, l: u32, x: f64) -> f64 {
    let alpha = f64::from(l);
    if p == 0 {
        return 1.0;
    }
    let mut prev = 1.0;
    let mut current = 1.0 + alpha - x;
    for k in 2..=p {
        let kf = f64::from(k);
        let next = ((2.0 * kf - 1.0 + alpha - x) * current - (kf - 1.0 + alpha) * prev) / kf;
        prev = current;
        current = next;
    }
    current
}

/// Physicists' Hermite polynomial H_n(x).
///
/// Recurrence: H_n = 2x·H_{n−1} − 2(n − 1)·H_{n−2}.
pub fn hermite(n: u32, x: f64) -> f64 {
    match n {
        0 => 1.0,
        1 => 2.0 * x,
        _ => {
            let mut prev = 1.0;
            let mut current = 2.0 * x;
            for k in 2..=n {
                let next = 2.0 * x * current - 2.0 * f64::from(k - 1) * prev;
                prev = current;
                current = next;
            }
            current
        }
    }
}
