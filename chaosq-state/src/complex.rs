//! Complex arithmetic helpers
//!
//! Amplitudes and matrix entries are [`Complex64`] values. Addition,
//! multiplication, conjugation and squared modulus are the `+`, `*`,
//! [`Complex64::conj`] and [`Complex64::norm_sqr`] operations of `num-complex`;
//! this module only adds the constants and small utilities the kernel
//! needs on top of them.

pub use num_complex::Complex64;

/// 0 + 0i
pub const ZERO: Complex64 = Complex64::new(0.0, 0.0);

/// 1 + 0i
pub const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// 0 + 1i
pub const I: Complex64 = Complex64::new(0.0, 1.0);

/// Shorthand constructor
#[inline]
pub const fn c64(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

/// e^(iθ)
#[inline]
pub fn phase(theta: f64) -> Complex64 {
    Complex64::from_polar(1.0, theta)
}

/// True if `a` and `b` differ by less than `epsilon` in modulus
#[inline]
pub fn approx_eq(a: Complex64, b: Complex64, epsilon: f64) -> bool {
    (a - b).norm() < epsilon
}

/// Frobenius norm of a flattened matrix: sqrt(Σ|m_ij|²)
pub fn frobenius_norm(matrix: &[Complex64]) -> f64 {
    matrix.iter().map(|m| m.norm_sqr()).sum::<f64>().sqrt()
}

/// Returns `log2(len)` when `len` is a non-zero power of two
#[inline]
pub fn log2_dimension(len: usize) -> Option<usize> {
    if len.is_power_of_two() {
        Some(len.trailing_zeros() as usize)
    } else {
        None
    }
}

/// Returns the side length of a flattened square matrix, if it is one
pub fn square_side(len: usize) -> Option<usize> {
    let side = (len as f64).sqrt().round() as usize;
    if side * side == len {
        Some(side)
    } else {
        None
    }
}
