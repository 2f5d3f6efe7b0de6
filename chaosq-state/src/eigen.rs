//! Real eigenvalue solvers for small dense matrices
//!
//! Hermitian matrices are handled through the real symmetric embedding
//! `[[A, -B], [B, A]]` of `H = A + iB`, which has the spectrum of `H` with
//! every eigenvalue doubled. The symmetric matrix is diagonalized with cyclic
//! Jacobi rotations.

use num_complex::Complex64;

/// Sweep limit for the cyclic Jacobi iteration
pub const MAX_SWEEPS: usize = 64;

/// Off-diagonal Frobenius mass below which the matrix counts as diagonal
pub const CONVERGENCE_TOLERANCE: f64 = 1e-24;

#[inline]
fn off_diagonal_mass(a: &[f64], n: usize) -> f64 {
    let mut sum = 0.0;
    for i in 0..n {
        for j in 0..n {
            if i != j {
                sum += a[i * n + j] * a[i * n + j];
            }
        }
    }
    sum
}

/// Eigenvalues of a real symmetric `n × n` row-major matrix, ascending
///
/// The matrix is consumed as scratch space and ends up (numerically) diagonal.
/// Symmetry is a precondition.
pub fn symmetric_eigenvalues(a: &mut [f64], n: usize) -> Vec<f64> {
    debug_assert_eq!(a.len(), n * n);

    for _ in 0..MAX_SWEEPS {
        if off_diagonal_mass(a, n) < CONVERGENCE_TOLERANCE {
            break;
        }

        for p in 0..n {
            for q in (p + 1)..n {
                let apq = a[p * n + q];
                if apq.abs() < f64::MIN_POSITIVE {
                    continue;
                }

                let theta = (a[q * n + q] - a[p * n + p]) / (2.0 * apq);
                let sign = if theta >= 0.0 { 1.0 } else { -1.0 };
                let t = sign / (theta.abs() + (theta * theta + 1.0).sqrt());
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;

                // A <- A J
                for k in 0..n {
                    let akp = a[k * n + p];
                    let akq = a[k * n + q];
                    a[k * n + p] = c * akp - s * akq;
                    a[k * n + q] = s * akp + c * akq;
                }

                // A <- J^T A
                for k in 0..n {
                    let apk = a[p * n + k];
                    let aqk = a[q * n + k];
                    a[p * n + k] = c * apk - s * aqk;
                    a[q * n + k] = s * apk + c * aqk;
                }

                a[p * n + q] = 0.0;
                a[q * n + p] = 0.0;
            }
        }
    }

    let mut eigenvalues: Vec<f64> = (0..n).map(|i| a[i * n + i]).collect();
    eigenvalues.sort_by(|x, y| x.total_cmp(y));
    eigenvalues
}

/// Eigenvalues of a Hermitian `n × n` row-major matrix, ascending
///
/// Hermiticity is a precondition; only the Hermitian part contributes.
pub fn hermitian_eigenvalues(matrix: &[Complex64], n: usize) -> Vec<f64> {
    debug_assert_eq!(matrix.len(), n * n);

    let m = 2 * n;
    let mut embedded = vec![0.0; m * m];
    for i in 0..n {
        for j in 0..n {
            let h = matrix[i * n + j];
            embedded[i * m + j] = h.re;
            embedded[(i + n) * m + (j + n)] = h.re;
            embedded[i * m + (j + n)] = -h.im;
            embedded[(i + n) * m + j] = h.im;
        }
    }

    let doubled = symmetric_eigenvalues(&mut embedded, m);
    doubled
        .chunks_exact(2)
        .map(|pair| 0.5 * (pair[0] + pair[1]))
        .collect()
}
