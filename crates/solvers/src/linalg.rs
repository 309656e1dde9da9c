//! Dense linear algebra for small, fixed-size problems.
//!
//! Vectors are `[f64; N]` and matrices are row-major `[[f64; N]; N]`, which
//! keeps everything on the stack for the handful of variables these solvers
//! work with.

/// Returns the dot product `aᵀb`.
#[must_use]
pub fn dot<const N: usize>(a: &[f64; N], b: &[f64; N]) -> f64 {
    a.iter().zip(b).map(|(ai, bi)| ai * bi).sum()
}

/// Returns the Euclidean norm `‖a‖₂`.
#[must_use]
pub fn norm<const N: usize>(a: &[f64; N]) -> f64 {
    dot(a, a).sqrt()
}

/// Returns the infinity norm `max |a_i|`.
#[must_use]
pub fn norm_inf<const N: usize>(a: &[f64; N]) -> f64 {
    a.iter().fold(0.0, |acc, ai| acc.max(ai.abs()))
}

/// Returns `y + alpha·x`.
#[must_use]
pub fn axpy<const N: usize>(alpha: f64, x: &[f64; N], y: &[f64; N]) -> [f64; N] {
    std::array::from_fn(|i| y[i] + alpha * x[i])
}

/// Returns `alpha·x`.
#[must_use]
pub fn scale<const N: usize>(alpha: f64, x: &[f64; N]) -> [f64; N] {
    x.map(|xi| alpha * xi)
}

/// Returns the matrix-vector product `m·v`.
#[must_use]
pub fn mat_vec<const N: usize>(m: &[[f64; N]; N], v: &[f64; N]) -> [f64; N] {
    std::array::from_fn(|i| dot(&m[i], v))
}

/// Returns the quadratic form `vᵀ·m·v`.
#[must_use]
pub fn quad_form<const N: usize>(m: &[[f64; N]; N], v: &[f64; N]) -> f64 {
    dot(v, &mat_vec(m, v))
}

/// Adds `alpha·v·vᵀ` to `m` in place.
pub fn add_outer<const N: usize>(m: &mut [[f64; N]; N], alpha: f64, v: &[f64; N]) {
    for (i, row) in m.iter_mut().enumerate() {
        for (j, mij) in row.iter_mut().enumerate() {
            *mij += alpha * v[i] * v[j];
        }
    }
}

/// Adds `b` to `a` element-wise in place.
pub fn add_assign<const N: usize>(a: &mut [[f64; N]; N], b: &[[f64; N]; N]) {
    for (row_a, row_b) in a.iter_mut().zip(b) {
        for (aij, bij) in row_a.iter_mut().zip(row_b) {
            *aij += bij;
        }
    }
}

/// Returns the zero matrix.
#[must_use]
pub fn zeros<const N: usize>() -> [[f64; N]; N] {
    [[0.0; N]; N]
}

/// Returns `true` if `m` equals its transpose within `tol`.
#[must_use]
pub fn is_symmetric<const N: usize>(m: &[[f64; N]; N], tol: f64) -> bool {
    (0..N).all(|i| (0..i).all(|j| (m[i][j] - m[j][i]).abs() <= tol))
}

/// Computes the lower Cholesky factor `L` with `m = L·Lᵀ`.
///
/// Only the lower triangle of `m` is read. Returns `None` if `m` is not
/// positive definite (a non-positive or non-finite pivot appears).
#[must_use]
pub fn cholesky<const N: usize>(m: &[[f64; N]; N]) -> Option<[[f64; N]; N]> {
    let mut l = zeros::<N>();
    for j in 0..N {
        let pivot = m[j][j] - (0..j).map(|k| l[j][k] * l[j][k]).sum::<f64>();
        if !(pivot > 0.0 && pivot.is_finite()) {
            return None;
        }
        let ljj = pivot.sqrt();
        l[j][j] = ljj;
        for i in (j + 1)..N {
            let off = m[i][j] - (0..j).map(|k| l[i][k] * l[j][k]).sum::<f64>();
            l[i][j] = off / ljj;
        }
    }
    Some(l)
}

/// Solves `m·x = b` for symmetric positive definite `m`.
///
/// Returns `None` if `m` is not positive definite.
#[must_use]
pub fn solve_spd<const N: usize>(m: &[[f64; N]; N], b: &[f64; N]) -> Option<[f64; N]> {
    let l = cholesky(m)?;

    // Forward substitution: L·y = b.
    let mut y = [0.0; N];
    for i in 0..N {
        let partial: f64 = (0..i).map(|k| l[i][k] * y[k]).sum();
        y[i] = (b[i] - partial) / l[i][i];
    }

    // Back substitution: Lᵀ·x = y.
    let mut x = [0.0; N];
    for i in (0..N).rev() {
        let partial: f64 = ((i + 1)..N).map(|k| l[k][i] * x[k]).sum();
        x[i] = (y[i] - partial) / l[i][i];
    }

    Some(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn vector_helpers() {
        let a = [3.0, -4.0];
        let b = [1.0, 2.0];

        assert_relative_eq!(dot(&a, &b), -5.0);
        assert_relative_eq!(norm(&a), 5.0);
        assert_relative_eq!(norm_inf(&a), 4.0);
        assert_eq!(axpy(2.0, &b, &a), [5.0, 0.0]);
        assert_eq!(scale(-1.0, &b), [-1.0, -2.0]);
    }

    #[test]
    fn matrix_helpers() {
        let m = [[1.0, 0.5], [0.5, 2.0]];
        let v = [1.0, -1.0];

        assert_eq!(mat_vec(&m, &v), [0.5, -1.5]);
        assert_relative_eq!(quad_form(&m, &v), 2.0);

        let mut acc = zeros::<2>();
        add_outer(&mut acc, 2.0, &v);
        assert_eq!(acc, [[2.0, -2.0], [-2.0, 2.0]]);

        add_assign(&mut acc, &m);
        assert_eq!(acc, [[3.0, -1.5], [-1.5, 4.0]]);
    }

    #[test]
    fn symmetry_check() {
        assert!(is_symmetric(&[[1.0, 0.5], [0.5, 2.0]], 0.0));
        assert!(!is_symmetric(&[[1.0, 0.5], [0.4, 2.0]], 1e-3));
    }

    #[test]
    fn cholesky_rejects_indefinite() {
        assert!(cholesky(&[[1.0, 2.0], [2.0, 1.0]]).is_none());
        assert!(cholesky(&[[0.0, 0.0], [0.0, 1.0]]).is_none());
    }

    #[test]
    fn solve_spd_recovers_known_solution() {
        let m = [[4.0, 1.0, 0.0], [1.0, 3.0, 1.0], [0.0, 1.0, 2.0]];
        let expected = [1.0, -2.0, 0.5];
        let b = mat_vec(&m, &expected);

        let x = solve_spd(&m, &b).expect("matrix is positive definite");

        for (xi, ei) in x.iter().zip(expected) {
            assert_relative_eq!(*xi, ei, epsilon = 1e-12);
        }
    }
}
