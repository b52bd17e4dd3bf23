use crate::StrError;
use russell_lab::{mat_mat_mul, Matrix};
use russell_tensor::Tensor2;

/// Rotates a symmetric tensor into the frame defined by a rotation matrix
///
/// ```text
/// T' = Rᵀ · T · R
/// ```
///
/// The columns of `R` are the axes of the target frame. `R` must be
/// orthonormal (caller's contract); then the transform preserves symmetry
/// and trace, and `rotated` receives the symmetrized result.
///
/// Note: `rotated` must use the full symmetric representation because the
/// rotation may mix out-of-plane components.
pub fn rotate_symmetric_tensor(rotated: &mut Tensor2, rr: &Matrix, tt: &Tensor2) -> Result<(), StrError> {
    if rr.nrow() != 3 || rr.ncol() != 3 {
        return Err("the rotation matrix must be 3x3");
    }
    if rotated.dim() != 6 {
        return Err("the rotated tensor must use the full symmetric representation");
    }
    let tm = tt.as_matrix();
    let mut rt = Matrix::new(3, 3);
    for i in 0..3 {
        for j in 0..3 {
            rt.set(i, j, rr.get(j, i));
        }
    }
    let mut aux = Matrix::new(3, 3);
    let mut res = Matrix::new(3, 3);
    mat_mat_mul(&mut aux, 1.0, &tm, rr, 0.0)?; // T·R
    mat_mat_mul(&mut res, 1.0, &rt, &aux, 0.0)?; // Rᵀ·T·R
    for i in 0..3 {
        for j in i..3 {
            rotated.sym_set(i, j, (res.get(i, j) + res.get(j, i)) / 2.0);
        }
    }
    Ok(())
}

/// Builds the rotation matrix whose columns are the crack frame [n, s, t]
///
/// `n` is the crack normal and `s` the in-plane shear direction; the third
/// axis is `t = n × s`. The input vectors need not be unit or exactly
/// orthogonal: `s` is re-orthogonalized against `n` and all columns are
/// normalized.
pub fn crack_frame(normal: &[f64; 3], shear: &[f64; 3]) -> Result<Matrix, StrError> {
    let norm_n = vec_norm(normal);
    if norm_n < f64::EPSILON {
        return Err("the crack normal must be nonzero");
    }
    let n = [normal[0] / norm_n, normal[1] / norm_n, normal[2] / norm_n];
    let dot = shear[0] * n[0] + shear[1] * n[1] + shear[2] * n[2];
    let mut s = [shear[0] - dot * n[0], shear[1] - dot * n[1], shear[2] - dot * n[2]];
    let norm_s = vec_norm(&s);
    if norm_s < f64::EPSILON {
        return Err("the shear direction must not be parallel to the normal");
    }
    for i in 0..3 {
        s[i] /= norm_s;
    }
    let t = [
        n[1] * s[2] - n[2] * s[1],
        n[2] * s[0] - n[0] * s[2],
        n[0] * s[1] - n[1] * s[0],
    ];
    let mut rr = Matrix::new(3, 3);
    for i in 0..3 {
        rr.set(i, 0, n[i]);
        rr.set(i, 1, s[i]);
        rr.set(i, 2, t[i]);
    }
    Ok(rr)
}

/// Calculates the Euclidean norm of a 3-vector
pub(crate) fn vec_norm(v: &[f64; 3]) -> f64 {
    f64::sqrt(v[0] * v[0] + v[1] * v[1] + v[2] * v[2])
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
