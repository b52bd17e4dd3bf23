use super::{crack_frame, rotate_symmetric_tensor, vec_norm, CrackState};
use crate::base::ParamCrack;
use crate::StrError;
use russell_lab::{mat_eigen_sym, Vector};
use russell_tensor::{Mandel, Tensor2};
use std::f64::consts::PI;

/// Implements the crack initiation criteria and the crack-plane decomposition
///
/// The transition is one-way: callers keep the recorded [CrackState] once a
/// point cracks; only the decomposition vectors are refreshed afterwards.
pub struct CrackDetection {
    param: ParamCrack,
}

impl CrackDetection {
    /// Allocates a new instance
    pub fn new(param: &ParamCrack) -> Result<Self, StrError> {
        match *param {
            ParamCrack::Tension { critical_strain } => {
                if critical_strain <= 0.0 {
                    return Err("critical_strain must be positive");
                }
            }
            ParamCrack::MohrCoulombV1 {
                cohesion,
                friction_angle,
                n_plane,
            } => {
                check_mohr_coulomb(cohesion, friction_angle)?;
                if n_plane < 2 {
                    return Err("n_plane must be at least 2");
                }
            }
            ParamCrack::MohrCoulombV2 {
                cohesion,
                friction_angle,
            } => {
                check_mohr_coulomb(cohesion, friction_angle)?;
            }
        }
        Ok(CrackDetection { param: *param })
    }

    /// Evaluates the configured criterion; returns a new crack state if triggered
    ///
    /// Stresses follow the tension-positive continuum convention.
    pub fn detect(&self, stress: &Tensor2, strain: &Tensor2) -> Result<Option<CrackState>, StrError> {
        match self.param {
            ParamCrack::Tension { critical_strain } => {
                let (vals, vecs) = principal_system(strain)?;
                if vals[0] >= critical_strain {
                    Ok(Some(CrackState::new(vecs[0], vecs[1], vals[0])))
                } else {
                    Ok(None)
                }
            }
            ParamCrack::MohrCoulombV1 {
                cohesion,
                friction_angle,
                n_plane,
            } => {
                let (vals, vecs) = principal_system(stress)?;
                let tan_phi = f64::tan(friction_angle * PI / 180.0);
                let (s1, s3) = (vals[0], vals[2]);
                let mut f_best = f64::NEG_INFINITY;
                let mut alpha_best = 0.0;
                for k in 0..=n_plane {
                    // alpha measures the plane normal from the σ1 axis
                    let alpha = 0.5 * PI * (k as f64) / (n_plane as f64);
                    let sig_n = 0.5 * (s1 + s3) + 0.5 * (s1 - s3) * f64::cos(2.0 * alpha);
                    let tau = 0.5 * (s1 - s3) * f64::abs(f64::sin(2.0 * alpha));
                    let f = tau + sig_n * tan_phi - cohesion;
                    if f > f_best {
                        f_best = f;
                        alpha_best = alpha;
                    }
                }
                if f_best >= 0.0 {
                    Ok(Some(mohr_coulomb_state(&vecs, stress, alpha_best, f_best)))
                } else {
                    Ok(None)
                }
            }
            ParamCrack::MohrCoulombV2 {
                cohesion,
                friction_angle,
            } => {
                let (vals, vecs) = principal_system(stress)?;
                let phi = friction_angle * PI / 180.0;
                let (s1, s3) = (vals[0], vals[2]);
                let f = 0.5 * (s1 - s3) + 0.5 * (s1 + s3) * f64::sin(phi) - cohesion * f64::cos(phi);
                if f >= 0.0 {
                    let alpha = 0.25 * PI - 0.5 * phi;
                    Ok(Some(mohr_coulomb_state(&vecs, stress, alpha, f)))
                } else {
                    Ok(None)
                }
            }
        }
    }

    /// Decomposes stress and strain along the crack plane
    ///
    /// Rotates both tensors into the crack basis [n, s, t] and stores the
    /// normal/shear parts of the tractions back in the global frame. The
    /// crack orientation is re-orthonormalized in place.
    pub fn decompose(&self, crack: &mut CrackState, stress: &Tensor2, strain: &Tensor2) -> Result<(), StrError> {
        let rr = crack_frame(&crack.normal, &crack.shear)?;
        let mut n = [0.0; 3];
        let mut s = [0.0; 3];
        let mut t = [0.0; 3];
        for i in 0..3 {
            n[i] = rr.get(i, 0);
            s[i] = rr.get(i, 1);
            t[i] = rr.get(i, 2);
        }
        crack.normal = n;
        crack.shear = s;

        let mut rotated = Tensor2::new(Mandel::Symmetric);
        rotate_symmetric_tensor(&mut rotated, &rr, &full_representation(stress))?;
        for i in 0..3 {
            crack.stress_normal_vector[i] = rotated.get(0, 0) * n[i];
            crack.stress_shear_vector[i] = rotated.get(0, 1) * s[i] + rotated.get(0, 2) * t[i];
        }

        rotate_symmetric_tensor(&mut rotated, &rr, &full_representation(strain))?;
        for i in 0..3 {
            crack.strain_normal_vector[i] = rotated.get(0, 0) * n[i];
            crack.strain_shear_vector[i] = rotated.get(0, 1) * s[i] + rotated.get(0, 2) * t[i];
        }
        Ok(())
    }
}

/// Calculates the principal values (descending) and unit directions of a symmetric tensor
pub(crate) fn principal_system(tt: &Tensor2) -> Result<([f64; 3], [[f64; 3]; 3]), StrError> {
    let mut a = tt.as_matrix();
    let mut l = Vector::new(3);
    mat_eigen_sym(&mut l, &mut a, true)?;
    let mut order = [0, 1, 2];
    order.sort_by(|&p, &q| l[q].partial_cmp(&l[p]).unwrap());
    let mut vals = [0.0; 3];
    let mut vecs = [[0.0; 3]; 3];
    for (k, &p) in order.iter().enumerate() {
        vals[k] = l[p];
        for i in 0..3 {
            vecs[k][i] = a.get(i, p);
        }
    }
    Ok((vals, vecs))
}

/// Validates the Mohr-Coulomb coefficients
fn check_mohr_coulomb(cohesion: f64, friction_angle: f64) -> Result<(), StrError> {
    if cohesion < 0.0 {
        return Err("cohesion must not be negative");
    }
    if friction_angle < 0.0 || friction_angle >= 90.0 {
        return Err("friction_angle must be within [0,90) degrees");
    }
    Ok(())
}

/// Builds the crack state on the critical Mohr-Coulomb plane
///
/// `alpha` is the angle of the plane normal from the σ1 axis within the
/// σ1-σ3 principal plane; the slip direction is the tangential part of the
/// traction on that plane.
fn mohr_coulomb_state(vecs: &[[f64; 3]; 3], stress: &Tensor2, alpha: f64, magnitude: f64) -> CrackState {
    let (v1, v3) = (vecs[0], vecs[2]);
    let mut normal = [0.0; 3];
    for i in 0..3 {
        normal[i] = f64::cos(alpha) * v1[i] + f64::sin(alpha) * v3[i];
    }
    let mut traction = [0.0; 3];
    for i in 0..3 {
        for j in 0..3 {
            traction[i] += stress.get(i, j) * normal[j];
        }
    }
    let tn = traction[0] * normal[0] + traction[1] * normal[1] + traction[2] * normal[2];
    let mut shear = [0.0; 3];
    for i in 0..3 {
        shear[i] = traction[i] - tn * normal[i];
    }
    if vec_norm(&shear) < 1e-12 * (1.0 + vec_norm(&traction)) {
        shear = v3; // hydrostatic traction: fall back to the σ3 axis
    }
    CrackState::new(normal, shear, magnitude)
}

/// Returns a copy of a symmetric tensor in the full symmetric representation
fn full_representation(tt: &Tensor2) -> Tensor2 {
    if tt.mandel() == Mandel::Symmetric {
        return tt.clone();
    }
    let mut data = [[0.0; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            data[i][j] = tt.get(i, j);
        }
    }
    Tensor2::from_matrix(&data, Mandel::Symmetric).unwrap()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
