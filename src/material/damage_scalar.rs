use crate::base::{ParamDamage, ParamPermeabilityCoupling};
use crate::StrError;
use russell_lab::{mat_eigen_sym, Vector};
use russell_tensor::Tensor2;

/// Calculates the equivalent strain from the positive principal strains
///
/// ```text
/// ε_eq = sqrt(Σᵢ ⟨εᵢ⟩₊²)
/// ```
///
/// The measure vanishes for purely compressive strain states and at zero
/// strain.
pub fn equivalent_strain(strain: &Tensor2) -> Result<f64, StrError> {
    let mut a = strain.as_matrix();
    let mut l = Vector::new(3);
    mat_eigen_sym(&mut l, &mut a, true)?;
    let mut sum = 0.0;
    for i in 0..3 {
        if l[i] > 0.0 {
            sum += l[i] * l[i];
        }
    }
    Ok(f64::sqrt(sum))
}

/// Implements the scalar damage evolution laws
///
/// Damage is a ratchet: each update takes the maximum against the previous
/// step's value and clamps the result to [0,1].
pub struct DamageScalar {
    param: ParamDamage,
}

impl DamageScalar {
    /// Allocates a new instance
    pub fn new(param: &ParamDamage) -> Result<Self, StrError> {
        match *param {
            ParamDamage::Threshold {
                damage_ini,
                strain_ini,
                strain_broken,
                a1,
                a2,
            } => {
                if damage_ini < 0.0 || damage_ini > 1.0 {
                    return Err("damage_ini must be within [0,1]");
                }
                if strain_ini <= 0.0 {
                    return Err("strain_ini must be positive");
                }
                if strain_broken <= strain_ini {
                    return Err("strain_broken must be greater than strain_ini");
                }
                if a1 < 0.0 || a2 < 0.0 {
                    return Err("the ramp coefficients a1 and a2 must not be negative");
                }
                if a1 + a2 <= 0.0 {
                    return Err("at least one ramp coefficient must be positive");
                }
            }
            ParamDamage::Continuous {
                c,
                n,
                strain_ini,
                strain_strength,
            } => {
                if c <= 0.0 {
                    return Err("c must be positive");
                }
                if n <= 0.0 {
                    return Err("n must be positive");
                }
                if strain_ini <= 0.0 {
                    return Err("strain_ini must be positive");
                }
                if strain_strength <= strain_ini {
                    return Err("strain_strength must be greater than strain_ini");
                }
            }
        }
        Ok(DamageScalar { param: *param })
    }

    /// Returns the damage floor (the value before any strain-driven growth)
    pub fn floor(&self) -> f64 {
        match self.param {
            ParamDamage::Threshold { damage_ini, .. } => damage_ini,
            ParamDamage::Continuous { .. } => 0.0,
        }
    }

    /// Evaluates the damage law at a given strain history (no ratchet)
    ///
    /// `scale` multiplies the strain thresholds (stochastic perturbation).
    /// The result is clamped to [0,1].
    pub fn evaluate(&self, kappa: f64, scale: f64) -> f64 {
        let value = match self.param {
            ParamDamage::Threshold {
                damage_ini,
                strain_ini,
                strain_broken,
                a1,
                a2,
            } => {
                let e0 = strain_ini * scale;
                let eb = strain_broken * scale;
                if kappa <= e0 {
                    damage_ini
                } else if kappa >= eb {
                    1.0
                } else {
                    let xi = (kappa - e0) / (eb - e0);
                    damage_ini + a1 * xi + a2 * xi * xi
                }
            }
            ParamDamage::Continuous {
                c,
                n,
                strain_ini,
                strain_strength,
            } => {
                let e0 = strain_ini * scale;
                if kappa <= e0 {
                    0.0
                } else {
                    let xi = (kappa - e0) / ((strain_strength - strain_ini) * scale);
                    1.0 - (e0 / kappa) * f64::exp(-c * f64::powf(xi, n))
                }
            }
        };
        f64::min(f64::max(value, 0.0), 1.0)
    }

    /// Updates the strain history ratchet and the damage value
    ///
    /// Returns `(damage, strain_history)`; neither ever decreases.
    pub fn update(&self, damage_old: f64, strain_history_old: f64, eps_eq: f64, scale: f64) -> (f64, f64) {
        let kappa = f64::max(strain_history_old, eps_eq);
        let damage = f64::max(damage_old, self.evaluate(kappa, scale));
        (f64::min(damage, 1.0), kappa)
    }
}

/// Returns the permeability multiplication factor at a damage level
///
/// ```text
/// factor = exp(coeff2 d)
/// ```
///
/// `coeff1` is reserved and not consumed here.
pub fn permeability_factor(coupling: &ParamPermeabilityCoupling, damage: f64) -> f64 {
    f64::exp(coupling.coeff2 * damage)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
