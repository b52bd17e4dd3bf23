use super::{BondState, DamageScalar};
use crate::base::{Config, ParamSolid};
use crate::StrError;
use russell_tensor::Tensor2;

/// Number of discrete bond directions (3 axes, 6 face diagonals, 4 body diagonals)
pub const N_BOND_DIRECTIONS: usize = 13;

const F2: f64 = std::f64::consts::FRAC_1_SQRT_2;
const F3: f64 = 0.577_350_269_189_625_8; // 1/sqrt(3)

/// Holds the unit vectors of the discrete bond directions
///
/// These are the distinct axes of a 3×3×3 lattice neighborhood. The first
/// entry is the active set in 1D and the first four lie in the xy-plane
/// (active set in 2D).
pub const BOND_DIRECTIONS: [[f64; 3]; N_BOND_DIRECTIONS] = [
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [F2, F2, 0.0],
    [F2, -F2, 0.0],
    [0.0, 0.0, 1.0],
    [F2, 0.0, F2],
    [F2, 0.0, -F2],
    [0.0, F2, F2],
    [0.0, F2, -F2],
    [F3, F3, F3],
    [F3, F3, -F3],
    [F3, -F3, F3],
    [F3, -F3, -F3],
];

/// Implements the anisotropic bond damage engine
///
/// A fixed set of discrete directions overlays each integration point; each
/// direction carries an independent damage factor driven by the tensile
/// normal strain projected onto it. The factors ratchet (never decrease) and
/// degrade the direction's stiffness pair.
pub struct DamageBond {
    law: DamageScalar,
    normal_stiffness: f64,
    shear_stiffness: f64,
    n_active: usize,
}

impl DamageBond {
    /// Allocates a new instance
    ///
    /// The undamaged stiffness pair follows the lattice-spring mapping
    ///
    /// ```text
    /// kn = E / (1 - 2ν)      ks = kn (1 - 4ν) / (1 + ν)
    /// ```
    ///
    /// which requires ν < 0.25 (the shear stiffness changes sign there).
    pub fn new(config: &Config, param: &ParamSolid) -> Result<Self, StrError> {
        let damage = match param.damage {
            Some(p) => p,
            None => return Err("the bond damage model requires damage parameters"),
        };
        if param.poisson >= 0.25 {
            return Err("poisson must be smaller than 0.25 for the bond damage model");
        }
        let kn = param.young / (1.0 - 2.0 * param.poisson);
        let ks = kn * (1.0 - 4.0 * param.poisson) / (1.0 + param.poisson);
        let n_active = match config.ndim {
            1 => 1,
            2 => 4,
            _ => N_BOND_DIRECTIONS,
        };
        Ok(DamageBond {
            law: DamageScalar::new(&damage)?,
            normal_stiffness: kn,
            shear_stiffness: ks,
            n_active,
        })
    }

    /// Initializes the bond state from the undamaged elastic constants
    pub fn initialize(&self) -> BondState {
        BondState {
            normal_stiffness: self.normal_stiffness,
            shear_stiffness: self.shear_stiffness,
            damage: [0.0; N_BOND_DIRECTIONS],
        }
    }

    /// Updates all directional damage factors from the strain projections
    ///
    /// Each factor ratchets against the previous-step value and stays within
    /// [0,1]; inactive (out-of-plane) directions are carried over unchanged.
    pub fn update(&self, bond: &mut BondState, old: &BondState, strain: &Tensor2, scale: f64) {
        for i in 0..self.n_active {
            let eps_n = normal_projection(strain, &BOND_DIRECTIONS[i]);
            let kappa = f64::max(eps_n, 0.0);
            let value = f64::max(old.damage[i], self.law.evaluate(kappa, scale));
            bond.damage[i] = f64::min(value, 1.0);
        }
        for i in self.n_active..N_BOND_DIRECTIONS {
            bond.damage[i] = old.damage[i];
        }
    }

    /// Returns the effective (damage-reduced) stiffness pair of a direction
    pub fn effective_stiffness(&self, bond: &BondState, dir: usize) -> (f64, f64) {
        let factor = 1.0 - bond.damage[dir];
        (factor * bond.normal_stiffness, factor * bond.shear_stiffness)
    }
}

/// Calculates the normal strain projected onto a direction: n·ε·n
fn normal_projection(strain: &Tensor2, n: &[f64; 3]) -> f64 {
    let mut sum = 0.0;
    for i in 0..3 {
        for j in 0..3 {
            sum += n[i] * strain.get(i, j) * n[j];
        }
    }
    sum
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
