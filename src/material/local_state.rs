use super::N_BOND_DIRECTIONS;
use crate::StrError;
use russell_tensor::{Mandel, Tensor2};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Holds the per-direction stiffness and damage of the bond overlay
///
/// Created lazily on the first evaluation of a point; the stiffness pair is
/// set from the undamaged elastic constants and each directional damage
/// factor evolves independently (never decreasing).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BondState {
    /// Undamaged normal stiffness shared by all directions
    pub normal_stiffness: f64,

    /// Undamaged shear stiffness shared by all directions
    pub shear_stiffness: f64,

    /// Damage factor of each discrete bond direction, each within [0,1]
    pub damage: [f64; N_BOND_DIRECTIONS],
}

/// Holds the directional data of a localized crack
///
/// Present only once initiation occurs; the orientation is frozen afterwards
/// while the decomposition vectors are refreshed every step.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CrackState {
    /// Unit normal of the crack plane
    pub normal: [f64; 3],

    /// Unit in-plane shear (slip) direction
    pub shear: [f64; 3],

    /// Value of the violated criterion at initiation
    pub magnitude: f64,

    /// Normal part of the traction σ·n in the global frame
    pub stress_normal_vector: [f64; 3],

    /// Shear part of the traction σ·n in the global frame
    pub stress_shear_vector: [f64; 3],

    /// Normal part of the strain projection ε·n in the global frame
    pub strain_normal_vector: [f64; 3],

    /// Shear part of the strain projection ε·n in the global frame
    pub strain_shear_vector: [f64; 3],
}

impl CrackState {
    /// Allocates a new instance; the decomposition vectors start at zero
    pub fn new(normal: [f64; 3], shear: [f64; 3], magnitude: f64) -> Self {
        CrackState {
            normal,
            shear,
            magnitude,
            stress_normal_vector: [0.0; 3],
            stress_shear_vector: [0.0; 3],
            strain_normal_vector: [0.0; 3],
            strain_shear_vector: [0.0; 3],
        }
    }
}

/// Holds local state data at a single integration point
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LocalState {
    /// Holds the current total strain tensor ε
    pub strain: Tensor2,

    /// Holds the updated stress tensor σ
    pub stress: Tensor2,

    /// Holds the published thermal strain α (T - T_ref)
    pub thermal_strain: f64,

    /// Holds the published thermal expansion coefficient
    pub alpha: f64,

    /// Holds the scalar damage, within [0,1] and non-decreasing across steps
    pub damage: f64,

    /// Holds the maximum equivalent strain seen so far (non-decreasing)
    pub strain_history: f64,

    /// Holds the per-point multiplicative perturbation of the damage thresholds
    pub threshold_scale: f64,

    /// Marks that the set-once point initialization has run
    pub initialized: bool,

    /// Holds the bond overlay state (lazily created on first use)
    pub bond: Option<BondState>,

    /// Holds the crack state (present only once initiation occurs)
    pub crack: Option<CrackState>,
}

impl LocalState {
    /// Allocates a new instance with zeroed tensors and no damage
    pub fn new(mandel: Mandel) -> Self {
        LocalState {
            strain: Tensor2::new(mandel),
            stress: Tensor2::new(mandel),
            thermal_strain: 0.0,
            alpha: 0.0,
            damage: 0.0,
            strain_history: 0.0,
            threshold_scale: 1.0,
            initialized: false,
            bond: None,
            crack: None,
        }
    }
}

/// Implements an arena of local states with current and previous-step snapshots
///
/// The evaluator reads the `old` snapshot and writes the current states
/// during a step; [ArrLocalState::accept_step] is the barrier that moves the
/// step forward. The `old` records are never mutated mid-step.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArrLocalState {
    /// Holds the current states, one per integration point
    pub all: Vec<LocalState>,
    old: Vec<LocalState>,
}

impl ArrLocalState {
    /// Allocates a new instance with zeroed states
    pub fn new(mandel: Mandel, n_integ_point: usize) -> Self {
        let zero = LocalState::new(mandel);
        let all = vec![zero; n_integ_point];
        let old = all.clone();
        ArrLocalState { all, old }
    }

    /// Returns the previous-step snapshot of a point
    pub fn old(&self, p: usize) -> &LocalState {
        &self.old[p]
    }

    /// Returns mutable access to the current states and the read-only snapshot
    pub fn current_and_old(&mut self) -> (&mut [LocalState], &[LocalState]) {
        (&mut self.all, &self.old)
    }

    /// Accepts the current step: the current states become the new snapshot
    pub fn accept_step(&mut self) {
        self.old.clone_from(&self.all);
    }

    /// Writes a JSON file with the full arena
    pub fn write_json<P>(&self, full_path: &P) -> Result<(), StrError>
    where
        P: AsRef<Path> + ?Sized,
    {
        let path = Path::new(full_path.as_ref());
        if let Some(p) = path.parent() {
            fs::create_dir_all(p).map_err(|_| "cannot create directory")?;
        }
        let mut file = File::create(path).map_err(|_| "cannot create file")?;
        serde_json::to_writer(&mut file, &self).map_err(|_| "cannot write file")?;
        Ok(())
    }

    /// Reads a JSON file with the full arena
    pub fn read_json<P>(full_path: &P) -> Result<Self, StrError>
    where
        P: AsRef<Path> + ?Sized,
    {
        let path = Path::new(full_path.as_ref());
        let file = File::open(path).map_err(|_| "cannot open file")?;
        let buffered = BufReader::new(file);
        let arena = serde_json::from_reader(buffered).map_err(|_| "cannot parse JSON file")?;
        Ok(arena)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{ArrLocalState, CrackState, LocalState};
    use crate::StrError;
    use russell_tensor::Mandel;

    #[test]
    fn new_works() {
        let state = LocalState::new(Mandel::Symmetric2D);
        assert_eq!(state.damage, 0.0);
        assert_eq!(state.strain_history, 0.0);
        assert_eq!(state.threshold_scale, 1.0);
        assert_eq!(state.initialized, false);
        assert!(state.bond.is_none());
        assert!(state.crack.is_none());
        assert_eq!(state.stress.dim(), 4);

        let crack = CrackState::new([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], 0.5);
        assert_eq!(crack.stress_normal_vector, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn accept_step_works() {
        let mut arena = ArrLocalState::new(Mandel::Symmetric2D, 2);
        arena.all[1].damage = 0.3;
        arena.all[1].strain_history = 1e-3;
        assert_eq!(arena.old(1).damage, 0.0);
        arena.accept_step();
        assert_eq!(arena.old(1).damage, 0.3);
        assert_eq!(arena.old(1).strain_history, 1e-3);
        // the snapshot is detached from further writes
        arena.all[1].damage = 0.9;
        assert_eq!(arena.old(1).damage, 0.3);
    }

    #[test]
    fn serde_works() -> Result<(), StrError> {
        let mut arena = ArrLocalState::new(Mandel::Symmetric, 1);
        arena.all[0].damage = 0.25;
        arena.all[0].stress.sym_set(0, 1, -1.5);
        arena.all[0].crack = Some(CrackState::new([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], 2.0));
        let json = serde_json::to_string(&arena).map_err(|_| "cannot serialize")?;
        let back: ArrLocalState = serde_json::from_str(&json).map_err(|_| "cannot deserialize")?;
        assert_eq!(back.all[0].damage, 0.25);
        assert_eq!(back.all[0].stress.get(0, 1), -1.5);
        assert_eq!(back.all[0].crack.as_ref().unwrap().magnitude, 2.0);
        Ok(())
    }

    #[test]
    fn write_and_read_json_work() -> Result<(), StrError> {
        let mut arena = ArrLocalState::new(Mandel::Symmetric2D, 3);
        arena.all[2].strain_history = 4e-4;
        arena.accept_step();
        let path = "/tmp/tpmech/test_arr_local_state.json";
        arena.write_json(path)?;
        let back = ArrLocalState::read_json(path)?;
        assert_eq!(back.all.len(), 3);
        assert_eq!(back.old(2).strain_history, 4e-4);
        Ok(())
    }
}
