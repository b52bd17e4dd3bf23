/// Holds parameters for the scalar damage evolution laws
#[derive(Clone, Copy, Debug)]
pub enum ParamDamage {
    /// Threshold (brittle) law ramping between two critical strains
    Threshold {
        /// Initial damage offset (floor)
        damage_ini: f64,

        /// Critical equivalent strain to initialize damage
        strain_ini: f64,

        /// Critical equivalent strain for complete failure
        strain_broken: f64,

        /// Linear coefficient of the ramp
        a1: f64,

        /// Quadratic coefficient of the ramp
        a2: f64,
    },

    /// Continuous (exponential softening) law driven by the strain history
    ///
    /// ```text
    /// d(κ) = 1 - (ε₀/κ) exp(-c ((κ-ε₀)/(εs-ε₀))ⁿ)
    /// ```
    Continuous {
        /// Softening rate coefficient
        c: f64,

        /// Softening exponent
        n: f64,

        /// Equivalent strain at damage onset ε₀
        strain_ini: f64,

        /// Equivalent strain at peak strength εs
        strain_strength: f64,
    },
}

/// Holds parameters for the crack initiation criteria
#[derive(Clone, Copy, Debug)]
pub enum ParamCrack {
    /// Tension-induced cracking on the maximum principal strain
    Tension {
        /// Critical principal strain for crack initiation
        critical_strain: f64,
    },

    /// Mohr-Coulomb criterion with a discretized search of the critical plane
    MohrCoulombV1 {
        /// Cohesion
        cohesion: f64,

        /// Friction angle (degrees)
        friction_angle: f64,

        /// Number of candidate planes in the search sweep
        n_plane: usize,
    },

    /// Mohr-Coulomb criterion with the closed-form critical plane
    MohrCoulombV2 {
        /// Cohesion
        cohesion: f64,

        /// Friction angle (degrees)
        friction_angle: f64,
    },
}

/// Holds the damage-permeability coupling coefficients
#[derive(Clone, Copy, Debug)]
pub struct ParamPermeabilityCoupling {
    /// Reserved coefficient of the coupling law (accepted but not active yet)
    pub coeff1: f64,

    /// Exponential coefficient of the coupling law
    pub coeff2: f64,
}

/// Holds the stochastic perturbation of the damage strain thresholds
#[derive(Clone, Copy, Debug)]
pub struct ParamScatter {
    /// Standard deviation of the multiplicative threshold perturbation
    pub std_dev: f64,

    /// Seed of the deviate generator owned by the evaluation context
    pub seed: u64,
}

/// Holds parameters for the thermo-poro-mechanical solid material
#[derive(Clone, Copy, Debug)]
pub struct ParamSolid {
    /// Intrinsic density
    pub density: f64,

    /// Specific heat capacity
    pub specific_heat: f64,

    /// Thermal conductivity
    pub thermal_conductivity: f64,

    /// Young's modulus E
    pub young: f64,

    /// Poisson's coefficient ν
    pub poisson: f64,

    /// Linear thermal expansion coefficient α
    pub thermal_expansion: f64,

    /// Biot poroelastic coupling coefficient b
    pub biot: f64,

    /// Reference temperature T_ref
    pub t_ref: f64,

    /// Parameters for the scalar damage law (None disables damage)
    pub damage: Option<ParamDamage>,

    /// Activates the anisotropic bond damage overlay (requires damage parameters)
    pub anisotropic_damage: bool,

    /// Parameters for the crack initiation criterion (None disables cracking)
    pub crack: Option<ParamCrack>,

    /// Damage-permeability coupling coefficients
    pub permeability_coupling: Option<ParamPermeabilityCoupling>,

    /// Stochastic perturbation of the damage thresholds
    pub scatter: Option<ParamScatter>,
}

impl ParamSolid {
    /// Returns sample parameters for a plain thermo-poro-elastic solid
    pub fn sample_elastic() -> Self {
        ParamSolid {
            density: 2.7,              // Mg/m³
            specific_heat: 0.92,       // kJ/(kg K)
            thermal_conductivity: 1.4, // W/(m K)
            young: 1500.0,             // kPa
            poisson: 0.2,              // [-]
            thermal_expansion: 1e-5,   // 1/K
            biot: 0.8,                 // [-]
            t_ref: 20.0,               // ℃
            damage: None,
            anisotropic_damage: false,
            crack: None,
            permeability_coupling: None,
            scatter: None,
        }
    }

    /// Returns sample parameters with the threshold damage law enabled
    pub fn sample_damage_threshold() -> Self {
        let mut param = ParamSolid::sample_elastic();
        param.damage = Some(ParamDamage::Threshold {
            damage_ini: 0.0,
            strain_ini: 1e-4,
            strain_broken: 1e-2,
            a1: 0.6,
            a2: 0.4,
        });
        param
    }

    /// Returns sample parameters with the continuous damage law enabled
    pub fn sample_damage_continuous() -> Self {
        let mut param = ParamSolid::sample_elastic();
        param.damage = Some(ParamDamage::Continuous {
            c: 0.8,
            n: 1.2,
            strain_ini: 1e-4,
            strain_strength: 5e-3,
        });
        param
    }

    /// Returns sample parameters with tension-induced cracking enabled
    pub fn sample_crack_tension() -> Self {
        let mut param = ParamSolid::sample_damage_threshold();
        param.crack = Some(ParamCrack::Tension { critical_strain: 5e-4 });
        param
    }

    /// Returns sample parameters with the Mohr-Coulomb criterion enabled
    pub fn sample_crack_mohr_coulomb() -> Self {
        let mut param = ParamSolid::sample_damage_threshold();
        param.crack = Some(ParamCrack::MohrCoulombV2 {
            cohesion: 10.0,       // kPa
            friction_angle: 30.0, // degrees
        });
        param
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{ParamCrack, ParamDamage, ParamPermeabilityCoupling, ParamScatter, ParamSolid};

    #[test]
    fn param_damage_derive_works() {
        let p = ParamDamage::Threshold {
            damage_ini: 0.0,
            strain_ini: 1e-4,
            strain_broken: 1e-2,
            a1: 0.6,
            a2: 0.4,
        };
        let q = p.clone();
        let correct = "Threshold { damage_ini: 0.0, strain_ini: 0.0001, strain_broken: 0.01, a1: 0.6, a2: 0.4 }";
        assert_eq!(format!("{:?}", q), correct);
    }

    #[test]
    fn param_crack_derive_works() {
        let p = ParamCrack::MohrCoulombV2 {
            cohesion: 10.0,
            friction_angle: 30.0,
        };
        let q = p.clone();
        let correct = "MohrCoulombV2 { cohesion: 10.0, friction_angle: 30.0 }";
        assert_eq!(format!("{:?}", q), correct);
    }

    #[test]
    fn param_coupling_derive_works() {
        let p = ParamPermeabilityCoupling { coeff1: 0.0, coeff2: 2.0 };
        let q = p.clone();
        let correct = "ParamPermeabilityCoupling { coeff1: 0.0, coeff2: 2.0 }";
        assert_eq!(format!("{:?}", q), correct);
    }

    #[test]
    fn param_solid_samples_work() {
        let mut p = ParamSolid::sample_elastic();
        p.scatter = Some(ParamScatter { std_dev: 0.1, seed: 17 });
        let q = p.clone();
        p.young = 111.0;
        assert_eq!(q.young, 1500.0);
        assert!(ParamSolid::sample_damage_threshold().damage.is_some());
        assert!(ParamSolid::sample_damage_continuous().damage.is_some());
        assert!(ParamSolid::sample_crack_tension().crack.is_some());
        assert!(ParamSolid::sample_crack_mohr_coulomb().crack.is_some());
    }
}
