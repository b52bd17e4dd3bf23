use super::{
    equivalent_strain, permeability_factor, CrackDetection, DamageBond, DamageScalar, GaussianDeviate, LocalState,
    ThermoElastic,
};
use crate::base::{Config, ParamPermeabilityCoupling, ParamSolid};
use crate::StrError;
use russell_tensor::Tensor2;

/// Lower clamp of the stochastic threshold perturbation
const MIN_THRESHOLD_SCALE: f64 = 0.1;

/// Implements the thermo-poro-mechanical solid material model
///
/// Per integration point and per step, the evaluator sequences the
/// thermo-poro-elastic trial stress, the scalar damage law, the anisotropic
/// bond damage overlay, and the crack classification, as selected by the
/// configuration. The previous-step snapshot is read-only; every
/// current-step field is rewritten.
///
/// Evaluation is independent across points, so instances can be distributed
/// over parallel workers; each instance owns its deviate generator.
pub struct ModelSolidMechanics {
    config: Config,
    thermo_elastic: ThermoElastic,
    damage: Option<DamageScalar>,
    bond: Option<DamageBond>,
    crack: Option<CrackDetection>,
    permeability: Option<ParamPermeabilityCoupling>,
    scatter_std_dev: f64,
    deviate: Option<GaussianDeviate>,
}

impl ModelSolidMechanics {
    /// Allocates a new instance, validating the whole configuration
    pub fn new(config: &Config, param: &ParamSolid) -> Result<Self, StrError> {
        let thermo_elastic = ThermoElastic::new(config, param)?;
        let damage = match &param.damage {
            Some(p) => Some(DamageScalar::new(p)?),
            None => None,
        };
        let bond = if param.anisotropic_damage {
            Some(DamageBond::new(config, param)?)
        } else {
            None
        };
        let crack = match &param.crack {
            Some(p) => Some(CrackDetection::new(p)?),
            None => None,
        };
        if let Some(coupling) = &param.permeability_coupling {
            if param.damage.is_none() {
                return Err("the permeability coupling requires damage parameters");
            }
            if coupling.coeff1 < 0.0 || coupling.coeff2 < 0.0 {
                return Err("the permeability coupling coefficients must not be negative");
            }
        }
        let (scatter_std_dev, deviate) = match &param.scatter {
            Some(scatter) => {
                if scatter.std_dev <= 0.0 {
                    return Err("std_dev must be positive");
                }
                if param.damage.is_none() {
                    return Err("the threshold scatter requires damage parameters");
                }
                (scatter.std_dev, Some(GaussianDeviate::new(scatter.seed)))
            }
            None => (0.0, None),
        };
        Ok(ModelSolidMechanics {
            config: *config,
            thermo_elastic,
            damage,
            bond,
            crack,
            permeability: param.permeability_coupling,
            scatter_std_dev,
            deviate,
        })
    }

    /// Updates the state at one integration point
    ///
    /// Reads the previous-step snapshot `old` (never mutated here) and
    /// rewrites every current-step field of `state`.
    ///
    /// # Panics
    ///
    /// A panic will occur if the coupled inputs disagree with the
    /// configuration flags or if the strain tensor has a different
    /// [russell_tensor::Mandel] than the configuration.
    pub fn update_state(
        &mut self,
        state: &mut LocalState,
        old: &LocalState,
        strain: &Tensor2,
        temperature: Option<f64>,
        pore_pressure: Option<f64>,
    ) -> Result<(), StrError> {
        assert_eq!(strain.mandel(), self.config.mandel());
        assert_eq!(temperature.is_some(), self.config.has_temperature);
        assert_eq!(pore_pressure.is_some(), self.config.has_pore_pressure);

        // set-once point initialization
        if old.initialized {
            state.threshold_scale = old.threshold_scale;
        } else {
            state.threshold_scale = match &mut self.deviate {
                Some(deviate) => f64::max(1.0 + deviate.sample(0.0, self.scatter_std_dev), MIN_THRESHOLD_SCALE),
                None => 1.0,
            };
        }
        state.initialized = true;

        // trial stress
        state.strain.set_tensor(1.0, strain);
        state.thermal_strain = self
            .thermo_elastic
            .calc_stress(&mut state.stress, strain, temperature, pore_pressure);
        state.alpha = self.thermo_elastic.alpha();

        // scalar damage reduces the trial stress
        match &self.damage {
            Some(law) => {
                let eps_eq = equivalent_strain(strain)?;
                let (damage, kappa) = law.update(old.damage, old.strain_history, eps_eq, state.threshold_scale);
                state.damage = damage;
                state.strain_history = kappa;
                let factor = 1.0 - damage;
                let vec = state.stress.vector_mut();
                for i in 0..vec.dim() {
                    vec[i] *= factor;
                }
            }
            None => {
                state.damage = old.damage;
                state.strain_history = old.strain_history;
            }
        }

        // anisotropic bond damage
        match &self.bond {
            Some(engine) => {
                let bond_old = match &old.bond {
                    Some(b) => b.clone(),
                    None => engine.initialize(),
                };
                let mut bond = engine.initialize();
                engine.update(&mut bond, &bond_old, strain, state.threshold_scale);
                state.bond = Some(bond);
            }
            None => state.bond = old.bond.clone(),
        }

        // crack classification on the damage-reduced stress/strain
        match &self.crack {
            Some(engine) => match &old.crack {
                // one-way transition: the orientation stays frozen
                Some(previous) => {
                    let mut crack = previous.clone();
                    engine.decompose(&mut crack, &state.stress, &state.strain)?;
                    state.crack = Some(crack);
                }
                None => match engine.detect(&state.stress, &state.strain)? {
                    Some(mut crack) => {
                        engine.decompose(&mut crack, &state.stress, &state.strain)?;
                        state.crack = Some(crack);
                    }
                    None => state.crack = None,
                },
            },
            None => state.crack = old.crack.clone(),
        }
        Ok(())
    }

    /// Returns the permeability multiplication factor at the current damage level
    pub fn permeability_factor(&self, state: &LocalState) -> f64 {
        match &self.permeability {
            Some(coupling) => permeability_factor(coupling, state.damage),
            None => 1.0,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::ModelSolidMechanics;
    use crate::base::{Config, ParamPermeabilityCoupling, ParamScatter, ParamSolid};
    use crate::material::LocalState;
    use crate::StrError;
    use russell_lab::approx_eq;
    use russell_tensor::Tensor2;

    #[test]
    fn model_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<ModelSolidMechanics>();
    }

    #[test]
    fn allocation_catches_config_errors() -> Result<(), StrError> {
        let config = Config::new(2)?;

        let mut param = ParamSolid::sample_elastic();
        param.poisson = 0.5;
        assert_eq!(
            ModelSolidMechanics::new(&config, &param).err(),
            Some("poisson must be smaller than 0.5 (incompressible limit)")
        );

        let mut param = ParamSolid::sample_elastic();
        param.anisotropic_damage = true;
        assert_eq!(
            ModelSolidMechanics::new(&config, &param).err(),
            Some("the bond damage model requires damage parameters")
        );

        let mut param = ParamSolid::sample_elastic();
        param.permeability_coupling = Some(ParamPermeabilityCoupling { coeff1: 0.0, coeff2: 2.0 });
        assert_eq!(
            ModelSolidMechanics::new(&config, &param).err(),
            Some("the permeability coupling requires damage parameters")
        );

        let mut param = ParamSolid::sample_damage_threshold();
        param.scatter = Some(ParamScatter { std_dev: 0.0, seed: 1 });
        assert_eq!(
            ModelSolidMechanics::new(&config, &param).err(),
            Some("std_dev must be positive")
        );
        Ok(())
    }

    #[test]
    fn baseline_elastic_response_is_zero() -> Result<(), StrError> {
        let config = Config::new(2)?;
        let param = ParamSolid::sample_damage_threshold();
        let mut model = ModelSolidMechanics::new(&config, &param)?;
        let mut state = LocalState::new(config.mandel());
        let old = LocalState::new(config.mandel());
        let strain = Tensor2::new(config.mandel());
        model.update_state(&mut state, &old, &strain, None, None)?;
        for i in 0..state.stress.dim() {
            assert_eq!(state.stress.vector()[i], 0.0);
        }
        assert_eq!(state.damage, 0.0);
        assert_eq!(state.strain_history, 0.0);
        assert_eq!(state.threshold_scale, 1.0);
        assert!(state.initialized);
        Ok(())
    }

    #[test]
    fn damage_reduces_the_trial_stress() -> Result<(), StrError> {
        let config = Config::new(2)?;
        let param = ParamSolid::sample_damage_threshold();
        let mut model = ModelSolidMechanics::new(&config, &param)?;

        // elastic reference without damage
        let elastic_param = ParamSolid::sample_elastic();
        let mut elastic = ModelSolidMechanics::new(&config, &elastic_param)?;

        let mut strain = Tensor2::new(config.mandel());
        strain.sym_set(0, 0, 5e-3); // inside the damage ramp

        let old = LocalState::new(config.mandel());
        let mut state = LocalState::new(config.mandel());
        model.update_state(&mut state, &old, &strain, None, None)?;
        let mut reference = LocalState::new(config.mandel());
        elastic.update_state(&mut reference, &old, &strain, None, None)?;

        assert!(state.damage > 0.0 && state.damage < 1.0);
        approx_eq(
            state.stress.get(0, 0),
            (1.0 - state.damage) * reference.stress.get(0, 0),
            1e-11,
        );
        Ok(())
    }

    #[test]
    fn scatter_perturbs_the_thresholds_once() -> Result<(), StrError> {
        let config = Config::new(2)?;
        let mut param = ParamSolid::sample_damage_threshold();
        param.scatter = Some(ParamScatter { std_dev: 0.2, seed: 99 });
        let mut model = ModelSolidMechanics::new(&config, &param)?;

        let strain = Tensor2::new(config.mandel());
        let mut old = LocalState::new(config.mandel());
        let mut state = LocalState::new(config.mandel());
        model.update_state(&mut state, &old, &strain, None, None)?;
        let scale_first = state.threshold_scale;
        assert!(scale_first != 1.0);
        assert!(scale_first >= 0.1);

        // the scale persists across steps (set once)
        old = state.clone();
        let mut state = LocalState::new(config.mandel());
        model.update_state(&mut state, &old, &strain, None, None)?;
        assert_eq!(state.threshold_scale, scale_first);
        Ok(())
    }

    #[test]
    fn permeability_factor_follows_damage() -> Result<(), StrError> {
        let config = Config::new(2)?;
        let mut param = ParamSolid::sample_damage_threshold();
        param.permeability_coupling = Some(ParamPermeabilityCoupling { coeff1: 0.0, coeff2: 2.0 });
        let mut model = ModelSolidMechanics::new(&config, &param)?;

        let old = LocalState::new(config.mandel());
        let mut state = LocalState::new(config.mandel());
        let mut strain = Tensor2::new(config.mandel());
        strain.sym_set(0, 0, 5e-3);
        model.update_state(&mut state, &old, &strain, None, None)?;
        assert!(state.damage > 0.0);
        approx_eq(
            model.permeability_factor(&state),
            f64::exp(2.0 * state.damage),
            1e-14,
        );
        Ok(())
    }
}
