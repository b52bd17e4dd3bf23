use crate::base::{Config, ParamSolid};
use crate::StrError;
use russell_tensor::{t4_ddot_t2_update, LinElasticity, Tensor2};

/// Implements the thermo-poro-elastic trial stress model
///
/// ```text
/// σ_trial = D : (ε - εth I) - b p I      εth = α (T - T_ref)
/// ```
///
/// The trial stress is always computed before any damage or crack reduction.
/// Without a coupled temperature (pore pressure), the corresponding term
/// vanishes.
pub struct ThermoElastic {
    /// Linear elasticity with the modulus D derived from (E, ν)
    pub model: LinElasticity,
    alpha: f64,
    biot: f64,
    t_ref: f64,
}

impl ThermoElastic {
    /// Allocates a new instance
    pub fn new(config: &Config, param: &ParamSolid) -> Result<Self, StrError> {
        if param.young <= 0.0 {
            return Err("young must be positive");
        }
        if param.poisson <= -1.0 {
            return Err("poisson must be greater than -1.0");
        }
        if param.poisson >= 0.5 {
            return Err("poisson must be smaller than 0.5 (incompressible limit)");
        }
        if param.thermal_expansion < 0.0 {
            return Err("thermal_expansion must not be negative");
        }
        if param.biot < 0.0 || param.biot > 1.0 {
            return Err("biot must be within [0,1]");
        }
        Ok(ThermoElastic {
            model: LinElasticity::new(param.young, param.poisson, config.two_dim(), config.plane_stress),
            alpha: param.thermal_expansion,
            biot: param.biot,
            t_ref: param.t_ref,
        })
    }

    /// Returns the thermal expansion coefficient
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Computes the trial stress from the total strain and the coupled values
    ///
    /// Returns the thermal strain `εth = α (T - T_ref)` for publication.
    ///
    /// # Panics
    ///
    /// A panic will occur if the tensors have different [russell_tensor::Mandel].
    pub fn calc_stress(
        &self,
        stress: &mut Tensor2,
        strain: &Tensor2,
        temperature: Option<f64>,
        pore_pressure: Option<f64>,
    ) -> f64 {
        assert_eq!(strain.mandel(), stress.mandel());
        let thermal_strain = match temperature {
            Some(tt) => self.alpha * (tt - self.t_ref),
            None => 0.0,
        };
        let mut elastic_strain = strain.clone();
        if thermal_strain != 0.0 {
            for i in 0..3 {
                elastic_strain.sym_add(i, i, 1.0, -thermal_strain);
            }
        }
        let dd = self.model.get_modulus();
        stress.clear();
        t4_ddot_t2_update(stress, 1.0, dd, &elastic_strain, 0.0); // σ = D : εe
        if let Some(pp) = pore_pressure {
            for i in 0..3 {
                stress.sym_add(i, i, 1.0, -self.biot * pp);
            }
        }
        thermal_strain
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
