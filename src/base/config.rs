use crate::StrError;
use russell_tensor::Mandel;
use std::fmt;

/// Holds the kinematic and coupling configuration resolved before evaluation
///
/// # Default values
///
/// * Plane-strain in 2D
/// * No temperature field and no pore-pressure value coupled
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Number of active displacement-gradient fields (1, 2, or 3)
    pub ndim: usize,

    /// Indicates a plane-stress idealization in 2D
    pub plane_stress: bool,

    /// Indicates that a temperature field is coupled
    pub has_temperature: bool,

    /// Indicates that a pore-pressure value is coupled
    pub has_pore_pressure: bool,
}

impl Config {
    /// Allocates a new instance
    pub fn new(ndim: usize) -> Result<Self, StrError> {
        if ndim < 1 || ndim > 3 {
            return Err("ndim must be 1, 2, or 3");
        }
        Ok(Config {
            ndim,
            plane_stress: false,
            has_temperature: false,
            has_pore_pressure: false,
        })
    }

    /// Indicates 1D/2D instead of 3D
    pub fn two_dim(&self) -> bool {
        self.ndim < 3
    }

    /// Returns the symmetric Mandel representation associated with the configuration
    ///
    /// # Results
    ///
    /// * `1D/2D`: [Mandel::Symmetric2D]
    /// * `3D`: [Mandel::Symmetric]
    pub fn mandel(&self) -> Mandel {
        if self.two_dim() {
            Mandel::Symmetric2D
        } else {
            Mandel::Symmetric
        }
    }

    /// Sets a 2D plane-stress idealization, otherwise plane-strain
    pub fn set_plane_stress(&mut self, flag: bool) -> Result<&mut Self, StrError> {
        if flag && self.ndim != 2 {
            return Err("plane-stress requires ndim = 2");
        }
        self.plane_stress = flag;
        Ok(self)
    }

    /// Enables the coupled temperature field
    pub fn set_temperature(&mut self, flag: bool) -> Result<&mut Self, StrError> {
        self.has_temperature = flag;
        Ok(self)
    }

    /// Enables the coupled pore-pressure value
    pub fn set_pore_pressure(&mut self, flag: bool) -> Result<&mut Self, StrError> {
        self.has_pore_pressure = flag;
        Ok(self)
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Configuration data\n").unwrap();
        write!(f, "==================\n").unwrap();
        write!(f, "ndim = {:?}\n", self.ndim).unwrap();
        write!(f, "plane_stress = {:?}\n", self.plane_stress).unwrap();
        write!(f, "has_temperature = {:?}\n", self.has_temperature).unwrap();
        write!(f, "has_pore_pressure = {:?}\n", self.has_pore_pressure).unwrap();
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
