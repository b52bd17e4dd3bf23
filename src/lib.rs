//! Tpmech implements constitutive models for coupled thermo-poro-mechanical solids
//!
//! The crate evaluates the material response at integration points: given the
//! current total strain (and, if coupled, temperature and pore pressure) plus
//! the previous step's history, it computes the updated stress tensor, scalar
//! and directional (bond) damage, and classifies localized cracking.
//!
//! The finite element discretization, global assembly, and time stepping are
//! external collaborators; they supply displacement gradients and keep the
//! per-point history records across steps.

/// Defines a type alias for the error type as a static string
pub type StrError = &'static str;

pub mod base;
pub mod material;
