//! # Perturbation force models
//!
//! Accelerations added to the two-body motion, each available in the frame that matches a
//! state representation:
//!
//! - J2: [`j2::j2_acceleration_eci`] (Cartesian, ECI), [`j2::j2_rtn_classical`] and
//!   [`j2::j2_rtn_equinoctial`] (RTN).
//! - drag: [`drag::drag_force_eci`] (Cartesian, ECI), [`drag::drag_rtn_classical`] and
//!   [`drag::drag_rtn_equinoctial`] (RTN).
//!
//! The three formulations of a model agree at a shared physical state once the RTN vector
//! is rotated with [`rtn_frame`].
//!
//! ## RTN frame
//!
//! * `R̂`: along the position vector,
//! * `N̂`: along the angular momentum `r × v`,
//! * `T̂ = N̂ × R̂`: in the orbit plane, towards the motion.
//!
//! Additional forces can be plugged into every dynamics through the [`RtnPerturbation`]
//! trait without changing their signatures.
use nalgebra::{Matrix3, Vector3};

use crate::{
    orbit_type::cartesian_state::CartesianState, physical_params::PhysicalParameters,
    satprop_errors::SatpropError,
};

/// Quadratic atmospheric drag.
pub mod drag;

/// Second zonal harmonic of the Earth gravity field.
pub mod j2;

/// Extra force term expressed in the RTN frame.
///
/// Implementors return the specific force (m/s²) as `(u_R, u_T, u_N)` for the satellite at
/// `state`. The dynamics call it with a Cartesian snapshot of the current state whatever
/// their own representation, so one implementation serves all three.
///
/// Models must be thread-safe: dynamics are shared across threads by the batch driver.
pub trait RtnPerturbation: Send + Sync {
    /// RTN acceleration at `state`, time `t` (seconds).
    fn acceleration_rtn(
        &self,
        state: &CartesianState,
        params: &PhysicalParameters,
        t: f64,
    ) -> Vector3<f64>;

    /// Model name for logging.
    fn name(&self) -> &'static str;
}

/// Rotation from RTN to ECI components: its columns are `R̂`, `T̂` and `N̂`.
///
/// Returns [`SatpropError::DegenerateState`] when `r` is zero or parallel to `v`.
pub fn rtn_frame(
    position: &Vector3<f64>,
    velocity: &Vector3<f64>,
) -> Result<Matrix3<f64>, SatpropError> {
    let ang_mom = position.cross(velocity);
    let r_norm = position.norm();
    let h_norm = ang_mom.norm();
    if r_norm == 0.0 || h_norm == 0.0 {
        return Err(SatpropError::DegenerateState(
            "RTN frame undefined for rectilinear motion".into(),
        ));
    }

    let radial = position / r_norm;
    let normal = ang_mom / h_norm;
    let transverse = normal.cross(&radial);

    Ok(Matrix3::from_columns(&[radial, transverse, normal]))
}

/// Sum of the extra RTN terms at `state`.
pub(crate) fn extra_rtn_acceleration(
    extra: &[Box<dyn RtnPerturbation>],
    state: &CartesianState,
    params: &PhysicalParameters,
    t: f64,
) -> Vector3<f64> {
    extra
        .iter()
        .map(|p| p.acceleration_rtn(state, params, t))
        .fold(Vector3::zeros(), |acc, a| acc + a)
}
