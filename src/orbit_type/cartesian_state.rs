//! # Cartesian state vectors
//!
//! [`CartesianState`] is the position/velocity pair of the satellite in the Earth-centred
//! inertial (ECI) frame, in meters and meters per second. It is the representation consumed
//! by [`CartesianDynamics`](crate::dynamics::CartesianDynamics) and the common ground through
//! which the element sets are reported.
//!
//! The inverse problem (state → classical elements) lives in
//! [`KeplerianElements::from_cartesian`].
use nalgebra::Vector3;
use std::fmt;

use crate::{
    constants::{Meter, Radian, StateVector},
    orbit_type::{equinoctial_element::EquinoctialElements, keplerian_element::KeplerianElements},
    physical_params::PhysicalParameters,
    satprop_errors::SatpropError,
};

/// Position and velocity in the ECI frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartesianState {
    /// Position `(x, y, z)` in meters.
    pub position: Vector3<f64>,
    /// Velocity `(ẋ, ẏ, ż)` in meters per second.
    pub velocity: Vector3<f64>,
}

impl CartesianState {
    pub fn new(position: Vector3<f64>, velocity: Vector3<f64>) -> Self {
        Self { position, velocity }
    }

    /// Read the layout `(x, y, z, ẋ, ẏ, ż)`.
    pub fn from_vector(state: &StateVector) -> Self {
        Self {
            position: Vector3::new(state[0], state[1], state[2]),
            velocity: Vector3::new(state[3], state[4], state[5]),
        }
    }

    /// Write the layout `(x, y, z, ẋ, ẏ, ż)`.
    pub fn to_vector(&self) -> StateVector {
        StateVector::new(
            self.position.x,
            self.position.y,
            self.position.z,
            self.velocity.x,
            self.velocity.y,
            self.velocity.z,
        )
    }

    /// Angular momentum vector `r × v` (m²/s).
    pub fn angular_momentum(&self) -> Vector3<f64> {
        self.position.cross(&self.velocity)
    }

    /// Specific mechanical energy `½v² − mu/r` (J/kg).
    pub fn specific_energy(&self, mu: f64) -> f64 {
        0.5 * self.velocity.norm_squared() - mu / self.position.norm()
    }

    /// Convert to classical elements, see [`KeplerianElements::from_cartesian`].
    pub fn to_keplerian(&self, mu: f64) -> Result<KeplerianElements, SatpropError> {
        KeplerianElements::from_cartesian(self, mu)
    }

    /// Convert to modified equinoctial elements (through the classical elements).
    pub fn to_equinoctial(&self, mu: f64) -> Result<EquinoctialElements, SatpropError> {
        EquinoctialElements::try_from(&self.to_keplerian(mu)?)
    }

    pub fn is_finite(&self) -> bool {
        self.position.iter().chain(self.velocity.iter()).all(|x| x.is_finite())
    }
}

impl From<&StateVector> for CartesianState {
    fn from(state: &StateVector) -> Self {
        Self::from_vector(state)
    }
}

impl From<CartesianState> for StateVector {
    fn from(state: CartesianState) -> Self {
        state.to_vector()
    }
}

/// Initial conditions of a circular orbit.
///
/// The satellite starts on the x-axis at radius `R + altitude` with the circular speed
/// `√(mu/r)`. The velocity lies in the y–z plane, tilted from +y towards +z by
/// `inclination`, so the orbit plane is obtained by rotating the equator about the x-axis.
///
/// Arguments
/// ---------
/// * `altitude`: height above the Earth radius of `params`, in meters
/// * `inclination`: orbit inclination in radians
/// * `params`: source of `mu` and of the Earth radius
///
/// Returns
/// -------
/// * `Err(SatpropError::DegenerateState)` if the resulting radius is not strictly positive.
pub fn circular_orbit_initial_conditions(
    altitude: Meter,
    inclination: Radian,
    params: &PhysicalParameters,
) -> Result<CartesianState, SatpropError> {
    let radius = params.earth_radius() + altitude;
    if !radius.is_finite() || radius <= 0.0 {
        return Err(SatpropError::DegenerateState(format!(
            "circular orbit radius must be > 0, got {radius}"
        )));
    }

    let speed = (params.mu() / radius).sqrt();
    let (sin_i, cos_i) = inclination.sin_cos();

    Ok(CartesianState::new(
        Vector3::new(radius, 0.0, 0.0),
        Vector3::new(0.0, speed * cos_i, speed * sin_i),
    ))
}

impl fmt::Display for CartesianState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cartesian state (ECI)")?;
        writeln!(f, "-------------------------------------------")?;
        writeln!(
            f,
            "  r = [{:.3}, {:.3}, {:.3}] m  (|r| = {:.3} m)",
            self.position.x,
            self.position.y,
            self.position.z,
            self.position.norm()
        )?;
        write!(
            f,
            "  v = [{:.6}, {:.6}, {:.6}] m/s (|v| = {:.6} m/s)",
            self.velocity.x,
            self.velocity.y,
            self.velocity.z,
            self.velocity.norm()
        )
    }
}
