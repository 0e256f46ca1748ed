//! # Orbit state representations
//!
//! This module defines the state representations handled by the propagator and the
//! conversions between them:
//!
//! - [`cartesian_state`](crate::orbit_type::cartesian_state): ECI position/velocity
//!   `(x, y, z, ẋ, ẏ, ż)`.
//! - [`keplerian_element`](crate::orbit_type::keplerian_element): Classical elements
//!   `(a, e, i, ω, Ω, θ)`, singular for circular and equatorial orbits.
//! - [`equinoctial_element`](crate::orbit_type::equinoctial_element): Modified equinoctial
//!   elements `(p, f, g, h, k, L)`, a **non-singular formulation** for near-circular and
//!   near-equatorial orbits.
//! - [`cylindrical`](crate::orbit_type::cylindrical): Purely geometric cylindrical
//!   coordinates and their time derivatives.
//!
//! The [`OrbitState`] enum acts as a **type-erased wrapper** over the three dynamical
//! representations, and [`Representation`] names them (for instance when selected from a
//! configuration string).
//!
//! ## Typical workflow
//!
//! ```rust, no_run
//! use satprop::orbit_type::{OrbitState, Representation};
//! use satprop::orbit_type::cartesian_state::circular_orbit_initial_conditions;
//! use satprop::physical_params::PhysicalParameters;
//!
//! let params = PhysicalParameters::default();
//! let state = circular_orbit_initial_conditions(500_000.0, 0.9, &params).unwrap();
//!
//! // Move the state into the representation used for propagation
//! let start = OrbitState::Cartesian(state)
//!     .convert(Representation::Equinoctial, params.mu())
//!     .unwrap();
//! println!("{start}");
//! ```
use std::fmt;
use std::str::FromStr;

use crate::{
    constants::StateVector,
    orbit_type::{
        cartesian_state::CartesianState, equinoctial_element::EquinoctialElements,
        keplerian_element::KeplerianElements,
    },
    satprop_errors::SatpropError,
};

/// ECI position/velocity state and circular-orbit initial conditions.
pub mod cartesian_state;

/// Cylindrical coordinates, rates and accelerations.
pub mod cylindrical;

/// Modified equinoctial elements and related conversions.
pub mod equinoctial_element;

/// Classical Keplerian elements structure and utilities.
pub mod keplerian_element;

/// Name of a dynamical state representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Representation {
    Cartesian,
    Classical,
    Equinoctial,
}

impl FromStr for Representation {
    type Err = SatpropError;

    /// Accepts `cartesian`, `classical` (or `keplerian`) and `equinoctial`, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cartesian" => Ok(Representation::Cartesian),
            "classical" | "keplerian" => Ok(Representation::Classical),
            "equinoctial" => Ok(Representation::Equinoctial),
            other => Err(SatpropError::UnknownRepresentation(other.to_string())),
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Representation::Cartesian => "cartesian",
            Representation::Classical => "classical",
            Representation::Equinoctial => "equinoctial",
        };
        f.write_str(name)
    }
}

/// An orbit state in one of the three dynamical representations.
///
/// Variants
/// --------
/// * `Cartesian`: ECI position and velocity.
/// * `Keplerian`: Classical elements `(a, e, i, ω, Ω, θ)`.
/// * `Equinoctial`: Modified equinoctial elements `(p, f, g, h, k, L)`.
///
/// Every conversion needs the gravitational parameter `mu` because Cartesian velocities
/// and elements are only related through it.
///
/// See also
/// --------
/// * [`OrbitState::convert`] – Move to another representation.
/// * [`OrbitState::to_vector`] – 6-scalar layout consumed by the integrator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrbitState {
    Cartesian(CartesianState),
    Keplerian(KeplerianElements),
    Equinoctial(EquinoctialElements),
}

impl OrbitState {
    /// Wrap a 6-scalar vector laid out for `representation`.
    pub fn from_vector(representation: Representation, state: &StateVector) -> Self {
        match representation {
            Representation::Cartesian => OrbitState::Cartesian(CartesianState::from_vector(state)),
            Representation::Classical => {
                OrbitState::Keplerian(KeplerianElements::from_vector(state))
            }
            Representation::Equinoctial => {
                OrbitState::Equinoctial(EquinoctialElements::from_vector(state))
            }
        }
    }

    /// The 6-scalar layout of the wrapped representation.
    pub fn to_vector(&self) -> StateVector {
        match self {
            OrbitState::Cartesian(c) => c.to_vector(),
            OrbitState::Keplerian(k) => k.to_vector(),
            OrbitState::Equinoctial(e) => e.to_vector(),
        }
    }

    pub fn representation(&self) -> Representation {
        match self {
            OrbitState::Cartesian(_) => Representation::Cartesian,
            OrbitState::Keplerian(_) => Representation::Classical,
            OrbitState::Equinoctial(_) => Representation::Equinoctial,
        }
    }

    pub fn to_cartesian(&self, mu: f64) -> Result<CartesianState, SatpropError> {
        match self {
            OrbitState::Cartesian(c) => Ok(*c),
            OrbitState::Keplerian(k) => k.to_cartesian(mu),
            OrbitState::Equinoctial(e) => e.to_cartesian(mu),
        }
    }

    pub fn to_keplerian(&self, mu: f64) -> Result<KeplerianElements, SatpropError> {
        match self {
            OrbitState::Cartesian(c) => c.to_keplerian(mu),
            OrbitState::Keplerian(k) => Ok(*k),
            OrbitState::Equinoctial(e) => e.to_keplerian(),
        }
    }

    pub fn to_equinoctial(&self, mu: f64) -> Result<EquinoctialElements, SatpropError> {
        match self {
            OrbitState::Cartesian(c) => c.to_equinoctial(mu),
            OrbitState::Keplerian(k) => EquinoctialElements::from_keplerian(k),
            OrbitState::Equinoctial(e) => Ok(*e),
        }
    }

    /// Convert into `target`, returning `self` unchanged when it already matches.
    pub fn convert(&self, target: Representation, mu: f64) -> Result<OrbitState, SatpropError> {
        Ok(match target {
            Representation::Cartesian => OrbitState::Cartesian(self.to_cartesian(mu)?),
            Representation::Classical => OrbitState::Keplerian(self.to_keplerian(mu)?),
            Representation::Equinoctial => OrbitState::Equinoctial(self.to_equinoctial(mu)?),
        })
    }

    pub fn as_cartesian(&self) -> Option<&CartesianState> {
        if let OrbitState::Cartesian(ref c) = self {
            Some(c)
        } else {
            None
        }
    }

    pub fn as_keplerian(&self) -> Option<&KeplerianElements> {
        if let OrbitState::Keplerian(ref k) = self {
            Some(k)
        } else {
            None
        }
    }

    pub fn as_equinoctial(&self) -> Option<&EquinoctialElements> {
        if let OrbitState::Equinoctial(ref e) = self {
            Some(e)
        } else {
            None
        }
    }
}

impl From<CartesianState> for OrbitState {
    fn from(c: CartesianState) -> Self {
        OrbitState::Cartesian(c)
    }
}

impl From<KeplerianElements> for OrbitState {
    fn from(k: KeplerianElements) -> Self {
        OrbitState::Keplerian(k)
    }
}

impl From<EquinoctialElements> for OrbitState {
    fn from(e: EquinoctialElements) -> Self {
        OrbitState::Equinoctial(e)
    }
}

impl fmt::Display for OrbitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrbitState::Cartesian(c) => {
                writeln!(f, "[Cartesian representation]")?;
                write!(f, "{c}")
            }
            OrbitState::Keplerian(k) => {
                writeln!(f, "[Keplerian representation]")?;
                write!(f, "{k}")
            }
            OrbitState::Equinoctial(e) => {
                writeln!(f, "[Equinoctial representation]")?;
                write!(f, "{e}")
            }
        }
    }
}
