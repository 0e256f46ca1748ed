//! # Constants and type definitions for Satprop
//!
//! This module centralizes the **physical constants**, **default satellite properties**,
//! **numerical tolerances**, and **common type aliases** used throughout the `satprop`
//! library.
//!
//! ## Overview
//!
//! - Earth gravitational and geometric constants (SI units)
//! - Default properties of a 3U cubesat used by
//!   [`PhysicalParameters`](crate::physical_params::PhysicalParameters)
//! - Tolerances shared by the element conversions and the Kepler solver
//! - Core type aliases used across the crate
//!
//! All values are expressed in **SI units** (meters, seconds, kilograms) unless stated otherwise.

use nalgebra::Vector6;

// -------------------------------------------------------------------------------------------------
// Physical constants
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Newtonian constant of gravitation in m³·kg⁻¹·s⁻² (CODATA 2018)
pub const G_GRAVITY: f64 = 6.674_30e-11;

/// Earth mass in kilograms
pub const EARTH_MASS: f64 = 5.972_2e24;

/// Earth second zonal harmonic (EGM2008, unnormalized)
pub const EARTH_J2: f64 = 1.082_626_68e-3;

/// Earth equatorial radius in meters (GRS1980/WGS84)
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

// -------------------------------------------------------------------------------------------------
// Default satellite properties (3U cubesat)
// -------------------------------------------------------------------------------------------------

/// Satellite mass in kilograms
pub const DEFAULT_SATELLITE_MASS: f64 = 4.0;

/// Atmospheric density in kg/m³, representative of ~500 km altitude
pub const DEFAULT_RHO: f64 = 1.0e-12;

/// Dimensionless drag coefficient of a flat-faced body
pub const DEFAULT_DRAG_COEFFICIENT: f64 = 2.2;

/// Reference area in m², long face of a 3U cubesat (10 cm × 30 cm)
pub const DEFAULT_REFERENCE_AREA: f64 = 0.03;

// -------------------------------------------------------------------------------------------------
// Numerical tolerances
// -------------------------------------------------------------------------------------------------

/// Residual tolerance on Kepler's equation `E − e·sin E − M`
pub const KEPLER_TOLERANCE: f64 = 1e-10;

/// Maximum number of Newton iterations when solving Kepler's equation
pub const KEPLER_MAX_ITER: usize = 100;

/// Absolute tolerance used when snapping the semi-latus rectum onto the semi-major axis
pub const CIRCULAR_ATOL: f64 = 1e-9;

/// Relative tolerance used when snapping the semi-latus rectum onto the semi-major axis
pub const CIRCULAR_RTOL: f64 = 1e-8;

/// Below this value `e` or `|sin i|` make the classical variational equations singular
pub const SINGULARITY_TOLERANCE: f64 = 1e-12;

/// Largest number of samples a single trajectory may hold
pub const MAX_TRAJECTORY_SAMPLES: usize = 100_000_000;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in radians
pub type Radian = f64;
/// Distance in meters
pub type Meter = f64;
/// Time in seconds
pub type Second = f64;

/// Six-scalar state layout shared by every representation and consumed by the integrator
pub type StateVector = Vector6<f64>;
