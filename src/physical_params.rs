//! # Physical parameters of a propagation run
//!
//! This module defines [`crate::physical_params::PhysicalParameters`], the **immutable bundle of
//! constants** shared by every transform, force model and equation of motion of a simulation
//! run, together with its validated builder and a serde-friendly option set.
//!
//! ## Purpose
//!
//! - Hold Earth's gravitational constants (`G`, `M`, derived `mu = G·M`, `J2`, `R`).
//! - Hold the satellite's drag properties (`m`, `rho`, `C_D`, `A`).
//! - Carry the optional `distance_scale` / `time_scale` pair consumed by
//!   [`UnitScaling`](crate::conversion::UnitScaling).
//!
//! The fields are private: `mu` is computed once in the builder so the relation `mu = G·M`
//! can never be broken after construction.
//!
//! ## Example
//!
//! ```rust
//! use satprop::physical_params::PhysicalParameters;
//!
//! let params = PhysicalParameters::builder()
//!     .satellite_mass(4.0)
//!     .rho(2.0e-12)
//!     .j2(0.0) // switch oblateness off
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(params.mu(), params.g() * params.earth_mass());
//! ```
//!
//! ## Configuration
//!
//! [`PhysicalParametersConfig`] mirrors the option names used by configuration files
//! (`m_satellite`, `rho`, `C_D`, `A`, `G_gravity`, `M_earth`, `J2`, `R_earth`). Every option
//! falls back to its documented default, and the conversion into [`PhysicalParameters`]
//! goes through the same validation as the builder.
use serde::Deserialize;
use std::cmp::Ordering::{Equal, Greater};
use std::fmt;

use crate::constants::{
    DEFAULT_DRAG_COEFFICIENT, DEFAULT_REFERENCE_AREA, DEFAULT_RHO, DEFAULT_SATELLITE_MASS,
    EARTH_J2, EARTH_MASS, EARTH_RADIUS, G_GRAVITY,
};
use crate::conversion::UnitScaling;
use crate::satprop_errors::SatpropError;

/// Gravitational and satellite constants for one simulation run.
///
/// Units
/// -----
/// * `g`: m³·kg⁻¹·s⁻²
/// * `earth_mass`, `satellite_mass`: kg
/// * `mu`: m³·s⁻²
/// * `j2`, `drag_coefficient`: dimensionless
/// * `earth_radius`: m
/// * `rho`: kg·m⁻³
/// * `reference_area`: m²
///
/// Validation
/// ----------
/// * `g`, `earth_mass`, `earth_radius`, `satellite_mass` are strictly positive.
/// * `j2`, `rho`, `drag_coefficient`, `reference_area` are non-negative; zero disables the
///   corresponding perturbation.
/// * `distance_scale` / `time_scale`, when set, are finite and non-zero.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicalParameters {
    g: f64,
    earth_mass: f64,
    mu: f64,
    j2: f64,
    earth_radius: f64,
    satellite_mass: f64,
    rho: f64,
    drag_coefficient: f64,
    reference_area: f64,
    distance_scale: Option<f64>,
    time_scale: Option<f64>,
}

impl PhysicalParameters {
    /// Parameters of the default Earth + 3U cubesat scenario.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a [`PhysicalParametersBuilder`] initialized with the default values.
    pub fn builder() -> PhysicalParametersBuilder {
        PhysicalParametersBuilder::new()
    }

    pub fn g(&self) -> f64 {
        self.g
    }

    pub fn earth_mass(&self) -> f64 {
        self.earth_mass
    }

    /// Standard gravitational parameter `mu = G·M`.
    pub fn mu(&self) -> f64 {
        self.mu
    }

    pub fn j2(&self) -> f64 {
        self.j2
    }

    pub fn earth_radius(&self) -> f64 {
        self.earth_radius
    }

    pub fn satellite_mass(&self) -> f64 {
        self.satellite_mass
    }

    pub fn rho(&self) -> f64 {
        self.rho
    }

    pub fn drag_coefficient(&self) -> f64 {
        self.drag_coefficient
    }

    pub fn reference_area(&self) -> f64 {
        self.reference_area
    }

    pub fn distance_scale(&self) -> Option<f64> {
        self.distance_scale
    }

    pub fn time_scale(&self) -> Option<f64> {
        self.time_scale
    }

    /// Ballistic factor `½·ρ·C_D·A/m` of the quadratic drag law, in m⁻¹.
    pub fn drag_factor(&self) -> f64 {
        0.5 * self.rho * self.drag_coefficient * self.reference_area / self.satellite_mass
    }

    /// Unit scaling built from `distance_scale` and `time_scale`, when both are configured.
    pub fn scaling(&self) -> Option<UnitScaling> {
        match (self.distance_scale, self.time_scale) {
            (Some(distance_scale), Some(time_scale)) => {
                UnitScaling::new(distance_scale, time_scale).ok()
            }
            _ => None,
        }
    }
}

impl Default for PhysicalParameters {
    fn default() -> Self {
        PhysicalParameters {
            g: G_GRAVITY,
            earth_mass: EARTH_MASS,
            mu: G_GRAVITY * EARTH_MASS,
            j2: EARTH_J2,
            earth_radius: EARTH_RADIUS,
            satellite_mass: DEFAULT_SATELLITE_MASS,
            rho: DEFAULT_RHO,
            drag_coefficient: DEFAULT_DRAG_COEFFICIENT,
            reference_area: DEFAULT_REFERENCE_AREA,
            distance_scale: None,
            time_scale: None,
        }
    }
}

impl fmt::Display for PhysicalParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Physical parameters")?;
        writeln!(f, "-------------------------------------------")?;
        writeln!(f, "  G    = {:.6e} m^3 kg^-1 s^-2", self.g)?;
        writeln!(f, "  M    = {:.6e} kg", self.earth_mass)?;
        writeln!(f, "  mu   = {:.6e} m^3 s^-2", self.mu)?;
        writeln!(f, "  J2   = {:.6e}", self.j2)?;
        writeln!(f, "  R    = {:.3} m", self.earth_radius)?;
        writeln!(f, "  m    = {:.3} kg", self.satellite_mass)?;
        writeln!(f, "  rho  = {:.3e} kg m^-3", self.rho)?;
        writeln!(f, "  C_D  = {:.3}", self.drag_coefficient)?;
        write!(f, "  A    = {:.4} m^2", self.reference_area)
    }
}

/// Builder for [`PhysicalParameters`], with validation.
#[derive(Debug, Clone)]
pub struct PhysicalParametersBuilder {
    params: PhysicalParameters,
}

impl Default for PhysicalParametersBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicalParametersBuilder {
    /// Create a new builder initialized with default values.
    pub fn new() -> Self {
        Self {
            params: PhysicalParameters::default(),
        }
    }

    // --- Earth ---
    pub fn g(mut self, v: f64) -> Self {
        self.params.g = v;
        self
    }
    pub fn earth_mass(mut self, v: f64) -> Self {
        self.params.earth_mass = v;
        self
    }
    pub fn j2(mut self, v: f64) -> Self {
        self.params.j2 = v;
        self
    }
    pub fn earth_radius(mut self, v: f64) -> Self {
        self.params.earth_radius = v;
        self
    }

    // --- Satellite / drag ---
    pub fn satellite_mass(mut self, v: f64) -> Self {
        self.params.satellite_mass = v;
        self
    }
    pub fn rho(mut self, v: f64) -> Self {
        self.params.rho = v;
        self
    }
    pub fn drag_coefficient(mut self, v: f64) -> Self {
        self.params.drag_coefficient = v;
        self
    }
    pub fn reference_area(mut self, v: f64) -> Self {
        self.params.reference_area = v;
        self
    }

    // --- Scaling ---
    pub fn distance_scale(mut self, v: f64) -> Self {
        self.params.distance_scale = Some(v);
        self
    }
    pub fn time_scale(mut self, v: f64) -> Self {
        self.params.time_scale = Some(v);
        self
    }

    /// Disable both perturbations (`J2 = 0`, `rho = 0`), leaving pure Keplerian motion.
    pub fn unperturbed(mut self) -> Self {
        self.params.j2 = 0.0;
        self.params.rho = 0.0;
        self
    }

    /// Return true iff x > 0.0, finite, and comparable (i.e., not NaN).
    #[inline]
    fn gt0(x: f64) -> bool {
        x.is_finite() && x.partial_cmp(&0.0) == Some(Greater)
    }

    /// Return true iff x >= 0.0, finite, and comparable (i.e., not NaN).
    #[inline]
    fn ge0(x: f64) -> bool {
        x.is_finite() && matches!(x.partial_cmp(&0.0), Some(Greater) | Some(Equal))
    }

    /// Finalize the builder and produce a [`PhysicalParameters`] instance.
    ///
    /// Validation rules
    /// -----------------
    /// * `g > 0`, `earth_mass > 0`, `earth_radius > 0`, `satellite_mass > 0`.
    /// * `j2 >= 0`, `rho >= 0`, `drag_coefficient >= 0`, `reference_area >= 0`.
    /// * `distance_scale`, `time_scale` finite and non-zero when present.
    ///
    /// Returns
    /// -----------------
    /// * `Ok(PhysicalParameters)` with `mu = g · earth_mass`.
    /// * `Err(SatpropError::InvalidPhysicalParameter)` naming the first offending field.
    pub fn build(self) -> Result<PhysicalParameters, SatpropError> {
        let mut p = self.params;

        for (name, value) in [
            ("G_gravity", p.g),
            ("M_earth", p.earth_mass),
            ("R_earth", p.earth_radius),
            ("m_satellite", p.satellite_mass),
        ] {
            if !Self::gt0(value) {
                return Err(SatpropError::InvalidPhysicalParameter(format!(
                    "{name} must be finite and > 0, got {value}"
                )));
            }
        }

        for (name, value) in [
            ("J2", p.j2),
            ("rho", p.rho),
            ("C_D", p.drag_coefficient),
            ("A", p.reference_area),
        ] {
            if !Self::ge0(value) {
                return Err(SatpropError::InvalidPhysicalParameter(format!(
                    "{name} must be finite and >= 0, got {value}"
                )));
            }
        }

        for (name, value) in [
            ("distance_scale", p.distance_scale),
            ("time_scale", p.time_scale),
        ] {
            if let Some(v) = value {
                if !v.is_finite() || v == 0.0 {
                    return Err(SatpropError::InvalidPhysicalParameter(format!(
                        "{name} must be finite and non-zero, got {v}"
                    )));
                }
            }
        }

        p.mu = p.g * p.earth_mass;
        Ok(p)
    }
}

/// Named configuration options for [`PhysicalParameters`].
///
/// Missing options take the defaults of [`PhysicalParameters::default`]:
///
/// | option         | default          |
/// |----------------|------------------|
/// | `m_satellite`  | 4 kg             |
/// | `rho`          | 1e-12 kg/m³      |
/// | `C_D`          | 2.2              |
/// | `A`            | 0.03 m² (3U)     |
/// | `G_gravity`    | 6.67430e-11      |
/// | `M_earth`      | 5.9722e24 kg     |
/// | `J2`           | 1.08262668e-3    |
/// | `R_earth`      | 6 378 137 m      |
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PhysicalParametersConfig {
    pub m_satellite: f64,
    pub rho: f64,
    #[serde(rename = "C_D")]
    pub c_d: f64,
    #[serde(rename = "A")]
    pub a: f64,
    #[serde(rename = "G_gravity")]
    pub g_gravity: f64,
    #[serde(rename = "M_earth")]
    pub m_earth: f64,
    #[serde(rename = "J2")]
    pub j2: f64,
    #[serde(rename = "R_earth")]
    pub r_earth: f64,
    pub distance_scale: Option<f64>,
    pub time_scale: Option<f64>,
}

impl Default for PhysicalParametersConfig {
    fn default() -> Self {
        PhysicalParametersConfig {
            m_satellite: DEFAULT_SATELLITE_MASS,
            rho: DEFAULT_RHO,
            c_d: DEFAULT_DRAG_COEFFICIENT,
            a: DEFAULT_REFERENCE_AREA,
            g_gravity: G_GRAVITY,
            m_earth: EARTH_MASS,
            j2: EARTH_J2,
            r_earth: EARTH_RADIUS,
            distance_scale: None,
            time_scale: None,
        }
    }
}

impl TryFrom<PhysicalParametersConfig> for PhysicalParameters {
    type Error = SatpropError;

    fn try_from(config: PhysicalParametersConfig) -> Result<Self, Self::Error> {
        let mut builder = PhysicalParameters::builder()
            .satellite_mass(config.m_satellite)
            .rho(config.rho)
            .drag_coefficient(config.c_d)
            .reference_area(config.a)
            .g(config.g_gravity)
            .earth_mass(config.m_earth)
            .j2(config.j2)
            .earth_radius(config.r_earth);

        if let Some(distance_scale) = config.distance_scale {
            builder = builder.distance_scale(distance_scale);
        }
        if let Some(time_scale) = config.time_scale {
            builder = builder.time_scale(time_scale);
        }

        builder.build()
    }
}
