//! # Classical (Keplerian) orbital elements
//!
//! This module defines [`KeplerianElements`], the classical element set
//! `(a, e, i, ω, Ω, θ)` with the **true anomaly** as fast variable, and the conversions
//! to and from Cartesian state vectors.
//!
//! ## Units
//!
//! - Lengths: **meters**
//! - Angles: **radians**, `ω`, `Ω`, `θ` always returned in `[0, 2π)` by
//!   [`wrap_to_positive_2pi`]
//!
//! ## Degeneracies
//!
//! Classical elements are singular for:
//!
//! - **Circular orbits (`e → 0`)**: ω is undefined; the state → elements conversion still
//!   returns a consistent pair `(ω, θ)` whose sum is the argument of latitude.
//! - **Equatorial orbits (`i → 0`)**: Ω is undefined and conventionally set to `0.0`.
//!
//! The [`EquinoctialElements`] representation has neither singularity and is preferred for
//! propagating near-circular or near-equatorial orbits.
//!
//! ## See also
//!
//! - [`EquinoctialElements`] – non-singular element set.
//! - [`crate::kepler`] – anomaly conversions used by the transforms.
use nalgebra::{Matrix3x2, Vector2, Vector3};
use std::f64::consts::PI;
use std::fmt;

use crate::{
    constants::{StateVector, CIRCULAR_ATOL, CIRCULAR_RTOL, RADEG},
    kepler::{
        check_elliptic, eccentric_to_true_anomaly, true_to_eccentric_anomaly, wrap_to_positive_2pi,
    },
    orbit_type::{cartesian_state::CartesianState, equinoctial_element::EquinoctialElements},
    satprop_errors::SatpropError,
};

/// Classical orbital elements of a bound orbit.
///
/// Units
/// -----
/// * `semi_major_axis`: meters (`a > 0`).
/// * `eccentricity`: unitless (`0 ≤ e < 1`).
/// * `inclination`: radians (`0 ≤ i ≤ π`).
/// * `periapsis_argument`: radians (ω).
/// * `ascending_node_longitude`: radians (Ω).
/// * `true_anomaly`: radians (θ).
///
/// The vector layout used by the integrator is `(a, e, i, ω, Ω, θ)`.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct KeplerianElements {
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub inclination: f64,
    pub periapsis_argument: f64,
    pub ascending_node_longitude: f64,
    pub true_anomaly: f64,
}

impl KeplerianElements {
    /// Read the layout `(a, e, i, ω, Ω, θ)`.
    pub fn from_vector(elements: &StateVector) -> Self {
        Self {
            semi_major_axis: elements[0],
            eccentricity: elements[1],
            inclination: elements[2],
            periapsis_argument: elements[3],
            ascending_node_longitude: elements[4],
            true_anomaly: elements[5],
        }
    }

    /// Write the layout `(a, e, i, ω, Ω, θ)`.
    pub fn to_vector(&self) -> StateVector {
        StateVector::new(
            self.semi_major_axis,
            self.eccentricity,
            self.inclination,
            self.periapsis_argument,
            self.ascending_node_longitude,
            self.true_anomaly,
        )
    }

    /// Check the bound elliptic domain: `a > 0`, `0 ≤ e < 1`, `0 ≤ i ≤ π`.
    pub fn validate(&self) -> Result<(), SatpropError> {
        if !(self.semi_major_axis > 0.0 && self.semi_major_axis.is_finite()) {
            return Err(SatpropError::NonPositiveSemiMajorAxis(self.semi_major_axis));
        }
        check_elliptic(self.eccentricity)?;
        if !(0.0..=PI).contains(&self.inclination) {
            return Err(SatpropError::InvalidInclination(self.inclination));
        }
        Ok(())
    }

    /// Semi-latus rectum `p = a(1 − e²)`.
    pub fn semi_latus_rectum(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity * self.eccentricity)
    }

    /// Orbital period `2π√(a³/mu)` in seconds.
    pub fn period(&self, mu: f64) -> f64 {
        2.0 * PI * (self.semi_major_axis.powi(3) / mu).sqrt()
    }

    /// Build classical elements from a Cartesian state.
    ///
    /// Algorithm
    /// ---------
    /// 1. `h = r × v`, `W = h/|h|`, `i = atan2(√(Wx²+Wy²), Wz)`, `Ω = atan2(Wx, −Wy)`
    ///    (Ω = 0 when the orbit lies exactly in the equatorial plane).
    /// 2. `a = 1/(2/|r| − |v|²/mu)` and `p = |h|²/mu`. When `a` and `p` agree within
    ///    `atol = 1e-9`, `rtol = 1e-8`, `p` is set to `a` so that `1 − p/a` cannot turn
    ///    slightly negative for near-circular orbits.
    /// 3. `e = √(1 − p/a)`, eccentric anomaly from `e·sin E = r·v/√(mu·a)` and
    ///    `e·cos E = 1 − |r|/a`, true anomaly from `E`.
    /// 4. Argument of latitude `u` from the in-plane coordinates of `r`, then `ω = u − θ`.
    ///
    /// Errors
    /// ------
    /// * [`SatpropError::DegenerateState`] for a zero radius or zero angular momentum, or
    ///   when `p` exceeds `a` beyond the tolerance.
    /// * [`SatpropError::NonPositiveSemiMajorAxis`] for parabolic or hyperbolic states.
    pub fn from_cartesian(state: &CartesianState, mu: f64) -> Result<Self, SatpropError> {
        let r = &state.position;
        let v = &state.velocity;

        let r_norm = r.norm();
        if r_norm == 0.0 || !state.is_finite() {
            return Err(SatpropError::DegenerateState(format!(
                "position {r:?} cannot define an orbit"
            )));
        }

        let ang_mom = r.cross(v);
        let ang_mom_norm = ang_mom.norm();
        if ang_mom_norm == 0.0 {
            return Err(SatpropError::DegenerateState(
                "zero angular momentum (rectilinear motion)".into(),
            ));
        }
        let w = ang_mom / ang_mom_norm;

        // Inclination and longitude of the node
        let sin_incl = (w.x * w.x + w.y * w.y).sqrt();
        let inclination = sin_incl.atan2(w.z);
        let node = if sin_incl == 0.0 {
            0.0
        } else {
            wrap_to_positive_2pi(w.x.atan2(-w.y))
        };

        // Semi-major axis from the energy equation
        let semi_major_axis = 1.0 / (2.0 / r_norm - v.norm_squared() / mu);
        if !(semi_major_axis > 0.0 && semi_major_axis.is_finite()) {
            return Err(SatpropError::NonPositiveSemiMajorAxis(semi_major_axis));
        }

        let mut p = ang_mom_norm * ang_mom_norm / mu;
        if (semi_major_axis - p).abs() <= CIRCULAR_ATOL + CIRCULAR_RTOL * p.abs() {
            log::trace!("near-circular state: snapping p = {p} onto a = {semi_major_axis}");
            p = semi_major_axis;
        }

        let one_minus_ratio = 1.0 - p / semi_major_axis;
        if one_minus_ratio < 0.0 {
            return Err(SatpropError::DegenerateState(format!(
                "semi-latus rectum {p} exceeds semi-major axis {semi_major_axis}"
            )));
        }
        let eccentricity = one_minus_ratio.sqrt();
        check_elliptic(eccentricity)?;

        // Eccentric and true anomalies
        let e_sin_ecc = r.dot(v) / (mu * semi_major_axis).sqrt();
        let e_cos_ecc = 1.0 - r_norm / semi_major_axis;
        let ecc_anom = wrap_to_positive_2pi(e_sin_ecc.atan2(e_cos_ecc));
        let true_anomaly = eccentric_to_true_anomaly(ecc_anom, eccentricity)?;

        // Argument of latitude measured from the node line inside the orbit plane
        let (sin_node, cos_node) = node.sin_cos();
        let node_dir = Vector3::new(cos_node, sin_node, 0.0);
        let in_plane_dir = w.cross(&node_dir);
        let arg_latitude = r.dot(&in_plane_dir).atan2(r.dot(&node_dir));

        Ok(Self {
            semi_major_axis,
            eccentricity,
            inclination,
            periapsis_argument: wrap_to_positive_2pi(arg_latitude - true_anomaly),
            ascending_node_longitude: node,
            true_anomaly,
        })
    }

    /// Convert to a Cartesian state.
    ///
    /// The eccentric anomaly locates the satellite in the perifocal plane,
    /// `r_pf = a(cos E − e, √(1−e²) sin E)`, `v_pf = √(mu·a)/r (−sin E, √(1−e²) cos E)`,
    /// and [`perifocal_rotation`] maps the plane into the inertial frame.
    pub fn to_cartesian(&self, mu: f64) -> Result<CartesianState, SatpropError> {
        self.validate()?;

        let a = self.semi_major_axis;
        let e = self.eccentricity;
        let beta = (1.0 - e * e).sqrt();

        let ecc_anom = true_to_eccentric_anomaly(self.true_anomaly, e)?;
        let (sin_ecc, cos_ecc) = ecc_anom.sin_cos();
        let radius = a * (1.0 - e * cos_ecc);

        let position_pf = Vector2::new(a * (cos_ecc - e), a * beta * sin_ecc);
        let velocity_pf = (mu * a).sqrt() / radius * Vector2::new(-sin_ecc, beta * cos_ecc);

        let rotation = perifocal_rotation(
            self.ascending_node_longitude,
            self.periapsis_argument,
            self.inclination,
        );

        Ok(CartesianState::new(
            rotation * position_pf,
            rotation * velocity_pf,
        ))
    }
}

/// 3×2 rotation from the perifocal plane to the inertial frame.
///
/// Columns are the unit vectors `P` (towards periapsis) and `Q` (90° ahead in the orbit
/// plane), i.e. the first two columns of `Rz(Ω)·Rx(i)·Rz(ω)`.
pub fn perifocal_rotation(node: f64, periapsis_argument: f64, inclination: f64) -> Matrix3x2<f64> {
    let (sin_node, cos_node) = node.sin_cos();
    let (sin_peri, cos_peri) = periapsis_argument.sin_cos();
    let (sin_incl, cos_incl) = inclination.sin_cos();

    let p_vec = Vector3::new(
        cos_node * cos_peri - sin_node * sin_peri * cos_incl,
        sin_node * cos_peri + cos_node * sin_peri * cos_incl,
        sin_peri * sin_incl,
    );
    let q_vec = Vector3::new(
        -cos_node * sin_peri - sin_node * cos_peri * cos_incl,
        -sin_node * sin_peri + cos_node * cos_peri * cos_incl,
        cos_peri * sin_incl,
    );

    Matrix3x2::from_columns(&[p_vec, q_vec])
}

impl TryFrom<&KeplerianElements> for EquinoctialElements {
    type Error = SatpropError;

    /// Closed-form mapping `(a, e, i, ω, Ω, θ) → (p, f, g, h, k, L)`.
    fn try_from(k: &KeplerianElements) -> Result<Self, Self::Error> {
        EquinoctialElements::from_keplerian(k)
    }
}

impl TryFrom<KeplerianElements> for EquinoctialElements {
    type Error = SatpropError;

    fn try_from(k: KeplerianElements) -> Result<Self, Self::Error> {
        EquinoctialElements::from_keplerian(&k)
    }
}

impl fmt::Display for KeplerianElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Keplerian Elements")?;
        writeln!(f, "-------------------------------------------")?;
        writeln!(
            f,
            "  a   (semi-major axis)       = {:.3} m",
            self.semi_major_axis
        )?;
        writeln!(
            f,
            "  e   (eccentricity)          = {:.6}",
            self.eccentricity
        )?;
        writeln!(
            f,
            "  i   (inclination)           = {:.6} rad ({:.6}°)",
            self.inclination,
            self.inclination / RADEG
        )?;
        writeln!(
            f,
            "  ω   (argument of periapsis) = {:.6} rad ({:.6}°)",
            self.periapsis_argument,
            self.periapsis_argument / RADEG
        )?;
        writeln!(
            f,
            "  Ω   (longitude of node)     = {:.6} rad ({:.6}°)",
            self.ascending_node_longitude,
            self.ascending_node_longitude / RADEG
        )?;
        write!(
            f,
            "  θ   (true anomaly)          = {:.6} rad ({:.6}°)",
            self.true_anomaly,
            self.true_anomaly / RADEG
        )
    }
}

#[cfg(test)]
pub(crate) mod test_keplerian_element {
    use super::*;
    use crate::kepler::angle_difference;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    const MU: f64 = 3.986_004_418e14;

    pub(crate) fn sample_orbit() -> KeplerianElements {
        KeplerianElements {
            semi_major_axis: 7_000_000.0,
            eccentricity: 0.01,
            inclination: 0.9,
            periapsis_argument: 0.4,
            ascending_node_longitude: 1.1,
            true_anomaly: 2.0,
        }
    }

    #[test]
    fn perifocal_rotation_has_orthonormal_columns() {
        let rot = perifocal_rotation(1.0, 2.0, 0.5);
        let p = rot.column(0);
        let q = rot.column(1);
        assert_abs_diff_eq!(p.norm(), 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(q.norm(), 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(p.dot(&q), 0.0, epsilon = 1e-15);
    }

    #[test]
    fn periapsis_state_of_equatorial_orbit() {
        let kep = KeplerianElements {
            semi_major_axis: 8_000_000.0,
            eccentricity: 0.2,
            inclination: 0.0,
            periapsis_argument: 0.0,
            ascending_node_longitude: 0.0,
            true_anomaly: 0.0,
        };
        let state = kep.to_cartesian(MU).unwrap();

        let rp = 8_000_000.0 * 0.8;
        let vp = (MU / 8_000_000.0 * 1.2 / 0.8).sqrt();
        assert_relative_eq!(state.position.x, rp, max_relative = 1e-14);
        assert_abs_diff_eq!(state.position.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(state.velocity.y, vp, max_relative = 1e-14);
        assert_abs_diff_eq!(state.velocity.x, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn cartesian_round_trip_of_sample_orbit() {
        let kep = sample_orbit();
        let back = kep.to_cartesian(MU).unwrap().to_keplerian(MU).unwrap();

        assert_relative_eq!(back.semi_major_axis, kep.semi_major_axis, max_relative = 1e-10);
        assert_relative_eq!(back.eccentricity, kep.eccentricity, max_relative = 1e-7);
        assert_abs_diff_eq!(back.inclination, kep.inclination, epsilon = 1e-12);
        assert_abs_diff_eq!(
            angle_difference(back.ascending_node_longitude, kep.ascending_node_longitude),
            0.0,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            angle_difference(back.periapsis_argument, kep.periapsis_argument),
            0.0,
            epsilon = 1e-8
        );
        assert_abs_diff_eq!(
            angle_difference(back.true_anomaly, kep.true_anomaly),
            0.0,
            epsilon = 1e-8
        );
    }

    #[test]
    fn equatorial_state_sets_node_to_zero() {
        let state = CartesianState::new(
            Vector3::new(7_000_000.0, 0.0, 0.0),
            Vector3::new(0.0, 7_700.0, 0.0),
        );
        let kep = state.to_keplerian(MU).unwrap();
        assert_eq!(kep.inclination, 0.0);
        assert_eq!(kep.ascending_node_longitude, 0.0);
        // starting at periapsis: ω + θ = 0 (mod 2π)
        assert_abs_diff_eq!(
            angle_difference(kep.periapsis_argument + kep.true_anomaly, 0.0),
            0.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn retrograde_inclination_is_in_range() {
        let state = CartesianState::new(
            Vector3::new(7_000_000.0, 0.0, 0.0),
            Vector3::new(0.0, -7_000.0, 2_000.0),
        );
        let kep = state.to_keplerian(MU).unwrap();
        assert!(kep.inclination > PI / 2.0 && kep.inclination <= PI);
        assert!((0.0..2.0 * PI).contains(&kep.ascending_node_longitude));
    }

    #[test]
    fn near_circular_state_has_finite_eccentricity() {
        let r = 6_878_137.0;
        let v = (MU / r).sqrt();
        // tiny perturbation keeping a ≈ p within 1e-9
        let state = CartesianState::new(
            Vector3::new(r, 0.0, 0.0),
            Vector3::new(0.0, v * (1.0 + 1e-17), 1e-13),
        );
        let kep = state.to_keplerian(MU).unwrap();
        assert!(kep.eccentricity.is_finite());
        assert!(kep.eccentricity >= 0.0);
        assert!(kep.true_anomaly.is_finite() && kep.periapsis_argument.is_finite());
    }

    #[test]
    fn unbound_and_degenerate_states_are_rejected() {
        let hyperbolic = CartesianState::new(
            Vector3::new(7_000_000.0, 0.0, 0.0),
            Vector3::new(0.0, 20_000.0, 0.0),
        );
        assert!(matches!(
            hyperbolic.to_keplerian(MU),
            Err(SatpropError::NonPositiveSemiMajorAxis(_))
        ));

        let radial = CartesianState::new(
            Vector3::new(7_000_000.0, 0.0, 0.0),
            Vector3::new(1_000.0, 0.0, 0.0),
        );
        assert!(matches!(
            radial.to_keplerian(MU),
            Err(SatpropError::DegenerateState(_))
        ));
    }

    #[test]
    fn invalid_elements_are_signaled() {
        let mut kep = sample_orbit();
        kep.eccentricity = 1.2;
        assert_eq!(
            kep.to_cartesian(MU).unwrap_err(),
            SatpropError::InvalidEccentricity(1.2)
        );

        let mut kep = sample_orbit();
        kep.inclination = -0.1;
        assert_eq!(kep.validate().unwrap_err(), SatpropError::InvalidInclination(-0.1));

        let mut kep = sample_orbit();
        kep.semi_major_axis = -1.0;
        assert_eq!(
            kep.validate().unwrap_err(),
            SatpropError::NonPositiveSemiMajorAxis(-1.0)
        );
    }

    #[test]
    fn display_lists_every_element() {
        let text = format!("{}", sample_orbit());
        assert!(text.starts_with("Keplerian Elements"));
        assert!(text.contains("true anomaly"));
    }

    #[test]
    fn display_reports_angles_in_degrees() {
        let kep = KeplerianElements {
            inclination: PI / 2.0,
            true_anomaly: PI / 6.0,
            ..sample_orbit()
        };
        let text = kep.to_string();
        assert!(text.contains("(90.000000°)"), "{text}");
        assert!(text.contains("(30.000000°)"), "{text}");
    }
}
