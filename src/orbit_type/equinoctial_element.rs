//! # Modified equinoctial elements
//!
//! [`EquinoctialElements`] stores the non-singular set `(p, f, g, h, k, L)`:
//!
//! | element | definition               |
//! |---------|--------------------------|
//! | `p`     | `a(1 − e²)`              |
//! | `f`     | `e·cos(ω + Ω)`           |
//! | `g`     | `e·sin(ω + Ω)`           |
//! | `h`     | `tan(i/2)·cos Ω`         |
//! | `k`     | `tan(i/2)·sin Ω`         |
//! | `L`     | `Ω + ω + θ` (true longitude) |
//!
//! The set stays regular for circular (`f = g = 0`) and equatorial (`h = k = 0`) orbits,
//! which makes it the representation of choice for long propagations of near-circular
//! low Earth orbits. Only the retrograde equatorial case `i = π` is singular.
//!
//! Conversions:
//!
//! - [`EquinoctialElements::from_keplerian`] / [`EquinoctialElements::to_keplerian`]: closed form.
//! - [`EquinoctialElements::to_cartesian`]: direct closed form, without going through the
//!   classical elements.
use nalgebra::Vector3;
use std::fmt;

use crate::{
    constants::StateVector,
    kepler::wrap_to_positive_2pi,
    orbit_type::{cartesian_state::CartesianState, keplerian_element::KeplerianElements},
    satprop_errors::SatpropError,
};

/// Modified equinoctial orbital elements.
///
/// Units
/// -----
/// * `p`: meters
/// * `f`, `g`, `h`, `k`: unitless
/// * `l`: radians
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct EquinoctialElements {
    pub p: f64,
    pub f: f64,
    pub g: f64,
    pub h: f64,
    pub k: f64,
    pub l: f64,
}

impl EquinoctialElements {
    pub fn new(p: f64, f: f64, g: f64, h: f64, k: f64, l: f64) -> Self {
        Self { p, f, g, h, k, l }
    }

    /// Read the layout `(p, f, g, h, k, L)`.
    pub fn from_vector(elements: &StateVector) -> Self {
        Self::new(
            elements[0],
            elements[1],
            elements[2],
            elements[3],
            elements[4],
            elements[5],
        )
    }

    /// Write the layout `(p, f, g, h, k, L)`.
    pub fn to_vector(&self) -> StateVector {
        StateVector::new(self.p, self.f, self.g, self.h, self.k, self.l)
    }

    /// Eccentricity `√(f² + g²)`.
    pub fn eccentricity(&self) -> f64 {
        self.f.hypot(self.g)
    }

    /// `w = 1 + f·cos L + g·sin L`, so that the orbital radius is `p / w`.
    pub fn w(&self) -> f64 {
        let (sin_l, cos_l) = self.l.sin_cos();
        1.0 + self.f * cos_l + self.g * sin_l
    }

    /// `s² = 1 + h² + k²`.
    pub fn s_squared(&self) -> f64 {
        1.0 + self.h * self.h + self.k * self.k
    }

    /// Check `p > 0` and `f² + g² < 1`.
    pub fn validate(&self) -> Result<(), SatpropError> {
        if !(self.p > 0.0 && self.p.is_finite()) {
            return Err(SatpropError::NonPositiveSemiLatusRectum(self.p));
        }
        let ecc = self.eccentricity();
        if !(ecc < 1.0) {
            return Err(SatpropError::InvalidEccentricity(ecc));
        }
        Ok(())
    }

    /// Classical → equinoctial.
    ///
    /// The classical elements are validated first, so an unbound orbit is reported with the
    /// classical error variant.
    pub fn from_keplerian(kep: &KeplerianElements) -> Result<Self, SatpropError> {
        kep.validate()?;

        let node = kep.ascending_node_longitude;
        let periapsis_longitude = kep.periapsis_argument + node;
        let tan_half_incl = (kep.inclination / 2.0).tan();

        Ok(Self {
            p: kep.semi_latus_rectum(),
            f: kep.eccentricity * periapsis_longitude.cos(),
            g: kep.eccentricity * periapsis_longitude.sin(),
            h: tan_half_incl * node.cos(),
            k: tan_half_incl * node.sin(),
            l: wrap_to_positive_2pi(periapsis_longitude + kep.true_anomaly),
        })
    }

    /// Equinoctial → classical.
    ///
    /// `Ω = atan2(k, h)` and `ω = atan2(g, f) − Ω`. For a circular orbit ω collapses to
    /// `−Ω` (wrapped) and the true anomaly carries the argument of latitude; for an
    /// equatorial orbit `Ω = 0` and ω is the longitude of periapsis.
    pub fn to_keplerian(&self) -> Result<KeplerianElements, SatpropError> {
        self.validate()?;

        let ecc_sq = self.f * self.f + self.g * self.g;
        let tan_half_sq = self.h * self.h + self.k * self.k;

        let inclination = (2.0 * tan_half_sq.sqrt()).atan2(1.0 - tan_half_sq);
        let node = wrap_to_positive_2pi(self.k.atan2(self.h));
        let periapsis_longitude = self.g.atan2(self.f);
        let periapsis_argument = wrap_to_positive_2pi(periapsis_longitude - node);

        Ok(KeplerianElements {
            semi_major_axis: self.p / (1.0 - ecc_sq),
            eccentricity: ecc_sq.sqrt(),
            inclination,
            periapsis_argument,
            ascending_node_longitude: node,
            true_anomaly: wrap_to_positive_2pi(self.l - periapsis_longitude),
        })
    }

    /// Equinoctial → Cartesian, closed form.
    ///
    /// With `α² = h² − k²`, `s² = 1 + h² + k²`, `r = p/w`:
    ///
    /// ```text
    /// r = r/s² [cos L + α² cos L + 2hk sin L,
    ///           sin L − α² sin L + 2hk cos L,
    ///           2(h sin L − k cos L)]
    /// v = −1/s² √(mu/p) [ sin L + α² sin L − 2hk cos L + g − 2fhk + α² g,
    ///                    −cos L + α² cos L + 2hk sin L − f + 2ghk + α² f,
    ///                    −2(h cos L + k sin L + fh + gk)]
    /// ```
    pub fn to_cartesian(&self, mu: f64) -> Result<CartesianState, SatpropError> {
        self.validate()?;

        let Self { p, f, g, h, k, l } = *self;
        let (sin_l, cos_l) = l.sin_cos();

        let alpha_sq = h * h - k * k;
        let s_sq = self.s_squared();
        let radius = p / self.w();
        let hk2 = 2.0 * h * k;

        let position = (radius / s_sq)
            * Vector3::new(
                cos_l + alpha_sq * cos_l + hk2 * sin_l,
                sin_l - alpha_sq * sin_l + hk2 * cos_l,
                2.0 * (h * sin_l - k * cos_l),
            );

        let sqrt_mu_p = (mu / p).sqrt();
        let velocity = (-sqrt_mu_p / s_sq)
            * Vector3::new(
                sin_l + alpha_sq * sin_l - hk2 * cos_l + g - f * hk2 + alpha_sq * g,
                -cos_l + alpha_sq * cos_l + hk2 * sin_l - f + g * hk2 + alpha_sq * f,
                -2.0 * (h * cos_l + k * sin_l + f * h + g * k),
            );

        Ok(CartesianState::new(position, velocity))
    }
}

impl TryFrom<&EquinoctialElements> for KeplerianElements {
    type Error = SatpropError;

    fn try_from(eq: &EquinoctialElements) -> Result<Self, Self::Error> {
        eq.to_keplerian()
    }
}

impl TryFrom<EquinoctialElements> for KeplerianElements {
    type Error = SatpropError;

    fn try_from(eq: EquinoctialElements) -> Result<Self, Self::Error> {
        eq.to_keplerian()
    }
}

impl fmt::Display for EquinoctialElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Modified Equinoctial Elements")?;
        writeln!(f, "-------------------------------------------")?;
        writeln!(f, "  p (semi-latus rectum) = {:.3} m", self.p)?;
        writeln!(f, "  f (e·cos ϖ)           = {:.9}", self.f)?;
        writeln!(f, "  g (e·sin ϖ)           = {:.9}", self.g)?;
        writeln!(f, "  h (tan(i/2)·cos Ω)    = {:.9}", self.h)?;
        writeln!(f, "  k (tan(i/2)·sin Ω)    = {:.9}", self.k)?;
        write!(
            f,
            "  L (true longitude)    = {:.6} rad ({:.6}°)",
            self.l,
            self.l.to_degrees()
        )
    }
}
