//! # Anomaly conversions and Kepler's equation
//!
//! Conversions between the three angular measures of a position along an elliptic orbit:
//!
//! - **true anomaly** `θ`: geometric angle from periapsis, seen from the focus,
//! - **eccentric anomaly** `E`: angle on the auxiliary circle,
//! - **mean anomaly** `M`: angle growing linearly with time.
//!
//! `θ ↔ E` and `E → M` are closed form. `M → E` requires solving Kepler's equation
//! `E − e·sin E = M`, done here with a Newton–Raphson iteration from the [`roots`] crate
//! seeded at `E₀ = M`. The iteration is capped at
//! [`KEPLER_MAX_ITER`](crate::constants::KEPLER_MAX_ITER); a failure to reach
//! [`KEPLER_TOLERANCE`](crate::constants::KEPLER_TOLERANCE) is reported as
//! [`SatpropError::KeplerNoConvergence`].
//!
//! Every angle returned by this module lies in `[0, 2π)`, normalized with
//! [`wrap_to_positive_2pi`], the single wrapping helper shared by all transforms.
use roots::{find_root_newton_raphson, SimpleConvergency};
use std::f64::consts::PI;

use crate::{
    constants::{Radian, DPI, KEPLER_MAX_ITER, KEPLER_TOLERANCE},
    satprop_errors::SatpropError,
};

/// Wrap an angle into `[0, 2π)` using a positive remainder.
///
/// Unlike a symmetric remainder, the result is never negative. Inputs that round to `2π`
/// (tiny negative angles) are mapped to `0`.
#[inline]
pub fn wrap_to_positive_2pi(angle: Radian) -> Radian {
    let wrapped = angle.rem_euclid(DPI);
    if wrapped >= DPI {
        0.0
    } else {
        wrapped
    }
}

/// Signed difference `a − b` reduced to `[-π, π]`.
pub fn angle_difference(a: Radian, b: Radian) -> Radian {
    let mut diff = wrap_to_positive_2pi(a) - wrap_to_positive_2pi(b);

    if diff > PI {
        diff -= DPI;
    } else if diff < -PI {
        diff += DPI;
    }

    diff
}

/// Reject eccentricities outside the elliptic domain `[0, 1)`.
#[inline]
pub(crate) fn check_elliptic(eccentricity: f64) -> Result<(), SatpropError> {
    if (0.0..1.0).contains(&eccentricity) {
        Ok(())
    } else {
        Err(SatpropError::InvalidEccentricity(eccentricity))
    }
}

/// True anomaly → eccentric anomaly.
///
/// `E = atan2(√(1−e²)·sin θ, e + cos θ)`, wrapped into `[0, 2π)`.
pub fn true_to_eccentric_anomaly(
    true_anomaly: Radian,
    eccentricity: f64,
) -> Result<Radian, SatpropError> {
    check_elliptic(eccentricity)?;
    let beta = (1.0 - eccentricity * eccentricity).sqrt();
    let (sin_theta, cos_theta) = true_anomaly.sin_cos();
    Ok(wrap_to_positive_2pi(
        (beta * sin_theta).atan2(eccentricity + cos_theta),
    ))
}

/// Eccentric anomaly → true anomaly.
///
/// `θ = atan2(√(1−e²)·sin E, cos E − e)`, wrapped into `[0, 2π)`.
pub fn eccentric_to_true_anomaly(
    eccentric_anomaly: Radian,
    eccentricity: f64,
) -> Result<Radian, SatpropError> {
    check_elliptic(eccentricity)?;
    let beta = (1.0 - eccentricity * eccentricity).sqrt();
    let (sin_e, cos_e) = eccentric_anomaly.sin_cos();
    Ok(wrap_to_positive_2pi((beta * sin_e).atan2(cos_e - eccentricity)))
}

/// Eccentric anomaly → mean anomaly, `M = E − e·sin E` (not wrapped).
pub fn eccentric_to_mean_anomaly(
    eccentric_anomaly: Radian,
    eccentricity: f64,
) -> Result<Radian, SatpropError> {
    check_elliptic(eccentricity)?;
    Ok(eccentric_anomaly - eccentricity * eccentric_anomaly.sin())
}

/// Mean anomaly → eccentric anomaly by solving Kepler's equation.
///
/// Newton–Raphson on `f(E) = E − e·sin E − M` with `f'(E) = 1 − e·cos E`, seeded at
/// `E₀ = M`. The solve stops when `|f(E)| < 1e-10` (or the Newton step falls below the same
/// threshold) and gives up after `KEPLER_MAX_ITER` iterations.
///
/// Arguments
/// ---------
/// * `mean_anomaly`: `M` in radians (any value; the result follows `M`, it is not wrapped)
/// * `eccentricity`: `e ∈ [0, 1)`
///
/// Returns
/// -------
/// * `Ok(E)` such that `E − e·sin E ≈ M`.
/// * `Err(SatpropError::KeplerNoConvergence)` if Newton's method stalls, typically for
///   `e → 1`.
pub fn mean_to_eccentric_anomaly(
    mean_anomaly: Radian,
    eccentricity: f64,
) -> Result<Radian, SatpropError> {
    check_elliptic(eccentricity)?;

    let f = |ecc_anom: f64| ecc_anom - eccentricity * ecc_anom.sin() - mean_anomaly;
    let df = |ecc_anom: f64| 1.0 - eccentricity * ecc_anom.cos();

    let mut convergency = SimpleConvergency {
        eps: KEPLER_TOLERANCE,
        max_iter: KEPLER_MAX_ITER,
    };

    find_root_newton_raphson(mean_anomaly, &f, &df, &mut convergency).map_err(|source| {
        SatpropError::KeplerNoConvergence {
            mean_anomaly,
            eccentricity,
            source,
        }
    })
}

/// Mean anomaly → true anomaly (Kepler solve followed by the `E → θ` map).
pub fn mean_to_true_anomaly(
    mean_anomaly: Radian,
    eccentricity: f64,
) -> Result<Radian, SatpropError> {
    let ecc_anom = mean_to_eccentric_anomaly(mean_anomaly, eccentricity)?;
    eccentric_to_true_anomaly(ecc_anom, eccentricity)
}

/// True anomaly → mean anomaly, wrapped into `[0, 2π)`.
pub fn true_to_mean_anomaly(
    true_anomaly: Radian,
    eccentricity: f64,
) -> Result<Radian, SatpropError> {
    let ecc_anom = true_to_eccentric_anomaly(true_anomaly, eccentricity)?;
    Ok(wrap_to_positive_2pi(eccentric_to_mean_anomaly(
        ecc_anom,
        eccentricity,
    )?))
}
