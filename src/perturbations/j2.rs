//! J2 oblateness acceleration.
//!
//! The Earth's equatorial bulge adds to the central attraction a term proportional to
//! `J2·mu·R²/r⁴`, modulated by the latitude of the satellite. The same physics is written
//! three times:
//!
//! * in ECI components, from the position vector,
//! * in RTN components from classical angles `(i, u = ω + θ)`,
//! * in RTN components from equinoctial quantities `(h, k, L)`, using
//!   `sin i·sin u = 2(h sin L − k cos L)/s²`, `sin i·cos u = 2(h cos L + k sin L)/s²` and
//!   `cos i = (1 − h² − k²)/s²` with `s² = 1 + h² + k²`.
use nalgebra::Vector3;

use crate::physical_params::PhysicalParameters;

/// J2 acceleration in ECI components (m/s²).
///
/// ```text
/// a_x = −3/2 J2 mu R²/r⁵ · x (1 − 5z²/r²)
/// a_y = −3/2 J2 mu R²/r⁵ · y (1 − 5z²/r²)
/// a_z = −3/2 J2 mu R²/r⁵ · z (3 − 5z²/r²)
/// ```
pub fn j2_acceleration_eci(position: &Vector3<f64>, params: &PhysicalParameters) -> Vector3<f64> {
    let r2 = position.norm_squared();
    let r = r2.sqrt();
    let r5 = r2 * r2 * r;
    let re2 = params.earth_radius() * params.earth_radius();

    let factor = -1.5 * params.j2() * params.mu() * re2 / r5;
    let z2_r2 = position.z * position.z / r2;

    Vector3::new(
        factor * position.x * (1.0 - 5.0 * z2_r2),
        factor * position.y * (1.0 - 5.0 * z2_r2),
        factor * position.z * (3.0 - 5.0 * z2_r2),
    )
}

/// J2 acceleration in RTN components from classical angles.
///
/// Arguments
/// ---------
/// * `radius`: orbital radius `r` in meters
/// * `inclination`: `i` in radians
/// * `arg_latitude`: `u = ω + θ` in radians
pub fn j2_rtn_classical(
    radius: f64,
    inclination: f64,
    arg_latitude: f64,
    params: &PhysicalParameters,
) -> Vector3<f64> {
    let factor = -1.5 * params.j2() * params.mu() * params.earth_radius().powi(2) / radius.powi(4);
    let sin_i = inclination.sin();
    let sin_u = arg_latitude.sin();

    Vector3::new(
        factor * (1.0 - 3.0 * sin_i * sin_i * sin_u * sin_u),
        factor * sin_i * sin_i * (2.0 * arg_latitude).sin(),
        factor * (2.0 * inclination).sin() * sin_u,
    )
}

/// J2 acceleration in RTN components from equinoctial quantities.
///
/// ```text
/// Δr = −3 mu J2 R²/(2r⁴) [1 − 12 (h sin L − k cos L)²/s⁴]
/// Δt = −12 mu J2 R²/r⁴ [(h sin L − k cos L)(h cos L + k sin L)/s⁴]
/// Δn = −6 mu J2 R²/r⁴ [(1 − h² − k²)(h sin L − k cos L)/s⁴]
/// ```
pub fn j2_rtn_equinoctial(
    radius: f64,
    h: f64,
    k: f64,
    true_longitude: f64,
    params: &PhysicalParameters,
) -> Vector3<f64> {
    let base = params.mu() * params.j2() * params.earth_radius().powi(2) / radius.powi(4);
    let (sin_l, cos_l) = true_longitude.sin_cos();

    let s_sq = 1.0 + h * h + k * k;
    let s4 = s_sq * s_sq;
    let out_of_plane = h * sin_l - k * cos_l;
    let in_plane = h * cos_l + k * sin_l;

    Vector3::new(
        -1.5 * base * (1.0 - 12.0 * out_of_plane * out_of_plane / s4),
        -12.0 * base * (out_of_plane * in_plane / s4),
        -6.0 * base * ((1.0 - h * h - k * k) * out_of_plane / s4),
    )
}
