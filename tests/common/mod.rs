#![allow(dead_code)]

use approx::{assert_abs_diff_eq, assert_relative_eq};
use satprop::kepler::angle_difference;
use satprop::{CartesianState, KeplerianElements};

pub const MU: f64 = 3.986_004_418e14;

/// Position and velocity agree within `rtol` of their norms.
pub fn assert_state_close(actual: &CartesianState, expected: &CartesianState, rtol: f64) {
    let dr = (actual.position - expected.position).norm();
    let dv = (actual.velocity - expected.velocity).norm();
    assert!(
        dr <= rtol * expected.position.norm(),
        "position mismatch: |dr| = {dr} m\nactual:\n{actual}\nexpected:\n{expected}"
    );
    assert!(
        dv <= rtol * expected.velocity.norm(),
        "velocity mismatch: |dv| = {dv} m/s\nactual:\n{actual}\nexpected:\n{expected}"
    );
}

/// Angles agree modulo 2π.
pub fn assert_angle_close(actual: f64, expected: f64, epsilon: f64) {
    assert_abs_diff_eq!(angle_difference(actual, expected), 0.0, epsilon = epsilon);
}

pub fn assert_orbit_close(actual: &KeplerianElements, expected: &KeplerianElements, epsilon: f64) {
    assert_relative_eq!(
        actual.semi_major_axis,
        expected.semi_major_axis,
        max_relative = epsilon
    );
    assert_abs_diff_eq!(actual.eccentricity, expected.eccentricity, epsilon = epsilon);
    assert_abs_diff_eq!(actual.inclination, expected.inclination, epsilon = epsilon);
    assert_angle_close(
        actual.ascending_node_longitude,
        expected.ascending_node_longitude,
        epsilon,
    );
    assert_angle_close(actual.periapsis_argument, expected.periapsis_argument, epsilon);
    assert_angle_close(actual.true_anomaly, expected.true_anomaly, epsilon);
}
