use approx::assert_relative_eq;
use nalgebra::Vector3;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::f64::consts::PI;

use satprop::kepler::{
    eccentric_to_true_anomaly, mean_to_eccentric_anomaly, true_to_eccentric_anomaly,
};
use satprop::{
    circular_orbit_initial_conditions, CartesianState, EquinoctialElements, KeplerianElements,
    PhysicalParameters, PhysicalParametersConfig, UnitScaling,
};

mod common;
use common::{assert_angle_close, assert_orbit_close, assert_state_close, MU};

fn random_unit(rng: &mut StdRng) -> Vector3<f64> {
    loop {
        let v = Vector3::new(
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
        );
        let n = v.norm();
        if n > 0.1 && n <= 1.0 {
            return v / n;
        }
    }
}

/// Bound state with a velocity well away from the radial direction.
fn random_bound_state(rng: &mut StdRng) -> CartesianState {
    let radius = rng.random_range(6.6e6..4.2e7);
    let r_hat = random_unit(rng);
    let v_hat = loop {
        let candidate = random_unit(rng);
        if r_hat.cross(&candidate).norm() > 0.3 {
            break candidate;
        }
    };
    let speed = (MU / radius).sqrt() * rng.random_range(0.6..1.3);
    CartesianState::new(radius * r_hat, speed * v_hat)
}

#[test]
fn cartesian_classical_round_trip() {
    let mut rng = StdRng::seed_from_u64(0xCA7);

    for _ in 0..2000 {
        let state = random_bound_state(&mut rng);
        let kep = state.to_keplerian(MU).unwrap();

        assert!(kep.semi_major_axis > 0.0);
        assert!((0.0..1.0).contains(&kep.eccentricity));
        assert!((0.0..=PI).contains(&kep.inclination));
        for angle in [
            kep.periapsis_argument,
            kep.ascending_node_longitude,
            kep.true_anomaly,
        ] {
            assert!((0.0..2.0 * PI).contains(&angle));
        }

        let back = kep.to_cartesian(MU).unwrap();
        assert_state_close(&back, &state, 1e-6);
    }
}

#[test]
fn cartesian_equinoctial_round_trip() {
    let mut rng = StdRng::seed_from_u64(0xE9);

    for _ in 0..500 {
        let state = random_bound_state(&mut rng);
        let back = state.to_equinoctial(MU).unwrap().to_cartesian(MU).unwrap();
        assert_state_close(&back, &state, 1e-6);
    }
}

#[test]
fn classical_equinoctial_round_trip() {
    let mut rng = StdRng::seed_from_u64(0x1E10);

    for _ in 0..2000 {
        let kep = KeplerianElements {
            semi_major_axis: rng.random_range(6.6e6..4.2e7),
            eccentricity: rng.random_range(1e-3..0.9),
            inclination: rng.random_range(1e-3..PI - 0.1),
            periapsis_argument: rng.random_range(0.0..2.0 * PI),
            ascending_node_longitude: rng.random_range(0.0..2.0 * PI),
            true_anomaly: rng.random_range(0.0..2.0 * PI),
        };
        let back = EquinoctialElements::try_from(&kep)
            .and_then(KeplerianElements::try_from)
            .unwrap();
        assert_orbit_close(&back, &kep, 1e-10);
    }
}

#[test]
fn anomaly_conversions_are_consistent() {
    let mut rng = StdRng::seed_from_u64(0xA7);

    for _ in 0..5000 {
        let e = rng.random_range(0.0..0.9);
        let theta = rng.random_range(0.0..2.0 * PI);
        let ecc_anom = true_to_eccentric_anomaly(theta, e).unwrap();
        assert_angle_close(eccentric_to_true_anomaly(ecc_anom, e).unwrap(), theta, 1e-10);

        let mean = rng.random_range(0.0..2.0 * PI);
        let e = rng.random_range(0.0..=0.95);
        let ecc_anom = mean_to_eccentric_anomaly(mean, e).unwrap();
        assert!((ecc_anom - e * ecc_anom.sin() - mean).abs() < 1e-10);
    }
}

#[test]
fn near_circular_states_do_not_produce_nan() {
    let mut rng = StdRng::seed_from_u64(0x0C1C);

    for _ in 0..1000 {
        let radius = rng.random_range(6.6e6..4.2e7);
        let r_hat = random_unit(&mut rng);
        let t_hat = r_hat.cross(&random_unit(&mut rng)).normalize();
        // circular speed up to relative noise of a few ulps
        let speed = (MU / radius).sqrt() * (1.0 + rng.random_range(-1e-15..1e-15));
        let state = CartesianState::new(radius * r_hat, speed * t_hat);

        let kep = state.to_keplerian(MU).unwrap();
        assert!(kep.eccentricity.is_finite() && kep.eccentricity >= 0.0);
        assert!(kep.true_anomaly.is_finite());
        assert!(kep.periapsis_argument.is_finite());
        assert_state_close(&kep.to_cartesian(MU).unwrap(), &state, 1e-9);
    }
}

#[test]
fn circular_orbit_at_500_km_scenario() {
    let params = PhysicalParameters::default();
    let state = circular_orbit_initial_conditions(500_000.0, 0.0, &params).unwrap();

    let radius = params.earth_radius() + 500_000.0;
    assert_relative_eq!(state.position.norm(), radius, max_relative = 1e-15);
    assert_relative_eq!(
        state.velocity.norm(),
        (params.mu() / radius).sqrt(),
        max_relative = 1e-15
    );
    // inclination axis is x: velocity has no x component and stays in the equator
    assert_eq!(state.velocity.x, 0.0);
    assert_eq!(state.velocity.z, 0.0);

    let eq = state.to_equinoctial(params.mu()).unwrap();
    assert_eq!(eq.f, 0.0);
    assert_eq!(eq.g, 0.0);
    assert_eq!(eq.h, 0.0);
    assert_eq!(eq.k, 0.0);
}

#[test]
fn scaling_from_configuration_is_invertible() {
    let config: PhysicalParametersConfig =
        serde_json::from_str(r#"{ "distance_scale": 6378137.0, "time_scale": 806.81 }"#).unwrap();
    let params = PhysicalParameters::try_from(config).unwrap();
    let scaling: UnitScaling = params.scaling().unwrap();

    let mut rng = StdRng::seed_from_u64(0x5CA);
    for _ in 0..1000 {
        let state = random_bound_state(&mut rng);
        let back = scaling.unscale_state(&scaling.scale_state(&state));
        assert_state_close(&back, &state, 1e-15);
    }
}
