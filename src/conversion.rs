use nalgebra::Vector3;

use crate::{orbit_type::cartesian_state::CartesianState, satprop_errors::SatpropError};

/// Distance and time units used to non-dimensionalize Cartesian quantities.
///
/// `scale_*` divides by the unit (SI → scaled), `unscale_*` multiplies by it (scaled → SI).
/// Velocities use the unit `distance_scale / time_scale` and accelerations
/// `distance_scale / time_scale²`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitScaling {
    distance_scale: f64,
    time_scale: f64,
}

impl UnitScaling {
    /// Build a scaling pair.
    ///
    /// Arguments
    /// ---------
    /// * `distance_scale`: length unit in meters (e.g. the Earth radius)
    /// * `time_scale`: time unit in seconds
    ///
    /// Returns
    /// -------
    /// * `Err(SatpropError::InvalidScaling)` if either scale is zero or not finite.
    pub fn new(distance_scale: f64, time_scale: f64) -> Result<Self, SatpropError> {
        if !distance_scale.is_finite() || distance_scale == 0.0 {
            return Err(SatpropError::InvalidScaling(format!(
                "distance_scale must be finite and non-zero, got {distance_scale}"
            )));
        }
        if !time_scale.is_finite() || time_scale == 0.0 {
            return Err(SatpropError::InvalidScaling(format!(
                "time_scale must be finite and non-zero, got {time_scale}"
            )));
        }
        Ok(Self {
            distance_scale,
            time_scale,
        })
    }

    /// Canonical units of a central body: unit length `radius` and the time unit that makes
    /// `mu = 1`, i.e. `√(radius³/mu)`.
    pub fn canonical(radius: f64, mu: f64) -> Result<Self, SatpropError> {
        Self::new(radius, (radius.powi(3) / mu).sqrt())
    }

    pub fn distance_scale(&self) -> f64 {
        self.distance_scale
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    #[inline]
    fn velocity_unit(&self) -> f64 {
        self.distance_scale / self.time_scale
    }

    #[inline]
    fn acceleration_unit(&self) -> f64 {
        self.distance_scale / (self.time_scale * self.time_scale)
    }

    /// SI state → scaled state.
    pub fn scale_state(&self, state: &CartesianState) -> CartesianState {
        CartesianState::new(
            state.position / self.distance_scale,
            state.velocity / self.velocity_unit(),
        )
    }

    /// Scaled state → SI state.
    pub fn unscale_state(&self, state: &CartesianState) -> CartesianState {
        CartesianState::new(
            state.position * self.distance_scale,
            state.velocity * self.velocity_unit(),
        )
    }

    /// SI (velocity, acceleration) pair → scaled pair.
    pub fn scale_rates(
        &self,
        velocity: &Vector3<f64>,
        acceleration: &Vector3<f64>,
    ) -> (Vector3<f64>, Vector3<f64>) {
        (
            velocity / self.velocity_unit(),
            acceleration / self.acceleration_unit(),
        )
    }

    /// Scaled (velocity, acceleration) pair → SI pair.
    pub fn unscale_rates(
        &self,
        velocity: &Vector3<f64>,
        acceleration: &Vector3<f64>,
    ) -> (Vector3<f64>, Vector3<f64>) {
        (
            velocity * self.velocity_unit(),
            acceleration * self.acceleration_unit(),
        )
    }
}

#[cfg(test)]
mod conversion_test {
    use super::*;
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn rejects_zero_and_non_finite_scales() {
        assert!(matches!(
            UnitScaling::new(0.0, 1.0),
            Err(SatpropError::InvalidScaling(_))
        ));
        assert!(UnitScaling::new(1.0, f64::INFINITY).is_err());
        assert!(UnitScaling::new(-2.0, 3.0).is_ok());
    }

    #[test]
    fn scale_state_uses_velocity_unit() {
        let scaling = UnitScaling::new(1000.0, 10.0).unwrap();
        let state = CartesianState::new(
            Vector3::new(2000.0, 0.0, -500.0),
            Vector3::new(0.0, 300.0, 0.0),
        );
        let scaled = scaling.scale_state(&state);
        assert_eq!(scaled.position, Vector3::new(2.0, 0.0, -0.5));
        assert_eq!(scaled.velocity, Vector3::new(0.0, 3.0, 0.0));

        let (v, a) =
            scaling.scale_rates(&Vector3::new(100.0, 0.0, 0.0), &Vector3::new(0.0, 0.0, 10.0));
        assert_eq!(v, Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(a, Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn unscale_inverts_scale() {
        let mut rng = StdRng::seed_from_u64(0x5CA1E);

        for _ in 0..200 {
            let scaling = UnitScaling::new(
                rng.random_range(1.0..1.0e7),
                rng.random_range(1.0..1.0e4),
            )
            .unwrap();
            let state = CartesianState::new(
                Vector3::new(
                    rng.random_range(-1e7..1e7),
                    rng.random_range(-1e7..1e7),
                    rng.random_range(-1e7..1e7),
                ),
                Vector3::new(
                    rng.random_range(-1e4..1e4),
                    rng.random_range(-1e4..1e4),
                    rng.random_range(-1e4..1e4),
                ),
            );

            let back = scaling.unscale_state(&scaling.scale_state(&state));
            assert_relative_eq!(back.position, state.position, max_relative = 1e-15);
            assert_relative_eq!(back.velocity, state.velocity, max_relative = 1e-15);

            let accel = state.position * 1e-6;
            let (v, a) = scaling.scale_rates(&state.velocity, &accel);
            let (v_back, a_back) = scaling.unscale_rates(&v, &a);
            assert_relative_eq!(v_back, state.velocity, max_relative = 1e-15);
            assert_relative_eq!(a_back, accel, max_relative = 1e-15);
        }
    }

    #[test]
    fn canonical_units_normalize_mu() {
        let mu = 3.986_004_418e14;
        let scaling = UnitScaling::canonical(6_378_137.0, mu).unwrap();
        let scaled_mu = mu * scaling.time_scale().powi(2) / scaling.distance_scale().powi(3);
        assert_relative_eq!(scaled_mu, 1.0, max_relative = 1e-12);
    }
}
