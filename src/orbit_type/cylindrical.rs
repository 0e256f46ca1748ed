//! # Cylindrical coordinates
//!
//! Purely geometric transforms between Cartesian `(x, y, z)` and cylindrical
//! `(r, θ, h)` coordinates, with `x = r cos θ`, `y = r sin θ`, `z = h`.
//!
//! Each level differentiates the previous one, so the velocity transform needs the
//! position and the acceleration transform needs both position and velocity:
//!
//! ```text
//! ẋ = ṙ cos θ − r θ̇ sin θ
//! ẍ = r̈ cos θ − 2 ṙ θ̇ sin θ − r θ̈ sin θ − r θ̇² cos θ
//! ÿ = r̈ sin θ + 2 ṙ θ̇ cos θ + r θ̈ cos θ − r θ̇² sin θ
//! ```
//!
//! The inverse maps are undefined on the axis `x = y = 0`, reported as
//! [`SatpropError::DegenerateState`].
use nalgebra::Vector3;

use crate::{kepler::wrap_to_positive_2pi, satprop_errors::SatpropError};

/// Cylindrical position: radius, angle (radians, `[0, 2π)` when produced here) and height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylindricalState {
    pub radius: f64,
    pub angle: f64,
    pub height: f64,
}

/// First time derivatives `(ṙ, θ̇, ḣ)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylindricalRates {
    pub radius_rate: f64,
    pub angle_rate: f64,
    pub height_rate: f64,
}

/// Second time derivatives `(r̈, θ̈, ḧ)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylindricalAccelerations {
    pub radius_accel: f64,
    pub angle_accel: f64,
    pub height_accel: f64,
}

impl CylindricalState {
    pub fn new(radius: f64, angle: f64, height: f64) -> Self {
        Self {
            radius,
            angle,
            height,
        }
    }

    pub fn to_cartesian(&self) -> Vector3<f64> {
        let (sin_a, cos_a) = self.angle.sin_cos();
        Vector3::new(self.radius * cos_a, self.radius * sin_a, self.height)
    }

    pub fn from_cartesian(position: &Vector3<f64>) -> Result<Self, SatpropError> {
        let radius = position.x.hypot(position.y);
        if radius == 0.0 {
            return Err(SatpropError::DegenerateState(
                "cylindrical angle undefined on the z-axis".into(),
            ));
        }
        Ok(Self {
            radius,
            angle: wrap_to_positive_2pi(position.y.atan2(position.x)),
            height: position.z,
        })
    }
}

impl CylindricalRates {
    pub fn new(radius_rate: f64, angle_rate: f64, height_rate: f64) -> Self {
        Self {
            radius_rate,
            angle_rate,
            height_rate,
        }
    }

    /// Cartesian velocity at `position`.
    pub fn to_cartesian(&self, position: &CylindricalState) -> Vector3<f64> {
        let (sin_a, cos_a) = position.angle.sin_cos();
        let r = position.radius;
        let r_dot = self.radius_rate;
        let a_dot = self.angle_rate;

        Vector3::new(
            r_dot * cos_a - r * a_dot * sin_a,
            r_dot * sin_a + r * a_dot * cos_a,
            self.height_rate,
        )
    }

    /// `ṙ = (xẋ + yẏ)/r`, `θ̇ = (xẏ − yẋ)/r²`.
    pub fn from_cartesian(
        position: &Vector3<f64>,
        velocity: &Vector3<f64>,
    ) -> Result<Self, SatpropError> {
        let radius_sq = position.x * position.x + position.y * position.y;
        if radius_sq == 0.0 {
            return Err(SatpropError::DegenerateState(
                "cylindrical rates undefined on the z-axis".into(),
            ));
        }
        let radius = radius_sq.sqrt();

        Ok(Self {
            radius_rate: (position.x * velocity.x + position.y * velocity.y) / radius,
            angle_rate: (position.x * velocity.y - position.y * velocity.x) / radius_sq,
            height_rate: velocity.z,
        })
    }
}

impl CylindricalAccelerations {
    pub fn new(radius_accel: f64, angle_accel: f64, height_accel: f64) -> Self {
        Self {
            radius_accel,
            angle_accel,
            height_accel,
        }
    }

    /// Cartesian acceleration at `position` moving with `rates`.
    pub fn to_cartesian(
        &self,
        position: &CylindricalState,
        rates: &CylindricalRates,
    ) -> Vector3<f64> {
        let (sin_a, cos_a) = position.angle.sin_cos();
        let r = position.radius;
        let r_dot = rates.radius_rate;
        let a_dot = rates.angle_rate;
        let r_ddot = self.radius_accel;
        let a_ddot = self.angle_accel;

        // radial and transverse components in the rotating (r̂, θ̂) basis
        let radial = r_ddot - r * a_dot * a_dot;
        let transverse = 2.0 * r_dot * a_dot + r * a_ddot;

        Vector3::new(
            radial * cos_a - transverse * sin_a,
            radial * sin_a + transverse * cos_a,
            self.height_accel,
        )
    }

    /// `r̈ = a_r + rθ̇²`, `θ̈ = (a_θ − 2ṙθ̇)/r`, with `(a_r, a_θ)` the projections of the
    /// Cartesian acceleration on `(r̂, θ̂)`.
    pub fn from_cartesian(
        position: &Vector3<f64>,
        velocity: &Vector3<f64>,
        acceleration: &Vector3<f64>,
    ) -> Result<Self, SatpropError> {
        let cyl = CylindricalState::from_cartesian(position)?;
        let rates = CylindricalRates::from_cartesian(position, velocity)?;
        let (sin_a, cos_a) = cyl.angle.sin_cos();

        let accel_radial = acceleration.x * cos_a + acceleration.y * sin_a;
        let accel_transverse = -acceleration.x * sin_a + acceleration.y * cos_a;

        Ok(Self {
            radius_accel: accel_radial + cyl.radius * rates.angle_rate * rates.angle_rate,
            angle_accel: (accel_transverse - 2.0 * rates.radius_rate * rates.angle_rate)
                / cyl.radius,
            height_accel: acceleration.z,
        })
    }
}

#[cfg(test)]
mod cylindrical_test {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    /// A smooth cylindrical trajectory used to check derivatives by finite differences.
    fn path(t: f64) -> CylindricalState {
        CylindricalState::new(
            2.0 + 0.3 * (0.7 * t).sin(),
            0.4 + 1.1 * t + 0.2 * t * t,
            -1.0 + 0.5 * t,
        )
    }

    fn path_rates(t: f64) -> CylindricalRates {
        CylindricalRates::new(0.21 * (0.7 * t).cos(), 1.1 + 0.4 * t, 0.5)
    }

    fn path_accels(t: f64) -> CylindricalAccelerations {
        CylindricalAccelerations::new(-0.147 * (0.7 * t).sin(), 0.4, 0.0)
    }

    #[test]
    fn position_round_trip() {
        let cyl = CylindricalState::new(3.0, 5.5, -2.0);
        let back = CylindricalState::from_cartesian(&cyl.to_cartesian()).unwrap();
        assert_relative_eq!(back.radius, 3.0, max_relative = 1e-15);
        assert_abs_diff_eq!(back.angle, 5.5, epsilon = 1e-14);
        assert_eq!(back.height, -2.0);
    }

    #[test]
    fn velocity_matches_finite_difference() {
        let dt = 1e-6;
        for t in [0.0, 0.8, 2.5] {
            let forward = path(t + dt).to_cartesian();
            let backward = path(t - dt).to_cartesian();
            let numeric = (forward - backward) / (2.0 * dt);

            let analytic = path_rates(t).to_cartesian(&path(t));
            assert_abs_diff_eq!(analytic, numeric, epsilon = 1e-7);
        }
    }

    #[test]
    fn acceleration_matches_finite_difference() {
        let dt = 1e-5;
        for t in [0.0, 0.8, 2.5] {
            let vel = |s: f64| path_rates(s).to_cartesian(&path(s));
            let numeric = (vel(t + dt) - vel(t - dt)) / (2.0 * dt);

            let analytic = path_accels(t).to_cartesian(&path(t), &path_rates(t));
            assert_abs_diff_eq!(analytic, numeric, epsilon = 1e-6);
        }
    }

    #[test]
    fn inverse_transforms_recover_rates_and_accelerations() {
        let t = 1.3;
        let cyl = path(t);
        let rates = path_rates(t);
        let accels = path_accels(t);

        let pos = cyl.to_cartesian();
        let vel = rates.to_cartesian(&cyl);
        let acc = accels.to_cartesian(&cyl, &rates);

        let rates_back = CylindricalRates::from_cartesian(&pos, &vel).unwrap();
        assert_abs_diff_eq!(rates_back.radius_rate, rates.radius_rate, epsilon = 1e-13);
        assert_abs_diff_eq!(rates_back.angle_rate, rates.angle_rate, epsilon = 1e-13);
        assert_abs_diff_eq!(rates_back.height_rate, rates.height_rate, epsilon = 1e-15);

        let accels_back = CylindricalAccelerations::from_cartesian(&pos, &vel, &acc).unwrap();
        assert_abs_diff_eq!(accels_back.radius_accel, accels.radius_accel, epsilon = 1e-12);
        assert_abs_diff_eq!(accels_back.angle_accel, accels.angle_accel, epsilon = 1e-12);
        assert_abs_diff_eq!(accels_back.height_accel, accels.height_accel, epsilon = 1e-15);
    }

    #[test]
    fn axis_is_degenerate() {
        let on_axis = Vector3::new(0.0, 0.0, 4.0);
        assert!(matches!(
            CylindricalState::from_cartesian(&on_axis),
            Err(SatpropError::DegenerateState(_))
        ));
        assert!(CylindricalRates::from_cartesian(&on_axis, &Vector3::new(1.0, 0.0, 0.0)).is_err());
    }
}
