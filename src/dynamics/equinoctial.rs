use nalgebra::Vector3;

use super::{force_toggles, Dynamics, ForceSelection};
use crate::{
    constants::StateVector,
    orbit_type::equinoctial_element::EquinoctialElements,
    perturbations::{drag::drag_rtn_equinoctial, extra_rtn_acceleration, j2::j2_rtn_equinoctial},
    physical_params::PhysicalParameters,
    satprop_errors::SatpropError,
};

/// Variational equations of the modified equinoctial elements `(p, f, g, h, k, L)`.
///
/// With `q = √(p/mu)`, `w = 1 + f cos L + g sin L`, `s² = 1 + h² + k²` and the perturbing
/// acceleration `(Δr, Δt, Δn)` in the RTN frame:
///
/// ```text
/// ṗ = 2p/w · q Δt
/// ḟ = q [ Δr sin L + ((w + 1) cos L + f) Δt/w − (h sin L − k cos L) g Δn/w]
/// ġ = q [−Δr cos L + ((w + 1) sin L + g) Δt/w + (h sin L − k cos L) f Δn/w]
/// ḣ = q s² cos L Δn / (2w)
/// k̇ = q s² sin L Δn / (2w)
/// L̇ = √(mu p) (w/p)² + q (h sin L − k cos L) Δn/w
/// ```
///
/// None of the terms divide by the eccentricity or the sine of the inclination.
#[derive(Default)]
pub struct EquinoctialDynamics {
    forces: ForceSelection,
}

force_toggles!(EquinoctialDynamics);

impl Dynamics<PhysicalParameters, 6> for EquinoctialDynamics {
    fn derivative(
        &self,
        state: &StateVector,
        params: &PhysicalParameters,
        t: f64,
    ) -> Result<StateVector, SatpropError> {
        let eq = EquinoctialElements::from_vector(state);
        eq.validate()?;

        let EquinoctialElements { p, f, g, h, k, l } = eq;
        let mu = params.mu();
        let (sin_l, cos_l) = l.sin_cos();
        let w = eq.w();
        let s_sq = eq.s_squared();
        let r = p / w;

        let mut force = Vector3::zeros();
        if self.forces.j2 {
            force += j2_rtn_equinoctial(r, h, k, l, params);
        }
        if self.forces.drag {
            force += drag_rtn_equinoctial(p, f, g, l, params);
        }
        if !self.forces.extra.is_empty() {
            let cart = eq.to_cartesian(mu)?;
            force += extra_rtn_acceleration(&self.forces.extra, &cart, params, t);
        }
        let (d_r, d_t, d_n) = (force.x, force.y, force.z);

        let q = (p / mu).sqrt();
        let out_of_plane = h * sin_l - k * cos_l;

        let p_dot = 2.0 * p / w * q * d_t;
        let f_dot = q
            * (d_r * sin_l + ((w + 1.0) * cos_l + f) * d_t / w - out_of_plane * g * d_n / w);
        let g_dot = q
            * (-d_r * cos_l + ((w + 1.0) * sin_l + g) * d_t / w + out_of_plane * f * d_n / w);
        let h_dot = q * s_sq * cos_l * d_n / (2.0 * w);
        let k_dot = q * s_sq * sin_l * d_n / (2.0 * w);
        let l_dot = (mu * p).sqrt() * (w / p).powi(2) + q * out_of_plane * d_n / w;

        Ok(StateVector::new(p_dot, f_dot, g_dot, h_dot, k_dot, l_dot))
    }
}
