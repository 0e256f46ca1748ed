//! # Fixed-step Runge–Kutta integration
//!
//! One generic explicit RK4 stepper, [`rk4_step`], drives every [`Dynamics`] of the crate,
//! and [`propagate`] applies it over a time span to fill a [`Trajectory`].
//!
//! ## Step count
//!
//! For a span `[t_start, t_end]` and a step `h` the trajectory holds
//!
//! ```text
//! N = round((t_end − t_start) / h) + 1
//! ```
//!
//! samples at `t_i = t_start + h·i`. When `h` does not divide the span, the last sample is
//! the nearest multiple of `h`: it may fall slightly before or after `t_end`, but no point is
//! dropped or duplicated. A negative `h` integrates backwards (then `t_end < t_start`).
//!
//! ## Failure policy
//!
//! The first error raised by the dynamics aborts the propagation and is returned as is.
//! A step producing a non-finite state aborts with [`SatpropError::NonFiniteState`].
//!
//! ## Parallelism
//!
//! A single trajectory is strictly sequential. [`propagate_batch`] integrates independent
//! initial conditions, in parallel with `rayon` when the `parallel` feature is enabled.
use nalgebra::{Const, DVector, Dyn, OMatrix, SVector};

use crate::{
    constants::{Second, StateVector, MAX_TRAJECTORY_SAMPLES},
    dynamics::Dynamics,
    orbit_type::{OrbitState, Representation},
    satprop_errors::SatpropError,
};

/// Samples of a propagated state: `D` rows × `N` columns (states × time).
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory<const D: usize> {
    times: DVector<f64>,
    states: OMatrix<f64, Const<D>, Dyn>,
}

impl<const D: usize> Trajectory<D> {
    /// Sample times in seconds, length `N`.
    pub fn times(&self) -> &DVector<f64> {
        &self.times
    }

    /// States as a `D × N` matrix, one column per sample.
    pub fn states(&self) -> &OMatrix<f64, Const<D>, Dyn> {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Time of sample `i`.
    ///
    /// Panics if `i >= self.len()`.
    pub fn time(&self, i: usize) -> f64 {
        self.times[i]
    }

    /// State of sample `i`.
    ///
    /// Panics if `i >= self.len()`.
    pub fn state(&self, i: usize) -> SVector<f64, D> {
        self.states.column(i).into_owned()
    }

    /// Final sample, `None` only for an empty trajectory.
    pub fn last(&self) -> Option<(f64, SVector<f64, D>)> {
        let n = self.len();
        (n > 0).then(|| (self.time(n - 1), self.state(n - 1)))
    }

    /// Iterate over `(t, state)` pairs in time order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, SVector<f64, D>)> + '_ {
        (0..self.len()).map(move |i| (self.time(i), self.state(i)))
    }
}

impl Trajectory<6> {
    /// Convert every sample from `from` to `to` (e.g. back to Cartesian for reporting).
    pub fn convert(
        &self,
        from: Representation,
        to: Representation,
        mu: f64,
    ) -> Result<Self, SatpropError> {
        let mut states = self.states.clone();
        for (i, column) in self.states.column_iter().enumerate() {
            let state: StateVector = column.into_owned();
            let converted = OrbitState::from_vector(from, &state).convert(to, mu)?;
            states.set_column(i, &converted.to_vector());
        }
        Ok(Self {
            times: self.times.clone(),
            states,
        })
    }
}

/// One classical Runge–Kutta step of size `h` from `(state, t)`.
///
/// ```text
/// k1 = F(y, t)
/// k2 = F(y + h/2·k1, t + h/2)
/// k3 = F(y + h/2·k2, t + h/2)
/// k4 = F(y + h·k3,   t + h)
/// y' = y + h/6·(k1 + 2k2 + 2k3 + k4)
/// ```
pub fn rk4_step<P, F, const D: usize>(
    dynamics: &F,
    state: &SVector<f64, D>,
    params: &P,
    t: Second,
    h: Second,
) -> Result<SVector<f64, D>, SatpropError>
where
    F: Dynamics<P, D> + ?Sized,
{
    let half = 0.5 * h;

    let k1 = dynamics.derivative(state, params, t)?;
    let k2 = dynamics.derivative(&(state + k1 * half), params, t + half)?;
    let k3 = dynamics.derivative(&(state + k2 * half), params, t + half)?;
    let k4 = dynamics.derivative(&(state + k3 * h), params, t + h)?;

    Ok(state + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (h / 6.0))
}

/// Number of samples `round((t_end − t_start)/h) + 1` after validating the inputs.
///
/// Spans needing [`MAX_TRAJECTORY_SAMPLES`] samples or more are rejected.
fn sample_count(t_start: Second, t_end: Second, h: Second) -> Result<usize, SatpropError> {
    if !h.is_finite() || h == 0.0 {
        return Err(SatpropError::InvalidStepSize(h));
    }
    let steps = (t_end - t_start) / h;
    // also bounds the usize cast below
    let too_many = steps.round() >= MAX_TRAJECTORY_SAMPLES as f64;
    if !t_start.is_finite() || !t_end.is_finite() || !(steps >= 0.0) || too_many {
        return Err(SatpropError::InvalidTimeSpan {
            t_start,
            t_end,
            step: h,
        });
    }
    Ok(steps.round() as usize + 1)
}

/// Integrate `dynamics` from `initial` over `[t_start, t_end]` with the fixed step `h`.
///
/// Arguments
/// ---------
/// * `dynamics`: right-hand side of the system
/// * `initial`: state at `t_start`, stored as sample 0
/// * `params`: run parameters forwarded to every evaluation
/// * `t_start`, `t_end`: time span in seconds
/// * `h`: step in seconds, non-zero, with the sign of `t_end − t_start`
///
/// Return
/// ------
/// * A [`Trajectory`] of `round((t_end − t_start)/h) + 1` samples.
/// * `Err(SatpropError::InvalidStepSize | InvalidTimeSpan)` for unusable inputs.
/// * Any error of the dynamics, or [`SatpropError::NonFiniteState`] with the failing step.
///
/// See also
/// --------
/// * [`rk4_step`] – The single-step scheme.
/// * [`propagate_batch`] – Many initial conditions at once.
pub fn propagate<P, F, const D: usize>(
    dynamics: &F,
    initial: &SVector<f64, D>,
    params: &P,
    t_start: Second,
    t_end: Second,
    h: Second,
) -> Result<Trajectory<D>, SatpropError>
where
    F: Dynamics<P, D> + ?Sized,
{
    let n = sample_count(t_start, t_end, h)?;
    log::debug!("propagating {n} samples over [{t_start}, {t_end}] s with step {h} s");

    let times = DVector::from_fn(n, |i, _| t_start + h * i as f64);
    let mut states = OMatrix::<f64, Const<D>, Dyn>::zeros_generic(Const::<D>, Dyn(n));
    states.set_column(0, initial);

    let mut state = *initial;
    for i in 1..n {
        state = rk4_step(dynamics, &state, params, times[i - 1], h)?;
        if !state.iter().all(|x| x.is_finite()) {
            log::warn!("non-finite state at step {i}, t = {} s", times[i]);
            return Err(SatpropError::NonFiniteState(i));
        }
        states.set_column(i, &state);
    }

    log::debug!("propagation finished at t = {} s", times[n - 1]);
    Ok(Trajectory { times, states })
}

/// Propagate independent initial conditions over the same span, in parallel.
///
/// Results are returned in the order of `initials`; a failure only affects its own entry.
#[cfg(feature = "parallel")]
pub fn propagate_batch<P, F, const D: usize>(
    dynamics: &F,
    initials: &[SVector<f64, D>],
    params: &P,
    t_start: Second,
    t_end: Second,
    h: Second,
) -> Vec<Result<Trajectory<D>, SatpropError>>
where
    F: Dynamics<P, D> + Sync + ?Sized,
    P: Sync,
{
    use rayon::prelude::*;

    log::debug!("batch propagation of {} trajectories", initials.len());
    initials
        .par_iter()
        .map(|initial| propagate(dynamics, initial, params, t_start, t_end, h))
        .collect()
}

/// Propagate independent initial conditions over the same span, one after the other.
///
/// Results are returned in the order of `initials`; a failure only affects its own entry.
#[cfg(not(feature = "parallel"))]
pub fn propagate_batch<P, F, const D: usize>(
    dynamics: &F,
    initials: &[SVector<f64, D>],
    params: &P,
    t_start: Second,
    t_end: Second,
    h: Second,
) -> Vec<Result<Trajectory<D>, SatpropError>>
where
    F: Dynamics<P, D> + ?Sized,
{
    log::debug!("batch propagation of {} trajectories", initials.len());
    initials
        .iter()
        .map(|initial| propagate(dynamics, initial, params, t_start, t_end, h))
        .collect()
}
