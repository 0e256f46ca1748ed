use thiserror::Error;

#[derive(Error, Debug)]
pub enum SatpropError {
    #[error("Eccentricity {0} is outside the elliptic domain [0, 1)")]
    InvalidEccentricity(f64),

    #[error("Inclination {0} rad is outside [0, π]")]
    InvalidInclination(f64),

    #[error("Semi-major axis must be strictly positive for a bound orbit, got {0}")]
    NonPositiveSemiMajorAxis(f64),

    #[error("Semi-latus rectum must be strictly positive, got {0}")]
    NonPositiveSemiLatusRectum(f64),

    #[error("Degenerate state vector: {0}")]
    DegenerateState(String),

    #[error(
        "Kepler's equation did not converge for M = {mean_anomaly}, e = {eccentricity}: {source}"
    )]
    KeplerNoConvergence {
        mean_anomaly: f64,
        eccentricity: f64,
        #[source]
        source: roots::SearchError,
    },

    #[error(
        "Classical variational equations are singular at e = {eccentricity}, \
         i = {inclination} rad; use the equinoctial representation"
    )]
    SingularClassicalElements { eccentricity: f64, inclination: f64 },

    #[error("Invalid physical parameter: {0}")]
    InvalidPhysicalParameter(String),

    #[error("Invalid unit scaling: {0}")]
    InvalidScaling(String),

    #[error("Unknown representation '{0}', expected cartesian|classical|equinoctial")]
    UnknownRepresentation(String),

    #[error("Invalid integration step size: {0}")]
    InvalidStepSize(f64),

    #[error("Invalid time span [{t_start}, {t_end}] for step {step}")]
    InvalidTimeSpan { t_start: f64, t_end: f64, step: f64 },

    #[error("Non-finite state produced at integration step {0}")]
    NonFiniteState(usize),
}

impl PartialEq for SatpropError {
    fn eq(&self, other: &Self) -> bool {
        use SatpropError::*;
        match (self, other) {
            (InvalidEccentricity(a), InvalidEccentricity(b)) => a == b,
            (InvalidInclination(a), InvalidInclination(b)) => a == b,
            (NonPositiveSemiMajorAxis(a), NonPositiveSemiMajorAxis(b)) => a == b,
            (NonPositiveSemiLatusRectum(a), NonPositiveSemiLatusRectum(b)) => a == b,
            (DegenerateState(a), DegenerateState(b)) => a == b,
            (
                KeplerNoConvergence {
                    mean_anomaly: m1,
                    eccentricity: e1,
                    source: s1,
                },
                KeplerNoConvergence {
                    mean_anomaly: m2,
                    eccentricity: e2,
                    source: s2,
                },
            ) => m1 == m2 && e1 == e2 && s1 == s2,
            (
                SingularClassicalElements {
                    eccentricity: e1,
                    inclination: i1,
                },
                SingularClassicalElements {
                    eccentricity: e2,
                    inclination: i2,
                },
            ) => e1 == e2 && i1 == i2,
            (InvalidPhysicalParameter(a), InvalidPhysicalParameter(b)) => a == b,
            (InvalidScaling(a), InvalidScaling(b)) => a == b,
            (UnknownRepresentation(a), UnknownRepresentation(b)) => a == b,
            (InvalidStepSize(a), InvalidStepSize(b)) => a == b,
            (
                InvalidTimeSpan {
                    t_start: s1,
                    t_end: e1,
                    step: h1,
                },
                InvalidTimeSpan {
                    t_start: s2,
                    t_end: e2,
                    step: h2,
                },
            ) => s1 == s2 && e1 == e2 && h1 == h2,
            (NonFiniteState(a), NonFiniteState(b)) => a == b,
            _ => false,
        }
    }
}
