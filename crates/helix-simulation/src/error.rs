use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("time step must be positive and finite, got {0}")]
    InvalidTimeStep(f32),
}

pub type Result<T> = std::result::Result<T, SimulationError>;
