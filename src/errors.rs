use thiserror::Error;

use crate::control::engine::Phase;

#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Invalid transition: cannot {action} while {phase}")]
    InvalidTransition { action: &'static str, phase: Phase },
}

pub type SimulationResult<T> = Result<T, SimulationError>;
