use hl_actors::ActorError;
use hl_core::HlError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] HlError),

    #[error("actor step failed: {0}")]
    Actor(#[from] ActorError),
}

pub type SimResult<T> = Result<T, SimError>;
