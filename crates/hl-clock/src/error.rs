use hl_core::SimTime;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ClockError {
    #[error("delay must be finite and >= 0, got {0}")]
    InvalidDelay(f64),

    #[error("cannot schedule at {at}: clock is already at {now}")]
    InPast { at: SimTime, now: SimTime },
}

pub type ClockResult<T> = Result<T, ClockError>;
