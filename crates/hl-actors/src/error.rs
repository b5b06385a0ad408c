use hl_clock::ClockError;
use hl_core::{DroneId, WorkerId};
use hl_logistics::HarvestBox;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ActorError {
    #[error("clock error: {0}")]
    Clock(#[from] ClockError),

    /// The box is returned so the caller still owns it.
    #[error("{drone} was handed {box_id} while not waiting for one", box_id = .harvest_box.id)]
    UnexpectedHandoff { drone: DroneId, harvest_box: HarvestBox },

    #[error("{0} was woken while suspended in the queue")]
    SpuriousWake(DroneId),

    #[error("no worker {0} in this field")]
    UnknownWorker(WorkerId),

    #[error("no drone {0} in this field")]
    UnknownDrone(DroneId),
}

pub type ActorResult<T> = Result<T, ActorError>;
