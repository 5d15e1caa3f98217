use er_core::{CoreError, PatientId};
use er_queue::EventKind;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("patient {0} is not in the roster")]
    PatientNotFound(PatientId),

    #[error("{kind} event carries no patient")]
    MissingPatient { kind: EventKind },
}

pub type SimResult<T> = Result<T, SimError>;
