use thiserror::Error;
use triage_core::RemoteError;

#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

pub type Result<T> = std::result::Result<T, WorkflowError>;
