use thiserror::Error;

#[derive(Debug, Error)]
pub enum StepError {
    /// `start` was called without a frame to step from.
    #[error("no current execution context")]
    NoExecutionContext,

    #[error("unknown step command: {0}")]
    UnknownCommand(String),

    #[error("failed to read trace: {0}")]
    TraceIo(#[from] std::io::Error),

    #[error("malformed trace: {0}")]
    TraceFormat(#[from] serde_json::Error),
}

pub type StepResult<T> = Result<T, StepError>;
