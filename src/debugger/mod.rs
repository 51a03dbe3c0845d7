mod context;
mod dispatcher;
mod error;
mod location;
mod stepping;

pub use context::StepContext;
pub use dispatcher::{DebugAction, Debugger, HookMask};
pub use error::{StepError, StepResult};
pub use location::{
    ExecutionHandle, HookEvent, HookEventKind, SourceLocation, StackDepth, UNKNOWN_LINE,
};
pub use stepping::{HookState, LineStep, StackLevelBased};
