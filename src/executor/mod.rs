mod engine;
mod replay;
mod trace;

pub use engine::{BreakRecord, SimEngine};
pub use replay::{parse_commands, Replay, ReplayReport};
pub use trace::{Trace, TraceStep, MAIN_THREAD};
