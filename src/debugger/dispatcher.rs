use super::error::StepError;
use super::location::{ExecutionHandle, SourceLocation, StackDepth};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

bitflags::bitflags! {
    /// Which hook events the engine delivers for an execution context.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct HookMask: u8 {
        const CALL = 1 << 0;
        const RETURN = 1 << 1;
        const LINE = 1 << 2;
        const COUNT = 1 << 3;
    }
}

/// User commands, and the actions a state can ask the dispatcher to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DebugAction {
    Break,
    Continue,
    StepOver,
    StepIn,
    StepOut,
    Stop,
}

impl DebugAction {
    pub fn parse(cmd: &str) -> Result<Self, StepError> {
        match cmd.trim().to_lowercase().as_str() {
            "continue" | "c" => Ok(Self::Continue),
            "next" | "stepover" | "over" | "n" => Ok(Self::StepOver),
            "stepin" | "stepinto" | "in" | "s" => Ok(Self::StepIn),
            "stepout" | "out" | "finish" => Ok(Self::StepOut),
            "pause" | "break" => Ok(Self::Break),
            "stop" | "quit" => Ok(Self::Stop),
            _ => Err(StepError::UnknownCommand(cmd.to_string())),
        }
    }
}

impl FromStr for DebugAction {
    type Err = StepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// The primitives a stepping state needs from the hook dispatcher.
///
/// Hook installation is owned by the implementor; states only ask for
/// changes through `exit_debug_mode` and `update_hook`.
pub trait Debugger {
    /// Drop back to coarse hook delivery until finer granularity is needed.
    fn exit_debug_mode(&mut self);

    /// Suspend the session at the current location of `handle`.
    fn handle_break(&mut self, handle: ExecutionHandle);

    /// `precise == false` asks for the cheap estimate used at step start.
    fn stack_level(&self, handle: ExecutionHandle, precise: bool) -> StackDepth;

    fn update_hook(&mut self, handle: ExecutionHandle, mask: HookMask);

    fn perform_action(&mut self, action: DebugAction);

    /// Whether a frame exists at `level`, 0 being the innermost one.
    fn has_frame(&self, handle: ExecutionHandle, level: usize) -> bool;

    fn frame_location(&self, handle: ExecutionHandle, level: usize) -> Option<SourceLocation>;
}
