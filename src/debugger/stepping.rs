use super::dispatcher::{DebugAction, Debugger, HookMask};
use super::error::{StepError, StepResult};
use super::location::{ExecutionHandle, HookEvent, SourceLocation, StackDepth};
use tracing::{debug, trace};

/// Call depth tracking shared by the step-in/out/over states.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackLevelBased {
    handle: Option<ExecutionHandle>,
    origin_depth: StackDepth,
    tracked_depth: StackDepth,
}

impl StackLevelBased {
    fn start(
        &mut self,
        dbg: &dyn Debugger,
        current: Option<ExecutionHandle>,
    ) -> StepResult<ExecutionHandle> {
        let handle = current.ok_or(StepError::NoExecutionContext)?;
        self.handle = Some(handle);
        self.origin_depth = dbg.stack_level(handle, false);
        self.tracked_depth = self.origin_depth;
        Ok(handle)
    }

    /// Re-derive the tracked depth by probing the engine's frames.
    ///
    /// Counting call/return events is not reliable: a failed load under a
    /// protected call or an `error()` inside a function reports more calls
    /// than returns. A coroutine resumed into a function with nothing left
    /// to run reports "return, tail return, return". So the probe starts one
    /// level above the last known depth and walks down to the first frame
    /// that exists. Depth can grow by a call per event but shrink by many.
    pub fn update_stack_level(&mut self, dbg: &dyn Debugger, handle: ExecutionHandle) {
        if self.handle != Some(handle) {
            return;
        }
        for level in (0..=self.tracked_depth + 1).rev() {
            if dbg.has_frame(handle, level) {
                self.tracked_depth = level + 1;
                break;
            }
        }
        trace!(
            %handle,
            origin = self.origin_depth,
            tracked = self.tracked_depth,
            "stack level probed"
        );
    }

    pub fn handle(&self) -> Option<ExecutionHandle> {
        self.handle
    }

    pub fn origin_depth(&self) -> StackDepth {
        self.origin_depth
    }

    pub fn tracked_depth(&self) -> StackDepth {
        self.tracked_depth
    }

    fn returned_past_origin(&self) -> bool {
        self.tracked_depth < self.origin_depth
    }
}

/// A stack-tracked step that also remembers where it began.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineStep {
    pub level: StackLevelBased,
    pub origin: SourceLocation,
}

impl LineStep {
    fn start(&mut self, dbg: &mut dyn Debugger, current: Option<ExecutionHandle>) -> StepResult<()> {
        let handle = self.level.start(dbg, current)?;
        self.origin = dbg
            .frame_location(handle, 0)
            .unwrap_or_else(SourceLocation::unknown);
        debug!(
            %handle,
            origin = %self.origin,
            depth = self.level.origin_depth,
            "step origin captured"
        );
        dbg.exit_debug_mode();
        Ok(())
    }
}

/// What the debugger is currently trying to achieve for one execution context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookState {
    Continue,
    StepIn(LineStep),
    StepOut(StackLevelBased),
    StepOver(LineStep),
    /// Stop at the very next line boundary.
    Break(Option<ExecutionHandle>),
    Stop,
}

impl HookState {
    pub fn from_action(action: DebugAction) -> Self {
        match action {
            DebugAction::Break => Self::Break(None),
            DebugAction::Continue => Self::Continue,
            DebugAction::StepOver => Self::StepOver(LineStep::default()),
            DebugAction::StepIn => Self::StepIn(LineStep::default()),
            DebugAction::StepOut => Self::StepOut(StackLevelBased::default()),
            DebugAction::Stop => Self::Stop,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Continue => "continue",
            Self::StepIn(_) => "stepIn",
            Self::StepOut(_) => "stepOut",
            Self::StepOver(_) => "stepOver",
            Self::Break(_) => "break",
            Self::Stop => "stop",
        }
    }

    /// The execution context this state was bound to by `start`.
    pub fn handle(&self) -> Option<ExecutionHandle> {
        match self {
            Self::StepIn(step) | Self::StepOver(step) => step.level.handle(),
            Self::StepOut(level) => level.handle(),
            Self::Break(handle) => *handle,
            Self::Continue | Self::Stop => None,
        }
    }

    pub fn stack_level(&self) -> Option<&StackLevelBased> {
        match self {
            Self::StepIn(step) | Self::StepOver(step) => Some(&step.level),
            Self::StepOut(level) => Some(level),
            Self::Continue | Self::Break(_) | Self::Stop => None,
        }
    }

    pub fn start(
        &mut self,
        dbg: &mut dyn Debugger,
        current: Option<ExecutionHandle>,
    ) -> StepResult<()> {
        match self {
            Self::Continue => {
                dbg.exit_debug_mode();
                Ok(())
            }
            Self::StepIn(step) | Self::StepOver(step) => step.start(dbg, current),
            Self::StepOut(level) => {
                level.start(dbg, current)?;
                dbg.exit_debug_mode();
                Ok(())
            }
            Self::Break(handle) => {
                *handle = current;
                Ok(())
            }
            Self::Stop => {
                let handle = current.ok_or(StepError::NoExecutionContext)?;
                dbg.update_hook(handle, HookMask::empty());
                dbg.perform_action(DebugAction::Continue);
                Ok(())
            }
        }
    }

    pub fn process_hook(
        &mut self,
        dbg: &mut dyn Debugger,
        handle: ExecutionHandle,
        event: &HookEvent,
    ) {
        match self {
            Self::Continue | Self::Stop => {}
            Self::StepIn(step) => {
                step.level.update_stack_level(dbg, handle);
                if event.is_line() && event.location.line != step.origin.line {
                    request_break(dbg, handle, "step in reached a new line");
                }
            }
            Self::StepOut(level) => {
                level.update_stack_level(dbg, handle);
                if level.returned_past_origin() {
                    request_break(dbg, handle, "stepped out of origin frame");
                }
            }
            Self::StepOver(step) => {
                step.level.update_stack_level(dbg, handle);
                if step.level.returned_past_origin() {
                    request_break(dbg, handle, "step over left origin frame");
                    return;
                }
                if event.is_line()
                    && event.location.line != step.origin.line
                    && step.level.tracked_depth == step.level.origin_depth
                {
                    let here = dbg
                        .frame_location(handle, 0)
                        .unwrap_or_else(|| event.location.clone());
                    if here.source == step.origin.source || step.origin.is_unknown_line() {
                        request_break(dbg, handle, "step over reached next line");
                    }
                }
            }
            Self::Break(_) => {
                if event.is_line() {
                    request_break(dbg, handle, "break requested");
                }
            }
        }
    }
}

fn request_break(dbg: &mut dyn Debugger, handle: ExecutionHandle, reason: &str) {
    debug!(%handle, reason, "requesting break");
    dbg.handle_break(handle);
}
