use super::dispatcher::{DebugAction, Debugger};
use super::error::StepResult;
use super::location::{ExecutionHandle, HookEvent};
use super::stepping::HookState;
use tracing::{debug, warn};

/// Stepping session for one execution context.
///
/// Holds the active `HookState`. The state only changes through `activate`.
#[derive(Debug, Default)]
pub struct StepContext {
    state: Option<HookState>,
}

impl StepContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Option<&HookState> {
        self.state.as_ref()
    }

    /// Start `state` and make it the active one.
    ///
    /// If `start` fails the previously active state is left in place.
    pub fn activate(
        &mut self,
        dbg: &mut dyn Debugger,
        mut state: HookState,
        current: Option<ExecutionHandle>,
    ) -> StepResult<()> {
        if let Err(e) = state.start(dbg, current) {
            warn!(state = state.name(), error = %e, "state not activated");
            return Err(e);
        }
        debug!(
            state = state.name(),
            previous = self.state.as_ref().map(HookState::name),
            "state activated"
        );
        self.state = Some(state);
        Ok(())
    }

    pub fn command(
        &mut self,
        dbg: &mut dyn Debugger,
        action: DebugAction,
        current: Option<ExecutionHandle>,
    ) -> StepResult<()> {
        self.activate(dbg, HookState::from_action(action), current)
    }

    /// Forward one hook event to the active state.
    pub fn dispatch(&mut self, dbg: &mut dyn Debugger, handle: ExecutionHandle, event: &HookEvent) {
        if let Some(state) = self.state.as_mut() {
            state.process_hook(dbg, handle, event);
        }
    }
}
