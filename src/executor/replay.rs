use super::engine::{BreakRecord, SimEngine};
use super::trace::{Trace, MAIN_THREAD};
use crate::debugger::{DebugAction, ExecutionHandle, StepContext, StepError, StepResult};
use std::collections::VecDeque;
use tracing::{info, warn};

/// Split a shell-quoted command list such as `"next in 'step out'"`.
pub fn parse_commands(line: &str) -> StepResult<Vec<DebugAction>> {
    let words = shlex::split(line).ok_or_else(|| StepError::UnknownCommand(line.to_string()))?;
    words.iter().map(|w| w.parse()).collect()
}

/// Outcome of a replay: every break, and the command answered to it.
#[derive(Debug, Default)]
pub struct ReplayReport {
    pub stops: Vec<(BreakRecord, DebugAction)>,
}

/// Drives a `Trace` through a `SimEngine`.
///
/// Each break consumes the next queued command; an empty queue continues.
pub struct Replay {
    engine: SimEngine,
    ctx: StepContext,
    commands: VecDeque<DebugAction>,
}

impl Replay {
    pub fn new(commands: impl IntoIterator<Item = DebugAction>) -> Self {
        Self {
            engine: SimEngine::new(),
            ctx: StepContext::new(),
            commands: commands.into_iter().collect(),
        }
    }

    pub fn engine(&self) -> &SimEngine {
        &self.engine
    }

    pub fn context(&self) -> &StepContext {
        &self.ctx
    }

    pub fn run(&mut self, trace: &Trace) -> StepResult<ReplayReport> {
        let main = ExecutionHandle(trace.steps.first().map_or(MAIN_THREAD, |s| s.thread()));
        self.ctx.command(&mut self.engine, trace.initial, Some(main))?;

        let mut report = ReplayReport::default();
        for step in &trace.steps {
            self.engine.apply(&mut self.ctx, step);

            let Some(stop) = self.engine.take_break() else {
                continue;
            };
            let next = self.commands.pop_front().unwrap_or(DebugAction::Continue);
            info!(location = %stop.location, depth = stop.depth, ?next, "stopped");
            if let Err(e) = self.ctx.command(&mut self.engine, next, Some(stop.handle)) {
                warn!(error = %e, "command ignored, keeping previous state");
            }
            report.stops.push((stop, next));
        }
        Ok(report)
    }
}
