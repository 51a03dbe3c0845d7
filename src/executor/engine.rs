use super::trace::TraceStep;
use crate::debugger::{
    DebugAction, Debugger, ExecutionHandle, HookEvent, HookEventKind, HookMask, SourceLocation,
    StackDepth, StepContext, UNKNOWN_LINE,
};
use std::collections::HashMap;
use tracing::debug;

/// Where the session was suspended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakRecord {
    pub handle: ExecutionHandle,
    pub location: SourceLocation,
    pub depth: StackDepth,
}

struct SimThread {
    frames: Vec<SourceLocation>,
    mask: HookMask,
}

impl SimThread {
    fn new() -> Self {
        Self {
            frames: Vec::new(),
            mask: HookMask::all(),
        }
    }

    fn top(&self) -> SourceLocation {
        self.frames
            .last()
            .cloned()
            .unwrap_or_else(SourceLocation::unknown)
    }
}

/// Deterministic stand-in for a scripted engine with a per-thread hook slot.
///
/// Frames are innermost-last. Hooks for call, tail call and line fire after
/// the frame change; the return hook fires before the frame is popped.
pub struct SimEngine {
    threads: HashMap<ExecutionHandle, SimThread>,
    /// Records the granularity last asked for. Delivery only follows the hook mask.
    debug_mode: bool,
    pending_break: Option<BreakRecord>,
    breaks: Vec<BreakRecord>,
    actions: Vec<DebugAction>,
}

impl Default for SimEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SimEngine {
    pub fn new() -> Self {
        Self {
            threads: HashMap::new(),
            debug_mode: true,
            pending_break: None,
            breaks: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// Replace the frames of `handle`, outermost first.
    pub fn set_frames(&mut self, handle: ExecutionHandle, frames: Vec<SourceLocation>) {
        self.threads.entry(handle).or_insert_with(SimThread::new).frames = frames;
    }

    pub fn depth(&self, handle: ExecutionHandle) -> StackDepth {
        self.threads.get(&handle).map_or(0, |t| t.frames.len())
    }

    pub fn hook_mask(&self, handle: ExecutionHandle) -> HookMask {
        self.threads.get(&handle).map_or(HookMask::all(), |t| t.mask)
    }

    /// False after `exit_debug_mode`, true again once a break is handled.
    pub fn is_debug_mode(&self) -> bool {
        self.debug_mode
    }

    pub fn breaks(&self) -> &[BreakRecord] {
        &self.breaks
    }

    pub fn actions(&self) -> &[DebugAction] {
        &self.actions
    }

    /// The break requested by the last hook, if any.
    pub fn take_break(&mut self) -> Option<BreakRecord> {
        self.pending_break.take()
    }

    /// Run one step, delivering its hook event to `ctx` when the mask allows.
    pub fn apply(&mut self, ctx: &mut StepContext, step: &TraceStep) {
        match step {
            TraceStep::Unwind { unwind, thread } => {
                let thread = self
                    .threads
                    .entry(ExecutionHandle(*thread))
                    .or_insert_with(SimThread::new);
                let keep = thread.frames.len().saturating_sub(*unwind);
                thread.frames.truncate(keep);
            }
            TraceStep::Event {
                event,
                source,
                line,
                thread,
            } => {
                let handle = ExecutionHandle(*thread);
                let t = self.threads.entry(handle).or_insert_with(SimThread::new);
                let named = || {
                    SourceLocation::new(
                        source.clone().unwrap_or_else(|| "=[C]".to_string()),
                        line.unwrap_or(UNKNOWN_LINE),
                    )
                };
                match event {
                    HookEventKind::Call => t.frames.push(named()),
                    HookEventKind::TailCall => {
                        t.frames.pop();
                        t.frames.push(named());
                    }
                    HookEventKind::Line => {
                        let mut here = t.top();
                        if let Some(source) = source {
                            here.source = source.clone();
                        }
                        here.line = line.unwrap_or(here.line);
                        match t.frames.last_mut() {
                            Some(top) => *top = here,
                            None => t.frames.push(here),
                        }
                    }
                    HookEventKind::Return | HookEventKind::Count => {}
                }

                let wanted = match event {
                    HookEventKind::Call | HookEventKind::TailCall => HookMask::CALL,
                    HookEventKind::Return => HookMask::RETURN,
                    HookEventKind::Line => HookMask::LINE,
                    HookEventKind::Count => HookMask::COUNT,
                };
                if t.mask.contains(wanted) {
                    let hook = HookEvent::new(*event, t.top());
                    ctx.dispatch(self, handle, &hook);
                }

                if *event == HookEventKind::Return {
                    if let Some(t) = self.threads.get_mut(&handle) {
                        t.frames.pop();
                    }
                }
            }
        }
    }
}

impl Debugger for SimEngine {
    fn exit_debug_mode(&mut self) {
        self.debug_mode = false;
    }

    fn handle_break(&mut self, handle: ExecutionHandle) {
        let record = BreakRecord {
            handle,
            location: self
                .frame_location(handle, 0)
                .unwrap_or_else(SourceLocation::unknown),
            depth: self.depth(handle),
        };
        debug!(%handle, location = %record.location, depth = record.depth, "suspended");
        self.debug_mode = true;
        self.breaks.push(record.clone());
        self.pending_break = Some(record);
    }

    fn stack_level(&self, handle: ExecutionHandle, _precise: bool) -> StackDepth {
        self.depth(handle)
    }

    fn update_hook(&mut self, handle: ExecutionHandle, mask: HookMask) {
        self.threads.entry(handle).or_insert_with(SimThread::new).mask = mask;
    }

    fn perform_action(&mut self, action: DebugAction) {
        self.actions.push(action);
    }

    fn has_frame(&self, handle: ExecutionHandle, level: usize) -> bool {
        level < self.depth(handle)
    }

    fn frame_location(&self, handle: ExecutionHandle, level: usize) -> Option<SourceLocation> {
        let frames = &self.threads.get(&handle)?.frames;
        let index = frames.len().checked_sub(level + 1)?;
        frames.get(index).cloned()
    }
}
