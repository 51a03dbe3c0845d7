use crate::debugger::{DebugAction, HookEventKind, StepResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const MAIN_THREAD: u32 = 1;

fn main_thread() -> u32 {
    MAIN_THREAD
}

/// One scripted step of the simulated engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TraceStep {
    /// Frames popped without any return hook, as error propagation does.
    Unwind {
        unwind: usize,
        #[serde(default = "main_thread")]
        thread: u32,
    },
    Event {
        event: HookEventKind,
        #[serde(default)]
        source: Option<String>,
        #[serde(default)]
        line: Option<i32>,
        #[serde(default = "main_thread")]
        thread: u32,
    },
}

impl TraceStep {
    pub fn line(line: i32) -> Self {
        Self::Event {
            event: HookEventKind::Line,
            source: None,
            line: Some(line),
            thread: MAIN_THREAD,
        }
    }

    pub fn call(source: &str, line: i32) -> Self {
        Self::Event {
            event: HookEventKind::Call,
            source: Some(source.to_string()),
            line: Some(line),
            thread: MAIN_THREAD,
        }
    }

    pub fn tail_call(source: &str, line: i32) -> Self {
        Self::Event {
            event: HookEventKind::TailCall,
            source: Some(source.to_string()),
            line: Some(line),
            thread: MAIN_THREAD,
        }
    }

    pub fn bare(event: HookEventKind) -> Self {
        Self::Event {
            event,
            source: None,
            line: None,
            thread: MAIN_THREAD,
        }
    }

    pub fn on_thread(mut self, id: u32) -> Self {
        match &mut self {
            Self::Unwind { thread, .. } | Self::Event { thread, .. } => *thread = id,
        }
        self
    }

    pub fn thread(&self) -> u32 {
        match self {
            Self::Unwind { thread, .. } | Self::Event { thread, .. } => *thread,
        }
    }
}

/// A recorded run: the state to start in and the engine steps to replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    #[serde(default = "Trace::default_initial")]
    pub initial: DebugAction,
    pub steps: Vec<TraceStep>,
}

impl Trace {
    fn default_initial() -> DebugAction {
        DebugAction::StepIn
    }

    pub fn new(initial: DebugAction, steps: Vec<TraceStep>) -> Self {
        Self { initial, steps }
    }

    pub fn from_json(json: &str) -> StepResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> StepResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}
