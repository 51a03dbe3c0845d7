use serde::{Deserialize, Serialize};
use std::fmt;

/// Line number reported for frames with no known line (native code).
pub const UNKNOWN_LINE: i32 = -1;

/// Approximate call depth, see `StackLevelBased`.
pub type StackDepth = usize;

/// One independently steppable execution context (thread or coroutine).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExecutionHandle(pub u32);

impl fmt::Display for ExecutionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "thread#{}", self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub source: String,
    pub line: i32,
}

impl SourceLocation {
    pub fn new(source: impl Into<String>, line: i32) -> Self {
        Self {
            source: source.into(),
            line,
        }
    }

    /// Location of a frame the engine can't map to a line.
    pub fn unknown() -> Self {
        Self::new("", UNKNOWN_LINE)
    }

    pub fn is_unknown_line(&self) -> bool {
        self.line == UNKNOWN_LINE
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown_line() {
            write!(f, "{}:?", self.source)
        } else {
            write!(f, "{}:{}", self.source, self.line)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookEventKind {
    Line,
    Call,
    TailCall,
    Return,
    Count,
}

/// What the engine reports on each hook callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookEvent {
    pub kind: HookEventKind,
    pub location: SourceLocation,
}

impl HookEvent {
    pub fn new(kind: HookEventKind, location: SourceLocation) -> Self {
        Self { kind, location }
    }

    pub fn is_line(&self) -> bool {
        self.kind == HookEventKind::Line
    }
}
