pub mod debugger;
pub mod executor;
