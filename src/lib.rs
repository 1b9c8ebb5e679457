//! This crate provides a single-tape Turing Machine that writes the 8-bit binary
//! encoding of one character onto a fixed 8-cell tape. It includes modules for
//! building the transition table, executing it step by step, and rendering the
//! per-step trace.

pub mod builder;
pub mod machine;
pub mod report;
pub mod types;

/// Re-exports the table construction functions from the builder module.
pub use builder::{binary_encoding, build};
/// Re-exports the `TuringMachine` struct from the machine module.
pub use machine::TuringMachine;
/// Re-exports the machine's model and outcome types from the types module.
pub use types::{
    Direction, Halt, Outcome, State, Step, Symbol, Termination, TraceRow, Transition,
    TransitionTable, TuringMachineError, TAPE_LENGTH,
};
