//! This module defines the `TuringMachine` struct, which simulates a single-tape machine
//! over a fixed 8-cell tape. It handles the machine's state, tape writes, head movement
//! and the halting rule.

use crate::builder;
use crate::types::{
    Direction, Halt, Outcome, State, Step, Symbol, Tape, Termination, TraceRow, Transition,
    TransitionTable, TuringMachineError, MAX_EXECUTION_STEPS, TAPE_LENGTH,
};

/// Represents a single-tape Turing Machine.
///
/// The machine exclusively owns its tape, head position, current state and
/// transition table. It is built for one input and run once.
///
/// Any table can be loaded with [`TuringMachine::new`]. A table that never
/// reaches `q8` and never misses a rule is stopped only by
/// `MAX_EXECUTION_STEPS`; the tables produced by [`builder::build`] halt in
/// eight steps.
#[derive(Debug, Clone)]
pub struct TuringMachine {
    state: State,
    tape: Tape,
    head: usize,
    table: TransitionTable,
    step_count: usize,
}

impl TuringMachine {
    /// Creates a new `TuringMachine` with a blank tape, the head on cell 0 and
    /// the machine in the initial state.
    ///
    /// # Arguments
    ///
    /// * `table` - The transition function to execute.
    pub fn new(table: TransitionTable) -> Self {
        Self {
            state: State::INITIAL,
            tape: [Symbol::Blank; TAPE_LENGTH],
            head: 0,
            table,
            step_count: 0,
        }
    }

    /// Creates a machine that writes `input`'s binary encoding, returning it
    /// together with the encoding string.
    pub fn from_char(input: char) -> Result<(Self, String), TuringMachineError> {
        let (table, binary) = builder::build(input)?;
        Ok((Self::new(table), binary))
    }

    /// Executes a single step of the computation.
    ///
    /// The trace row is captured from the configuration before anything is
    /// written or moved.
    ///
    /// # Returns
    ///
    /// * `Step::Continue(row)` if a rule was applied.
    /// * `Step::Halt(Halt::Ok)` if the machine is already in the terminal state.
    /// * `Step::Halt(Halt::NoInstruction(row))` if no rule matches; tape and state are left as they are.
    /// * `Step::Halt(Halt::Err(_))` if the head is off the tape or would move off it.
    pub fn step(&mut self) -> Step {
        if self.is_halted() {
            return Step::Halt(Halt::Ok);
        }

        let read = match self.symbol() {
            Some(symbol) => symbol,
            None => {
                tracing::warn!(head = self.head, state = %self.state, "head is off the tape");
                return Step::Halt(Halt::Err(TuringMachineError::TapeBoundary {
                    head: self.head as isize,
                }));
            }
        };

        let transition = match self.transition().copied() {
            Some(t) => t,
            None => {
                tracing::warn!(state = %self.state, symbol = %read, "no instruction");
                return Step::Halt(Halt::NoInstruction(self.trace_row(read, None)));
            }
        };

        let head = match self.moved_head(transition.direction) {
            Ok(head) => head,
            Err(e) => return Step::Halt(Halt::Err(e)),
        };

        let row = self.trace_row(read, Some(transition));

        self.tape[self.head] = transition.write;
        self.head = head;
        self.state = transition.next_state;
        self.step_count += 1;

        tracing::debug!(
            step = self.step_count,
            state = %row.state,
            read = %read,
            operation = %transition,
            "applied transition"
        );

        Step::Continue(row)
    }

    /// Runs the machine until it reaches the terminal state or stops on a missing rule.
    ///
    /// `on_step` receives every trace row exactly once, in execution order,
    /// including the final "no instruction" row.
    ///
    /// # Returns
    ///
    /// * `Ok(Outcome)` describing how the run ended and the final tape.
    /// * `Err(TuringMachineError::TapeBoundary)` if the head leaves the tape.
    /// * `Err(TuringMachineError::StepLimitExceeded)` if the table does not halt.
    pub fn run<F>(&mut self, mut on_step: F) -> Result<Outcome, TuringMachineError>
    where
        F: FnMut(&TraceRow),
    {
        for _ in 0..MAX_EXECUTION_STEPS {
            match self.step() {
                Step::Continue(row) => on_step(&row),
                Step::Halt(Halt::Ok) => return Ok(self.outcome(Termination::Accepted)),
                Step::Halt(Halt::NoInstruction(row)) => {
                    on_step(&row);
                    return Ok(self.outcome(Termination::NoInstruction));
                }
                Step::Halt(Halt::Err(e)) => return Err(e),
            }
        }

        if self.is_halted() {
            return Ok(self.outcome(Termination::Accepted));
        }

        Err(TuringMachineError::StepLimitExceeded(MAX_EXECUTION_STEPS))
    }

    /// Runs the machine to completion, collecting the trace.
    pub fn run_traced(&mut self) -> Result<(Vec<TraceRow>, Outcome), TuringMachineError> {
        let mut rows = Vec::new();
        let outcome = self.run(|row| rows.push(row.clone()))?;
        Ok((rows, outcome))
    }

    /// Returns the current state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Returns the head position. After the last Right move it may sit one
    /// past the final cell.
    pub fn head(&self) -> usize {
        self.head
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Returns the tape contents joined in index order, e.g. `01000001`.
    pub fn tape_string(&self) -> String {
        self.tape.iter().map(|s| s.as_char()).collect()
    }

    /// Returns the total number of rules applied.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// Checks if the machine is in the terminal state.
    pub fn is_halted(&self) -> bool {
        self.state.is_terminal()
    }

    /// Returns the symbol under the head, or `None` if the head is off the tape.
    pub fn symbol(&self) -> Option<Symbol> {
        self.tape.get(self.head).copied()
    }

    /// Finds the rule for the current state and the symbol under the head.
    pub fn transition(&self) -> Option<&Transition> {
        self.symbol()
            .and_then(|symbol| self.table.get(self.state, symbol))
    }

    /// Computes where the head lands after moving in `direction`.
    ///
    /// Moving left of cell 0 or right of the cell just past the tape is fatal;
    /// the tape never grows.
    fn moved_head(&self, direction: Direction) -> Result<usize, TuringMachineError> {
        let target = match direction {
            Direction::Left => self.head as isize - 1,
            Direction::Right => self.head as isize + 1,
            Direction::Stay => self.head as isize,
        };

        if target < 0 || target > TAPE_LENGTH as isize {
            tracing::warn!(head = target, state = %self.state, "head would leave the tape");
            return Err(TuringMachineError::TapeBoundary { head: target });
        }

        Ok(target as usize)
    }

    fn trace_row(&self, read: Symbol, transition: Option<Transition>) -> TraceRow {
        TraceRow {
            tape: self.tape,
            head: self.head,
            read,
            state: self.state,
            transition,
        }
    }

    fn outcome(&self, termination: Termination) -> Outcome {
        Outcome {
            termination,
            state: self.state,
            tape: self.tape_string(),
            steps: self.step_count,
        }
    }
}
