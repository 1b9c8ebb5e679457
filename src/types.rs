//! This module defines the core data structures and types used throughout the simulator,
//! including tape symbols, machine states, transitions, step outcomes and error types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// The number of cells on the tape. One cell per bit of the encoded character.
pub const TAPE_LENGTH: usize = 8;
/// The character used to render a blank tape cell.
pub const BLANK_SYMBOL: char = '_';
/// The maximum number of steps to execute before giving up on a table that never halts.
pub const MAX_EXECUTION_STEPS: usize = 10000;

/// A single tape symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Symbol {
    #[serde(rename = "0")]
    Zero,
    #[serde(rename = "1")]
    One,
    #[serde(rename = "_")]
    Blank,
}

impl Symbol {
    /// Returns the character used to render this symbol.
    pub fn as_char(self) -> char {
        match self {
            Symbol::Zero => '0',
            Symbol::One => '1',
            Symbol::Blank => BLANK_SYMBOL,
        }
    }
}

impl TryFrom<char> for Symbol {
    type Error = TuringMachineError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '0' => Ok(Symbol::Zero),
            '1' => Ok(Symbol::One),
            BLANK_SYMBOL => Ok(Symbol::Blank),
            other => Err(TuringMachineError::InvalidSymbol(other)),
        }
    }
}

impl From<Symbol> for char {
    fn from(symbol: Symbol) -> Self {
        symbol.as_char()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// The machine's control states. `Q0` is initial, `Q8` is terminal.
///
/// State `q{i}` means "bit `i` is the next one to write"; once all eight bits
/// are on the tape the machine sits in `Q8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum State {
    Q0,
    Q1,
    Q2,
    Q3,
    Q4,
    Q5,
    Q6,
    Q7,
    Q8,
}

impl State {
    /// The state every machine starts in.
    pub const INITIAL: State = State::Q0;
    /// The accepting state. Reaching it stops the machine.
    pub const TERMINAL: State = State::Q8;
    /// All states in index order.
    pub const ALL: [State; 9] = [
        State::Q0,
        State::Q1,
        State::Q2,
        State::Q3,
        State::Q4,
        State::Q5,
        State::Q6,
        State::Q7,
        State::Q8,
    ];

    /// Returns the state with the given index, or `None` past `q8`.
    pub fn from_index(index: usize) -> Option<State> {
        Self::ALL.get(index).copied()
    }

    /// Returns the numeric index of this state (`q3` -> 3).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the state following this one, saturating at the terminal state.
    pub fn next(self) -> State {
        Self::from_index(self.index() + 1).unwrap_or(State::TERMINAL)
    }

    /// Checks whether this is the terminal state.
    pub fn is_terminal(self) -> bool {
        self == State::TERMINAL
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.index())
    }
}

/// Represents the possible directions the head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
    /// Keep the head in the same position.
    Stay,
}

impl Direction {
    /// Returns the single-letter code used in trace output.
    pub fn as_char(self) -> char {
        match self {
            Direction::Left => 'L',
            Direction::Right => 'R',
            Direction::Stay => 'N',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Represents a single transition rule.
///
/// The `(state, symbol)` pair it applies to is the key it is stored under in a
/// [`TransitionTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// The symbol written to the cell under the head.
    pub write: Symbol,
    /// The direction the head moves after writing.
    pub direction: Direction,
    /// The state the machine transitions to.
    pub next_state: State,
}

impl Transition {
    pub fn new(write: Symbol, direction: Direction, next_state: State) -> Self {
        Self {
            write,
            direction,
            next_state,
        }
    }
}

impl fmt::Display for Transition {
    /// Formats as `write,nextState,move`, e.g. `1,q2,R`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.write, self.next_state, self.direction)
    }
}

/// The transition function, keyed by `(current state, symbol read)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionTable {
    rules: BTreeMap<(State, Symbol), Transition>,
}

impl TransitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a rule, returning the rule previously stored under the same key.
    pub fn insert(
        &mut self,
        state: State,
        read: Symbol,
        transition: Transition,
    ) -> Option<Transition> {
        self.rules.insert((state, read), transition)
    }

    /// Removes the rule for `(state, read)`, returning it if present.
    pub fn remove(&mut self, state: State, read: Symbol) -> Option<Transition> {
        self.rules.remove(&(state, read))
    }

    pub fn get(&self, state: State, read: Symbol) -> Option<&Transition> {
        self.rules.get(&(state, read))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterates over the rules in `(state, symbol)` order.
    pub fn iter(&self) -> impl Iterator<Item = (State, Symbol, &Transition)> {
        self.rules
            .iter()
            .map(|(&(state, read), transition)| (state, read, transition))
    }
}

/// The fixed-size tape.
pub type Tape = [Symbol; TAPE_LENGTH];

/// One executed step, captured before the machine mutated anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceRow {
    /// The tape contents before the step.
    pub tape: Tape,
    /// The head position before the step.
    pub head: usize,
    /// The symbol under the head.
    pub read: Symbol,
    /// The state before the step.
    pub state: State,
    /// The rule that was applied, or `None` if there was no instruction.
    pub transition: Option<Transition>,
}

impl TraceRow {
    /// Renders the tape with the head cell bracketed: ` 0 [1] _ `.
    pub fn tape_with_head(&self) -> String {
        self.tape
            .iter()
            .enumerate()
            .map(|(i, symbol)| {
                if i == self.head {
                    format!("[{}]", symbol)
                } else {
                    format!(" {} ", symbol)
                }
            })
            .collect()
    }

    /// Returns `write,nextState,move`, or `no instruction` when no rule matched.
    pub fn operation(&self) -> String {
        match &self.transition {
            Some(t) => t.to_string(),
            None => "no instruction".to_string(),
        }
    }

    /// Returns the written symbol, or an empty string when no rule matched.
    pub fn written(&self) -> String {
        self.transition
            .map(|t| t.write.to_string())
            .unwrap_or_default()
    }

    /// Returns the state after the step, or an empty string when no rule matched.
    pub fn new_state(&self) -> String {
        self.transition
            .map(|t| t.next_state.to_string())
            .unwrap_or_default()
    }

    /// Checks whether this row records a halt on a missing transition.
    pub fn is_no_instruction(&self) -> bool {
        self.transition.is_none()
    }
}

/// Represents the outcome of a single execution step.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// The machine applied a rule and can keep going.
    Continue(TraceRow),
    /// The machine has stopped.
    Halt(Halt),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Halt {
    /// The terminal state has been reached.
    Ok,
    /// No rule exists for the current state and symbol. The row is the final trace entry.
    NoInstruction(TraceRow),

    Err(TuringMachineError),
}

/// How a completed run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// The machine reached the terminal state.
    Accepted,
    /// The machine stopped because no rule matched.
    NoInstruction,
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub termination: Termination,
    /// The state the machine stopped in.
    pub state: State,
    /// The final tape contents, cells joined in index order.
    pub tape: String,
    /// The number of rules applied.
    pub steps: usize,
}

/// Represents various errors that can occur while building or running a machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TuringMachineError {
    /// The character's code point does not fit on an 8-cell tape.
    #[error("Character {character:?} (code point {code_point}) does not fit in 8 bits")]
    EncodingOverflow { character: char, code_point: u32 },
    /// A character outside the tape alphabet was given where a symbol was expected.
    #[error("Invalid tape symbol: {0:?}")]
    InvalidSymbol(char),
    /// The head attempted to read or move beyond the tape boundaries.
    #[error("Tape boundary exceeded at head position {head}")]
    TapeBoundary { head: isize },
    /// The machine kept running past the step cap.
    #[error("Machine did not halt within {0} steps")]
    StepLimitExceeded(usize),
}
