//! This module builds the transition table that makes the machine write a character's
//! 8-bit binary encoding onto its tape, one bit per state.

use crate::types::{
    Direction, State, Symbol, Transition, TransitionTable, TuringMachineError, TAPE_LENGTH,
};

/// Returns the binary representation of `input`'s code point, zero-padded to 8 digits.
///
/// Code points that need more than 8 bits are rejected with
/// `TuringMachineError::EncodingOverflow` rather than truncated.
pub fn binary_encoding(input: char) -> Result<String, TuringMachineError> {
    let code_point = u32::from(input);
    if code_point > u8::MAX as u32 {
        return Err(TuringMachineError::EncodingOverflow {
            character: input,
            code_point,
        });
    }

    Ok(format!("{:0width$b}", code_point, width = TAPE_LENGTH))
}

/// Builds the transition table for `input` and returns it with the binary encoding.
///
/// For every bit `i` the table holds `(q{i}, _) -> (bit, R, q{i+1})`, followed by
/// the terminal self-loop `(q8, _) -> (_, N, q8)`.
///
/// # Returns
///
/// * `Ok((TransitionTable, String))` with nine rules and the 8-digit encoding.
/// * `Err(TuringMachineError::EncodingOverflow)` if the code point exceeds `0xFF`.
pub fn build(input: char) -> Result<(TransitionTable, String), TuringMachineError> {
    let binary = binary_encoding(input)?;
    let mut table = TransitionTable::new();

    for (&state, bit) in State::ALL.iter().zip(binary.chars()) {
        table.insert(
            state,
            Symbol::Blank,
            Transition::new(Symbol::try_from(bit)?, Direction::Right, state.next()),
        );
    }

    table.insert(
        State::TERMINAL,
        Symbol::Blank,
        Transition::new(Symbol::Blank, Direction::Stay, State::TERMINAL),
    );

    tracing::debug!(input = ?input, %binary, rules = table.len(), "built transition table");

    Ok((table, binary))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_encoding_pads_to_eight_bits() {
        assert_eq!(binary_encoding('A').unwrap(), "01000001");
        assert_eq!(binary_encoding('\0').unwrap(), "00000000");
        assert_eq!(binary_encoding('\u{ff}').unwrap(), "11111111");
        assert_eq!(binary_encoding(' ').unwrap(), "00100000");
    }

    #[test]
    fn test_oversized_character_is_rejected() {
        let result = binary_encoding('Ā');
        assert_eq!(
            result,
            Err(TuringMachineError::EncodingOverflow {
                character: 'Ā',
                code_point: 0x100,
            })
        );
        assert!(build('€').is_err());
    }

    #[test]
    fn test_build_table_for_a() {
        let (table, binary) = build('A').unwrap();

        assert_eq!(binary, "01000001");
        assert_eq!(table.len(), 9);

        let expected_bits = [
            Symbol::Zero,
            Symbol::One,
            Symbol::Zero,
            Symbol::Zero,
            Symbol::Zero,
            Symbol::Zero,
            Symbol::Zero,
            Symbol::One,
        ];
        for (i, bit) in expected_bits.iter().enumerate() {
            let state = State::from_index(i).unwrap();
            let transition = table.get(state, Symbol::Blank).unwrap();
            assert_eq!(transition.write, *bit);
            assert_eq!(transition.direction, Direction::Right);
            assert_eq!(transition.next_state, State::from_index(i + 1).unwrap());
        }
    }

    #[test]
    fn test_build_adds_terminal_self_loop() {
        let (table, _) = build('z').unwrap();

        let terminal = table.get(State::Q8, Symbol::Blank).unwrap();
        assert_eq!(
            *terminal,
            Transition::new(Symbol::Blank, Direction::Stay, State::Q8)
        );
    }

    #[test]
    fn test_build_only_keys_on_blank() {
        let (table, _) = build('k').unwrap();

        assert!(table.iter().all(|(_, read, _)| read == Symbol::Blank));
        assert!(table.get(State::Q0, Symbol::Zero).is_none());
        assert!(table.get(State::Q0, Symbol::One).is_none());
    }
}
