//! Fixed-width text rendering of a run: the column header, one line per trace row,
//! and the final result line.

use crate::types::TraceRow;

/// Column titles in display order.
pub const COLUMNS: [&str; 6] = [
    "Tape with head",
    "Read",
    "State",
    "Operation",
    "Write",
    "New state",
];

const WIDTHS: [usize; 6] = [30, 10, 10, 20, 10, 12];

fn line(cells: [&str; 6]) -> String {
    cells
        .iter()
        .zip(WIDTHS)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns the table header.
pub fn header() -> String {
    line(COLUMNS)
}

/// Formats one trace row under the header's columns.
///
/// A row without an applied rule shows `no instruction` and leaves the
/// write and new-state columns empty.
pub fn row(row: &TraceRow) -> String {
    line([
        &row.tape_with_head(),
        &row.read.to_string(),
        &row.state.to_string(),
        &row.operation(),
        &row.written(),
        &row.new_state(),
    ])
}

pub fn encoding_line(input: char, binary: &str) -> String {
    format!("Binary code of character '{}': {}", input, binary)
}

pub fn result_line(tape: &str) -> String {
    format!("Final result (tape): {}", tape)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::TuringMachine;
    use crate::types::{State, Symbol, TAPE_LENGTH};

    #[test]
    fn test_header_columns() {
        let header = header();

        assert!(header.starts_with("Tape with head"));
        assert_eq!(&header[31..35], "Read");
        assert_eq!(&header[42..47], "State");
        assert_eq!(&header[53..62], "Operation");
        assert!(header.ends_with("New state   "));
    }

    #[test]
    fn test_first_row_of_a() {
        let (mut machine, _) = TuringMachine::from_char('A').unwrap();
        let (rows, _) = machine.run_traced().unwrap();

        let rendered = row(&rows[0]);
        let expected = format!(
            "{:<30} {:<10} {:<10} {:<20} {:<10} {:<12}",
            "[_] _  _  _  _  _  _  _ ", "_", "q0", "0,q1,R", "0", "q1"
        );
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_no_instruction_row() {
        let missing = TraceRow {
            tape: [Symbol::Blank; TAPE_LENGTH],
            head: 0,
            read: Symbol::Blank,
            state: State::Q3,
            transition: None,
        };

        let rendered = row(&missing);
        assert!(rendered.contains("q3"));
        assert!(rendered.trim_end().ends_with("no instruction"));
    }

    #[test]
    fn test_summary_lines() {
        assert_eq!(
            encoding_line('A', "01000001"),
            "Binary code of character 'A': 01000001"
        );
        assert_eq!(result_line("01000001"), "Final result (tape): 01000001");
    }
}
