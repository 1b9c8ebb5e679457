use clap::Parser;
use std::error::Error;
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;
use tur_bits::{report, TraceRow, TuringMachine};

/// Encodes one character as 8 bits on the tape of a Turing machine and prints every step.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(after_help = "EXAMPLES:
  tur-bits-cli A
  echo A | tur-bits-cli --json")]
struct Cli {
    /// The character to encode. Only the first character is used.
    /// If not provided, a line is read from stdin.
    character: Option<String>,

    /// Print trace rows and the outcome as JSON lines instead of a table
    #[clap(short, long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    // Logs go to stderr so they never interleave with the report on stdout.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if !cli.json {
        println!("Turing machine: character to 8-bit binary encoder");
    }

    let line = match cli.character {
        Some(character) => character,
        None => read_line()?,
    };

    let Some(input) = line.chars().next() else {
        println!("No character provided.");
        return Ok(());
    };

    let (mut machine, binary) = match TuringMachine::from_char(input) {
        Ok(built) => built,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let result = if cli.json {
        machine.run(|row: &TraceRow| match serde_json::to_string(row) {
            Ok(json) => println!("{}", json),
            Err(e) => tracing::error!(error = %e, "failed to serialize trace row"),
        })
    } else {
        println!("{}", report::encoding_line(input, &binary));
        println!("{}", report::header());
        machine.run(|row| println!("{}", report::row(row)))
    };

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("Machine error: {}", e);
            std::process::exit(1);
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string(&outcome)?);
    } else {
        println!("\n{}", report::result_line(&outcome.tape));
    }

    Ok(())
}

/// Reads one line from stdin, prompting only when stdin is a terminal.
fn read_line() -> io::Result<String> {
    if atty::is(atty::Stream::Stdin) {
        print!("Enter one character to encode: ");
        io::stdout().flush()?;
    }

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parses_character_and_json_flag() {
        let cli = Cli::parse_from(["tur-bits-cli", "--json", "A"]);
        assert_eq!(cli.character.as_deref(), Some("A"));
        assert!(cli.json);

        let cli = Cli::parse_from(["tur-bits-cli"]);
        assert!(cli.character.is_none());
        assert!(!cli.json);
    }
}
