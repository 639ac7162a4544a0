use std::io::{self, BufRead, Write};

use anyhow::Result;
use log::{debug, info};
use stepcalc::calculate;

const PROMPT: &str = "Enter an expression (or 'q' to quit): ";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    info!("stepcalc {} started", env!("CARGO_PKG_VERSION"));

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();

    loop {
        write!(stdout, "\n{PROMPT}")?;
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            debug!("end of input");
            break;
        }

        let input = line.trim_end_matches(['\n', '\r']);
        if input == "q" || input == "Q" {
            break;
        }

        match calculate(input) {
            Ok(evaluation) => {
                writeln!(stdout, "Result: {}", evaluation.value)?;
                writeln!(stdout, "Steps:")?;
                for (i, step) in evaluation.steps.iter().enumerate() {
                    writeln!(stdout, "  {}. {step}", i + 1)?;
                }
            }
            Err(e) => {
                debug!("{e:#}");
                // Only the root cause, not the input echoed in the context
                writeln!(stdout, "Error: {}", e.root_cause())?;
            }
        }
    }

    Ok(())
}
