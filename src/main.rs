use anyhow::Error;
use clap::Parser;
use keycalc::{parse_keys, Calculator};
use std::io::BufRead;
use std::io::Write;
use tracing_subscriber::EnvFilter;

/// Keypad calculator. Keys: 0-9 . + - * / =, s (shift), d (delete), c (clear).
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Key scripts fed to a single session; stdin is read when omitted
    keys: Vec<String>,

    /// Log every dispatched action
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let mut calculator = Calculator::new();

    let stdout = std::io::stdout();
    let lock = stdout.lock();
    let mut w = std::io::BufWriter::new(lock);

    if !cli.keys.is_empty() {
        for script in &cli.keys {
            feed(&mut calculator, script)?;
        }
        writeln!(&mut w, "{}", calculator.display())?;
    } else {
        let stdin = std::io::stdin();
        let reader = std::io::BufReader::new(stdin);
        let is_interactive = atty::is(atty::Stream::Stdin);

        if is_interactive {
            prompt(&mut w, &calculator)?;
        }

        for line in reader.lines() {
            // Keys before the failing one stay applied, the rest of the line is skipped
            if let Err(e) = feed(&mut calculator, &line?) {
                w.flush()?;
                eprintln!("Error: {}", e);
            }

            writeln!(&mut w, "{}", calculator.display())?;
            if is_interactive {
                prompt(&mut w, &calculator)?;
            }
        }
    }
    w.flush()?;

    Ok(())
}

fn feed(calculator: &mut Calculator, script: &str) -> Result<(), Error> {
    for key in parse_keys(script)? {
        key.press(calculator)?;
    }
    Ok(())
}

fn prompt(w: &mut impl Write, calculator: &Calculator) -> Result<(), Error> {
    if calculator.is_shift_active() {
        write!(w, "\u{21E7}>>> ")?;
    } else {
        write!(w, ">>> ")?;
    }
    w.flush()?;
    Ok(())
}
