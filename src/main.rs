// spsc: validator for SPS programs

use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser as CliParser, ValueEnum};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::debug;

use spsc::config::MAX_FILE_LEN;
use spsc::parser::{ParseOutcome, Parser, SymbolTable};
use spsc::report::{Console, Transcript};
use spsc::scanner::{LineReader, ReservedWords};
use spsc::ui::App;

/// When to style the console report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

#[derive(CliParser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Source file to check; asked for on stdin when omitted
    file: Option<PathBuf>,

    /// Reserved-word definitions, one `NAME CODE` pair per line
    #[arg(short, long, value_name = "PATH")]
    tokens: Option<PathBuf>,

    /// Style the report with colors
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    /// Browse the report in a terminal viewer after parsing
    #[arg(long)]
    view: bool,

    /// Do not print the symbol table
    #[arg(long)]
    no_dump: bool,
}

fn main() -> ExitCode {
    spsc::init_tracing();
    let args = Args::parse();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(2)
        }
    }
}

/// Check one file and print the report. Returns whether the parse succeeded.
fn run(args: &Args) -> Result<bool, Box<dyn Error>> {
    let path = match &args.file {
        Some(path) => path.clone(),
        None => prompt_for_file()?,
    };

    let file = File::open(&path)
        .map_err(|err| format!("could not open input file '{}': {}", path.display(), err))?;

    let reserved = match &args.tokens {
        Some(tokens) => ReservedWords::from_file(tokens)?,
        None => ReservedWords::builtin(),
    };
    debug!(entries = reserved.table().len(), "reserved words loaded");

    let color = match args.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => io::stdout().is_terminal(),
    };
    let mut console = Console::stdout(color);
    let source = LineReader::new(BufReader::new(file));

    let success = if args.view {
        // record first, print once the viewer is closed
        let outcome = Parser::with_reserved(source, reserved.clone(), Transcript::new()).run();
        replay_after(&outcome, &mut console, |outcome| view(outcome, reserved));
        finish(&mut console, outcome.is_success(), &outcome.symbols, args.no_dump)
    } else {
        let ParseOutcome {
            result, symbols, ..
        } = Parser::with_reserved(source, reserved, &mut console).run();
        finish(&mut console, result.is_ok(), &symbols, args.no_dump)
    };

    Ok(success)
}

/// Run `show` over a recorded parse, then replay the recording to `console`.
///
/// A viewer failure is printed to stderr; the report is replayed regardless.
fn replay_after<W, F>(outcome: &ParseOutcome<Transcript>, console: &mut Console<W>, show: F)
where
    W: Write,
    F: FnOnce(&ParseOutcome<Transcript>) -> io::Result<()>,
{
    if let Err(err) = show(outcome) {
        eprintln!("Error: {:?}", err);
    }
    outcome.diagnostics.replay(console);
}

/// Print the banner and, unless suppressed, the symbol table.
fn finish<W: Write>(
    console: &mut Console<W>,
    success: bool,
    symbols: &SymbolTable,
    no_dump: bool,
) -> bool {
    console.banner(success);
    if !no_dump {
        console.dump("Symbol table", symbols);
    }
    success
}

/// Ask for the input file name on stdin.
fn prompt_for_file() -> io::Result<PathBuf> {
    print!("\n Name of your input file ({} characters max): ", MAX_FILE_LEN);
    io::stdout().flush()?;

    let mut name = String::new();
    io::stdin().lock().read_line(&mut name)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "no input file given",
        ));
    }
    Ok(PathBuf::from(name))
}

/// Show the report viewer until the user quits.
fn view(outcome: &ParseOutcome<Transcript>, reserved: ReservedWords) -> io::Result<()> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(outcome, reserved);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }
    Ok(())
}
