use ctxpick::app::{self, Outputs};
use ctxpick::cli::{AppConfig, Args};
use ctxpick::controller::{Controller, Outcome};
use ctxpick::domain::FileRecords;
use ctxpick::error::Result;
use ctxpick::logging::init_logging;
use ctxpick::sink::WriterSink;
use ctxpick::tui::{render, RestoreGuard};

use crossterm::{
    event::{self, Event, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing::debug;

fn main() {
    init_logging();

    // Parse command line arguments
    let args = Args::parse_args();

    let code = match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    };
    std::process::exit(code);
}

/// Runs the whole pipeline and returns the process exit status
fn run(args: Args) -> Result<i32> {
    args.validate()?;
    let user_config = args.load_user_config()?;
    let config = AppConfig::resolve(args, &user_config);
    debug!(?config, "resolved configuration");

    let mut sink = config.destination.sink();
    let mut fallback = WriterSink::stdout();
    let mut stderr = io::stderr();

    app::execute(
        &config,
        run_checklist,
        Outputs {
            sink: sink.as_mut(),
            fallback: &mut fallback,
            report: &mut stderr,
        },
    )
}

/// Shows the checklist until the user commits or quits
fn run_checklist(records: &FileRecords) -> io::Result<Outcome> {
    // Setup terminal
    enable_raw_mode()?;
    let _restore = RestoreGuard::new(|| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    });
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let outcome = Controller::new(records).run(read_key, |controller| {
        terminal.draw(|frame| render(frame, controller))?;
        Ok(())
    });

    terminal.show_cursor()?;
    outcome
}

/// Blocks until the next key event. A resize yields `None` so the checklist is
/// redrawn at the new size without any key reaching it.
fn read_key() -> io::Result<Option<KeyEvent>> {
    loop {
        match event::read()? {
            Event::Key(key) => return Ok(Some(key)),
            Event::Resize(_, _) => return Ok(None),
            _ => {}
        }
    }
}
