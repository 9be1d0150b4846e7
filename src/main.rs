// Defensive programming lints - prevent panics and unsafe patterns
#![deny(clippy::indexing_slicing)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::fallible_impl_from)]
#![warn(clippy::wildcard_enum_match_arm)]
#![warn(clippy::fn_params_excessive_bools)]
// Idiomatic Rust lints
#![warn(clippy::needless_return)]
#![warn(clippy::let_and_return)]
#![warn(clippy::must_use_candidate)]
#![warn(clippy::redundant_closure_for_method_calls)]
#![warn(clippy::map_unwrap_or)]
#![warn(clippy::explicit_iter_loop)]

use color_eyre::Result;
use crossterm::{
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::{fs::File, io, sync::Mutex, time::Duration};
use suggestion_search::{
    Config, EventResult, FileStore,
    app::{App, Focus},
    config,
    storage::PersistenceBridge,
    ui,
};
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "suggestion-search.log";

fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    // Check for command-line arguments
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 {
        return handle_cli_args(&args);
    }

    let config = Config::load()?;
    init_logging()?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting");

    let store = FileStore::new(config.store_path()?);
    let mut app = App::new(&config, store)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);
    app.unmount();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "terminal loop failed");
        eprintln!("Error: {:?}", err);
    }
    tracing::info!("exiting");

    Ok(())
}

/// Sends tracing output to a file in the data directory; the terminal
/// belongs to the UI. `RUST_LOG` overrides the default `info` level.
fn init_logging() -> Result<()> {
    let dir = config::data_dir()?;
    std::fs::create_dir_all(&dir)?;
    let file = File::options()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|err| color_eyre::eyre::eyre!("failed to initialise logging: {}", err))
}

fn handle_cli_args(args: &[String]) -> Result<()> {
    let cmd = args
        .get(1)
        .ok_or_else(|| color_eyre::eyre::eyre!("No command provided"))?;
    let program_name = args.first().map_or("suggestion-search", String::as_str);

    match cmd.as_str() {
        "--help" | "-h" => print_help(program_name),
        "--version" | "-v" => println!("Suggestion Search v{}", env!("CARGO_PKG_VERSION")),
        "history" => {
            let config = Config::load()?;
            let mut bridge = PersistenceBridge::new(Box::new(FileStore::new(config.store_path()?)));
            match bridge.load()? {
                Some(history) if !history.is_empty() => {
                    for term in history {
                        println!("{}", term);
                    }
                }
                Some(_) | None => println!("No recent searches stored."),
            }
        }
        "clear-history" => {
            let config = Config::load()?;
            let mut bridge = PersistenceBridge::new(Box::new(FileStore::new(config.store_path()?)));
            bridge.sync(&[])?;
            println!("Recent searches cleared.");
        }
        cmd_str => {
            eprintln!("Unknown command: {}", cmd_str);
            eprintln!("Run with --help for available commands.");
            std::process::exit(1);
        }
    }
    Ok(())
}

fn print_help(program_name: &str) {
    println!("Suggestion Search - search input with recent-search suggestions");
    println!();
    println!("Usage: {} [command]", program_name);
    println!();
    println!("Commands:");
    println!("  history        - Print stored recent searches, newest first");
    println!("  clear-history  - Forget stored recent searches");
    println!("  --help         - Show this help");
    println!("  --version      - Show version");
    println!();
    println!("Run without arguments to start interactive mode.");
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        app.check_submissions();
        app.clear_expired_status_toast();

        let mut layout = ui::ScreenLayout::default();
        terminal.draw(|f| layout = ui::render(f, app))?;
        app.set_screen_layout(layout);

        if app.should_quit {
            break;
        }

        // Poll for events with a timeout
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle KeyPress events to avoid duplicate handling
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
                    if ctrl && key.code == KeyCode::Char('c') {
                        app.should_quit = true;
                        continue;
                    }
                    if ctrl && key.code == KeyCode::Char('y') {
                        app.copy_selected_result();
                        continue;
                    }

                    match app.focus {
                        Focus::Search => handle_search_mode(app, key),
                        Focus::Results => handle_results_mode(app, key.code),
                    }
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                Event::Paste(paste) => app.handle_paste(&paste),
                Event::FocusGained | Event::FocusLost | Event::Resize(_, _) => {}
            }
        }
    }

    Ok(())
}

fn handle_search_mode(app: &mut App, key: KeyEvent) {
    let result = app.search.borrow_mut().handle_key(key);
    if result == EventResult::Ignored && key.code == KeyCode::Tab {
        app.focus_results();
    }
}

fn handle_results_mode(app: &mut App, key_code: KeyCode) {
    match key_code {
        KeyCode::Up => app.previous_result(),
        KeyCode::Down => app.next_result(),
        KeyCode::Enter => app.recall_selected_result(),
        KeyCode::Esc | KeyCode::Tab | KeyCode::BackTab => app.focus_search(),
        KeyCode::Backspace
        | KeyCode::Left
        | KeyCode::Right
        | KeyCode::Home
        | KeyCode::End
        | KeyCode::PageUp
        | KeyCode::PageDown
        | KeyCode::Delete
        | KeyCode::Insert
        | KeyCode::F(_)
        | KeyCode::Char(_)
        | KeyCode::Null
        | KeyCode::CapsLock
        | KeyCode::ScrollLock
        | KeyCode::NumLock
        | KeyCode::PrintScreen
        | KeyCode::Pause
        | KeyCode::Menu
        | KeyCode::KeypadBegin
        | KeyCode::Media(_)
        | KeyCode::Modifier(_) => {}
    }
}
