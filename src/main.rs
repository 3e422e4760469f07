//! barcart - Home Bar Recipe Browser
//!
//! A TUI for browsing cocktail and shot recipes against what is on the shelf.
//!
//! Features:
//! - Search drinks by ingredient and filter by theme
//! - Recipe details with image previews
//! - Track ingredient stock; drinks you cannot make are flagged
//! - Random drink pick
//!
//! Usage: barcart [--catalog <path>] [--stock <path>]

mod app;
mod catalog;
mod config;
mod types;
mod ui;

use anyhow::{bail, Context, Result};
use app::App;
use catalog::{Catalog, Stock};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::stdout;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Parsed command line
#[derive(Debug, Default, PartialEq, Eq)]
struct CliArgs {
    catalog: Option<PathBuf>,
    stock: Option<PathBuf>,
    help: bool,
    version: bool,
}

fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut cli = CliArgs::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => cli.help = true,
            "-v" | "--version" => cli.version = true,
            "-c" | "--catalog" => {
                let value = iter.next().context("--catalog needs a path")?;
                cli.catalog = Some(PathBuf::from(value));
            }
            "-s" | "--stock" => {
                let value = iter.next().context("--stock needs a path")?;
                cli.stock = Some(PathBuf::from(value));
            }
            other => bail!("Unknown argument: {} (see --help)", other),
        }
    }

    Ok(cli)
}

fn main() -> Result<()> {
    // Parse arguments
    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(2);
        }
    };

    if cli.help {
        print_help();
        return Ok(());
    }

    if cli.version {
        println!("barcart {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let data_dir = dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("barcart");
    let _log_guard = init_logging(&data_dir);

    info!(version = env!("CARGO_PKG_VERSION"), "barcart starting");

    // Run the application
    if let Err(e) = run_app(cli) {
        tracing::error!(error = %format!("{:#}", e), "barcart exited with error");
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Logs go to a file; the terminal belongs to the UI
fn init_logging(data_dir: &Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "barcart.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,barcart=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

fn print_help() {
    println!(
        r#"barcart - Home Bar Recipe Browser

USAGE:
    barcart [OPTIONS]

OPTIONS:
    -c, --catalog <PATH>   Drink catalog (default: Reference/drinks.json)
    -s, --stock <PATH>     Stock file (default: stock.json next to the catalog)
    -h, --help             Print help information
    -v, --version          Print version information

KEYBINDINGS:
    1-4              Switch tabs
    j/k              Navigate up/down
    g/G              Jump to first/last
    J/K              Scroll recipe details
    /                Search by ingredient
    t/T              Next/previous theme
    c, Esc           Clear search and theme
    r                Random drink
    m                Add the drink's missing ingredients to stock
    +/-              Adjust amount (Stock tab)
    e, Enter         Edit amount (Stock tab)
    n                New ingredient (Stock tab)
    x                Remove ingredient (Stock tab)
    q                Quit

TABS:
    [1] Cocktails    Browse cocktails
    [2] Shots        Browse shots
    [3] Stock        Ingredients on hand
    [4] Settings     Configure theme and display options

CONFIG:
    ~/.config/barcart/config.toml
"#
    );
}

fn run_app(cli: CliArgs) -> Result<()> {
    // Load configuration
    let config = config::Config::load()
        .context("Failed to load configuration")?;

    // Command line paths win for this run only
    let mut paths = config.paths.clone();
    if let Some(catalog) = cli.catalog {
        paths.catalog = catalog;
    }
    if cli.stock.is_some() {
        paths.stock = cli.stock;
    }
    let catalog_path = paths.catalog.clone();
    let stock_path = paths.stock_path();

    let catalog = Catalog::load(&catalog_path)
        .context("Failed to load drink catalog")?;
    if catalog.is_empty() {
        warn!(path = %catalog_path.display(), "Catalog has no drinks");
    }

    let stock = Stock::load(&stock_path)
        .context("Failed to load stock")?;

    info!(
        catalog = %catalog_path.display(),
        stock = %stock_path.display(),
        stocked = stock.len(),
        "Data loaded"
    );

    // Create application state
    let mut app = App::new(
        config,
        config::Config::path().ok(),
        catalog,
        catalog_path,
        stock,
        stock_path,
    );

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)
        .context("Failed to setup terminal")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .context("Failed to create terminal")?;

    // Run main loop
    let result = main_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    info!("barcart exiting");
    result
}

fn main_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        // Render UI
        terminal.draw(|frame| {
            ui::render(frame, app);
        })?;

        // Expire flash messages
        app.tick();

        // Poll for events with timeout (for flash expiry)
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key)?;
                }
            }
        }

        // Check if should quit
        if app.should_quit {
            break;
        }
    }

    Ok(())
}
