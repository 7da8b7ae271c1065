mod app;
mod celebration;
mod layout;
mod render;
mod theme;
mod thumbnail;

use app::App;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use jigsaw_core::ImageProcessor;
use layout::{PREVIEW_SIZE, SLOT_SIZE, TRAY_CELL_SIZE};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::time::{Duration, Instant};
use theme::ThemeName;
use thumbnail::Thumbnails;

/// Cut a picture into a 3×3 puzzle and solve it in the terminal
#[derive(Debug, Parser)]
#[command(name = "jigsaw", version, about)]
struct Args {
    /// Image to play with (PNG, JPEG, GIF, WebP or BMP)
    image: PathBuf,

    #[arg(long, value_enum, default_value = "dark")]
    theme: ThemeName,

    /// Fixed seed for the tray order
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the log (default: data dir/jigsaw/jigsaw.log)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("jigsaw")
        .join("jigsaw.log")
}

/// Log to a file so output does not tear the alternate screen
fn init_logging(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let log_file = fs::File::create(path)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    let log_path = args.log_file.clone().unwrap_or_else(default_log_path);
    if let Err(e) = init_logging(&log_path) {
        eprintln!("Warning: could not open log file {}: {}", log_path.display(), e);
    }
    tracing::info!(image = %args.image.display(), "starting");

    // Decode before touching the terminal so errors print normally
    let bytes = match fs::read(&args.image) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Error: could not read {}: {}", args.image.display(), e);
            process::exit(1);
        }
    };
    let processed = match ImageProcessor::default().process(&bytes) {
        Ok(processed) => processed,
        Err(e) => {
            tracing::error!(%e, "image rejected");
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    let thumbnails = match Thumbnails::build(&processed, PREVIEW_SIZE, SLOT_SIZE, TRAY_CELL_SIZE) {
        Ok(thumbnails) => thumbnails,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    let mut app = App::new(processed, thumbnails, args.theme, args.seed);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let result = run_app(&mut stdout, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    let summary = app.orchestrator.session().summary();
    match serde_json::to_string(&summary) {
        Ok(json) => tracing::info!(summary = %json, "session ended"),
        Err(e) => tracing::warn!(%e, "could not serialize session summary"),
    }

    Ok(())
}

fn run_app(stdout: &mut io::Stdout, app: &mut App) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        let tick_rate = app.get_tick_rate();

        render::render(stdout, app)?;
        stdout.flush()?;

        // Handle input with timeout for animation updates
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout.min(Duration::from_millis(33)))? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    // Handle Ctrl+C
                    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                        break;
                    }

                    match app.handle_key(key) {
                        app::AppAction::Continue => {}
                        app::AppAction::Quit => break,
                    }
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}
