mod app;
mod input;
mod ui;

use app::App;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use input::{handle_key, InputResult};
use jellyrun::build_info;
use jellyrun::utils::logging::init_logging;
use jellyrun::utils::persistence::STORE_FILE;
use jellyrun::{GameConfig, KeyValueStore};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};
use ui::draw_ui;

/// Input poll timeout; also the redraw cadence while idle.
const FRAME_MS: u64 = 16;

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("Jelly Run - Terminal Endless Runner\n");
                println!("Usage: jellyrun [command]\n");
                println!("Commands:");
                println!("  reset      Delete the saved profile, score and images");
                println!("  --version  Show version information");
                println!("  --help     Show this help message");
                std::process::exit(0);
            }
            "reset" => {
                let store = KeyValueStore::open_default()?;
                if let Err(e) = store.clear() {
                    eprintln!("Could not reset {}: {}", store.path().display(), e);
                    std::process::exit(1);
                }
                println!("Removed {}", store.path().display());
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown command: {}", other);
                eprintln!("Run 'jellyrun --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    init_logging();
    log::info!("starting {}", build_info::version_line());

    let config = GameConfig::load();
    let store = KeyValueStore::open_default().unwrap_or_else(|e| {
        let fallback = std::env::temp_dir().join("jellyrun").join(STORE_FILE);
        log::warn!(
            "no data directory ({}), keeping the store at {}",
            e,
            fallback.display()
        );
        KeyValueStore::at(fallback)
    });

    let mut app = App::new(config, store);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    // Restore terminal even if the loop failed
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    log::info!("exiting");
    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    let mut rng = rand::thread_rng();
    let mut last_frame = Instant::now();

    while !app.should_quit {
        terminal.draw(|f| draw_ui(f, app))?;

        if event::poll(Duration::from_millis(FRAME_MS))? {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind == KeyEventKind::Press {
                    if let InputResult::Quit = handle_key(app, key_event) {
                        app.should_quit = true;
                    }
                }
            }
        }

        // Carry the sub-millisecond remainder into the next frame.
        let dt_ms = last_frame.elapsed().as_millis() as u64;
        last_frame += Duration::from_millis(dt_ms);
        app.tick(dt_ms, &mut rng);
    }

    Ok(())
}
