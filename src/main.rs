//! Digsite - Entry Point
//!
//! Initializes the terminal, loads settings, data and assets,
//! and runs the main loop.

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use std::fs::OpenOptions;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    Terminal,
};

use digsite::data::{export_default_data, DataManager};
use digsite::game::Game;
use digsite::render::{load_for_images, resolve_render_mode, AssetStore, SpriteLayer};
use digsite::save::load_settings;
use digsite::ui::App;

/// Target frames per second for the game loop
const TARGET_FPS: u64 = 60;
const FRAME_TIME: Duration = Duration::from_millis(1000 / TARGET_FPS);

fn main() -> Result<()> {
    // Initialize logging to file (to avoid interfering with TUI)
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("digsite.log");

    let mut logger = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    );
    if let Ok(file) = log_file {
        logger.target(env_logger::Target::Pipe(Box::new(file)));
    }
    logger.init();

    log::info!("Starting Digsite v{}", env!("CARGO_PKG_VERSION"));

    let settings = load_settings();

    // `digsite --export-data [dir]` writes the built-in tables and exits
    let mut args = std::env::args().skip(1);
    if args.next().as_deref() == Some("--export-data") {
        let dir = args.next().map(PathBuf::from).unwrap_or_else(|| settings.data_dir.clone());
        export_default_data(&dir)?;
        println!("Wrote default data to {}", dir.display());
        return Ok(());
    }

    let data = DataManager::load_from_dir(&settings.data_dir);
    let render_mode = resolve_render_mode(settings.render_mode);

    // Textures are only needed when the terminal can draw them
    let assets = if render_mode.supports_images() {
        Some(load_for_images(&settings.assets_dir)?)
    } else {
        None
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create game and UI
    let mut app = App::new(render_mode);
    let mut game = Game::new(settings, data);

    let result = setup_sprites(&mut app, assets.as_ref())
        .and_then(|_| run_game_loop(&mut terminal, &mut app, &mut game));

    if let Err(e) = app.cleanup(&mut io::stdout()) {
        log::warn!("Failed to clear images: {}", e);
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Report any errors
    if let Err(ref e) = result {
        log::error!("Game exited with error: {}", e);
        eprintln!("Error: {}", e);
    }

    log::info!("Digsite shut down cleanly");
    result
}

fn setup_sprites(app: &mut App, assets: Option<&AssetStore>) -> Result<()> {
    if let Some(assets) = assets {
        let mut sprites = SpriteLayer::new();
        let mut stdout = io::stdout();
        sprites.upload_all(&mut stdout, assets)?;
        stdout.flush()?;
        app.attach_sprites(sprites);
    }
    Ok(())
}

/// Main game loop
fn run_game_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    game: &mut Game,
) -> Result<()> {
    let mut last_frame = Instant::now();

    loop {
        let frame_start = Instant::now();
        let delta = frame_start.duration_since(last_frame);
        last_frame = frame_start;

        // Handle input
        if event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events, not releases
                if key.kind == KeyEventKind::Press {
                    match app.handle_input(key, game) {
                        Ok(should_quit) if should_quit => break,
                        Ok(_) => {}
                        Err(e) => log::warn!("Input handling error: {}", e),
                    }
                }
            }
        }

        // Update game state
        game.update(delta);

        // Render
        terminal.draw(|frame| {
            app.render(frame, game);
        })?;
        app.flush_sprites(terminal.backend_mut())?;

        if !game.is_running() {
            break;
        }

        // Frame rate limiting
        let frame_time = frame_start.elapsed();
        if frame_time < FRAME_TIME {
            std::thread::sleep(FRAME_TIME - frame_time);
        }
    }

    Ok(())
}
