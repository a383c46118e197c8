use std::fs::{self, File};
use std::io::{self, Stdout};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use maze_chase::config::Settings;
use maze_chase::input::{command_for, Command, HeldKeys};
use maze_chase::render::Renderer;
use maze_chase::{Game, Grid, Phase};

/// Longest simulated step; a stalled frame is split into several ticks.
const MAX_STEP_SECS: f64 = 0.05;

fn main() -> Result<()> {
    let settings = Settings::from_env();
    init_logging(&settings)?;
    let game = load_game(&settings)?;

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, game, &settings);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn init_logging(settings: &Settings) -> Result<()> {
    let Some(path) = &settings.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    let filter = EnvFilter::try_new(&settings.log_filter)
        .or_else(|_| EnvFilter::try_new("info"))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_game(settings: &Settings) -> Result<Game> {
    if let Some(path) = &settings.maze_file {
        let loaded = fs::read_to_string(path)
            .with_context(|| format!("failed to read maze {}", path.display()))
            .and_then(|text| {
                let grid = Grid::parse(&text)
                    .with_context(|| format!("failed to parse maze {}", path.display()))?;
                Ok(Game::new(grid)?)
            });
        match loaded {
            Ok(game) => {
                info!(path = %path.display(), "maze loaded");
                return Ok(game);
            }
            Err(err) => {
                let reason = format!("{err:#}");
                warn!(%reason, "falling back to built-in maze");
            }
        }
    }
    let grid = Grid::default_maze().context("built-in maze is malformed")?;
    Ok(Game::new(grid)?)
}

fn run(stdout: &mut Stdout, mut game: Game, settings: &Settings) -> Result<()> {
    let mut rng = rand::thread_rng();
    let mut keys = HeldKeys::default();
    let mut renderer = Renderer::new(game.grid().width(), game.grid().height());
    let tick_every = Duration::from_millis(settings.tick_ms);
    let frame_time = Duration::from_micros(1_000_000 / settings.render_fps.max(1));
    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                continue;
            }
            match command_for(key.code) {
                Some(Command::Quit) => return Ok(()),
                Some(Command::Start) => {
                    if matches!(game.phase(), Phase::Ready | Phase::GameOver) {
                        keys.clear();
                        game.start();
                        last_tick = Instant::now();
                    }
                }
                Some(Command::Pause) => game.toggle_pause(),
                Some(Command::Move(dir)) => keys.press(dir, Instant::now()),
                None => {}
            }
        }

        if last_tick.elapsed() >= tick_every {
            let now = Instant::now();
            let mut dt = now.duration_since(last_tick).as_secs_f64();
            last_tick = now;
            let desired = keys.active(now);
            while dt > 0.0 {
                let step = dt.min(MAX_STEP_SECS);
                for event in game.tick(step, desired, &mut rng) {
                    debug!(?event, score = game.score(), "game event");
                }
                dt -= step;
            }
        }
        renderer.render(stdout, &game)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}
