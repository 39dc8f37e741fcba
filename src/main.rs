mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    terminal, ExecutableCommand,
};
use log::{error, info, warn, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;

use hoppers::config::{validate_fps, GameConfig, Preset};
use hoppers::host::{Host, ReadySignal};
use hoppers::input::RawInput;
use hoppers::scheduler::FrameClock;
use hoppers::session::GameLoop;

use display::Viewport;

/// How long to block on input when no tick is pending.
const IDLE_WAIT: Duration = Duration::from_millis(250);

#[derive(Parser)]
#[command(name = "hoppers", version, about = "A one-button obstacle dodger for the terminal")]
struct Cli {
    /// Physics tuning to play with.
    #[arg(long, value_enum, default_value_t = Preset::Standard)]
    #[arg(env = "HOPPERS_PRESET")]
    preset: Preset,
    /// Seed for obstacle placement; drawn from the OS when omitted.
    #[arg(long, env = "HOPPERS_SEED")]
    seed: Option<u64>,
    /// Simulation ticks per second.
    #[arg(long, default_value_t = 60, value_parser = parse_fps)]
    #[arg(env = "HOPPERS_FPS")]
    fps: u32,
    /// Append logs to this file. Filtered by RUST_LOG, `info` by default.
    ///
    /// Without it nothing is logged, since the game owns the terminal.
    #[arg(long, env = "HOPPERS_LOG_FILE", value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn parse_fps(s: &str) -> Result<u32, String> {
    let fps: u32 = s.parse().map_err(|e| format!("{e}"))?;
    validate_fps(fps).map_err(|e| e.to_string())
}

fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

// ── Host ──────────────────────────────────────────────────────────────────────

/// The terminal as embedding host: readiness shows up as the window title.
struct TerminalHost;

impl Host for TerminalHost {
    fn signal_ready(&mut self) {
        if let Err(err) = stdout().execute(terminal::SetTitle("Hoppers")) {
            warn!("could not set terminal title: {err}");
        }
        info!("mounted and ready");
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Block on input until the next tick falls due, apply whatever arrived,
/// fire due ticks, redraw when anything changed.
fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>, cli: &Cli) -> Result<()> {
    let config = GameConfig::from_preset(cli.preset);
    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!(
        "preset {:?}, {} fps, seed {:?}",
        cli.preset, cli.fps, cli.seed
    );
    let mut game = GameLoop::new(config, FrameClock::with_fps(cli.fps), rng)?;

    let (cols, rows) = terminal::size()?;
    let mut view = Viewport::fit(cols, rows, game.config());

    display::render(out, &view, game.state(), game.config())?;
    ReadySignal::new(TerminalHost).announce();

    loop {
        let wait = game
            .scheduler()
            .time_until_next(Instant::now())
            .unwrap_or(IDLE_WAIT);
        let mut dirty = false;

        match rx.recv_timeout(wait) {
            Ok(event) => {
                let raw = RawInput::from_event(&event);
                if let Some(raw) = raw {
                    game.handle_input(raw);
                    dirty = true;
                }
                // Bound keys are fully consumed by the game.
                if !raw.is_some_and(|r| r.suppresses_default()) {
                    match event {
                        Event::Key(KeyEvent {
                            code: KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc,
                            kind: KeyEventKind::Press,
                            ..
                        }) => break,
                        Event::Key(KeyEvent {
                            code: KeyCode::Char('c'),
                            modifiers,
                            kind: KeyEventKind::Press,
                            ..
                        }) if modifiers.contains(KeyModifiers::CONTROL) => break,
                        Event::Resize(c, r) => {
                            view = Viewport::fit(c, r, game.config());
                            dirty = true;
                        }
                        _ => {}
                    }
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                warn!("input thread stopped");
                break;
            }
        }

        while let Some(ticket) = game.scheduler_mut().poll_due(Instant::now()) {
            dirty |= game.on_tick(ticket);
        }

        if dirty {
            display::render(out, &view, game.state(), game.config())?;
        }
    }

    game.shutdown();
    info!("quit with high score {}", game.state().high_score);
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx, &cli);

    // Always restore the terminal
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        error!("{err:#}");
    }
    result
}
