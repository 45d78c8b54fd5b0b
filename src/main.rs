mod display;

use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal, ExecutableCommand,
};
use log::{info, warn};
use rand::thread_rng;

use flappy_bird::assets::Assets;
use flappy_bird::compute::{init_session, press_jump, tick};
use flappy_bird::config::Config;

// ── Input ─────────────────────────────────────────────────────────────────────

/// The only two inputs the game reacts to.
enum Command {
    Jump,
    Quit,
}

fn command_for(key: &KeyEvent) -> Option<Command> {
    // Repeats and releases (keyboard-enhanced terminals) are not presses.
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Up | KeyCode::Char(' ') | KeyCode::Char('w') => Some(Command::Jump),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Command::Quit)
        }
        _ => None,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until a quit command arrives.  Each frame drains pending input,
/// advances the session one tick and renders it, then sleeps out the rest
/// of the frame.
fn game_loop<W: Write>(
    out: &mut W,
    config: &Config,
    assets: &Assets,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let mut rng = thread_rng();
    let frame_time = Duration::from_secs_f64(1.0 / config.fps as f64);
    let mut state = init_session(config, assets, &mut rng);

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(key) = ev else { continue };
            match command_for(&key) {
                Some(Command::Quit) => return Ok(()),
                Some(Command::Jump) => state = press_jump(&state, config, assets, &mut rng),
                None => {}
            }
        }

        state = tick(&state, config, assets, &mut rng);

        let (width, height) = terminal::size()?;
        display::render(out, &state, config, width, height)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Terminal setup ────────────────────────────────────────────────────────────

/// Runs `body` inside the alternate screen with the cursor hidden.  The
/// screen is restored afterwards even when entering it or `body` fails.
fn with_screen<W: Write, T>(
    out: &mut W,
    body: impl FnOnce(&mut W) -> std::io::Result<T>,
) -> std::io::Result<T> {
    let entered = out
        .execute(terminal::EnterAlternateScreen)
        .and_then(|out| out.execute(cursor::Hide))
        .map(|_| ());
    let result = entered.and_then(|()| body(out));
    restore_screen(out);
    result
}

fn restore_screen<W: Write>(out: &mut W) {
    if let Err(e) = out.execute(cursor::Show) {
        warn!("could not show cursor: {e}");
    }
    if let Err(e) = out.execute(terminal::LeaveAlternateScreen) {
        warn!("could not leave alternate screen: {e}");
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    // Configuration problems are reported before the terminal is touched.
    let config = Config::load().context("failed to load configuration")?;
    let assets = Assets::load(&config);
    info!(
        "world {}x{} at {} fps",
        config.screen_width, config.screen_height, config.fps
    );

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    let result = with_screen(&mut out, |out| {
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
                Err(e) => {
                    warn!("input thread stopped: {e}");
                    break;
                }
            }
        });
        game_loop(out, &config, &assets, &rx)
    });
    if let Err(e) = terminal::disable_raw_mode() {
        warn!("could not disable raw mode: {e}");
    }

    result.context("game loop failed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    const SHOW_CURSOR: &str = "\x1b[?25h";
    const LEAVE_SCREEN: &str = "\x1b[?1049l";

    /// Fails the first `failures` writes, then records like a `Vec<u8>`.
    struct Flaky {
        failures: usize,
        written: Vec<u8>,
    }

    impl Write for Flaky {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.failures > 0 {
                self.failures -= 1;
                return Err(io::Error::new(io::ErrorKind::Other, "terminal gone"));
            }
            self.written.write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn screen_is_restored_when_the_loop_fails() {
        let mut out = Vec::new();
        let result: io::Result<()> = with_screen(&mut out, |_| {
            Err(io::Error::new(io::ErrorKind::Other, "loop failed"))
        });
        assert!(result.is_err());
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with(&format!("{SHOW_CURSOR}{LEAVE_SCREEN}")));
    }

    #[test]
    fn screen_is_restored_when_entering_it_fails() {
        let mut out = Flaky {
            failures: 1,
            written: Vec::new(),
        };
        let mut ran = false;
        let result = with_screen(&mut out, |_| {
            ran = true;
            Ok(())
        });
        assert!(result.is_err());
        assert!(!ran);
        let text = String::from_utf8(out.written).unwrap();
        assert!(text.contains(SHOW_CURSOR));
        assert!(text.contains(LEAVE_SCREEN));
    }

    #[test]
    fn body_result_is_passed_through() {
        let mut out = Vec::new();
        let result = with_screen(&mut out, |_| Ok(42));
        assert_eq!(result.unwrap(), 42);
    }
}
