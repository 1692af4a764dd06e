use std::io;

use anyhow::{bail, Context, Result};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};

use pong_core::app::App;
use pong_core::config::{self, Config};
use pong_core::logging;
use pong_core::session::Session;

/// Command line options
#[derive(Debug, Default)]
struct Args {
    debug: bool,
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let args = match parse_args(&args)? {
        Some(args) => args,
        None => return Ok(()),
    };

    logging::init(args.debug).context("Failed to initialize debug logging")?;
    info!("Pong starting (seed: {:?})", args.seed);

    let config_path = config::get_config_path();
    let config = match config::load_config() {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load config from {}: {}", config_path.display(), e);
            Config::default()
        }
    };

    let controls = config::validated_controls(&config.controls);
    let mut session = Session::new(controls);
    if let Some(seed) = args.seed {
        session = session.with_seed(seed);
    }

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;

    // Key release events make held keys exact; without them we fall back to
    // repeat timeouts
    let release_events = supports_keyboard_enhancement().unwrap_or(false);
    if release_events {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )
        .context("Failed to enable key release events")?;
    }
    info!("Key release events: {}", release_events);

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new(session, config, Some(config_path), release_events);
    let result = app.run(&mut terminal);

    // Restore terminal even if the game loop failed
    if release_events {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags).ok();
    }
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    info!("Pong exiting");
    result
}

/// Parse command line arguments; None means the program should just exit
fn parse_args(args: &[String]) -> Result<Option<Args>> {
    let program = args.first().map(String::as_str).unwrap_or("pong");
    let mut parsed = Args::default();
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--debug" | "-d" => parsed.debug = true,
            "--seed" | "-s" => {
                let value = iter.next().context("--seed requires a value")?;
                let seed = value
                    .parse::<u64>()
                    .with_context(|| format!("Invalid seed: {}", value))?;
                parsed.seed = Some(seed);
            }
            "--help" | "-h" => {
                print_usage(program);
                return Ok(None);
            }
            other => bail!("Unknown argument: {} (see --help)", other),
        }
    }

    Ok(Some(parsed))
}

fn print_usage(program: &str) {
    println!("Pong - Terminal Pong with keyboard, mouse and computer players");
    println!();
    println!("Usage:");
    println!("  {}                  # Start at the main menu", program);
    println!("  {} --debug          # Log to {}", program, logging::LOG_FILE_PATH);
    println!("  {} --seed <n>       # Reproducible serves", program);
    println!();
    println!("Controls are configured in the menu or in:");
    println!("  {}", config::get_config_path().display());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn test_parse_flags() {
        let parsed = parse_args(&args(&["pong", "--debug", "--seed", "42"]))
            .unwrap()
            .unwrap();
        assert!(parsed.debug);
        assert_eq!(parsed.seed, Some(42));

        let plain = parse_args(&args(&["pong"])).unwrap().unwrap();
        assert!(!plain.debug);
        assert_eq!(plain.seed, None);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&args(&["pong", "--seed"])).is_err());
        assert!(parse_args(&args(&["pong", "--seed", "abc"])).is_err());
        assert!(parse_args(&args(&["pong", "--fullscreen"])).is_err());
    }
}
