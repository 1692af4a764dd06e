// Debug logging to a file, enabled with --debug
// The terminal belongs to the UI, so nothing is ever logged to stdout/stderr

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::SystemTime;

use tracing::Level;

pub const LOG_FILE_PATH: &str = "/tmp/pong-core-debug.log";

/// Initialize debug logging to file
///
/// # Arguments
/// * `enabled` - Whether debug logging should be enabled (controlled by --debug flag)
///
/// # Behavior
/// - If enabled=false: Returns immediately, no subscriber installed, no file created
/// - If enabled=true: Truncates the log file, writes a header and installs a
///   `tracing` subscriber that appends every event at DEBUG and above
pub fn init(enabled: bool) -> io::Result<()> {
    if !enabled {
        return Ok(());
    }

    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(LOG_FILE_PATH)?;

    writeln!(file, "=== Pong Debug Log ===")?;
    writeln!(file, "Session started: {:?}", SystemTime::now())?;
    writeln!(file, "To monitor: tail -f {}", LOG_FILE_PATH)?;
    writeln!(file, "========================================\n")?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(Level::DEBUG)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}
