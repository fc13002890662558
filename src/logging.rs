// Logger setup plus conditional logging macros that are only active in debug builds

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

/// Log file under the user's cache directory, for runs that own the terminal.
#[must_use]
pub fn default_log_path() -> Option<PathBuf> {
    let dir = dirs::cache_dir()?.join("wordle-game");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir.join("wordle-game.log"))
}

/// Install the global logger.
///
/// Honours `RUST_LOG`, defaulting to `warn`. When `log_file` is given, records
/// go there instead of stderr so they do not tear up the TUI.
///
/// # Errors
/// Returns an I/O error if the log file cannot be created.
pub fn init(log_file: Option<&Path>) -> io::Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} {:<5} [{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    if let Some(path) = log_file {
        let file = File::create(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    // A second init (e.g. from tests) keeps the first logger.
    let _ = builder.try_init();
    Ok(())
}
