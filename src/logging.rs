// Logging setup and conditional logging macros.
// The macros are only active in debug builds.

use env_logger::{Builder, Env, Target};
use std::fs::File;
use std::io;
use std::path::Path;

const DEFAULT_FILTER: &str = "warn";

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

// Release builds keep the arguments type-checked and used, but never log.
#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        if false {
            log::debug!($($arg)*);
        }
    };
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
    ($($arg:tt)*) => {
        if false {
            log::info!($($arg)*);
        }
    };
}

/// Initializes the global logger from `RUST_LOG` (default `warn`).
///
/// With a log file, output goes there instead of stderr. The full-screen
/// interface owns the terminal, so it should always be given one.
pub fn init(log_file: Option<&Path>) -> io::Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER));
    if let Some(path) = log_file {
        let file = File::create(path)?;
        builder.target(Target::Pipe(Box::new(file)));
    }
    // A logger installed earlier (tests, embedding applications) wins.
    let _ = builder.try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_macros_use_their_arguments() {
        let result: Result<usize, String> = Err("boom".to_string());
        let value = match result {
            Ok(n) => n,
            Err(e) => {
                debug_log!("failed: {}", e);
                0
            }
        };
        let count = 3;
        info_log!("count is {}", count);
        assert_eq!(value, 0);
    }
}
