use chrono::Local;
use log::{LevelFilter, Metadata, Record, SetLoggerError};
use std::collections::HashSet;
use std::io::{self, Write};
use std::sync::OnceLock;

/// Debug topics the simulation logs under. Each one is also a log target.
pub const TOPICS: [&str; 4] = ["tank", "turret", "weapon", "projectile"];

// Custom logger structure
#[derive(Debug)]
struct TankArenaLogger {
    level: LevelFilter,
    debug_filters: Option<HashSet<String>>,
}

impl TankArenaLogger {
    fn topic_enabled(&self, target: &str) -> bool {
        match &self.debug_filters {
            Some(filters) => {
                filters.contains(target) || filters.iter().any(|f| target.starts_with(f.as_str()))
            }
            None => true,
        }
    }
}

impl log::Log for TankArenaLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        if metadata.level() > self.level {
            return false;
        }
        // Debug filters only narrow the chatty levels
        match metadata.level() {
            log::Level::Debug | log::Level::Trace => self.topic_enabled(metadata.target()),
            _ => true,
        }
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let level_color = match record.level() {
            log::Level::Error => "\x1B[31m", // Red
            log::Level::Warn => "\x1B[33m",  // Yellow
            log::Level::Info => "\x1B[32m",  // Green
            log::Level::Debug => "\x1B[36m", // Cyan
            log::Level::Trace => "\x1B[35m", // Magenta
        };
        let reset = "\x1B[0m";
        let timestamp = Local::now().format("%H:%M:%S%.3f");

        let mut output = format!(
            "{timestamp} {level_color}{level:5}{reset} {target}: {message}",
            level = record.level(),
            target = record.target(),
            message = record.args()
        );

        // Add module path if available and different from target
        if let Some(module_path) = record.module_path() {
            if module_path != record.target() {
                output.push_str(&format!(" [{}]", module_path));
            }
        }

        // A closed stdout is not worth crashing the game over
        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout, "{}", output);
        let _ = stdout.flush();
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
    }
}

static LOGGER: OnceLock<TankArenaLogger> = OnceLock::new();

fn parse_filters(debug_filter: Option<String>) -> Option<HashSet<String>> {
    debug_filter.map(|filter_str| {
        filter_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<HashSet<String>>()
    })
}

/// Parses a `--log-level` value, falling back to `Info`.
pub fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

// Initialize the logger with optional debug filters
pub fn init_logger(level: LevelFilter, debug_filter: Option<String>) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| TankArenaLogger {
        level,
        debug_filters: parse_filters(debug_filter),
    });

    log::set_logger(logger).map(|()| log::set_max_level(level))
}

// Helper macros for specific debug topics. `id => ...` prefixes the tank id.
#[macro_export]
macro_rules! debug_tank {
    ($tank_id:expr => $($arg:tt)*) => {
        log::debug!(target: "tank", "[T{}] {}", $tank_id, format_args!($($arg)*))
    };
    ($($arg:tt)*) => {
        log::debug!(target: "tank", "{}", format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_turret {
    ($tank_id:expr => $($arg:tt)*) => {
        log::debug!(target: "turret", "[T{}] {}", $tank_id, format_args!($($arg)*))
    };
    ($($arg:tt)*) => {
        log::debug!(target: "turret", "{}", format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_weapon {
    ($tank_id:expr => $($arg:tt)*) => {
        log::debug!(target: "weapon", "[T{}] {}", $tank_id, format_args!($($arg)*))
    };
    ($($arg:tt)*) => {
        log::debug!(target: "weapon", "{}", format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_projectile {
    ($tank_id:expr => $($arg:tt)*) => {
        log::debug!(target: "projectile", "[T{}] {}", $tank_id, format_args!($($arg)*))
    };
    ($($arg:tt)*) => {
        log::debug!(target: "projectile", "{}", format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Log;

    fn metadata(level: log::Level, target: &str) -> Metadata<'_> {
        Metadata::builder().level(level).target(target).build()
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), LevelFilter::Debug);
        assert_eq!(parse_level("off"), LevelFilter::Off);
        assert_eq!(parse_level("loud"), LevelFilter::Info);
    }

    #[test]
    fn test_parse_filters() {
        let filters = parse_filters(Some("tank, weapon,,".to_string())).unwrap();
        assert_eq!(filters.len(), 2);
        assert!(filters.contains("tank"));
        assert!(filters.contains("weapon"));
        assert!(parse_filters(None).is_none());
    }

    #[test]
    fn test_debug_filters_only_narrow_debug_levels() {
        let logger = TankArenaLogger {
            level: LevelFilter::Debug,
            debug_filters: parse_filters(Some("weapon".to_string())),
        };
        assert!(logger.enabled(&metadata(log::Level::Debug, "weapon")));
        assert!(!logger.enabled(&metadata(log::Level::Debug, "turret")));
        assert!(logger.enabled(&metadata(log::Level::Info, "turret")));
        assert!(!logger.enabled(&metadata(log::Level::Trace, "weapon")));
    }

    #[test]
    fn test_topics_are_distinct() {
        let unique: HashSet<&str> = TOPICS.iter().copied().collect();
        assert_eq!(unique.len(), TOPICS.len());
    }
}
