// Log setup for the bisaya binary
// Structured events go to stderr so program output on stdout stays clean

use std::str::FromStr;
use tracing_subscriber::filter::LevelFilter;

/// Environment variable consulted when no `-v` flag is given
pub const LOG_ENV: &str = "BISAYA_LOG";

/// `-v` → debug, `-vv` → trace, otherwise `BISAYA_LOG`, otherwise warn
pub fn level_for(verbose: u8, env_value: Option<&str>) -> LevelFilter {
    match verbose {
        0 => env_value
            .and_then(|value| LevelFilter::from_str(value.trim()).ok())
            .unwrap_or(LevelFilter::WARN),
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

pub fn init(verbose: u8) {
    let env_value = std::env::var(LOG_ENV).ok();
    let level = level_for(verbose, env_value.as_deref());

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(%level, "logging initialised");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level_is_warn() {
        assert_eq!(level_for(0, None), LevelFilter::WARN);
        assert_eq!(level_for(0, Some("loud")), LevelFilter::WARN);
    }

    #[test]
    fn test_env_level() {
        assert_eq!(level_for(0, Some("trace")), LevelFilter::TRACE);
        assert_eq!(level_for(0, Some(" error ")), LevelFilter::ERROR);
    }

    #[test]
    fn test_verbose_flag_wins() {
        assert_eq!(level_for(1, Some("error")), LevelFilter::DEBUG);
        assert_eq!(level_for(3, None), LevelFilter::TRACE);
    }
}
