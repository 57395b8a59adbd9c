use tracing_subscriber::EnvFilter;

/// install the global tracing subscriber; RUST_LOG wins over the configured level.
/// diagnostics go to stderr so stdout only ever carries the report
pub fn init(level: &str, verbose: bool) {
    let directive = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| map_level(level).to_string())
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directive))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn map_level(level: &str) -> &'static str {
    match level.to_lowercase().as_str() {
        "error" => "error",
        "info" => "info",
        "debug" => "debug",
        "trace" => "trace",
        "off" => "off",
        _ => "warn",
    }
}

#[cfg(test)]
mod tests {
    use super::map_level;

    #[test]
    fn unknown_levels_fall_back_to_warn() {
        assert_eq!(map_level("DEBUG"), "debug");
        assert_eq!(map_level("Error"), "error");
        assert_eq!(map_level("loud"), "warn");
    }
}
