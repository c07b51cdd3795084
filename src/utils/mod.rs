use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{filter::LevelFilter, fmt, EnvFilter};

        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy()
            .add_directive(
                "rewards_console=info"
                    .parse()
                    .unwrap_or_else(|_| LevelFilter::INFO.into()),
            );

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

/// Normalizes a label for case-insensitive comparisons.
pub fn normalize_label(value: &str) -> String {
    value.trim().to_ascii_lowercase()
}

/// Case-insensitive containment used by client-side list filters.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    let needle = normalize_label(needle);
    needle.is_empty() || haystack.to_ascii_lowercase().contains(&needle)
}
