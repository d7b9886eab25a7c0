use once_cell::sync::Lazy;
pub use slog::*;

fn wrap<D: Drain<Err = Never, Ok = ()> + Send + 'static>(drain: D) -> Fuse<slog_async::Async> {
    slog_async::Async::default(slog_envlogger::new(drain)).fuse()
}

/// Drain selected by `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Term,
    Json,
}

impl LogFormat {
    pub fn from_env_value(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Term,
        }
    }
}

pub static DEFAULT: Lazy<Logger> = Lazy::new(|| {
    let mk_term = || {
        slog_term::FullFormat::new(slog_term::TermDecorator::new().stderr().build())
            .build()
            .fuse()
    };

    // stdout carries `summary` output, so JSON logs go to stderr as well
    let mk_json = || slog_json::Json::default(std::io::stderr()).fuse();

    let format = std::env::var("LOG_FORMAT").unwrap_or_default();
    let drain = match LogFormat::from_env_value(&format) {
        LogFormat::Json => wrap(mk_json()),
        LogFormat::Term => wrap(mk_term()),
    };

    Logger::root(
        drain,
        o!(
            "version" => env!("CARGO_PKG_VERSION"),
        ),
    )
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_from_env_value() {
        assert_eq!(LogFormat::from_env_value("json"), LogFormat::Json);
        assert_eq!(LogFormat::from_env_value(" JSON "), LogFormat::Json);
        assert_eq!(LogFormat::from_env_value(""), LogFormat::Term);
        assert_eq!(LogFormat::from_env_value("pretty"), LogFormat::Term);
    }

    #[test]
    fn test_default_logger_accepts_records() {
        let log = DEFAULT.new(o!("function" => "test_default_logger_accepts_records"));
        debug!(log, "logger check"; "rows" => 3);
    }
}
