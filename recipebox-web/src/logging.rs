//! Tracing setup
//!
//! The subscriber is installed before the config file is read so config
//! loading can log. Its filter sits behind a reload layer and is switched to
//! the configured `log_level` once the config is resolved.

use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, reload, EnvFilter, Registry};

/// Handle for replacing the installed filter
pub type LogFilterHandle = reload::Handle<EnvFilter, Registry>;

/// Per-crate directives at `level`
pub fn filter_directives(level: &str) -> String {
    format!(
        "recipebox={level},recipebox_web={level},recipebox_common={level},tower_http={level}",
        level = level
    )
}

/// `RUST_LOG` if set, otherwise the per-crate directives at `level`
pub fn log_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_directives(level)))
}

/// fmt subscriber writing to `writer` with a reloadable filter
pub fn reloadable_subscriber<W>(
    filter: EnvFilter,
    writer: W,
) -> (impl Subscriber + Send + Sync + 'static, LogFilterHandle)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let (filter, handle) = reload::Layer::new(filter);
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(writer));
    (subscriber, handle)
}

/// Install the global subscriber at `level` and return its filter handle
pub fn init_logging(level: &str) -> LogFilterHandle {
    use tracing_subscriber::util::SubscriberInitExt;

    let (subscriber, handle) = reloadable_subscriber(log_filter(level), std::io::stdout);
    subscriber.init();
    handle
}

/// Switch the installed filter to `level`
pub fn apply_log_level(handle: &LogFilterHandle, level: &str) -> Result<(), reload::Error> {
    handle.reload(log_filter(level))
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipebox_common::config::TomlConfig;
    use std::io;
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_filter_directives_cover_every_crate() {
        let directives = filter_directives("debug");
        for target in ["recipebox=debug", "recipebox_web=debug", "recipebox_common=debug", "tower_http=debug"] {
            assert!(directives.contains(target), "missing {}", target);
        }
    }

    #[test]
    fn test_missing_config_warning_is_logged_before_level_is_known() {
        let captured = Captured::default();
        let (subscriber, handle) =
            reloadable_subscriber(EnvFilter::new(filter_directives("info")), captured.clone());

        tracing::subscriber::with_default(subscriber, || {
            let config = TomlConfig::load(Path::new("/nonexistent/recipebox/config.toml")).unwrap();
            assert_eq!(config, TomlConfig::default());

            handle
                .reload(EnvFilter::new(filter_directives("error")))
                .unwrap();
            tracing::warn!(target: "recipebox_web", "suppressed after reload");
        });

        let text = captured.text();
        assert!(text.contains("Config file not found"), "{}", text);
        assert!(!text.contains("suppressed after reload"), "{}", text);
    }
}
