//! Tracing output for the browser console.

use std::io;

use console::ConsoleConfig;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. A second call is a no-op.
pub fn init(config: &ConsoleConfig) {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(build_env_filter(config))
        .with_ansi(false)
        .without_time()
        .with_writer(ConsoleWriter::default)
        .try_init();
    if installed.is_err() {
        web_sys::console::warn_1(&"tracing subscriber already installed".into());
    }
}

fn build_env_filter(config: &ConsoleConfig) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(&config.log_level)
}

/// Buffers one formatted event and hands it to `console.log` on drop.
#[derive(Debug, Default)]
struct ConsoleWriter {
    buffer: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let line = String::from_utf8_lossy(&self.buffer);
        web_sys::console::log_1(&line.trim_end().into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_accepts_target_directives() {
        let config = ConsoleConfig::new().with_log_level("console=debug,warn");
        assert_eq!(
            build_env_filter(&config).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
    }
}
