//! Configuration loading and parsing.
//!
//! Parses `tilde.toml` (or an override path provided by the binary). Every
//! field is optional; unknown fields are ignored so older binaries accept newer
//! files. A missing file yields defaults silently, a malformed one yields
//! defaults plus a `config` warning.
//!
//! ```toml
//! [editor]
//! quit_times = 3
//! message_timeout_secs = 5
//!
//! [input]
//! escape_timeout_ms = 100
//! poll_timeout_ms = 100
//! ```

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf, time::Duration};
use tracing::{info, warn};

pub const FILE_NAME: &str = "tilde.toml";

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Quit presses required to discard unsaved changes.
    #[serde(default = "EditorConfig::default_quit_times")]
    pub quit_times: u8,
    #[serde(default = "EditorConfig::default_message_timeout_secs")]
    pub message_timeout_secs: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            quit_times: Self::default_quit_times(),
            message_timeout_secs: Self::default_message_timeout_secs(),
        }
    }
}

impl EditorConfig {
    const fn default_quit_times() -> u8 {
        3
    }
    const fn default_message_timeout_secs() -> u64 {
        5
    }

    pub fn message_timeout(&self) -> Duration {
        Duration::from_secs(self.message_timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct InputConfig {
    #[serde(default = "InputConfig::default_escape_timeout_ms")]
    pub escape_timeout_ms: u64,
    #[serde(default = "InputConfig::default_poll_timeout_ms")]
    pub poll_timeout_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            escape_timeout_ms: Self::default_escape_timeout_ms(),
            poll_timeout_ms: Self::default_poll_timeout_ms(),
        }
    }
}

impl InputConfig {
    const fn default_escape_timeout_ms() -> u64 {
        100
    }
    const fn default_poll_timeout_ms() -> u64 {
        100
    }

    pub fn escape_timeout(&self) -> Duration {
        Duration::from_millis(self.escape_timeout_ms)
    }

    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms)
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub input: InputConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub source: Option<PathBuf>, // file the values came from, if any
    pub file: ConfigFile,
}

impl Config {
    pub fn editor(&self) -> &EditorConfig {
        &self.file.editor
    }

    pub fn input(&self) -> &InputConfig {
        &self.file.input
    }
}

/// Best-effort config path: working directory first, then the platform
/// config dir (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("tilde").join(FILE_NAME);
    }
    local
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config {
                source: Some(path),
                file,
            })
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed");
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex, MutexGuard};
    use tracing::Level;
    use tracing::subscriber::with_default;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone)]
    struct BufferWriter {
        inner: Arc<Mutex<Vec<u8>>>,
    }

    impl BufferWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buf = Arc::new(Mutex::new(Vec::new()));
            (Self { inner: buf.clone() }, buf)
        }
    }

    struct LockedWriter<'a> {
        guard: MutexGuard<'a, Vec<u8>>,
    }

    impl<'a> Write for LockedWriter<'a> {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.guard.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for BufferWriter {
        type Writer = LockedWriter<'a>;

        fn make_writer(&'a self) -> Self::Writer {
            LockedWriter {
                guard: self.inner.lock().expect("log buffer poisoned"),
            }
        }
    }

    #[test]
    fn default_config_when_missing_file() {
        let cfg = load_from(Some(PathBuf::from("__nonexistent_hopefully__.toml"))).unwrap();
        assert_eq!(cfg.editor().quit_times, 3);
        assert_eq!(cfg.editor().message_timeout(), Duration::from_secs(5));
        assert_eq!(cfg.input().escape_timeout(), Duration::from_millis(100));
        assert!(cfg.source.is_none());
    }

    #[test]
    fn parses_all_fields() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            tmp.path(),
            "[editor]\nquit_times = 1\nmessage_timeout_secs = 2\n[input]\nescape_timeout_ms = 30\npoll_timeout_ms = 250\n",
        )
        .unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.editor().quit_times, 1);
        assert_eq!(cfg.editor().message_timeout_secs, 2);
        assert_eq!(cfg.input().escape_timeout_ms, 30);
        assert_eq!(cfg.input().poll_timeout(), Duration::from_millis(250));
        assert_eq!(cfg.source.as_deref(), Some(tmp.path()));
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "[editor]\nquit_times = 5\nunknown = true\n").unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.editor().quit_times, 5);
        assert_eq!(cfg.editor().message_timeout_secs, 5);
        assert_eq!(cfg.file.input, InputConfig::default());
    }

    #[test]
    fn parse_error_falls_back_and_warns() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "[editor\nquit_times = ").unwrap();
        let (writer, buffer) = BufferWriter::new();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::WARN)
            .with_target(true)
            .with_ansi(false)
            .without_time()
            .with_writer(writer)
            .finish();

        let cfg = with_default(subscriber, || load_from(Some(tmp.path().to_path_buf()))).unwrap();

        assert_eq!(cfg.file, ConfigFile::default());
        let log_output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(log_output.contains("WARN config:"));
        assert!(log_output.contains("config_parse_failed"));
    }
}
