//! Tilde entrypoint.
use anyhow::Result;
use clap::Parser;
use core_actions::io_ops::load_document;
use core_actions::{Editor, Frontend, HELP_MESSAGE, Outcome};
use core_config::Config;
use core_events::Key;
use core_input::{InputDecoder, InputTimeouts};
use core_render::ScreenRenderer;
use core_state::{EditorSession, ScreenSize, TextBuffer};
use core_terminal::{CrosstermBackend, StdinSource, TerminalBackend};
use crossterm::{
    QueueableCommand,
    cursor::MoveTo,
    terminal::{Clear, ClearType},
};
use std::io::{Stdout, Write, stdout};
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::time::Instant;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

const LOG_FILE: &str = "tilde.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "tilde", version, about = "Tilde text editor")]
struct Args {
    /// File to open at startup. An unreadable file aborts startup.
    pub path: Option<PathBuf>,
    /// Configuration file path (overrides discovery of `tilde.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

fn banner() -> String {
    format!("Tilde editor -- version {}", env!("CARGO_PKG_VERSION"))
}

/// The real terminal: stdin bytes through the decoder, frames to stdout.
struct TerminalFrontend {
    source: StdinSource,
    decoder: InputDecoder,
    renderer: ScreenRenderer,
    out: Stdout,
}

impl TerminalFrontend {
    fn new(config: &Config) -> Result<Self> {
        let input = config.input();
        Ok(Self {
            source: StdinSource::spawn()?,
            decoder: InputDecoder::new(InputTimeouts {
                poll: input.poll_timeout(),
                escape: input.escape_timeout(),
            }),
            renderer: ScreenRenderer::new(banner(), config.editor().message_timeout()),
            out: stdout(),
        })
    }

    fn clear_screen(&mut self) -> Result<()> {
        self.out.queue(Clear(ClearType::All))?;
        self.out.queue(MoveTo(0, 0))?;
        self.out.flush()?;
        Ok(())
    }
}

impl Frontend for TerminalFrontend {
    fn refresh(&mut self, session: &mut EditorSession) -> Result<()> {
        self.renderer.render(session, &mut self.out, Instant::now())
    }

    fn poll_key(&mut self) -> Result<Option<Key>> {
        self.decoder.poll_key(&mut self.source)
    }
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join(LOG_FILE);
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .try_init()
    {
        Ok(()) => Some(guard),
        // Global subscriber already installed; dropping the guard stops the writer.
        Err(_) => None,
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            core_terminal::emergency_restore();
            default_panic(info);
        }));
    });
}

fn log_startup(args: &Args, buffer: &TextBuffer, config: &Config) {
    let config_path = config.source.as_ref().map(|p| p.display().to_string());
    info!(
        target: "runtime",
        has_path = args.path.is_some(),
        rows = buffer.len(),
        config = config_path.as_deref(),
        quit_times = config.editor().quit_times,
        "bootstrap_complete"
    );
}

fn new_session(buffer: TextBuffer, path: Option<PathBuf>, screen: ScreenSize) -> EditorSession {
    let mut session = EditorSession::new(buffer, screen);
    session.file_name = path;
    session.set_status(HELP_MESSAGE);
    session
}

fn run(args: Args, buffer: TextBuffer, config: &Config) -> Result<()> {
    let (rows, cols) = core_terminal::window_size()?;
    let screen = ScreenSize::from_terminal(rows, cols);
    info!(target: "runtime", rows = screen.rows, cols = screen.cols, "screen_size");

    let mut session = new_session(buffer, args.path, screen);
    let mut frontend = TerminalFrontend::new(config)?;
    let mut editor = Editor::new(config.editor().quit_times);

    loop {
        frontend.refresh(&mut session)?;
        let Some(key) = frontend.poll_key()? else {
            continue;
        };
        if editor.handle_key(key, &mut session, &mut frontend)? == Outcome::Quit {
            break;
        }
    }

    frontend.clear_screen()?;
    info!(target: "runtime", "shutdown");
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = configure_logging();
    install_panic_hook();
    info!(target: "runtime", "startup");

    let config = core_config::load_from(args.config.clone())?;
    let buffer = match args.path.as_deref() {
        Some(path) => load_document(path)?,
        None => TextBuffer::new(),
    };
    log_startup(&args, &buffer, &config);

    let mut backend = CrosstermBackend::new();
    backend.set_title("tilde")?;
    let guard = backend.enter_guard()?;
    let result = run(args, buffer, &config);
    // Restore before main reports any error on stderr.
    let restored = guard.release();
    result.and(restored)
}
