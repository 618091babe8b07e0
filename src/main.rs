use std::io;
use std::process::ExitCode;
use std::time::Duration;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use elem_clip::app::{self, App};
use elem_clip::cli::Cli;
use elem_clip::clipboard::{HANDOFF_WINDOW, MemoryClipboard, SystemClipboard};
use elem_clip::commands::{self, CopyStatus};
use elem_clip::config::{ClipboardBackend, Config, DocumentSource, RunMode};
use elem_clip::document::Document;
use elem_clip::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use elem_clip::notify::{NotifyMode, StderrNotifier};
use elem_clip::{EMBEDDED_SAMPLE, tracing_sub};

const POLL_INTERVAL: Duration = Duration::from_millis(16);

fn main() -> io::Result<ExitCode> {
    let cli = Cli::parse();
    let config = match Config::try_from(&cli) {
        Ok(config) => config,
        Err(err) => Cli::command().error(ErrorKind::InvalidValue, err).exit(),
    };
    tracing_sub::init(&config.log_target, config.log_level)?;

    let document = match &config.source {
        DocumentSource::File(path) => Document::load(path).map_err(io::Error::other)?,
        DocumentSource::Sample => Document::from_markdown(EMBEDDED_SAMPLE),
    };
    tracing::debug!(source = ?config.source, elements = document.elements().len(), "document loaded");

    match &config.mode {
        RunMode::List => {
            commands::list_elements(&document, &mut io::stdout().lock())?;
            Ok(ExitCode::SUCCESS)
        }
        RunMode::Copy(id) => Ok(copy_once(document, id, &config)),
        RunMode::Interactive => {
            run_interactive(document, &config)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn copy_once(document: Document, id: &str, config: &Config) -> ExitCode {
    let notifier = StderrNotifier::new();
    let status = match config.clipboard {
        ClipboardBackend::System => {
            let clipboard = SystemClipboard::persistent(HANDOFF_WINDOW);
            commands::copy_once(document, id, clipboard, notifier, config.notify)
        }
        ClipboardBackend::Memory => {
            let clipboard = MemoryClipboard::new();
            let status =
                commands::copy_once(document, id, clipboard.clone(), notifier, config.notify);
            // Nothing outlives the process, so hand the copied text to stdout.
            if let Some(text) = clipboard.contents() {
                println!("{text}");
            }
            status
        }
    };
    match &status {
        CopyStatus::NotFound(_) => eprintln!("elemclip: element not found: {id}"),
        CopyStatus::Rejected(reason) if config.notify == NotifyMode::Always => {
            tracing::warn!(element = id, reason = %reason, "copy was not confirmed by the clipboard");
        }
        _ => {}
    }
    ExitCode::from(status.exit_code(config.notify))
}

fn run_interactive(document: Document, config: &Config) -> io::Result<()> {
    let mut output = ConsoleOutputDriver::new()?;
    let input = ConsoleInputDriver::new();
    match config.clipboard {
        ClipboardBackend::System => {
            let mut app = App::new(document, SystemClipboard::new(), config.notify);
            app::run(&mut app, input, &mut output, POLL_INTERVAL)
        }
        ClipboardBackend::Memory => {
            let mut app = App::new(document, MemoryClipboard::new(), config.notify);
            app::run(&mut app, input, &mut output, POLL_INTERVAL)
        }
    }
}
