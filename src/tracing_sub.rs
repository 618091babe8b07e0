use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::sync::Arc;

use tracing::Level;

use crate::config::LogTarget;

pub struct DelegatingWriter {
    inner: DelegatingInner,
}

enum DelegatingInner {
    File(Arc<File>),
    Stderr(io::Stderr),
    Sink(io::Sink),
}

impl Write for DelegatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.inner {
            DelegatingInner::File(f) => (&**f).write(buf),
            DelegatingInner::Stderr(s) => s.write(buf),
            DelegatingInner::Sink(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.inner {
            DelegatingInner::File(f) => (&**f).flush(),
            DelegatingInner::Stderr(s) => s.flush(),
            DelegatingInner::Sink(s) => s.flush(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SubscriberMakeWriter {
    target: WriterTarget,
}

#[derive(Clone, Debug)]
enum WriterTarget {
    File(Arc<File>),
    Stderr,
    Discard,
}

impl SubscriberMakeWriter {
    /// Resolve `target`, opening (and creating) a log file in append mode.
    pub fn for_target(target: &LogTarget) -> io::Result<Self> {
        let target = match target {
            LogTarget::File(path) => {
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                WriterTarget::File(Arc::new(file))
            }
            LogTarget::Stderr => WriterTarget::Stderr,
            LogTarget::Discard => WriterTarget::Discard,
        };
        Ok(Self { target })
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SubscriberMakeWriter {
    type Writer = DelegatingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        let inner = match &self.target {
            WriterTarget::File(f) => DelegatingInner::File(Arc::clone(f)),
            WriterTarget::Stderr => DelegatingInner::Stderr(io::stderr()),
            WriterTarget::Discard => DelegatingInner::Sink(io::sink()),
        };
        DelegatingWriter { inner }
    }
}

/// Initialize the global tracing subscriber. Safe to call multiple times;
/// subsequent calls are no-ops for the global subscriber.
pub fn init(target: &LogTarget, level: Level) -> io::Result<()> {
    let writer = SubscriberMakeWriter::for_target(target)?;
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(writer)
        .with_ansi(matches!(target, LogTarget::Stderr))
        .with_target(false)
        .with_thread_names(false)
        .try_init();
    Ok(())
}
