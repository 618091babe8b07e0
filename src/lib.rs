//! Copy the text content of a document element to the clipboard.
//!
//! The core entry point is [`copier::ClipboardCopier::copy_element_to_clipboard`].
//! The other modules provide the host it runs against: a Markdown-backed
//! element tree, the page selection, clipboard backends, notice sinks, and an
//! interactive terminal UI.

pub mod app;
pub mod cli;
pub mod clipboard;
pub mod commands;
pub mod components;
pub mod config;
pub mod copier;
pub mod document;
pub mod drivers;
pub mod event_loop;
pub mod keybindings;
pub mod notify;
pub mod selection;
pub mod theme;
pub mod tracing_sub;
pub mod ui;

mod sample {
    include!(concat!(env!("OUT_DIR"), "/generated_sample.rs"));
}

pub use sample::EMBEDDED_SAMPLE;
