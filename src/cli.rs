use std::path::PathBuf;

use clap::{ArgAction, Parser};
use indoc::indoc;

#[derive(Parser, Debug)]
#[command(
    name = "elemclip",
    version = env!("CARGO_PKG_VERSION"),
    about = "Copy the text of a Markdown element to the system clipboard",
    after_help = indoc! {"
        Element ids come from heading anchors (`# Title {#id}` or the slugged
        title), `#id` tokens in fenced code info strings, and positional ids
        such as p-1, code-2, li-3 and quote-1. Run with --list to see them.
    "}
)]
pub struct Cli {
    /// Markdown document to load. The built-in sample is used when omitted.
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Copy the element with this id and exit.
    #[arg(short = 'c', long = "copy", value_name = "ID")]
    pub copy: Option<String>,

    /// Print every element id and exit.
    #[arg(short = 'l', long = "list", conflicts_with = "copy")]
    pub list: bool,

    /// Notice shown after a copy: `always` reports success, `outcome` reports what the clipboard did.
    #[arg(long = "notify", value_name = "MODE", default_value = "always")]
    pub notify: String,

    /// Clipboard to write to: `system` or `memory`.
    #[arg(long = "clipboard", value_name = "BACKEND", default_value = "system")]
    pub clipboard: String,

    /// Write logs to this file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}
