use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mclogs-uploader", version)]
#[command(about = "Upload log files and snippets to mclo.gs", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to $MCLOGS_CONFIG or config/mclogs.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload a linked log or a piece of text and print the share URL
    Upload(UploadArgs),
    /// Show how a URL is classified
    Check(CheckArgs),
}

#[derive(clap::Args, Debug)]
pub struct UploadArgs {
    /// Log link to capture; takes precedence over --text/--file
    #[arg(long)]
    pub link: Option<String>,

    /// Capture --link even if it does not look like a log
    #[arg(long, requires = "link")]
    pub force: bool,

    /// Text to upload when no link is captured
    #[arg(long, conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the text to upload from a file
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Do not copy the share URL to the clipboard
    #[arg(long)]
    pub no_copy: bool,

    /// Hide the progress notice
    #[arg(long, short)]
    pub quiet: bool,
}

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    pub url: String,
}
