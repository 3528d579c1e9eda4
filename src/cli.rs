// src/cli.rs

use clap::Parser;

/// Flattens a GitHub repository into a single text artifact.
///
/// repoflat walks a repository through the GitHub Contents API, prints an
/// indented listing of its tree, and then every text file's contents with line
/// numbers. Binary files are listed but their contents are skipped. The result
/// is designed for pasting into Large Language Models or code review tools.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// GitHub repository URL, e.g. https://github.com/owner/repo or .../tree/<branch>/<path>.
    pub repo_url: String,

    /// Branch, tag, or commit to read instead of the one in the URL or the default branch.
    #[arg(short = 'b', long, alias = "ref", value_name = "BRANCH_OR_TAG")]
    pub branch: Option<String>,

    /// Personal access token. Defaults to the GITHUB_TOKEN environment variable.
    #[arg(short = 't', long, value_name = "TOKEN")]
    pub token: Option<String>,

    /// Maximum directory depth to descend into (0 lists only the starting directory).
    #[arg(short = 'd', long, value_name = "DEPTH")]
    pub max_depth: Option<usize>,

    /// Additional name substrings to skip (repeatable). Added to the built-in list.
    #[arg(short = 'i', long = "ignore", value_name = "PATTERN", num_args = 1..)]
    pub ignore_patterns: Option<Vec<String>>,

    /// Additional extensions to treat as binary, e.g. "svg" or ".lock" (repeatable).
    #[arg(short = 'x', long = "binary-ext", value_name = "EXT", num_args = 1..)]
    pub binary_extensions: Option<Vec<String>>,

    /// Do not use the built-in ignore list; only patterns given with --ignore apply.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub no_default_ignores: bool,

    /// Print only the directory listing, without fetching file contents.
    #[arg(short = 'l', long, action = clap::ArgAction::SetTrue)]
    pub listing_only: bool,

    /// Request timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    // --- Output Destination ---
    /// Write output to the specified file instead of stdout.
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output_file: Option<String>,

    #[cfg(feature = "clipboard")]
    /// Copy output to the system clipboard.
    #[arg(short = 'p', long, action = clap::ArgAction::SetTrue)]
    pub paste: bool,
}
