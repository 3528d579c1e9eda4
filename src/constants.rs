// src/constants.rs

/// Base URL of the GitHub REST API.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Host serving raw file contents for github.com repositories.
pub const GITHUB_RAW_HOST: &str = "raw.githubusercontent.com";

/// `Accept` header for JSON metadata and listing requests.
pub const ACCEPT_JSON: &str = "application/vnd.github.v3+json";

/// `Accept` header asking the Contents API for the raw file body.
pub const ACCEPT_RAW: &str = "application/vnd.github.v3.raw";

/// `User-Agent` sent with every request. GitHub rejects requests without one.
pub const USER_AGENT: &str = concat!("repoflat/", env!("CARGO_PKG_VERSION"));

/// Branch used when the default branch cannot be determined.
pub const FALLBACK_BRANCH: &str = "main";

/// Default maximum recursion depth for the walker.
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Default request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Width of the delimiter line framing each file header.
pub const DELIMITER_WIDTH: usize = 80;

/// Width of the right-justified line number column.
pub const LINE_NUMBER_WIDTH: usize = 3;

/// Prefix of every line in the directory listing.
pub const LISTING_MARKER: &str = "├── ";

/// Spaces added per nesting level in the listing.
pub const LISTING_INDENT: &str = "    ";

/// Placeholder written instead of a binary file's content.
pub const BINARY_PLACEHOLDER: &str = "[Binary file skipped - no content]";

/// Maximum length of a response body quoted in a fetch error.
pub const ERROR_BODY_SNIPPET_LEN: usize = 200;

/// Substrings that exclude a file or directory name from traversal.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    // Version control
    ".git",
    ".svn",
    ".hg",
    // Dependencies
    "node_modules",
    "vendor",
    "bower_components",
    // OS metadata
    ".DS_Store",
    "Thumbs.db",
    // Environment files
    ".env",
    // Editors
    ".idea",
    ".vscode",
    // Build output
    "dist",
    "build",
    "target",
    "__pycache__",
    ".next",
    "coverage",
];

/// Extensions (lowercase, with dot) treated as binary.
pub const DEFAULT_BINARY_EXTENSIONS: &[&str] = &[
    // Images
    ".png", ".jpg", ".jpeg", ".gif", ".bmp", ".ico", ".webp", ".tiff", ".psd",
    // Archives
    ".zip", ".tar", ".gz", ".tgz", ".bz2", ".xz", ".7z", ".rar", ".jar", ".war",
    // Executables and libraries
    ".exe", ".dll", ".so", ".dylib", ".a", ".lib", ".o", ".obj", ".bin", ".wasm",
    // Compiled bytecode
    ".class", ".pyc", ".pyo",
    // Media
    ".mp3", ".mp4", ".wav", ".ogg", ".flac", ".avi", ".mov", ".mkv", ".webm",
    // Fonts
    ".ttf", ".otf", ".woff", ".woff2", ".eot",
    // Documents and generic binary data
    ".pdf", ".db", ".sqlite", ".sqlite3", ".dat",
];
