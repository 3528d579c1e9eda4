// src/output/mod.rs

//! Renders the flattened text artifact and writes it out.
//!
//! The artifact has two blocks: the indented directory listing
//! ([`render_listing`]) and the line-numbered file contents
//! ([`render_contents`]), joined by [`assemble`].

mod contents;
mod listing;
pub mod writer;

pub use contents::render_contents;
pub use listing::render_listing;
pub use writer::write_output;

/// Joins the listing and contents blocks with a blank line.
///
/// # Examples
/// ```
/// use repoflat::output::assemble;
///
/// assert_eq!(assemble("├── a.txt\n", "body\n"), "├── a.txt\n\nbody\n");
/// assert_eq!(assemble("├── a.txt\n", ""), "├── a.txt\n");
/// ```
pub fn assemble(listing: &str, contents: &str) -> String {
    if contents.is_empty() {
        return listing.to_string();
    }
    let mut out = String::with_capacity(listing.len() + contents.len() + 1);
    out.push_str(listing);
    out.push('\n');
    out.push_str(contents);
    out
}
