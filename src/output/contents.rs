// src/output/contents.rs

use crate::constants::{BINARY_PLACEHOLDER, DELIMITER_WIDTH, LINE_NUMBER_WIDTH};
use crate::core_types::{ContentMap, Entry, FileContent, FlatEntryMap};
use crate::filtering::PatternFilter;

/// Renders the contents block for every file in `flat`, in the map's order.
///
/// Each file gets a header framed by delimiter lines, then one of:
/// *   its lines, numbered `{n:>3} | `;
/// *   a placeholder if `filter` classifies the path as binary;
/// *   an error line if its fetch failed;
///
/// followed by a blank line. Directories produce no output.
///
/// # Examples
/// ```
/// use repoflat::core_types::{ContentMap, Entry, FileContent, FlatEntryMap};
/// use repoflat::filtering::PatternFilter;
/// use repoflat::output::render_contents;
///
/// let flat: FlatEntryMap = vec![("x.txt", Entry::File("loc".into()))].into_iter().collect();
/// let mut contents = ContentMap::new();
/// contents.insert("x.txt".into(), FileContent::Text("line1\nline2".into()));
///
/// let out = render_contents(&flat, &contents, &PatternFilter::default());
/// assert!(out.contains("/x.txt:\n"));
/// assert!(out.contains("  1 | line1\n  2 | line2\n"));
/// ```
pub fn render_contents(flat: &FlatEntryMap, contents: &ContentMap, filter: &PatternFilter) -> String {
    let mut out = String::new();
    let delimiter = "-".repeat(DELIMITER_WIDTH);

    for (path, entry) in flat.iter() {
        let locator = match entry {
            Entry::File(locator) => locator,
            Entry::Directory => continue,
        };

        out.push_str(&format!("{}\n/{}:\n{}\n", delimiter, path, delimiter));

        if filter.is_binary(path) {
            out.push_str(BINARY_PLACEHOLDER);
            out.push('\n');
        } else {
            match contents.get(path) {
                Some(FileContent::Text(text)) => write_numbered_lines(&mut out, text),
                Some(FileContent::Failed {
                    message,
                    url,
                    token_supplied,
                }) => out.push_str(&format!(
                    "Error fetching content: {} (URL: {}, token supplied: {})\n",
                    message,
                    url,
                    if *token_supplied { "yes" } else { "no" }
                )),
                None => {
                    log::warn!("Content not available for file: {} ({})", path, locator);
                    out.push_str("Content not available\n");
                }
            }
        }
        out.push('\n');
    }
    out
}

fn write_numbered_lines(out: &mut String, text: &str) {
    for (i, line) in text.lines().enumerate() {
        out.push_str(&format!(
            "{:>width$} | {}\n",
            i + 1,
            line,
            width = LINE_NUMBER_WIDTH
        ));
    }
}
