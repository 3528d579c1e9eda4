//! Handles parsing of GitHub web URLs and building API URLs.

use crate::constants::{GITHUB_API_BASE, GITHUB_RAW_HOST};
use crate::core_types::RepositoryRef;
use crate::errors::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// The components of a parsed GitHub repository URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRepoUrl {
    /// The repository, with the branch taken from the URL if it named one.
    pub repo: RepositoryRef,
    /// The path within the repository to start from. Empty for the root.
    pub subdirectory: String,
}

/// GitHub page names that can follow `owner/repo` but are not repository content.
const RESERVED_NAMES: &[&str] = &[
    "releases", "tags", "pull", "pulls", "issues", "actions", "projects", "wiki", "security",
    "pulse", "graphs", "settings", "commit", "commits", "blame", "find", "compare", "branches",
    "discussions", "network",
];

/// Parses a GitHub repository URL into a [`ParsedRepoUrl`].
///
/// Accepted forms:
/// *   `https://github.com/owner/repo` (optionally with `.git` or a trailing slash)
/// *   `https://github.com/owner/repo/tree/branch/some/path`
/// *   `https://github.com/owner/repo/blob/branch/path/to/file`
/// *   "Sloppy" `https://github.com/owner/repo/some/path`, read on the default branch
///
/// The scheme may be omitted (`github.com/owner/repo`).
///
/// # Errors
/// Returns [`Error::Input`] for malformed URLs, other hosts, missing owner or
/// repository, and reserved pages such as `/issues`.
///
/// # Examples
/// ```
/// use repoflat::github::parse_repo_url;
///
/// let parsed = parse_repo_url("https://github.com/rust-lang/cargo/tree/master/src/cargo").unwrap();
/// assert_eq!(parsed.repo.owner, "rust-lang");
/// assert_eq!(parsed.repo.repo, "cargo");
/// assert_eq!(parsed.repo.branch.as_deref(), Some("master"));
/// assert_eq!(parsed.subdirectory, "src/cargo");
///
/// let root = parse_repo_url("github.com/rust-lang/cargo.git").unwrap();
/// assert_eq!(root.repo.branch, None);
/// assert_eq!(root.subdirectory, "");
///
/// assert!(parse_repo_url("https://gitlab.com/user/repo").is_err());
/// ```
pub fn parse_repo_url(input: &str) -> Result<ParsedRepoUrl> {
    let trimmed = input.trim();
    let invalid = |reason: &str| Error::Input {
        url: input.to_string(),
        reason: reason.to_string(),
    };

    if trimmed.is_empty() {
        return Err(invalid("the URL is empty"));
    }

    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let url = Url::parse(&with_scheme).map_err(|e| invalid(&e.to_string()))?;
    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(invalid("only http(s) URLs are supported"));
    }
    match url.host_str() {
        Some("github.com") | Some("www.github.com") => {}
        _ => return Err(invalid("only github.com repositories are supported")),
    }

    let parts: Vec<&str> = url
        .path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();

    if parts.len() < 2 {
        return Err(invalid("expected https://github.com/<owner>/<repo>"));
    }

    let owner = parts[0];
    let repo = parts[1].trim_end_matches(".git");
    if repo.is_empty() {
        return Err(invalid("the repository name is empty"));
    }
    let mut repo_ref = RepositoryRef::new(owner, repo);

    let subdirectory = match parts.get(2).copied() {
        None => String::new(),
        Some("tree") | Some("blob") => {
            let branch = parts
                .get(3)
                .ok_or_else(|| invalid("missing branch name after /tree/ or /blob/"))?;
            repo_ref.branch = Some(branch.to_string());
            parts[4..].join("/")
        }
        Some(first) if RESERVED_NAMES.contains(&first) => {
            return Err(invalid(&format!(
                "'{}' pages are not repository contents",
                first
            )));
        }
        // Without `/tree/` a branch name cannot be told apart from a directory,
        // so everything after owner/repo is taken as the path on the default branch.
        Some(_) => parts[2..].join("/"),
    };

    Ok(ParsedRepoUrl {
        repo: repo_ref,
        subdirectory,
    })
}

/// Builds the repository metadata URL, `.../repos/{owner}/{repo}`.
pub fn repo_info_url(owner: &str, repo: &str) -> String {
    api_url(&["repos", owner, repo], None)
}

/// Builds the Contents API URL for `path` at `git_ref`.
///
/// # Examples
/// ```
/// use repoflat::github::contents_url;
///
/// assert_eq!(
///     contents_url("octo", "hello", "", "main"),
///     "https://api.github.com/repos/octo/hello/contents?ref=main"
/// );
/// assert_eq!(
///     contents_url("octo", "hello", "src/lib", "dev"),
///     "https://api.github.com/repos/octo/hello/contents/src/lib?ref=dev"
/// );
/// ```
pub fn contents_url(owner: &str, repo: &str, path: &str, git_ref: &str) -> String {
    let mut segments = vec!["repos", owner, repo, "contents"];
    segments.extend(path.split('/').filter(|s| !s.is_empty()));
    api_url(&segments, Some(git_ref))
}

fn api_url(segments: &[&str], git_ref: Option<&str>) -> String {
    let mut url = match Url::parse(GITHUB_API_BASE) {
        Ok(url) => url,
        Err(_) => return format!("{}/{}", GITHUB_API_BASE, segments.join("/")),
    };
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    if let Some(git_ref) = git_ref {
        url.query_pairs_mut().append_pair("ref", git_ref);
    }
    url.to_string()
}

/// Regex for raw content URLs: `https://raw.githubusercontent.com/owner/repo/<ref>/<path>`.
/// The ref may itself contain slashes, so everything after `owner/repo/` is
/// captured as one piece.
static RAW_CONTENT_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^https?://{}/([^/]+)/([^/]+)/([^?#]+)",
        regex::escape(GITHUB_RAW_HOST)
    ))
    .expect("raw content URL regex is valid")
});

/// Rewrites a raw-host download URL into the equivalent Contents API URL.
///
/// When `git_ref` is known it is stripped from the front of the path, which is
/// the only reliable split for refs like `feature/x`. Without it the first
/// segment is taken as the ref. The path is carried over as-is (already
/// percent-encoded). Returns `None` for anything that is not a raw-host URL,
/// or whose path does not start with `git_ref`.
///
/// # Examples
/// ```
/// use repoflat::github::raw_to_api_url;
///
/// assert_eq!(
///     raw_to_api_url("https://raw.githubusercontent.com/octo/hello/main/src/lib.rs", None).as_deref(),
///     Some("https://api.github.com/repos/octo/hello/contents/src/lib.rs?ref=main")
/// );
/// assert_eq!(
///     raw_to_api_url(
///         "https://raw.githubusercontent.com/octo/hello/feature/x/src/lib.rs",
///         Some("feature/x"),
///     )
///     .as_deref(),
///     Some("https://api.github.com/repos/octo/hello/contents/src/lib.rs?ref=feature%2Fx")
/// );
/// assert_eq!(raw_to_api_url("https://example.com/file.txt", None), None);
/// ```
pub fn raw_to_api_url(raw_url: &str, git_ref: Option<&str>) -> Option<String> {
    let caps = RAW_CONTENT_URL_RE.captures(raw_url)?;
    let owner = caps.get(1)?.as_str();
    let repo = caps.get(2)?.as_str();
    let rest = caps.get(3)?.as_str();

    let (git_ref, path) = match git_ref {
        Some(known) => (known, rest.strip_prefix(known)?.strip_prefix('/')?),
        None => rest.split_once('/')?,
    };
    if path.is_empty() {
        return None;
    }

    let encoded_ref: String = url::form_urlencoded::byte_serialize(git_ref.as_bytes()).collect();
    Some(format!(
        "{}/repos/{}/{}/contents/{}?ref={}",
        GITHUB_API_BASE, owner, repo, path, encoded_ref
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(owner: &str, repo: &str, branch: Option<&str>, sub: &str) -> ParsedRepoUrl {
        let mut r = RepositoryRef::new(owner, repo);
        r.branch = branch.map(String::from);
        ParsedRepoUrl {
            repo: r,
            subdirectory: sub.to_string(),
        }
    }

    #[test]
    fn test_parse_root_url() {
        assert_eq!(
            parse_repo_url("https://github.com/BurntSushi/ripgrep").unwrap(),
            parsed("BurntSushi", "ripgrep", None, "")
        );
        assert_eq!(
            parse_repo_url("https://github.com/BurntSushi/ripgrep.git/").unwrap(),
            parsed("BurntSushi", "ripgrep", None, "")
        );
    }

    #[test]
    fn test_parse_tree_url() {
        assert_eq!(
            parse_repo_url("https://github.com/BurntSushi/ripgrep/tree/master/crates/ignore")
                .unwrap(),
            parsed("BurntSushi", "ripgrep", Some("master"), "crates/ignore")
        );
        assert_eq!(
            parse_repo_url("https://github.com/BurntSushi/ripgrep/tree/master/").unwrap(),
            parsed("BurntSushi", "ripgrep", Some("master"), "")
        );
    }

    #[test]
    fn test_parse_blob_url() {
        assert_eq!(
            parse_repo_url("https://github.com/git-fixtures/basic/blob/master/go/example.go")
                .unwrap(),
            parsed("git-fixtures", "basic", Some("master"), "go/example.go")
        );
    }

    #[test]
    fn test_parse_sloppy_url_assumes_default_branch() {
        assert_eq!(
            parse_repo_url("https://github.com/BurntSushi/ripgrep/master/crates").unwrap(),
            parsed("BurntSushi", "ripgrep", None, "master/crates")
        );
    }

    #[test]
    fn test_parse_without_scheme_and_with_www() {
        assert_eq!(
            parse_repo_url("github.com/octo/hello").unwrap(),
            parsed("octo", "hello", None, "")
        );
        assert_eq!(
            parse_repo_url("  https://www.github.com/octo/hello  ").unwrap(),
            parsed("octo", "hello", None, "")
        );
    }

    #[test]
    fn test_parse_ignores_query_and_fragment() {
        assert_eq!(
            parse_repo_url("https://github.com/octo/hello/tree/dev?tab=readme#top").unwrap(),
            parsed("octo", "hello", Some("dev"), "")
        );
    }

    #[test]
    fn test_parse_rejects_invalid_inputs() {
        for input in [
            "",
            "not a url at all",
            "https://gitlab.com/user/repo",
            "https://github.com/",
            "https://github.com/onlyowner",
            "https://github.com/owner/.git",
            "https://github.com/owner/repo/tree",
            "https://github.com/owner/repo/issues/1",
            "https://github.com/owner/repo/pull/2",
            "ftp://github.com/owner/repo",
        ] {
            let result = parse_repo_url(input);
            assert!(
                matches!(result, Err(Error::Input { .. })),
                "expected Input error for '{}', got {:?}",
                input,
                result
            );
        }
    }

    #[test]
    fn test_contents_url_encodes_segments() {
        assert_eq!(
            contents_url("o", "r", "docs/read me.md", "main"),
            "https://api.github.com/repos/o/r/contents/docs/read%20me.md?ref=main"
        );
        assert_eq!(
            contents_url("o", "r", "/a//b/", "main"),
            "https://api.github.com/repos/o/r/contents/a/b?ref=main"
        );
    }

    #[test]
    fn test_repo_info_url() {
        assert_eq!(repo_info_url("o", "r"), "https://api.github.com/repos/o/r");
    }

    #[test]
    fn test_raw_to_api_url_drops_query() {
        assert_eq!(
            raw_to_api_url("https://raw.githubusercontent.com/o/r/v1.0/a/b%20c.txt?token=XYZ", None)
                .as_deref(),
            Some("https://api.github.com/repos/o/r/contents/a/b%20c.txt?ref=v1.0")
        );
        assert_eq!(raw_to_api_url("https://raw.githubusercontent.com/o/r/main", None), None);
        assert_eq!(
            raw_to_api_url("https://api.github.com/repos/o/r/contents/a?ref=main", None),
            None
        );
    }

    #[test]
    fn test_raw_to_api_url_with_slash_in_ref() {
        let raw = "https://raw.githubusercontent.com/o/r/feature/x/src/lib.rs";
        assert_eq!(
            raw_to_api_url(raw, Some("feature/x")).as_deref(),
            Some("https://api.github.com/repos/o/r/contents/src/lib.rs?ref=feature%2Fx")
        );
        // The rewritten ref matches the one the walker lists with.
        assert!(contents_url("o", "r", "src", "feature/x").ends_with("?ref=feature%2Fx"));
        // A ref that does not prefix the path is not guessed at.
        assert_eq!(raw_to_api_url(raw, Some("main")), None);
        assert_eq!(
            raw_to_api_url("https://raw.githubusercontent.com/o/r/feature/x", Some("feature/x")),
            None
        );
    }
}
