//! The `repoflat` prelude for convenient library usage.
//!
//! Re-exports the types and functions most programs need to run the pipeline.
//!
//! # Example
//!
//! ```
//! use repoflat::prelude::*;
//! # fn main() -> Result<()> {
//!
//! let config = ConfigBuilder::new()
//!     .repo_url("https://github.com/octo/hello/tree/main")
//!     .listing_only(true)
//!     .build()?;
//! let transport = CannedTransport::new();
//!
//! // Nothing is registered, so the root listing answers 404.
//! let result = flatten(&config, &transport, &CancellationToken::new(), None);
//! assert!(matches!(result, Err(Error::Provider { status: Some(404), .. })));
//!
//! # Ok(())
//! # }
//! ```

pub use crate::cancellation::CancellationToken;
pub use crate::config::{Config, ConfigBuilder, OutputDestination};
pub use crate::core_types::{ContentMap, Entry, FileContent, FlatEntryMap, RepositoryRef};
pub use crate::errors::{Error, Result};
pub use crate::filtering::PatternFilter;
pub use crate::github::{
    parse_repo_url, resolve_default_branch, CannedTransport, ContentFetcher, HttpResponse,
    RepositoryWalker, ReqwestTransport, Transport, WalkTarget,
};
pub use crate::output::{assemble, render_contents, render_listing, write_output};
pub use crate::tree::{build_tree, FileNode};
pub use crate::{execute, fetch_contents, flatten, render, run, walk, WalkOutcome};
