// tests/common.rs

use std::process::Command;

// Helper function to get the binary command
#[allow(dead_code)] // This is used by many integration tests, but not all.
pub fn repoflat_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("repoflat"));
    // Keep the developer's token out of test runs.
    cmd.env_remove("GITHUB_TOKEN");
    cmd
}
