// tests/cli_errors.rs

mod common;

use assert_cmd::prelude::*;
use common::repoflat_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_error_other_host() -> Result<(), Box<dyn std::error::Error>> {
    repoflat_cmd()
        .arg("https://gitlab.com/octo/hello")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid repository URL"))
        .stderr(predicate::str::contains("only github.com repositories are supported"));
    Ok(())
}

#[test]
fn test_error_missing_repository() -> Result<(), Box<dyn std::error::Error>> {
    repoflat_cmd()
        .arg("https://github.com/octo")
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected https://github.com/<owner>/<repo>"));
    Ok(())
}

#[test]
fn test_error_reserved_page() -> Result<(), Box<dyn std::error::Error>> {
    repoflat_cmd()
        .arg("https://github.com/octo/hello/issues/12")
        .assert()
        .failure()
        .stderr(predicate::str::contains("'issues' pages are not repository contents"));
    Ok(())
}

#[test]
fn test_error_invalid_url_writes_no_output_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let out = temp.path().join("out.txt");

    repoflat_cmd()
        .arg("https://example.com/octo/hello")
        .arg("-o")
        .arg(&out)
        .assert()
        .failure();

    assert!(!out.exists());
    temp.close()?;
    Ok(())
}

#[cfg(feature = "clipboard")]
#[test]
fn test_error_output_and_paste_conflict() -> Result<(), Box<dyn std::error::Error>> {
    repoflat_cmd()
        .arg("https://github.com/octo/hello")
        .arg("-o")
        .arg("output.txt")
        .arg("-p")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Cannot use --output and --paste simultaneously",
        ));
    Ok(())
}

#[test]
fn test_error_zero_timeout() -> Result<(), Box<dyn std::error::Error>> {
    repoflat_cmd()
        .arg("https://github.com/octo/hello")
        .arg("--timeout")
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be at least 1 second"));
    Ok(())
}

#[test]
fn test_error_invalid_max_depth() -> Result<(), Box<dyn std::error::Error>> {
    repoflat_cmd()
        .arg("https://github.com/octo/hello")
        .arg("--max-depth")
        .arg("deep")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'deep'"));
    Ok(())
}

#[test]
fn test_error_missing_url_argument() -> Result<(), Box<dyn std::error::Error>> {
    repoflat_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("<REPO_URL>"));
    Ok(())
}
