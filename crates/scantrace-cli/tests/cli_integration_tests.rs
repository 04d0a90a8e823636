use assert_cmd::Command;
use predicates::prelude::*;

fn scantrace() -> Command {
    Command::cargo_bin("scantrace").expect("binary builds")
}

#[test]
fn test_help_lists_commands() {
    scantrace()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("scan"))
        .stdout(predicate::str::contains("watch"));
}

#[test]
fn test_version_flag() {
    scantrace().arg("--version").assert().success();
}

#[test]
fn test_scan_without_target_fails_with_setup_error() {
    let dir = tempfile::tempdir().unwrap();

    // No --repo and the cwd is not a git checkout: launch/setup failure
    scantrace()
        .current_dir(dir.path())
        .arg("scan")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not a git checkout"));
}

#[test]
fn test_scan_against_unreachable_service_fails_with_setup_error() {
    // Port 9 (discard) is closed on any sane machine; the launch request
    // must fail fast and map to the setup-failure exit code
    scantrace()
        .arg("--api-url")
        .arg("http://127.0.0.1:9")
        .arg("scan")
        .arg("--repo")
        .arg("https://github.com/acme/widget")
        .arg("--ci")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to launch scan"));
}

#[test]
fn test_scan_resolves_origin_remote_from_path() {
    let dir = tempfile::tempdir().unwrap();
    let git_dir = dir.path().join(".git");
    std::fs::create_dir_all(&git_dir).unwrap();
    std::fs::write(
        git_dir.join("config"),
        "[remote \"origin\"]\n\turl = https://github.com/acme/widget.git\n",
    )
    .unwrap();

    // Target resolution succeeds, so the failure moves on to the (dead)
    // service endpoint instead of the checkout
    scantrace()
        .arg("--api-url")
        .arg("http://127.0.0.1:9")
        .arg("scan")
        .arg(dir.path())
        .arg("--ci")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to launch scan"));
}
