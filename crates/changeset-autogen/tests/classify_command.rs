use predicates::str::contains;

#[test]
fn classifies_breaking_change_as_major() {
    assert_cmd::cargo::cargo_bin_cmd!("changeset-autogen")
        .args(["classify", "BREAKING CHANGE: feat(x): y"])
        .assert()
        .success()
        .stdout("major (breaking-change): feat(x): y\n");
}

#[test]
fn classifies_scoped_feature_as_minor() {
    assert_cmd::cargo::cargo_bin_cmd!("changeset-autogen")
        .args(["classify", "feat(ui): add dark mode"])
        .assert()
        .success()
        .stdout("minor (feat): add dark mode\n");
}

#[test]
fn unrecognized_message_uses_fallback() {
    assert_cmd::cargo::cargo_bin_cmd!("changeset-autogen")
        .args(["classify", "chore: bump deps"])
        .assert()
        .success()
        .stdout(contains("patch (fallback): chore(release): bump version via CI"));
}

#[test]
fn custom_fallback_summary() {
    assert_cmd::cargo::cargo_bin_cmd!("changeset-autogen")
        .args(["classify", "update readme", "--fallback-summary", "release"])
        .assert()
        .success()
        .stdout("patch (fallback): release\n");
}

#[test]
fn classify_requires_message() {
    assert_cmd::cargo::cargo_bin_cmd!("changeset-autogen")
        .arg("classify")
        .assert()
        .failure();
}

#[test]
fn top_level_generate_flags_are_rejected_with_subcommand() {
    assert_cmd::cargo::cargo_bin_cmd!("changeset-autogen")
        .args(["--dry-run", "classify", "feat(x): y"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("generate options must follow the `generate` subcommand"));
}
