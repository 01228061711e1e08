use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn trialscout() -> Command {
    Command::cargo_bin("trialscout").unwrap()
}

#[test]
fn no_arguments_prints_help() {
    trialscout()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_mentions_core_flags() {
    trialscout()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--extract"))
        .stdout(predicate::str::contains("--max-results"))
        .stdout(predicate::str::contains("--spreadsheet"));
}

#[test]
fn list_extractors_shows_all_ten() {
    let assert = trialscout().arg("--list-extractors").assert().success();

    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    for key in [
        "sponsors",
        "investigators",
        "locations",
        "interventions",
        "conditions",
        "outcomes",
        "design",
        "eligibility",
        "contacts",
        "timeline",
    ] {
        assert!(output.contains(key), "missing extractor {}", key);
    }
    assert!(output.contains("(default)"));
}

#[test]
fn list_categories_shows_taxonomy() {
    trialscout()
        .arg("--list-categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("university"))
        .stdout(predicate::str::contains("hospital"))
        .stdout(predicate::str::contains("company"));
}

#[test]
fn generate_config_writes_toml() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("scout.toml");

    trialscout()
        .arg("--generate-config")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated sample configuration"));

    let content = std::fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("[search]"));
    assert!(content.contains("[filters]"));
    assert!(content.contains("[export]"));
}

#[test]
fn dry_run_shows_query_without_network() {
    trialscout()
        .args(["type 2 diabetes", "--dry-run", "--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("type 2 diabetes"))
        .stdout(predicate::str::contains("Dry run completed"));
}

#[test]
fn dry_run_without_keywords_fails() {
    trialscout()
        .args(["--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("keyword"));
}

#[test]
fn unknown_extractor_is_rejected() {
    trialscout()
        .args(["diabetes", "--dry-run", "--extract", "biomarkers"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("biomarkers"));
}

#[test]
fn unknown_category_is_rejected() {
    trialscout()
        .args(["diabetes", "--dry-run", "--exclude", "charity"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("charity"));
}

#[test]
fn quiet_conflicts_with_verbose() {
    trialscout()
        .args(["diabetes", "--quiet", "-v"])
        .assert()
        .failure();
}
