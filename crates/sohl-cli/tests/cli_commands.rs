//! Integration tests for the `sohl` CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn sohl() -> Command {
    let mut cmd = Command::cargo_bin("sohl").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("SOHL_LOG");
    cmd
}

/// Write a variant file into a fresh temp directory.
fn variant_file(json: &str) -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("variant.json");
    fs::write(&path, json).unwrap();
    (dir, path)
}

// ---------------------------------------------------------------------------
// ledger
// ---------------------------------------------------------------------------

#[test]
fn ledger_applies_modifiers() {
    sohl()
        .args(["ledger", "--base", "45", "-m", "Encumbrance:Enc:add:-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Encumbrance"))
        .stdout(predicate::str::contains("Effective: 35"))
        .stdout(predicate::str::contains("Modifier: -10"))
        .stdout(predicate::str::contains("Index: 4"))
        .stdout(predicate::str::contains("Abbrev: Enc -10"));
}

#[test]
fn ledger_without_base() {
    sohl()
        .arg("ledger")
        .assert()
        .success()
        .stdout(predicate::str::contains("No modifiers."))
        .stdout(predicate::str::contains("Base: unset"))
        .stdout(predicate::str::contains("Effective: 0"));
}

#[test]
fn ledger_override_wins() {
    sohl()
        .args([
            "ledger",
            "--base",
            "10",
            "-m",
            "Double:Dbl:multiply:2",
            "-m",
            "Fixed:Fix:override:12",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Effective: 12"));
}

#[test]
fn ledger_json_output() {
    sohl()
        .args(["ledger", "--base", "45", "-m", "Encumbrance:Enc:add:-10", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"effective\": 35.0"))
        .stdout(predicate::str::contains("\"abbrev\": \"Enc -10\""));
}

#[test]
fn ledger_disabled() {
    sohl()
        .args(["ledger", "--base", "45", "--disabled", "DSBL"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Effective: 0"))
        .stdout(predicate::str::contains("Disabled: Disabled"));
}

#[test]
fn ledger_rejects_unknown_reason() {
    sohl()
        .args(["ledger", "--disabled", "Nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown disabled reason"));
}

#[test]
fn ledger_rejects_malformed_modifier() {
    sohl()
        .args(["ledger", "-m", "Enc:add:-10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NAME:ABBREV:OPERATOR:VALUE"));
}

#[test]
fn ledger_rejects_text_for_add() {
    sohl()
        .args(["ledger", "--base", "1", "-m", "Bonus:Bon:add:lots"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a numeric value"));
}

// ---------------------------------------------------------------------------
// test
// ---------------------------------------------------------------------------

#[test]
fn test_with_crit_digits() {
    sohl()
        .args([
            "test",
            "--base",
            "45",
            "-m",
            "Encumbrance:Enc:add:-10",
            "--variant",
            "legendary",
            "--roll",
            "30",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skill Test"))
        .stdout(predicate::str::contains("Target: 35  [Enc -10]"))
        .stdout(predicate::str::contains("Roll: 30"))
        .stdout(predicate::str::contains("Result: Critical Success"))
        .stdout(predicate::str::contains("Success value: 5"));
}

#[test]
fn test_without_crit_digits_from_config() {
    let (_dir, path) = variant_file(r#"{"crit_success_digits": [], "crit_failure_digits": []}"#);
    sohl()
        .args(["test", "--base", "45", "-m", "Encumbrance:Enc:add:-10", "--roll", "30"])
        .arg("--config")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Result: Success"));
}

#[test]
fn test_target_capped() {
    sohl()
        .args(["test", "--base", "120", "--roll", "96"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Target: 95 (capped)"))
        .stdout(predicate::str::contains("Result: Marginal Failure"));
}

#[test]
fn test_situational_modifier() {
    sohl()
        .args(["test", "--base", "50", "--sitmod", "10", "--roll", "57"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Target: 60  [SitMod +10]"))
        .stdout(predicate::str::contains("Result: Marginal Success"));
}

#[test]
fn test_negative_situational_modifier() {
    sohl()
        .args(["test", "--base", "50", "--sitmod", "-20", "--roll", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Target: 30  [SitMod -20]"))
        .stdout(predicate::str::contains("Result: Marginal Failure"));
}

#[test]
fn test_with_description_table() {
    sohl()
        .args([
            "test", "--base", "40", "--kind", "morale", "--table", "morale", "--roll", "90",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Morale Test"))
        .stdout(predicate::str::contains("Result: Critical Failure"))
        .stdout(predicate::str::contains("Catatonic"));
}

#[test]
fn test_disabled_mastery() {
    sohl()
        .args(["test", "--base", "50", "--disabled", "MLDsbl", "--roll", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cannot be performed"))
        .stdout(predicate::str::contains("Mastery Level Disabled"));
}

#[test]
fn test_unknown_kind() {
    sohl()
        .args(["test", "--base", "50", "--kind", "juggling"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown test kind"));
}

#[test]
fn test_unknown_variant() {
    sohl()
        .args(["test", "--base", "50", "--variant", "homebrew"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown variant 'homebrew'"));
}

#[test]
fn test_seed_is_deterministic() {
    let run = || {
        sohl()
            .args(["test", "--base", "50", "--seed", "7"])
            .output()
            .unwrap()
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn verbose_logs_to_stderr() {
    sohl()
        .args(["--verbose", "test", "--base", "50"])
        .assert()
        .success()
        .stderr(predicate::str::contains("rolling with seeded rng"));
}

// ---------------------------------------------------------------------------
// opposed
// ---------------------------------------------------------------------------

#[test]
fn opposed_source_wins() {
    sohl()
        .args(["opposed", "--source", "60", "--target", "40", "--roll", "25,62"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Victory stars: ★★"))
        .stdout(predicate::str::contains("Winner: source"));
}

#[test]
fn opposed_both_fail() {
    sohl()
        .args(["opposed", "--source", "30", "--target", "30", "--roll", "40,77"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Both Fail"))
        .stdout(predicate::str::contains("Winner: none"));
}

#[test]
fn opposed_tie_broken_by_roll() {
    sohl()
        .args(["opposed", "--source", "60", "--target", "60", "--roll", "31,42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Victory stars: ☆"))
        .stdout(predicate::str::contains("Winner: target"))
        .stdout(predicate::str::contains("Tie broken"));
}

#[test]
fn opposed_tie_stands_for_block() {
    sohl()
        .args([
            "opposed",
            "--source",
            "60",
            "--target",
            "60",
            "--source-kind",
            "block",
            "--target-kind",
            "block",
            "--roll",
            "31,42",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Victory stars: Tied"));
}

#[test]
fn opposed_block_target_keeps_tie() {
    sohl()
        .args([
            "opposed",
            "--source",
            "60",
            "--target",
            "60",
            "--source-kind",
            "skill",
            "--target-kind",
            "block",
            "--roll",
            "44,12",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Victory stars: Tied"))
        .stdout(predicate::str::contains("Winner: none"));
}

// ---------------------------------------------------------------------------
// impact
// ---------------------------------------------------------------------------

#[test]
fn impact_rolls_damage() {
    sohl()
        .args([
            "impact",
            "--base",
            "3",
            "--dice",
            "2",
            "--die",
            "6",
            "--aspect",
            "edged",
            "--variant",
            "legendary",
            "--roll",
            "4,5",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Impact: 2d6+3e (edged)"))
        .stdout(predicate::str::contains("Median: 10"))
        .stdout(predicate::str::contains("Tactical advantage: 5"))
        .stdout(predicate::str::contains("Roll: [4, 5] = 9"))
        .stdout(predicate::str::contains("Total: 12"));
}

#[test]
fn impact_rejects_disallowed_die() {
    sohl()
        .args(["impact", "--die", "20", "--variant", "legendary"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("d20"));
}

#[test]
fn impact_without_dice_or_modifier() {
    sohl()
        .args(["impact", "--dice", "0", "--die", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No damage: No Modifier and No Die"));
}

#[test]
fn impact_rejects_huge_dice_count() {
    sohl()
        .args(["impact", "--dice", "4000000000", "--die", "6"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at most 20"));
}

// ---------------------------------------------------------------------------
// variant
// ---------------------------------------------------------------------------

#[test]
fn variant_shows_settings() {
    sohl()
        .args(["variant", "--variant", "legendary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("legendary"))
        .stdout(predicate::str::contains("d12"))
        .stdout(predicate::str::contains("is valid"));
}

#[test]
fn variant_json() {
    sohl()
        .args(["variant", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"max_target\": 95"));
}

#[test]
fn variant_reports_errors() {
    let (_dir, path) = variant_file(r#"{"name": "broken", "min_target": 90, "max_target": 10}"#);
    sohl()
        .arg("variant")
        .arg("--config")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("min_target"))
        .stderr(predicate::str::contains("1 error"));
}

#[test]
fn variant_missing_file() {
    sohl()
        .args(["variant", "--config", "/no/such/variant.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load"));
}

// ---------------------------------------------------------------------------
// describe
// ---------------------------------------------------------------------------

#[test]
fn describe_lists_tables() {
    sohl()
        .arg("describe")
        .assert()
        .success()
        .stdout(predicate::str::contains("morale"))
        .stdout(predicate::str::contains("injury"));
}

#[test]
fn describe_injury_severity() {
    sohl()
        .args(["describe", "injury", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("G5"))
        .stdout(predicate::str::contains("Grievous injury"));
}

#[test]
fn describe_digit_refinement() {
    sohl()
        .args(["describe", "morale", "-1", "--digit", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Routed"));
}

#[test]
fn describe_unknown_table() {
    sohl()
        .args(["describe", "weather", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown table"));
}
