use std::io::Write;
use std::process::{Command, Stdio};

fn nmlegis(args: &[&str]) -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_nmlegis"))
        .args(args)
        .env_remove("NMLEGIS_SESSION_START")
        .env_remove("NMLEGIS_CHAMBER")
        .output()
        .expect("failed to run nmlegis");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    String::from_utf8(output.stdout).expect("stdout is utf-8")
}

#[test]
fn parse_text() {
    insta::assert_snapshot!(nmlegis(&["parse", "--format", "text", "[5] SRC/SFC-SRC"]), @r###"
    Day 5: In Senate Rules. Referrals: Senate Rules, Senate Finance
    Status: in_committee
      SRC/SFC          referred           Referred to: Senate Rules, Senate Finance
      SRC              referred           Sent to Senate Rules
    "###);
}

#[test]
fn parse_json_line() {
    let stdout = nmlegis(&["parse", "SGND(Mar.4)Ch.9"]);
    let value: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(value["status"], "signed");
    assert_eq!(value["actions"][0]["chapter"], "9");
}

#[test]
fn history_text() {
    insta::assert_snapshot!(
        nmlegis(&[
            "history",
            "--session-start",
            "2025-01-20",
            "--format",
            "text",
            "[1] HJC [6] PASSED/H (60-8)",
        ]),
        @r###"
    2025-01-20 H   1   Sent to House Judiciary
    2025-01-27 H   2 * Passed House (60-8)
    "###
    );
}

#[test]
fn history_reads_stdin_lines() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_nmlegis"))
        .args(["history", "--session-start", "2025-01-21", "--chamber", "S", "--stdin"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("failed to run nmlegis");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"[1] SJC\n\n[2] HJC-DP\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let lines: Vec<_> = String::from_utf8(output.stdout).unwrap().lines().map(String::from).collect();
    assert_eq!(lines.len(), 2);
    let second: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
    assert_eq!(second[0]["chamber"], "H");
    assert_eq!(second[0]["date"], "2025-01-22");
}

#[test]
fn history_rejects_bad_chamber() {
    let output = Command::new(env!("CARGO_BIN_EXE_nmlegis"))
        .args(["history", "--session-start", "2025-01-21", "--chamber", "X", "HJC"])
        .output()
        .expect("failed to run nmlegis");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid chamber"));
}

#[test]
fn expand_text() {
    insta::assert_snapshot!(nmlegis(&["expand", "--format", "text", "[2] HAFC-DP"]), @r###"
    Day 2 → House Appropriations & Finance → Committee voted Do Pass
      - Legislative Day 2
      - HAFC: House Appropriations & Finance
      - DP: DO PASS committee report adopted
    "###);
}

#[test]
fn codes_search_json() {
    let stdout = nmlegis(&["codes", "--search", "judiciary"]);
    let value: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    let committees = value["committees"].as_array().unwrap();
    assert!(committees.iter().any(|c| c["code"] == "HJC"));
    assert!(value["actions"].as_array().unwrap().is_empty());
}
