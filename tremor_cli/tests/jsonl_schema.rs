use rstest::rstest;
use std::fs;
use assert_cmd::Command;
use tempfile::tempdir;

fn json_line(args: &[&str], stdin: Option<&str>) -> serde_json::Value {
    let mut cmd = Command::cargo_bin("tremor").unwrap();
    cmd.args(["--json", "--log-level", "error"]).args(args);
    if let Some(input) = stdin {
        cmd.write_stdin(input);
    }
    let out = cmd.assert().success().get_output().stdout.clone();
    let stdout = String::from_utf8_lossy(&out);
    let line = stdout
        .lines()
        .find(|l| l.contains("\"test\""))
        .unwrap_or("")
        .to_string();
    assert!(!line.is_empty(), "no JSON result line; stdout was: {stdout}");
    serde_json::from_str(&line).expect("valid JSON")
}

#[rstest]
fn scripted_slow_taps_match_reference_metrics() {
    let v = json_line(&["tap", "--simulate", "--interval-ms", "1500"], None);
    assert_eq!(v["test"], "tap");
    assert_eq!(v["taps"], 10);
    assert_eq!(v["taps_per_second"], 0.7);
    assert_eq!(v["mean_gap_ms"], 1500.0);
    assert_eq!(v["rhythm_score"], 0);
    assert_eq!(v["fatigue_index_percent"], 0);
}

#[rstest]
fn ideal_taps_score_100() {
    let v = json_line(&["tap", "--simulate", "--interval-ms", "500"], None);
    assert_eq!(v["taps"], 30);
    assert_eq!(v["taps_per_second"], 2.0);
    assert_eq!(v["rhythm_score"], 100);
    assert_eq!(v["recent_gaps_ms"].as_array().unwrap().len(), 20);
}

#[rstest]
fn slowing_taps_report_positive_fatigue() {
    let v = json_line(
        &["tap", "--simulate", "--interval-ms", "300", "--drift-ms", "20"],
        None,
    );
    let fatigue = v["fatigue_index_percent"].as_i64().unwrap();
    assert!(fatigue > 0, "fatigue {fatigue}");
    assert!(v["fatigue"].as_str().unwrap().starts_with('+'));
}

#[rstest]
fn stdin_lines_are_taps() {
    let v = json_line(&["tap", "--tick-ms", "5"], Some("\n\n\n\n"));
    assert_eq!(v["test"], "tap");
    assert!(v["taps"].as_u64().unwrap() <= 4);
}

#[rstest]
fn hold_schema() {
    let dir = tempdir().unwrap();
    let cfg = dir.path().join("cfg.toml");
    fs::write(&cfg, "[hold]\nduration_s = 4\nsamples_per_tick = 2\n").unwrap();
    let v = json_line(
        &[
            "--config",
            cfg.to_str().unwrap(),
            "hold",
            "--tick-ms",
            "5",
            "--seed",
            "11",
        ],
        None,
    );
    let score = v["stability_score"].as_u64().unwrap();
    assert!((72..=87).contains(&score), "score {score}");
    assert_eq!(v["samples"], 8);
    assert_eq!(v["fluctuation"].as_array().unwrap().len(), 8);
    assert!(v["rating"].is_string());
}

#[rstest]
fn scaled_flat_trace_is_perfect() {
    let dir = tempdir().unwrap();
    let csv = dir.path().join("path.csv");
    // Displayed at half size: client y=45 maps to surface y=90.
    let mut body = String::from("x,y\n");
    for i in 0..20 {
        body.push_str(&format!("{},45\n", 10 + i * 10));
    }
    fs::write(&csv, body).unwrap();
    let v = json_line(
        &[
            "trace",
            "--points",
            csv.to_str().unwrap(),
            "--displayed-width",
            "230",
            "--displayed-height",
            "90",
        ],
        None,
    );
    assert_eq!(v["state"], "done");
    assert_eq!(v["points"], 20);
    assert_eq!(v["average_deviation_px"], 0);
    assert_eq!(v["smoothness"], 100);
    assert_eq!(v["rating"], "Good");
}

#[rstest]
fn short_trace_is_done_but_unscored() {
    let dir = tempdir().unwrap();
    let csv = dir.path().join("path.csv");
    fs::write(&csv, "x,y\n10,90\n20,91\n30,92\n").unwrap();
    let v = json_line(&["trace", "--points", csv.to_str().unwrap()], None);
    assert_eq!(v["state"], "done");
    assert_eq!(v["points"], 3);
    assert!(v["average_deviation_px"].is_null());
    assert!(v["rating"].is_null());
}

#[rstest]
fn simulated_trace_is_reproducible() {
    let a = json_line(&["trace", "--simulate", "--seed", "5"], None);
    let b = json_line(&["trace", "--simulate", "--seed", "5"], None);
    assert_eq!(a, b);
    assert!(a["smoothness"].is_u64());
}

#[rstest]
fn summary_fixtures_can_be_replaced_from_csv() {
    let dir = tempdir().unwrap();
    let csv = dir.path().join("trend.csv");
    fs::write(&csv, "label,value\nW1,60\nW2,65\nW3,70\n").unwrap();
    let v = json_line(&["summary", "--fixtures", csv.to_str().unwrap()], None);
    assert_eq!(v["stability_trend"].as_array().unwrap().len(), 3);
    assert_eq!(v["stability_trend"][2]["label"], "W3");
    assert_eq!(v["reaction_trend"].as_array().unwrap().len(), 8);
    assert_eq!(v["summary"][0]["label"], "Motor Control Score");
}

#[rstest]
#[case("", 6)]
#[case("priya", 1)]
#[case("PT-10", 6)]
#[case("zzz", 0)]
fn patient_search_filters_the_roster(#[case] query: &str, #[case] expected: usize) {
    let v = json_line(&["patients", "--search", query], None);
    assert_eq!(v["test"], "patients");
    assert_eq!(v["total"], 6);
    assert_eq!(v["high_severity"], 2);
    assert_eq!(v["active_alerts"], 3);
    assert_eq!(v["patients"].as_array().unwrap().len(), expected);
}

#[rstest]
fn patient_rows_carry_severity_tiers() {
    let v = json_line(&["patients", "--search", "Amit"], None);
    let row = &v["patients"][0];
    assert_eq!(row["id"], "PT-102");
    assert_eq!(row["severity"], "High Tremor");
    assert_eq!(row["score_severity"], "High Tremor");
    assert_eq!(v["alerts"][0]["level"], "high");
}

#[rstest]
fn monitor_schema_is_seeded() {
    let a = json_line(&["monitor", "--seed", "9"], None);
    let b = json_line(&["monitor", "--seed", "9"], None);
    assert_eq!(a, b);
    assert_eq!(a["test"], "monitor");
    assert_eq!(a["realtime_intensity"].as_array().unwrap().len(), 12);
    assert_eq!(a["weekly_comparison"][0]["day"], "Mon");
    assert_eq!(a["raw_signal"].as_array().unwrap().len(), 50);

    let short = json_line(&["monitor", "--samples", "5"], None);
    assert_eq!(short["raw_signal"].as_array().unwrap().len(), 5);
}

#[rstest]
fn errors_are_json_objects() {
    let dir = tempdir().unwrap();
    let cfg = dir.path().join("cfg.toml");
    fs::write(&cfg, "[hold]\nduration_s = 0\n").unwrap();
    let out = Command::cargo_bin("tremor")
        .unwrap()
        .args(["--json", "--config", cfg.to_str().unwrap(), "self-check"])
        .assert()
        .code(2)
        .get_output()
        .stderr
        .clone();
    let stderr = String::from_utf8_lossy(&out);
    let line = stderr.lines().find(|l| l.contains("\"reason\"")).unwrap_or("");
    let v: serde_json::Value = serde_json::from_str(line).expect("JSON error line");
    assert_eq!(v["reason"], "Config");
    assert_eq!(v["exit_code"], 2);
    assert!(v["message"].as_str().unwrap().contains("hold.duration_s"));
}
