mod support;

use std::fs;
use std::time::Duration;

use tempfile::tempdir;

use support::{run_loadscope, spawn_ws_backend_or_skip};

fn describe(output: &std::process::Output) -> String {
    format!(
        "status: {}\nstdout: {}\nstderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

#[test]
fn e2e_completed_session_prints_summary_and_exports() -> Result<(), String> {
    let frames = vec![
        r#"{"success":2,"failures":0,"resource_usage":{"timestamp":"2024-01-01T00:00:00Z","response_time":0.1,"cpu_usage":20.0,"mem_usage":35.5}}"#.to_owned(),
        r#"{"total_requests":5,"success":4,"failures":1,"resource_usage":[{"timestamp":"2024-01-01T00:00:00.400Z","response_time":0.12},{"timestamp":"2024-01-01T00:00:01Z","response_time":0.3}]}"#.to_owned(),
    ];
    let Some((backend_url, backend)) = spawn_ws_backend_or_skip(frames)? else {
        return Ok(());
    };
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let export_path = dir.path().join("result.json");

    let output = run_loadscope(
        dir.path(),
        [
            "-u",
            "https://x.test/a",
            "-n",
            "5",
            "-c",
            "2",
            "-b",
            backend_url.as_str(),
            "--no-charts",
            "--export-json",
            export_path.to_str().ok_or("Non UTF-8 temp path")?,
        ],
    )?;
    if !output.status.success() {
        return Err(describe(&output));
    }

    let request = backend
        .start_request(Duration::from_secs(1))
        .ok_or("Backend never received a start request")?;
    if request != r#"{"url":"https://x.test/a","requests":5,"concurrency":2}"# {
        return Err(format!("Unexpected start request {}", request));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    for expected in [
        "Total Requests: 5",
        "Failures: 1",
        "Error Rate: 20.00%",
        "Samples: 3",
    ] {
        if !stdout.contains(expected) {
            return Err(format!("Missing '{}' in summary\n{}", expected, describe(&output)));
        }
    }

    let exported =
        fs::read_to_string(&export_path).map_err(|err| format!("read export failed: {}", err))?;
    let value: serde_json::Value =
        serde_json::from_str(&exported).map_err(|err| format!("parse export failed: {}", err))?;
    if value.get("total_requests").and_then(serde_json::Value::as_u64) != Some(5) {
        return Err(format!("Unexpected export {}", exported));
    }
    Ok(())
}

#[test]
fn e2e_invalid_target_url_fails_without_connecting() -> Result<(), String> {
    let Some((backend_url, backend)) = spawn_ws_backend_or_skip(Vec::new())? else {
        return Ok(());
    };
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;

    let output = run_loadscope(
        dir.path(),
        ["-u", "not a url", "-b", backend_url.as_str(), "--no-charts"],
    )?;
    if output.status.success() {
        return Err(format!("Expected failure\n{}", describe(&output)));
    }
    if backend.start_request(Duration::from_millis(200)).is_some() {
        return Err("Invalid parameters must not reach the backend".to_owned());
    }
    Ok(())
}

#[test]
fn e2e_out_of_range_concurrency_fails() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let output = run_loadscope(
        dir.path(),
        [
            "-u",
            "http://localhost:3000",
            "-c",
            "501",
            "-b",
            "ws://127.0.0.1:9/stress-test",
            "--no-charts",
        ],
    )?;
    if output.status.success() {
        return Err(format!("Expected failure\n{}", describe(&output)));
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.contains("concurrency") {
        return Err(format!("Expected the field name in the error\n{}", describe(&output)));
    }
    Ok(())
}

#[test]
fn e2e_backend_closing_early_fails() -> Result<(), String> {
    let frames = vec![
        r#"{"success":1,"failures":0,"resource_usage":[{"timestamp":"2024-01-01T00:00:00Z","response_time":0.1}]}"#.to_owned(),
    ];
    let Some((backend_url, _backend)) = spawn_ws_backend_or_skip(frames)? else {
        return Ok(());
    };
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;

    let output = run_loadscope(
        dir.path(),
        [
            "-u",
            "http://localhost:3000",
            "-b",
            backend_url.as_str(),
            "--no-charts",
            "--connect-timeout",
            "2s",
        ],
    )?;
    if output.status.success() {
        return Err(format!("Expected failure\n{}", describe(&output)));
    }
    Ok(())
}

#[test]
fn e2e_config_file_supplies_target() -> Result<(), String> {
    let frames = vec![
        r#"{"total_requests":1,"success":1,"failures":0,"resource_usage":[{"timestamp":"2024-01-01T00:00:00Z","response_time":0.05}]}"#.to_owned(),
    ];
    let Some((backend_url, backend)) = spawn_ws_backend_or_skip(frames)? else {
        return Ok(());
    };
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let config = format!(
        "backend = \"{}\"\nurl = \"http://from-config.test\"\nrequests = 1\nconcurrency = 1\nno_charts = true\n",
        backend_url
    );
    fs::write(dir.path().join("loadscope.toml"), config)
        .map_err(|err| format!("write config failed: {}", err))?;

    let output = run_loadscope(dir.path(), ["--no-summary"])?;
    if !output.status.success() {
        return Err(describe(&output));
    }
    let request = backend
        .start_request(Duration::from_secs(1))
        .ok_or("Backend never received a start request")?;
    if !request.contains("http://from-config.test") {
        return Err(format!("Unexpected start request {}", request));
    }
    if String::from_utf8_lossy(&output.stdout).contains("Total Requests") {
        return Err("Summary should be suppressed".to_owned());
    }
    Ok(())
}
