use std::time::Duration;

use clap::Parser;

use super::*;
use crate::error::{AppError, AppResult, ValidationError};

fn parse(extra: &[&str]) -> AppResult<LoadscopeArgs> {
    let mut argv = vec!["loadscope"];
    argv.extend_from_slice(extra);
    Ok(LoadscopeArgs::try_parse_from(argv)?)
}

#[test]
fn defaults_match_the_dashboard_form() -> AppResult<()> {
    let args = parse(&[])?;
    if args.backend.as_str() != DEFAULT_BACKEND_URL {
        return Err(AppError::validation(format!(
            "Unexpected backend {}",
            args.backend
        )));
    }
    if args.requests != 100 || args.concurrency != 10 {
        return Err(AppError::validation("Unexpected default counts"));
    }
    if args.connect_timeout != Duration::from_secs(10) {
        return Err(AppError::validation("Unexpected default connect timeout"));
    }
    if args.charts_path != default_charts_path() || !args.charts_path.contains(".loadscope") {
        return Err(AppError::validation(format!(
            "Unexpected charts path {}",
            args.charts_path
        )));
    }
    if args.url.is_some() || args.no_charts || args.no_summary || args.verbose {
        return Err(AppError::validation("Unexpected default flags"));
    }
    Ok(())
}

#[test]
fn short_flags_are_parsed() -> AppResult<()> {
    let args = parse(&[
        "-u",
        "http://localhost:3000/health",
        "-n",
        "250",
        "-c",
        "25",
        "-b",
        "wss://backend.test/stress-test",
        "-v",
    ])?;
    let params = args.test_parameters();
    if params.target_url != "http://localhost:3000/health"
        || params.request_count != 250
        || params.concurrency != 25
    {
        return Err(AppError::validation(format!(
            "Unexpected parameters {:?}",
            params
        )));
    }
    if args.backend.scheme() != "wss" || !args.verbose {
        return Err(AppError::validation("Unexpected backend or verbosity"));
    }
    Ok(())
}

#[test]
fn out_of_range_counts_reach_the_session_unclamped() -> AppResult<()> {
    let args = parse(&["--url", "http://x.test", "--requests", "20000"])?;
    match args.test_parameters().validate() {
        Err(ValidationError::OutOfRange { value: 20_000, .. }) => Ok(()),
        Err(err) => Err(AppError::validation(format!("Unexpected error {}", err))),
        Ok(_) => Err(AppError::validation("Expected the range check to fail")),
    }
}

#[test]
fn backend_must_be_websocket() -> AppResult<()> {
    if parse(&["--backend", "http://localhost:8080"]).is_ok() {
        return Err(AppError::validation("Expected http backend to be rejected"));
    }
    match parse_backend_url("localhost:8080") {
        Err(
            ValidationError::InvalidBackendUrl { .. }
            | ValidationError::UnsupportedBackendScheme { .. },
        ) => {}
        other => {
            return Err(AppError::validation(format!(
                "Unexpected backend parse {:?}",
                other
            )));
        }
    }
    Ok(())
}

#[test]
fn duration_parser_accepts_units() -> AppResult<()> {
    let cases = [
        ("250ms", Duration::from_millis(250)),
        ("3", Duration::from_secs(3)),
        ("2m", Duration::from_secs(120)),
        ("1h", Duration::from_secs(3600)),
    ];
    for (input, expected) in cases {
        let parsed = parse_duration_arg(input)?;
        if parsed != expected {
            return Err(AppError::validation(format!(
                "Unexpected duration for {}: {:?}",
                input, parsed
            )));
        }
    }
    Ok(())
}

#[test]
fn duration_parser_rejects_bad_input() -> AppResult<()> {
    let cases = ["", "ms", "0s", "5d", "99999999999999999999s"];
    for input in cases {
        if parse_duration_arg(input).is_ok() {
            return Err(AppError::validation(format!(
                "Expected '{}' to be rejected",
                input
            )));
        }
    }
    if !matches!(parse_duration_arg("0"), Err(ValidationError::DurationZero)) {
        return Err(AppError::validation("Expected DurationZero"));
    }
    Ok(())
}
