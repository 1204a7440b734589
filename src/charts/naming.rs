use std::path::{Path, PathBuf};

use chrono::{Datelike, Local, Timelike};

/// `<charts_path>/run-YYYY-MM-DD_HH-MM-SS_<host>-<port>`
#[must_use]
pub fn resolve_chart_output_dir(charts_path: &str, target_url: &str) -> PathBuf {
    Path::new(charts_path).join(chart_run_dir_name(target_url))
}

fn chart_run_dir_name(target_url: &str) -> String {
    let now = Local::now();
    let stamp = format!(
        "{:04}-{:02}-{:02}_{:02}-{:02}-{:02}",
        now.year(),
        now.month(),
        now.day(),
        now.hour(),
        now.minute(),
        now.second()
    );
    format!("run-{}_{}", stamp, target_host_port_segment(target_url))
}

pub(super) fn target_host_port_segment(target_url: &str) -> String {
    if let Ok(parsed) = url::Url::parse(target_url.trim())
        && let Some(host) = parsed.host_str()
    {
        let port = parsed.port_or_known_default().unwrap_or(0);
        return sanitize_host_port(host, port);
    }

    "unknown-host-0".to_owned()
}

fn sanitize_segment(input: &str) -> String {
    input
        .chars()
        .map(|ch| match ch {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' => ch,
            _ => '-',
        })
        .collect()
}

fn sanitize_host_port(host: &str, port: u16) -> String {
    let sanitized_host = sanitize_segment(host);
    let resolved_host = if sanitized_host.is_empty() {
        "unknown-host".to_owned()
    } else {
        sanitized_host
    };
    format!("{}-{}", resolved_host, port)
}
