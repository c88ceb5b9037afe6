use std::io;

use serde_json::Value;

use super::dashboard_text::render_summary_line;

pub fn render_watch(data: &Value) -> io::Result<String> {
    let cycles = data
        .get("cycles")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("watch output requires cycles"))?;

    let mut lines = Vec::with_capacity(cycles.len());
    for cycle in cycles {
        let number = cycle.get("cycle").and_then(Value::as_u64).unwrap_or(0);
        let outcome = cycle.get("outcome").and_then(Value::as_str).unwrap_or("");
        let detail = match outcome {
            "skipped" => "skipped, previous refresh still running".to_string(),
            _ => snapshot_detail(cycle.get("snapshot").unwrap_or(&Value::Null)),
        };
        lines.push(format!("Refresh {number}: {detail}"));
    }

    Ok(lines.join("\n"))
}

fn snapshot_detail(snapshot: &Value) -> String {
    match snapshot.get("status").and_then(Value::as_str) {
        Some("ready") => render_summary_line(snapshot.get("dashboard").unwrap_or(&Value::Null)),
        Some("failed") => {
            let code = snapshot.get("code").and_then(Value::as_str).unwrap_or("");
            format!("{} ({code})", pocketdash_client::RENDER_FAILURE_PLACEHOLDER)
        }
        _ => "no snapshot".to_string(),
    }
}
