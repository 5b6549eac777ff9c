use serde_json::Value;

use crate::cli::OutputFormat;

/// Output a success message in the appropriate format
pub fn output_success(output_format: &OutputFormat, message: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "message": message }))?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Print a JSON value as-is
pub fn output_value(output_format: &OutputFormat, value: &Value) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => println!("{}", serde_json::to_string(value)?),
    }
    Ok(())
}

/// Output the travel log collection: full JSON, or one summary line per log
pub fn output_logs(output_format: &OutputFormat, logs: &Value) -> anyhow::Result<()> {
    let entries = logs.as_array().map(Vec::as_slice).unwrap_or_default();

    match output_format {
        OutputFormat::Json => output_value(output_format, logs)?,
        OutputFormat::Text if entries.is_empty() => println!("No travel logs."),
        OutputFormat::Text => {
            for log in entries {
                println!("{}", summary_line(log));
            }
        }
    }
    Ok(())
}

fn summary_line(log: &Value) -> String {
    let field = |name: &str| log.get(name).and_then(Value::as_str).unwrap_or("-").to_string();
    let rating = log
        .get("rating")
        .and_then(Value::as_f64)
        .map(|r| format!("{}/10", r))
        .unwrap_or_else(|| "-".to_string());

    format!(
        "{}  {}  {}  {}",
        field("_id"),
        field("title"),
        field("visitDate"),
        rating
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn summarizes_a_log() {
        let log = json!({
            "_id": "7f1f3c1e-8f0e-4a3b-9a55-0c6e2d4b9f10",
            "title": "Kyoto",
            "visitDate": "2024-04-02T00:00:00Z",
            "rating": 8.5
        });
        assert_eq!(
            summary_line(&log),
            "7f1f3c1e-8f0e-4a3b-9a55-0c6e2d4b9f10  Kyoto  2024-04-02T00:00:00Z  8.5/10"
        );
        assert_eq!(summary_line(&json!({})), "-  -  -  -");
    }
}
