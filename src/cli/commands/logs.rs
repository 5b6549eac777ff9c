use std::io::Read;

use anyhow::Context;
use serde_json::Value;

use crate::cli::client::LogClient;
use crate::cli::utils::{output_logs, output_success, output_value};
use crate::cli::OutputFormat;

pub async fn health(client: &LogClient, output_format: OutputFormat) -> anyhow::Result<()> {
    let (status, body) = client.health().await?;
    output_value(&output_format, &body)?;
    if !status.is_success() {
        anyhow::bail!("server reported {}", status);
    }
    Ok(())
}

pub async fn list(client: &LogClient, output_format: OutputFormat) -> anyhow::Result<()> {
    let logs = client.list().await?;
    output_logs(&output_format, &logs)
}

pub async fn create(
    client: &LogClient,
    data: Option<String>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let log = read_log(data)?;
    let created = client.create(log).await?;
    match output_format {
        OutputFormat::Json => output_value(&output_format, &created),
        OutputFormat::Text => {
            let id = created.get("_id").and_then(Value::as_str).unwrap_or("?");
            output_success(&output_format, &format!("Created travel log {}", id))
        }
    }
}

pub async fn update(
    client: &LogClient,
    id: &str,
    data: Option<String>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let log = read_log(data)?;
    let response = client.update(id, log).await?;
    output_message(&output_format, &response)
}

pub async fn delete(client: &LogClient, id: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let response = client.delete(id).await?;
    output_message(&output_format, &response)
}

fn output_message(output_format: &OutputFormat, response: &Value) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => output_value(output_format, response),
        OutputFormat::Text => {
            let message = response.get("message").and_then(Value::as_str).unwrap_or("Done.");
            output_success(output_format, message)
        }
    }
}

/// Travel log JSON from `--data`, or from stdin when the flag is absent
fn read_log(data: Option<String>) -> anyhow::Result<Value> {
    let raw = match data {
        Some(data) => data,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read travel log from stdin")?;
            buffer
        }
    };
    serde_json::from_str(&raw).context("travel log is not valid JSON")
}
