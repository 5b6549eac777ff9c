use anyhow::{bail, Context, Result};
use reqwest::{Client, Method, StatusCode};
use serde_json::{json, Map, Value};

/// Thin HTTP client for the /api/logs endpoint
pub struct LogClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl LogClient {
    pub fn new(server: &str, api_key: Option<String>) -> Result<Self> {
        let base = url::Url::parse(server).with_context(|| format!("invalid server URL: {}", server))?;
        Ok(Self {
            http: Client::new(),
            base_url: base.as_str().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub async fn health(&self) -> Result<(StatusCode, Value)> {
        let res = self.http.get(format!("{}/health", self.base_url)).send().await?;
        let status = res.status();
        Ok((status, res.json().await?))
    }

    pub async fn list(&self) -> Result<Value> {
        self.send(Method::GET, None).await
    }

    pub async fn create(&self, log: Value) -> Result<Value> {
        let body = self.with_api_key(log)?;
        self.send(Method::POST, Some(body)).await
    }

    pub async fn update(&self, id: &str, log: Value) -> Result<Value> {
        let mut body = self.with_api_key(log)?;
        if let Value::Object(map) = &mut body {
            map.insert("logID".to_string(), json!(id));
        }
        self.send(Method::PATCH, Some(body)).await
    }

    pub async fn delete(&self, id: &str) -> Result<Value> {
        self.send(Method::DELETE, Some(json!({ "logID": id }))).await
    }

    fn with_api_key(&self, log: Value) -> Result<Value> {
        let mut body: Map<String, Value> = match log {
            Value::Object(map) => map,
            _ => bail!("travel log must be a JSON object"),
        };
        let api_key = self
            .api_key
            .as_deref()
            .context("an API key is required: pass --api-key or set API_KEY")?;
        body.insert("apiKey".to_string(), json!(api_key));
        Ok(Value::Object(body))
    }

    async fn send(&self, method: Method, body: Option<Value>) -> Result<Value> {
        let mut request = self.http.request(method, format!("{}/api/logs", self.base_url));
        if let Some(body) = body {
            request = request.json(&body);
        }

        let res = request.send().await?;
        let status = res.status();
        let value: Value = res.json().await.unwrap_or(Value::Null);

        if !status.is_success() {
            let message = value
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("request failed");
            bail!("{} ({})", message, status);
        }
        Ok(value)
    }
}
