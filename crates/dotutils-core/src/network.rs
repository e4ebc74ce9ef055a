use crate::error::Result;
use reqwest::blocking::Client;
use std::time::Duration;

pub const DEFAULT_PACKAGE_INDEX: &str = "https://pypi.org/pypi";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Blocking HTTP access used by the network-backed checks. One attempt per
/// call, no retries; every failure is reported as a message.
#[derive(Debug, Clone)]
pub struct Network {
    client: Client,
    package_index: String,
}

impl Network {
    pub fn new(timeout: Duration, package_index: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            package_index: package_index.into().trim_end_matches('/').to_string(),
        })
    }

    /// HEAD `url`, following redirects. Reachable means a final status below 400.
    pub fn reachable(&self, url: &str) -> std::result::Result<(), String> {
        tracing::debug!(url, "HEAD");
        let resp = self.client.head(url).send().map_err(|e| e.to_string())?;
        let status = resp.status();
        if status.as_u16() < 400 {
            Ok(())
        } else {
            Err(format!("{url} answered with status {status}"))
        }
    }

    /// Latest released version of `package`, read from `info.version` of the
    /// index's JSON document.
    pub fn latest_version(&self, package: &str) -> std::result::Result<String, String> {
        let url = format!("{}/{}/json", self.package_index, package);
        tracing::debug!(url = %url, "GET");
        let resp = self.client.get(&url).send().map_err(|e| e.to_string())?;
        let status = resp.status();
        if !status.is_success() {
            return Err(format!("package '{package}' not found on index ({status})"));
        }
        let doc: serde_json::Value = resp.json().map_err(|e| e.to_string())?;
        doc.get("info")
            .and_then(|info| info.get("version"))
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| format!("no version found for package '{package}'"))
    }
}
