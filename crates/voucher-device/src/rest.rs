//! RouterOS REST Client
//!
//! Talks to the RouterOS v7 REST API (`/rest/...`). Credentials come from
//! process configuration and ride on every request as HTTP Basic auth, so
//! each command is individually authenticated. There is no session to hold
//! open, which keeps concurrent issuance calls from interleaving login
//! state on the device.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{DeviceError, Result};
use crate::model::{ActiveSession, HotspotUser};
use crate::DeviceClient;

/// RouterOS connection configuration
#[derive(Clone, Debug)]
pub struct DeviceConfig {
    /// Router address
    pub host: String,

    /// REST API port (80 for www, 443 for www-ssl)
    pub port: u16,

    /// Admin username
    pub username: String,

    /// Admin password
    pub password: String,

    /// Use HTTPS; router boxes rarely carry trusted certificates, so the
    /// certificate is not verified when this is on
    pub tls: bool,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            host: "192.168.1.10".into(),
            port: 80,
            username: "admin".into(),
            password: String::new(),
            tls: false,
        }
    }
}

impl DeviceConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let host = std::env::var("MIKROTIK_HOST").unwrap_or(defaults.host);
        let port = std::env::var("MIKROTIK_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);
        let username = std::env::var("MIKROTIK_USER").unwrap_or(defaults.username);
        let password = std::env::var("MIKROTIK_PASS").unwrap_or(defaults.password);
        let tls = std::env::var("MIKROTIK_TLS")
            .map(|v| v == "true")
            .unwrap_or(false);

        Self {
            host,
            port,
            username,
            password,
            tls,
        }
    }

    /// REST base URL, e.g. `http://192.168.1.10:80/rest`
    fn base_url(&self) -> String {
        let scheme = if self.tls { "https" } else { "http" };
        format!("{scheme}://{}:{}/rest", self.host, self.port)
    }
}

/// Error body RouterOS returns for rejected commands
#[derive(Debug, Deserialize)]
struct RestErrorBody {
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// RouterOS REST API client
pub struct RouterOsClient {
    http: reqwest::Client,
    config: DeviceConfig,
    base_url: String,
}

impl RouterOsClient {
    /// Create a new client for the configured router
    pub fn new(config: DeviceConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(config.tls)
            .build()?;
        let base_url = config.base_url();

        Ok(Self {
            http,
            config,
            base_url,
        })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(DeviceConfig::from_env())
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// Map a non-2xx reply to `Auth` or `Command`
    async fn reject(response: reqwest::Response) -> DeviceError {
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return DeviceError::Auth(format!(
                "router returned {status} for configured credentials"
            ));
        }

        let detail = match response.json::<RestErrorBody>().await {
            Ok(body) => body
                .detail
                .or(body.message)
                .unwrap_or_else(|| "no detail".into()),
            Err(_) => "no detail".into(),
        };

        DeviceError::Command {
            status: status.as_u16(),
            detail,
        }
    }
}

#[async_trait]
impl DeviceClient for RouterOsClient {
    async fn add_hotspot_user(&self, user: &HotspotUser) -> Result<()> {
        let url = format!("{}/ip/hotspot/user", self.base_url);

        let response = self
            .http
            .put(&url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .json(user)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::reject(response).await);
        }

        tracing::debug!(name = %user.name, profile = %user.profile, "Hotspot user added");
        Ok(())
    }

    async fn active_sessions(&self) -> Result<Vec<ActiveSession>> {
        let url = format!("{}/ip/hotspot/active", self.base_url);

        let response = self
            .http
            .get(&url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::reject(response).await);
        }

        let sessions = response.json::<Vec<ActiveSession>>().await?;
        Ok(sessions)
    }

    fn name(&self) -> &str {
        "RouterOS"
    }
}
