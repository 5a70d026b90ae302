use serde::Deserialize;

/// Backend API connection settings.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiAppConfig {
    /// Origin (plus path prefix) every request targets. Default: "http://localhost:8000/api".
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds. Default: none, requests wait indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_api_base_url() -> String {
    "http://localhost:8000/api".into()
}

impl Default for ApiAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            timeout_secs: None,
        }
    }
}

impl ApiAppConfig {
    /// Join an endpoint path onto the base URL.
    pub fn url_for(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), endpoint)
    }
}

/// What a raw (multipart) form submission does when it fails.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RawFormErrorPolicy {
    /// Log the failure and show nothing.
    #[default]
    Silent,
    /// Log the failure and push an error notice to the surface.
    Notify,
}

/// Error surfacing settings.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ErrorPolicyConfig {
    #[serde(default)]
    pub raw_form: RawFormErrorPolicy,
}
