use std::time::Duration;

use common::{ApiAppConfig, FieldValue, FormPayload};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, Response, Url, header};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::error::DispatchError;

/// Thin JSON client bound to a single API origin.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    config: ApiAppConfig,
}

impl ApiClient {
    pub fn new(config: ApiAppConfig) -> Result<Self, DispatchError> {
        Url::parse(&config.base_url)
            .map_err(|e| DispatchError::InvalidUrl(format!("{}: {e}", config.base_url)))?;

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(DispatchError::from)?;
        Ok(Self { http, config })
    }

    /// Send `body` as JSON to `endpoint` and return the parsed JSON reply.
    ///
    /// Any status outside 2xx is an error. Failures are logged before they
    /// are returned.
    pub async fn call(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<&Value>,
    ) -> Result<Value, DispatchError> {
        let result = self.call_inner(endpoint, method.clone(), body).await;
        if let Err(e) = &result {
            error!(%endpoint, %method, kind = e.kind(), error = %e, "API Call Error");
        }
        result
    }

    async fn call_inner(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<&Value>,
    ) -> Result<Value, DispatchError> {
        let url = self.config.url_for(endpoint);
        debug!(%url, %method, "Sending JSON request");

        let mut request = self
            .http
            .request(method, &url)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.body(serde_json::to_vec(body)?);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DispatchError::status(status));
        }

        read_json(response).await
    }

    /// Post `payload` as `multipart/form-data` and return the parsed JSON reply.
    ///
    /// The reply is parsed whatever the status code; a non-2xx status is
    /// only logged.
    pub async fn post_multipart(
        &self,
        endpoint: &str,
        payload: &FormPayload,
    ) -> Result<Value, DispatchError> {
        let url = self.config.url_for(endpoint);
        let form = build_multipart(payload)?;
        debug!(%url, fields = payload.len(), "Sending multipart request");

        let response = self.http.post(&url).multipart(form).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%url, %status, "Multipart upload returned non-success status");
        }

        read_json(response).await
    }
}

async fn read_json(response: Response) -> Result<Value, DispatchError> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn build_multipart(payload: &FormPayload) -> Result<Form, DispatchError> {
    let mut form = Form::new();
    for (name, value) in payload.entries() {
        form = match value {
            FieldValue::Text(text) => form.text(name.clone(), text.clone()),
            FieldValue::File(file) => {
                let part = Part::bytes(file.bytes.clone())
                    .file_name(file.file_name.clone())
                    .mime_str(&file.resolved_content_type())?;
                form.part(name.clone(), part)
            }
        };
    }
    Ok(form)
}
