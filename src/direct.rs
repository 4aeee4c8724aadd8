//! Single uploads without a template: one blocking call and one pooled call.

use std::path::PathBuf;

use serde_json::Value;
use tracing::info;

use crate::error::Result;
use crate::network::session::build_blocking_client;
use crate::network::Session;
use crate::request::{
    execute_blocking, execute_pooled, ClientConfig, ClientMode, RequestMethod, RequestParams,
};
use crate::template::audio::upload_body;

#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub url: String,
    pub audio_path: PathBuf,
    pub text: String,
    pub auth_key: String,
}

impl UploadRequest {
    fn params(&self, mode: ClientMode) -> Result<RequestParams> {
        let body = upload_body(&self.audio_path, self.text.clone(), mode)?;
        Ok(RequestParams::new(self.url.as_str())
            .with_headers(&[("auth-key".to_string(), self.auth_key.clone())])
            .with_body(body))
    }
}

/// POSTs the upload with the blocking client.
pub fn upload_blocking(request: &UploadRequest, config: &ClientConfig) -> Result<Value> {
    let client = build_blocking_client(config)?;
    let params = request.params(ClientMode::Sync)?;
    let response = execute_blocking(&client, RequestMethod::Post, params)?;
    response.warn_unless_ok();
    info!(url = %response.url, body = %response.body, "Blocking upload response");
    Ok(response.body)
}

/// POSTs the upload through a one-off unbounded session.
pub async fn upload_pooled(request: &UploadRequest, config: &ClientConfig) -> Result<Value> {
    let session = Session::open(config, 0)?;
    let params = request.params(ClientMode::Pooled)?;
    let response = execute_pooled(&session, RequestMethod::Post, params).await?;
    response.warn_unless_ok();
    info!(url = %response.url, body = %response.body, "Pooled upload response");
    Ok(response.body)
}
