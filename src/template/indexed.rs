use futures::future::{BoxFuture, FutureExt};
use serde_json::Value;

use crate::error::Result;
use crate::network::Session;
use crate::request::{execute_pooled, ClientMode, RequestParams, TemplateConfig};
use crate::template::{RequestArgs, RequestTemplate};

/// Appends a numeric index to the base URL, e.g. `http://host/async/` +
/// `3`, for indices `1..n_task`.
#[derive(Debug, Clone)]
pub struct IndexedTemplate {
    config: TemplateConfig,
    n_task: usize,
}

impl IndexedTemplate {
    pub fn new(base_url: &str, method: &str, n_task: usize) -> Result<Self> {
        Ok(Self::with_config(TemplateConfig::new(base_url, method, 0)?, n_task))
    }

    pub fn with_config(config: TemplateConfig, n_task: usize) -> Self {
        Self { config, n_task }
    }

    pub fn url_for(&self, idx: usize) -> String {
        format!("{}{}", self.config.base_url, idx)
    }
}

impl RequestTemplate for IndexedTemplate {
    type Args = usize;

    fn config(&self) -> &TemplateConfig {
        &self.config
    }

    fn build_params(&self, idx: &usize, _mode: ClientMode) -> Result<RequestParams> {
        Ok(RequestParams::new(self.url_for(*idx)))
    }

    fn send_request<'a>(
        &'a self,
        session: &'a Session,
        idx: usize,
    ) -> BoxFuture<'a, Result<Value>> {
        async move {
            let params = self.build_params(&idx, ClientMode::Pooled)?;
            let response = execute_pooled(session, self.config.method, params).await?;
            response.warn_unless_ok();
            Ok(response.body)
        }
        .boxed()
    }

    fn request_args(&self) -> Result<RequestArgs<'_, usize>> {
        // exclusive upper bound: n_task - 1 requests
        Ok(Box::new((1..self.n_task).map(Ok)))
    }
}
