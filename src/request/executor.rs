use std::time::{Instant, SystemTime};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::debug::debug_log;
use crate::error::{Error, Result};
use crate::network::session::build_blocking_client;
use crate::network::Session;
use crate::request::concurrency::dispatch_batch;
use crate::request::{
    ClientMode, FilePart, FileSource, FormPart, RequestBody, RequestMethod, RequestParams,
};
use crate::template::RequestTemplate;
use crate::utils::format_elapsed;

/// A response whose body has already been decoded as JSON.
#[derive(Debug, Clone)]
pub struct JsonResponse {
    pub url: String,
    pub status: StatusCode,
    pub body: Value,
}

impl JsonResponse {
    /// Logs the body when the status is anything but 200. Never fails.
    pub fn warn_unless_ok(&self) {
        if self.status != StatusCode::OK {
            warn!(
                url = %self.url,
                status = %self.status,
                body = %self.body,
                "Unexpected response status"
            );
        }
    }
}

fn header_map(headers: &[(String, String)]) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (k, v) in headers {
        match (HeaderName::from_bytes(k.as_bytes()), HeaderValue::from_str(v)) {
            (Ok(name), Ok(value)) => {
                map.insert(name, value);
            }
            _ => warn!(header = %k, "Skipping invalid header"),
        }
    }
    map
}

fn decode(url: &str, bytes: &[u8]) -> Result<Value> {
    serde_json::from_slice(bytes).map_err(|source| Error::Decode { url: url.to_string(), source })
}

fn pooled_form(parts: Vec<FormPart>) -> reqwest::multipart::Form {
    use reqwest::multipart::{Form, Part};

    parts.into_iter().fold(Form::new(), |form, part| match part {
        FormPart::Text { name, value } => form.text(name, value),
        FormPart::File(FilePart { name, file_name, source }) => {
            let part = match source {
                FileSource::Handle { file, len } => {
                    let file = tokio::fs::File::from_std(file);
                    Part::stream_with_length(reqwest::Body::from(file), len)
                }
                FileSource::Bytes(bytes) => Part::bytes(bytes),
            };
            form.part(name, part.file_name(file_name))
        }
    })
}

fn blocking_form(
    files: Vec<FilePart>,
    data: Vec<(String, String)>,
) -> reqwest::blocking::multipart::Form {
    use reqwest::blocking::multipart::{Form, Part};

    let form = data.into_iter().fold(Form::new(), |form, (name, value)| form.text(name, value));
    files.into_iter().fold(form, |form, FilePart { name, file_name, source }| {
        let part = match source {
            FileSource::Handle { file, len } => Part::reader_with_length(file, len),
            FileSource::Bytes(bytes) => Part::bytes(bytes),
        };
        form.part(name, part.file_name(file_name))
    })
}

/// Issues one request on the shared session and decodes the JSON body.
///
/// Holds a connection slot from send until the body is fully read.
pub async fn execute_pooled(
    session: &Session,
    method: RequestMethod,
    params: RequestParams,
) -> Result<JsonResponse> {
    let RequestParams { url, headers, body } = params;

    let mut builder = session
        .client()
        .request(method.to_method(), &url)
        .headers(header_map(&headers));
    builder = match body {
        RequestBody::Empty => builder,
        RequestBody::Multipart(parts) => builder.multipart(pooled_form(parts)),
        RequestBody::FilesAndData { .. } => return Err(Error::ModeMismatch("pooled")),
    };

    let _permit = session.acquire().await;
    let started = SystemTime::now();
    debug!(method = %method, url = %url, "Sending pooled request");

    let response = builder.send().await?;
    let status = response.status();
    let response_headers = response.headers().clone();
    let bytes = response.bytes().await?;
    let body = decode(&url, &bytes)?;

    debug_log(method.as_str(), &url, status, &response_headers, &body, started);
    Ok(JsonResponse { url, status, body })
}

/// Blocking counterpart of [`execute_pooled`]. Must not be called from
/// inside an async runtime.
pub fn execute_blocking(
    client: &reqwest::blocking::Client,
    method: RequestMethod,
    params: RequestParams,
) -> Result<JsonResponse> {
    let RequestParams { url, headers, body } = params;

    let mut builder = client.request(method.to_method(), &url).headers(header_map(&headers));
    builder = match body {
        RequestBody::Empty => builder,
        RequestBody::FilesAndData { files, data } => builder.multipart(blocking_form(files, data)),
        RequestBody::Multipart(_) => return Err(Error::ModeMismatch("blocking")),
    };

    let started = SystemTime::now();
    debug!(method = %method, url = %url, "Sending blocking request");

    let response = builder.send()?;
    let status = response.status();
    let response_headers = response.headers().clone();
    let bytes = response.bytes()?;
    let body = decode(&url, &bytes)?;

    debug_log(method.as_str(), &url, status, &response_headers, &body, started);
    Ok(JsonResponse { url, status, body })
}

pub(crate) fn fetch_single_with<T: RequestTemplate>(
    client: &reqwest::blocking::Client,
    template: &T,
    args: T::Args,
) -> Result<Value> {
    let params = template.build_params(&args, ClientMode::Sync)?;
    let response = execute_blocking(client, template.config().method, params)?;
    response.warn_unless_ok();
    info!(url = %response.url, status = %response.status, body = %response.body, "Response");
    Ok(response.body)
}

/// Sends one request synchronously with the blocking client. Meant for
/// poking at a single request while debugging a template.
pub fn fetch_single<T: RequestTemplate>(template: &T, args: T::Args) -> Result<Value> {
    let client = build_blocking_client(&template.config().client)?;
    fetch_single_with(&client, template, args)
}

/// Runs one concurrent batch on a fresh single-threaded runtime and logs
/// the total wall time, runtime start-up included.
pub fn fetch_requests<T: RequestTemplate>(template: &T) -> Result<Vec<Value>> {
    let start = Instant::now();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(Error::Runtime)?;

    let results = runtime.block_on(dispatch_batch(template));
    info!("----- The entire program took {} seconds -----", format_elapsed(start.elapsed()));
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_headers_are_skipped() {
        let map = header_map(&[
            ("auth-key".to_string(), "blahblah".to_string()),
            ("bad header".to_string(), "x".to_string()),
            ("x-ok".to_string(), "line\nbreak".to_string()),
        ]);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("auth-key").unwrap(), "blahblah");
    }

    #[test]
    fn decode_reports_the_url() {
        let err = decode("http://localhost/x", b"not json").unwrap_err();
        assert!(matches!(err, Error::Decode { ref url, .. } if url == "http://localhost/x"));
        assert_eq!(decode("http://localhost/x", br#"{"a":1}"#).unwrap()["a"], 1);
    }

    #[test]
    fn blocking_rejects_pooled_shape() {
        let client = reqwest::blocking::Client::new();
        let params = RequestParams::new("http://127.0.0.1:9/")
            .with_body(RequestBody::Multipart(Vec::new()));
        let err = execute_blocking(&client, RequestMethod::Post, params).unwrap_err();
        assert!(matches!(err, Error::ModeMismatch("blocking")));
    }

    #[tokio::test]
    async fn pooled_rejects_sync_shape() {
        let session = Session::open(&crate::request::ClientConfig::default(), 0).unwrap();
        let params = RequestParams::new("http://127.0.0.1:9/")
            .with_body(RequestBody::FilesAndData { files: Vec::new(), data: Vec::new() });
        let err = execute_pooled(&session, RequestMethod::Post, params).await.unwrap_err();
        assert!(matches!(err, Error::ModeMismatch("pooled")));
    }
}
