//! Fan out many parameterized HTTP requests against one endpoint through a
//! single pooled client, and collect the JSON bodies in submission order.
//!
//! Implement [`RequestTemplate`] for a type (or use [`IndexedTemplate`] /
//! [`AudioUploadTemplate`]) and hand it to one of the drivers:
//!
//! - [`dispatch_batch`] / [`fetch_requests`]: every request concurrently on
//!   one session, fail-fast.
//! - [`fetch_serial`]: every request one after another, blocking.
//! - [`fetch_single`]: one blocking request, for debugging a template.

pub mod debug;
pub mod direct;
pub mod error;
pub mod network;
pub mod request;
pub mod template;
pub mod utils;

pub use debug::{is_debug, set_debug};
pub use error::{Error, Result};
pub use network::{HttpVersion, Session};
pub use request::{
    dispatch_batch, fetch_requests, fetch_serial, fetch_single, ClientConfig, ClientMode,
    JsonResponse, RequestBody, RequestMethod, RequestParams, TemplateConfig,
};
pub use template::{AudioArgs, AudioUploadTemplate, IndexedTemplate, RequestArgs, RequestTemplate};
