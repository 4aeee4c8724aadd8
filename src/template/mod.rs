//! The three extension points every request template provides.
//!
//! A template knows how to enumerate the requests of a batch, how to turn
//! one enumerated item into request parameters for either client, and how
//! to perform one request on the batch's shared [`Session`]. The drivers in
//! [`crate::request`] do the rest.

pub mod audio;
pub mod indexed;

use futures::future::BoxFuture;
use serde_json::Value;

use crate::error::Result;
use crate::network::Session;
use crate::request::{ClientMode, RequestParams, TemplateConfig};

pub use audio::{AudioArgs, AudioUploadTemplate};
pub use indexed::IndexedTemplate;

/// Lazy, finite sequence of per-request arguments.
pub type RequestArgs<'a, A> = Box<dyn Iterator<Item = Result<A>> + 'a>;

pub trait RequestTemplate: Sync {
    type Args: Send + 'static;

    fn config(&self) -> &TemplateConfig;

    /// Builds the parameters for one request in the shape `mode`'s client
    /// expects.
    fn build_params(&self, args: &Self::Args, mode: ClientMode) -> Result<RequestParams>;

    /// Performs one request on the shared session and returns the decoded body.
    ///
    /// Unexpected statuses are logged, not returned as errors.
    fn send_request<'a>(
        &'a self,
        session: &'a Session,
        args: Self::Args,
    ) -> BoxFuture<'a, Result<Value>>;

    fn request_args(&self) -> Result<RequestArgs<'_, Self::Args>>;
}
