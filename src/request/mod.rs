pub mod concurrency;
pub mod config;
pub mod executor;
pub mod method;
pub mod params;

pub use concurrency::{dispatch_batch, fetch_serial};
pub use config::{ClientConfig, TemplateConfig};
pub use executor::{execute_blocking, execute_pooled, fetch_requests, fetch_single, JsonResponse};
pub use method::RequestMethod;
pub use params::{ClientMode, FilePart, FileSource, FormPart, RequestBody, RequestParams};
