pub mod http_version;
pub mod session;

pub use http_version::HttpVersion;
pub use session::Session;
