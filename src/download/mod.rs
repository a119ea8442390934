//! Download management: fetching, packaging and the request lifecycle

pub mod archive;
pub mod error;
pub mod fetcher;
pub mod lifecycle;
pub mod request;
pub mod ytdlp;
pub mod ytdlp_errors;

// Re-exports for convenience
pub use archive::PackagedOutput;
pub use error::DownloadError;
pub use fetcher::MediaFetcher;
pub use lifecycle::{RequestCoordinator, RequestOutcome, RequestState};
pub use request::{DownloadRequest, FormatChoice, FormatIntent};
pub use ytdlp::YtDlpFetcher;
