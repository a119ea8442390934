//! Mock implementations of the coordinator's seams
//!
//! `MockFetcher` stands in for yt-dlp and writes real files into the request
//! directory; `MockTransport` records every outbound chat operation.

pub mod mock_fetcher;
pub mod mock_transport;

#[allow(unused_imports)]
pub use mock_fetcher::{MockFetcher, MockFetcherConfig};
#[allow(unused_imports)]
pub use mock_transport::{MockTransport, TransportCall};
