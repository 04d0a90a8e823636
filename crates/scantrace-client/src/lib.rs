pub mod cancel;
pub mod error;
pub mod http;
pub mod normalize;
pub mod poller;
pub mod schema;
pub mod transport;
pub mod watch;

pub use cancel::CancelToken;
pub use error::{Error, Result};
pub use http::HttpTransport;
pub use normalize::normalize_action;
pub use poller::{PollConfig, ScanOutcome, ScanPoller, ScanSnapshot, watch_scan};
pub use transport::{LaunchRequest, LaunchResponse, PollResponse, ScanTransport};
pub use watch::{ScanStream, WatchEvent, watch_scan_stream};
