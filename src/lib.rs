pub mod error;
pub mod metrics;
pub mod youtube;

pub use error::{Error, Result};
pub use metrics::{ChannelMetrics, ChannelMetricsFetcher};
