use derive_more::Add;
use serde::Serialize;

use crate::youtube::resources::Video;

#[derive(Default, Add)]
struct PartialVideoListMetrics {
    total_views: u64,
    total_likes: u64,
}

impl From<&Video> for PartialVideoListMetrics {
    fn from(video: &Video) -> Self {
        Self {
            total_views: video.statistics.view_count.unwrap_or(0),
            total_likes: video.statistics.like_count.unwrap_or(0),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecentVideoMetrics {
    pub avg_views: u64,
    pub avg_likes: u64,
}

impl RecentVideoMetrics {
    /// Floor-divides the summed counters of `videos` by the number of ids
    /// that were requested, not by the number the API returned.
    pub fn from_statistics(requested: usize, videos: &[Video]) -> Self {
        if requested == 0 {
            return Self::default();
        }

        let PartialVideoListMetrics {
            total_views,
            total_likes,
        } = videos
            .iter()
            .map(PartialVideoListMetrics::from)
            .fold(PartialVideoListMetrics::default(), |acc, x| acc + x);

        let requested = requested as u64;

        Self {
            avg_views: total_views / requested,
            avg_likes: total_likes / requested,
        }
    }
}
