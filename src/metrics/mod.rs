mod channel_metrics;
mod video_list_metrics;

use serde::Serialize;

use crate::{
    error::{Error, Result},
    youtube::Client,
};

pub use channel_metrics::{bare_handle, ChannelInfo};
pub use video_list_metrics::RecentVideoMetrics;

pub const DEFAULT_RECENT_VIDEOS: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelMetrics {
    pub channel_name: String,
    pub channel_handle: String,
    pub subscribers: u64,
    pub total_views: u64,
    pub total_videos: u64,
    pub avg_recent_views: u64,
    pub avg_recent_likes: u64,
    pub thumbnail_url: String,
}

impl ChannelMetrics {
    pub fn new(info: ChannelInfo, recent: RecentVideoMetrics) -> Self {
        Self {
            channel_name: info.name,
            channel_handle: info.handle,
            subscribers: info.subscribers,
            total_views: info.total_views,
            total_videos: info.total_videos,
            avg_recent_views: recent.avg_views,
            avg_recent_likes: recent.avg_likes,
            thumbnail_url: info.thumbnail_url,
        }
    }
}

/// Resolves a handle into a [`ChannelMetrics`] with three sequential calls:
/// channel lookup, uploads playlist listing, video statistics.
///
/// The `fetch_*` methods never fail. Each step logs its own error and falls
/// back to `None` or zero averages. The `try_*` methods surface the error
/// instead.
#[derive(Debug, Clone)]
pub struct ChannelMetricsFetcher {
    client: Client,
    recent_videos: u32,
    strict: bool,
}

impl ChannelMetricsFetcher {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            recent_videos: DEFAULT_RECENT_VIDEOS,
            strict: false,
        }
    }

    /// Number of uploads to average over.
    pub fn recent_videos(mut self, count: u32) -> Self {
        self.recent_videos = count;
        self
    }

    /// When set, failures of the playlist and statistics steps abort the
    /// fetch instead of being reported as zero averages.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub async fn fetch_channel_metrics(&self, handle: &str) -> Option<ChannelMetrics> {
        match self.try_fetch_channel_metrics(handle).await {
            Ok(metrics) => Some(metrics),
            Err(error) => {
                tracing::error!(%error, "error fetching channel data");
                None
            }
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn try_fetch_channel_metrics(&self, handle: &str) -> Result<ChannelMetrics> {
        let handle = bare_handle(handle);

        let channel = self
            .client
            .channel_by_handle(handle)
            .await?
            .ok_or_else(|| Error::ChannelNotFound(handle.to_string()))?;

        let info = ChannelInfo::new(handle, channel);
        tracing::info!(
            channel = %info.name,
            subscribers = info.subscribers,
            "channel found"
        );

        let recent = if self.strict {
            self.try_recent_video_averages(&info.uploads_playlist_id)
                .await?
        } else {
            self.fetch_recent_video_averages(&info.uploads_playlist_id)
                .await
        };

        Ok(ChannelMetrics::new(info, recent))
    }

    pub async fn fetch_recent_video_averages(&self, playlist_id: &str) -> RecentVideoMetrics {
        self.try_recent_video_averages(playlist_id)
            .await
            .unwrap_or_else(|error| {
                tracing::warn!(%error, playlist_id, "error fetching video metrics, reporting zero");
                RecentVideoMetrics::default()
            })
    }

    #[tracing::instrument(skip(self))]
    pub async fn try_recent_video_averages(&self, playlist_id: &str) -> Result<RecentVideoMetrics> {
        let video_ids = self
            .client
            .playlist_items(playlist_id, self.recent_videos)
            .await?
            .into_iter()
            .map(|item| item.snippet.resource_id.video_id)
            .collect::<Vec<_>>();

        if video_ids.is_empty() {
            tracing::info!("no recent videos");
            return Ok(RecentVideoMetrics::default());
        }

        if self.strict {
            self.try_video_statistics(&video_ids).await
        } else {
            Ok(self.fetch_video_statistics(&video_ids).await)
        }
    }

    pub async fn fetch_video_statistics(&self, video_ids: &[String]) -> RecentVideoMetrics {
        self.try_video_statistics(video_ids)
            .await
            .unwrap_or_else(|error| {
                tracing::warn!(%error, "error getting video statistics, reporting zero");
                RecentVideoMetrics::default()
            })
    }

    #[tracing::instrument(skip_all, fields(videos = video_ids.len()))]
    pub async fn try_video_statistics(&self, video_ids: &[String]) -> Result<RecentVideoMetrics> {
        if video_ids.is_empty() {
            return Ok(RecentVideoMetrics::default());
        }

        let videos = self.client.videos(video_ids).await?;
        let metrics = RecentVideoMetrics::from_statistics(video_ids.len(), &videos);

        tracing::info!(
            avg_views = metrics.avg_views,
            avg_likes = metrics.avg_likes,
            "recent videos analyzed"
        );

        Ok(metrics)
    }
}
