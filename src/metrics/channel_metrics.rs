use crate::youtube::resources::Channel;

/// Strips surrounding whitespace and any leading `@`, so `name` and `@name`
/// address the same channel.
pub fn bare_handle(input: &str) -> &str {
    input.trim().trim_start_matches('@')
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelInfo {
    pub name: String,
    pub handle: String,
    pub subscribers: u64,
    pub total_views: u64,
    pub total_videos: u64,
    pub thumbnail_url: String,
    pub uploads_playlist_id: String,
}

impl ChannelInfo {
    pub fn new(handle: &str, channel: Channel) -> Self {
        let Channel {
            snippet,
            statistics,
            content_details,
        } = channel;

        Self {
            name: snippet.title,
            handle: format!("@{}", bare_handle(handle)),
            subscribers: statistics.subscriber_count,
            total_views: statistics.view_count,
            total_videos: statistics.video_count,
            thumbnail_url: snippet.thumbnails.medium.url,
            uploads_playlist_id: content_details.related_playlists.uploads,
        }
    }
}
