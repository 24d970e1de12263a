use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub snippet: ChannelSnippet,
    pub statistics: ChannelStatistics,
    pub content_details: ChannelContentDetails,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelSnippet {
    pub title: String,
    pub thumbnails: Thumbnails,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thumbnails {
    pub medium: Thumbnail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStatistics {
    #[serde(deserialize_with = "count")]
    pub subscriber_count: u64,
    #[serde(deserialize_with = "count")]
    pub view_count: u64,
    #[serde(deserialize_with = "count")]
    pub video_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelContentDetails {
    pub related_playlists: RelatedPlaylists,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelatedPlaylists {
    pub uploads: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItem {
    pub snippet: PlaylistItemSnippet,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemSnippet {
    pub resource_id: ResourceId,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    pub video_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Video {
    pub id: String,
    #[serde(default)]
    pub statistics: VideoStatistics,
}

/// Per-video counters. The API omits a counter when the owner hides it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatistics {
    #[serde(default, deserialize_with = "optional_count")]
    pub view_count: Option<u64>,
    #[serde(default, deserialize_with = "optional_count")]
    pub like_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
}

// counts are sent as decimal strings ("subscriberCount": "1234")
#[derive(Deserialize)]
#[serde(untagged)]
enum RawCount {
    Number(u64),
    Text(String),
}

impl RawCount {
    fn into_count<E: serde::de::Error>(self) -> Result<u64, E> {
        match self {
            RawCount::Number(n) => Ok(n),
            RawCount::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid count {text:?}"))),
        }
    }
}

fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    RawCount::deserialize(deserializer)?.into_count()
}

fn optional_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    Option::<RawCount>::deserialize(deserializer)?
        .map(RawCount::into_count)
        .transpose()
}
