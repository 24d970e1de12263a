//! In-process stand-in for the YouTube Data API.

#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

pub const API_KEY: &str = "test-key";

/// Canned response for one endpoint.
#[derive(Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub body: Value,
}

impl Reply {
    pub fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    pub fn error(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            body: json!({ "error": { "code": status.as_u16(), "message": message } }),
        }
    }
}

#[derive(Clone)]
struct MockState {
    replies: Arc<HashMap<&'static str, Reply>>,
    requests: Arc<Mutex<Vec<(String, HashMap<String, String>)>>>,
}

pub struct MockApi {
    pub base_url: String,
    requests: Arc<Mutex<Vec<(String, HashMap<String, String>)>>>,
}

impl MockApi {
    /// Serves `channels`, `playlistItems` and `videos` on an ephemeral port.
    /// Endpoints without a reply answer 404.
    pub async fn start(replies: impl IntoIterator<Item = (&'static str, Reply)>) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            replies: Arc::new(replies.into_iter().collect()),
            requests: requests.clone(),
        };

        let router = Router::new()
            .route("/youtube/v3/:endpoint", get(respond))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });

        Self {
            base_url: format!("http://{addr}/youtube/v3"),
            requests,
        }
    }

    /// Query strings received for `endpoint`, in arrival order.
    pub fn requests(&self, endpoint: &str) -> Vec<HashMap<String, String>> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(name, _)| name == endpoint)
            .map(|(_, query)| query.clone())
            .collect()
    }
}

async fn respond(
    State(state): State<MockState>,
    axum::extract::Path(endpoint): axum::extract::Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    state
        .requests
        .lock()
        .unwrap()
        .push((endpoint.clone(), query));

    match state.replies.get(endpoint.as_str()) {
        Some(reply) => (reply.status, Json(reply.body.clone())),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": { "code": 404, "message": "no such endpoint" } })),
        ),
    }
}

pub fn channel_reply(uploads: &str) -> Reply {
    Reply::ok(json!({
        "kind": "youtube#channelListResponse",
        "pageInfo": { "totalResults": 1, "resultsPerPage": 5 },
        "items": [{
            "kind": "youtube#channel",
            "id": "UCrust",
            "snippet": {
                "title": "Rust Talks",
                "thumbnails": {
                    "default": { "url": "https://yt3.example/default.jpg" },
                    "medium": { "url": "https://yt3.example/medium.jpg" }
                }
            },
            "statistics": {
                "viewCount": "987654",
                "subscriberCount": "1500",
                "hiddenSubscriberCount": false,
                "videoCount": "42"
            },
            "contentDetails": { "relatedPlaylists": { "likes": "", "uploads": uploads } }
        }]
    }))
}

pub fn no_channel_reply() -> Reply {
    Reply::ok(json!({
        "kind": "youtube#channelListResponse",
        "pageInfo": { "totalResults": 0, "resultsPerPage": 5 }
    }))
}

pub fn playlist_reply(video_ids: &[&str]) -> Reply {
    let items = video_ids
        .iter()
        .map(|id| {
            json!({
                "kind": "youtube#playlistItem",
                "snippet": {
                    "title": format!("video {id}"),
                    "resourceId": { "kind": "youtube#video", "videoId": id }
                }
            })
        })
        .collect::<Vec<_>>();

    Reply::ok(json!({ "kind": "youtube#playlistItemListResponse", "items": items }))
}

/// `(id, viewCount, likeCount)`; `None` leaves the counter out.
pub fn videos_reply(videos: &[(&str, Option<&str>, Option<&str>)]) -> Reply {
    let items = videos
        .iter()
        .map(|(id, views, likes)| {
            let mut statistics = serde_json::Map::new();
            if let Some(views) = views {
                statistics.insert("viewCount".to_string(), json!(views));
            }
            if let Some(likes) = likes {
                statistics.insert("likeCount".to_string(), json!(likes));
            }
            statistics.insert("commentCount".to_string(), json!("0"));

            json!({ "kind": "youtube#video", "id": id, "statistics": statistics })
        })
        .collect::<Vec<_>>();

    Reply::ok(json!({ "kind": "youtube#videoListResponse", "items": items }))
}
