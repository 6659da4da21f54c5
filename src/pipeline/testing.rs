//! In-memory fakes for the network seams.

use crate::api::LanguageModel;
use crate::error::ApiError;
use crate::models::{ArticleSource, NewsArticle};
use crate::sources::NewsSearch;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Replies with queued results in order, then `EmptyReply` forever.
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Result<String, ApiError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn new(replies: Vec<Result<String, ApiError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self::new(Vec::new())
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl LanguageModel for ScriptedModel {
    fn model_name(&self) -> &str {
        "scripted-flash"
    }

    async fn generate(&self, prompt: &str) -> Result<String, ApiError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ApiError::EmptyReply))
    }
}

/// Scripted outcome of one search call.
pub enum Reply {
    Articles(Vec<NewsArticle>),
    Status(u16),
}

/// Answers searches from a `(query, country)` table; unknown pairs return no articles.
#[derive(Default)]
pub struct RecordingSearch {
    replies: HashMap<(String, Option<String>), Reply>,
    calls: Mutex<Vec<(String, Option<String>)>>,
}

impl RecordingSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, query: &str, country: Option<&str>, reply: Reply) -> Self {
        self.replies
            .insert((query.to_string(), country.map(str::to_string)), reply);
        self
    }

    pub fn calls(&self) -> Vec<(String, Option<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl NewsSearch for RecordingSearch {
    async fn search(
        &self,
        query: &str,
        country: Option<&str>,
    ) -> Result<Vec<NewsArticle>, ApiError> {
        let key = (query.to_string(), country.map(str::to_string));
        self.calls.lock().unwrap().push(key.clone());
        match self.replies.get(&key) {
            Some(Reply::Articles(articles)) => Ok(articles.clone()),
            Some(Reply::Status(status)) => Err(ApiError::Status {
                status: *status,
                body: "scripted".to_string(),
            }),
            None => Ok(Vec::new()),
        }
    }
}

pub fn article(source: &str, title: &str, description: &str) -> NewsArticle {
    NewsArticle {
        title: Some(title.to_string()),
        description: Some(description.to_string()),
        source: Some(ArticleSource {
            name: Some(source.to_string()),
            url: None,
        }),
        ..Default::default()
    }
}

/// A well-formed analysis reply body.
pub const ANALYSIS_JSON: &str = r#"{
    "topic": "EU AI Act",
    "critic": { "title": "Compliance Burden", "points": ["Costly audits", "Vague scope", "Slower launches"] },
    "facts": { "title": "Status", "points": ["Adopted 2024", "Risk tiers", "Phased rollout"] },
    "proponent": { "title": "Trust", "points": ["Safer models", "Clear rules", "Consumer rights"] }
}"#;

/// Serve `status` and `body` to every connection on a local port. Returns the base URL.
pub async fn canned_http(status: u16, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            read_request(&mut stream).await;
            let response = format!(
                "HTTP/1.1 {status} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    });
    format!("http://{addr}")
}

/// Consume request headers and a `Content-Length` body.
async fn read_request(stream: &mut tokio::net::TcpStream) {
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        let Ok(n) = stream.read(&mut buf).await else { return };
        if n == 0 {
            return;
        }
        data.extend_from_slice(&buf[..n]);
        let text = String::from_utf8_lossy(&data);
        if let Some(end) = text.find("\r\n\r\n") {
            let body_len = text[..end]
                .lines()
                .find_map(|l| {
                    let (name, value) = l.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if data.len() >= end + 4 + body_len {
                return;
            }
        }
    }
}

/// Base URL of a local port with nothing listening.
pub async fn closed_port() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
