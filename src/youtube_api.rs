use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::env;
use std::time::Duration;
use tracing::warn;

use niche_radar::config::YoutubeConfig;
use niche_radar::Channel;

#[derive(Clone)]
pub struct YoutubeClient {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
}

impl YoutubeClient {
    pub fn new(api_key: String, config: &YoutubeConfig) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|err| format!("failed to build youtube client: {}", err))?;
        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: decode_key(api_key),
        })
    }

    pub fn from_env(config: &YoutubeConfig) -> Option<Self> {
        let api_key = env::var("YOUTUBE_API_KEY")
            .ok()
            .filter(|value| !value.trim().is_empty())?;
        Self::new(api_key, config).ok()
    }

    /// Channel search; an empty result set is not an error.
    pub async fn search_channels(
        &self,
        query: &str,
        language: &str,
        max_results: u32,
    ) -> Result<Vec<ChannelRef>, String> {
        let url = format!("{}/search", self.api_base);
        let max = max_results.min(50).to_string();
        let response = self
            .client
            .get(url)
            .query(&[
                ("part", "snippet"),
                ("type", "channel"),
                ("q", query),
                ("relevanceLanguage", language),
                ("maxResults", max.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|err| format!("Falha na busca de canais: {}", err))?;

        let body: SearchResponse = decode_response(response).await?;
        Ok(body
            .items
            .into_iter()
            .filter_map(|item| {
                let channel_id = item.id.channel_id?;
                Some(ChannelRef {
                    channel_id,
                    title: item.snippet.title,
                })
            })
            .collect())
    }

    pub async fn channel_details(&self, channel_id: &str) -> Result<ChannelDetails, String> {
        let url = format!("{}/channels", self.api_base);
        let response = self
            .client
            .get(url)
            .query(&[
                ("part", "snippet,statistics"),
                ("id", channel_id),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|err| format!("Falha ao buscar estatísticas do canal: {}", err))?;

        let body: ChannelsResponse = decode_response(response).await?;
        let item = body
            .items
            .into_iter()
            .next()
            .ok_or_else(|| format!("Canal não encontrado: {}", channel_id))?;

        let created_at = item
            .snippet
            .published_at
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or_else(Utc::now);

        Ok(ChannelDetails {
            channel_id: item.id,
            title: item.snippet.title,
            created_at,
            video_count: parse_count(item.statistics.video_count.as_deref()),
            subscriber_count: parse_count(item.statistics.subscriber_count.as_deref()),
        })
    }

    pub async fn recent_video_titles(
        &self,
        channel_id: &str,
        max_results: u32,
    ) -> Result<Vec<String>, String> {
        let url = format!("{}/search", self.api_base);
        let max = max_results.min(50).to_string();
        let response = self
            .client
            .get(url)
            .query(&[
                ("part", "snippet"),
                ("type", "video"),
                ("channelId", channel_id),
                ("order", "date"),
                ("maxResults", max.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|err| format!("Falha ao listar vídeos recentes: {}", err))?;

        let body: SearchResponse = decode_response(response).await?;
        Ok(body
            .items
            .into_iter()
            .map(|item| item.snippet.title)
            .collect())
    }

    pub async fn most_popular_videos(
        &self,
        region: &str,
        max_results: u32,
    ) -> Result<Vec<PopularVideo>, String> {
        let url = format!("{}/videos", self.api_base);
        let max = max_results.min(50).to_string();
        let response = self
            .client
            .get(url)
            .query(&[
                ("part", "snippet,statistics"),
                ("chart", "mostPopular"),
                ("regionCode", region),
                ("maxResults", max.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|err| format!("Falha ao buscar vídeos em alta: {}", err))?;

        let body: VideosResponse = decode_response(response).await?;
        Ok(body
            .items
            .into_iter()
            .map(|item| PopularVideo {
                title: item.snippet.title,
                view_count: parse_count(item.statistics.view_count.as_deref()),
                category_id: item.snippet.category_id,
            })
            .collect())
    }

    /// Fetches full channel records for a niche query. Each channel is an
    /// independent fallible unit: failures land in the side list and never
    /// abort the batch.
    pub async fn fetch_channels(
        &self,
        niche: &str,
        language: &str,
        max_channels: u32,
        recent_videos_limit: u32,
    ) -> Result<(Vec<Channel>, Vec<String>), String> {
        let refs = self.search_channels(niche, language, max_channels).await?;

        let mut channels = Vec::new();
        let mut failures = Vec::new();

        for channel_ref in refs {
            match self.fetch_one(&channel_ref, recent_videos_limit).await {
                Ok(channel) => channels.push(channel),
                Err(err) => {
                    warn!(channel = %channel_ref.title, error = %err, "channel fetch failed");
                    failures.push(format!("{}: {}", channel_ref.title, err));
                }
            }
        }

        Ok((channels, failures))
    }

    async fn fetch_one(
        &self,
        channel_ref: &ChannelRef,
        recent_videos_limit: u32,
    ) -> Result<Channel, String> {
        let details = self.channel_details(&channel_ref.channel_id).await?;
        let recent_titles = self
            .recent_video_titles(&channel_ref.channel_id, recent_videos_limit)
            .await?;

        Ok(Channel {
            channel_id: details.channel_id,
            name: details.title,
            created_at: details.created_at,
            video_count: details.video_count,
            subscriber_count: details.subscriber_count,
            recent_titles,
        })
    }
}

async fn decode_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, String> {
    let status = response.status();
    if !status.is_success() {
        let error_body = response.text().await.unwrap_or_else(|_| String::new());
        return Err(map_api_error(status, &error_body));
    }

    response
        .json()
        .await
        .map_err(|err| format!("Resposta inválida da API do YouTube: {}", err))
}

fn map_api_error(status: reqwest::StatusCode, body: &str) -> String {
    let lower = body.to_lowercase();
    if lower.contains("quota") {
        return "Cota da API do YouTube excedida; tente novamente mais tarde ou troque a chave"
            .to_string();
    }
    if status == reqwest::StatusCode::BAD_REQUEST || status == reqwest::StatusCode::FORBIDDEN {
        return "Chave de API inválida; verifique a chave informada".to_string();
    }
    let detail = body.trim();
    if detail.is_empty() {
        format!("Erro na API do YouTube: {}", status)
    } else {
        format!("Erro na API do YouTube: {} {}", status, detail)
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn parse_count(value: Option<&str>) -> u64 {
    value.and_then(|v| v.parse().ok()).unwrap_or(0)
}

fn decode_key(value: String) -> String {
    if value.contains('%') {
        match urlencoding::decode(&value) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => value,
        }
    } else {
        value
    }
}

#[derive(Debug, Clone)]
pub struct ChannelRef {
    pub channel_id: String,
    pub title: String,
}

#[derive(Debug, Clone)]
pub struct ChannelDetails {
    pub channel_id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub video_count: u64,
    pub subscriber_count: u64,
}

#[derive(Debug, Clone)]
pub struct PopularVideo {
    pub title: String,
    pub view_count: u64,
    pub category_id: Option<String>,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Deserialize)]
struct SearchItem {
    id: SearchItemId,
    snippet: Snippet,
}

#[derive(Deserialize)]
struct SearchItemId {
    #[serde(rename = "channelId")]
    channel_id: Option<String>,
}

#[derive(Deserialize)]
struct Snippet {
    title: String,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
}

#[derive(Deserialize)]
struct ChannelsResponse {
    #[serde(default)]
    items: Vec<ChannelItem>,
}

#[derive(Deserialize)]
struct ChannelItem {
    id: String,
    snippet: Snippet,
    statistics: ChannelStatistics,
}

#[derive(Deserialize)]
struct ChannelStatistics {
    #[serde(rename = "videoCount")]
    video_count: Option<String>,
    #[serde(rename = "subscriberCount")]
    subscriber_count: Option<String>,
}

#[derive(Deserialize)]
struct VideosResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Deserialize)]
struct VideoItem {
    snippet: VideoSnippet,
    statistics: VideoStatistics,
}

#[derive(Deserialize)]
struct VideoSnippet {
    title: String,
    #[serde(rename = "categoryId")]
    category_id: Option<String>,
}

#[derive(Deserialize)]
struct VideoStatistics {
    #[serde(rename = "viewCount")]
    view_count: Option<String>,
}
