use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::youtube_api::YoutubeClient;

const DEFAULT_REGION: &str = "BR";
const TOPICS_LIMIT: u32 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingTopic {
    pub title: String,
    pub value: u64,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_videos: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendingResponse {
    pub topics: Vec<TrendingTopic>,
    pub region: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Trending lookup. Upstream failure answers with the fallback list and an
/// `error` field, never a non-2xx status.
pub async fn trending_topics(client: Option<&YoutubeClient>, region: &str) -> TrendingResponse {
    let region = if region.trim().is_empty() {
        DEFAULT_REGION.to_string()
    } else {
        region.trim().to_uppercase()
    };

    let Some(client) = client else {
        return fallback_response(region, None);
    };

    match client.most_popular_videos(&region, TOPICS_LIMIT).await {
        Ok(videos) if !videos.is_empty() => {
            let topics = videos
                .into_iter()
                .map(|video| TrendingTopic {
                    title: video.title,
                    value: video.view_count,
                    category: video
                        .category_id
                        .unwrap_or_else(|| "video".to_string()),
                    related_videos: None,
                })
                .collect();
            TrendingResponse {
                topics,
                region,
                source: "youtube".to_string(),
                error: None,
            }
        }
        Ok(_) => fallback_response(region, None),
        Err(err) => {
            warn!(error = %err, "trending lookup failed, serving fallback");
            fallback_response(region, Some(err))
        }
    }
}

fn fallback_response(region: String, error: Option<String>) -> TrendingResponse {
    TrendingResponse {
        topics: fallback_topics(),
        region,
        source: "fallback".to_string(),
        error,
    }
}

fn fallback_topics() -> Vec<TrendingTopic> {
    let entries: &[(&str, u64, &str)] = &[
        ("Finanças pessoais para iniciantes", 85_000, "educação"),
        ("Receitas rápidas para a semana", 72_000, "culinária"),
        ("Rotina de treino em casa", 64_000, "fitness"),
        ("Inteligência artificial no dia a dia", 58_000, "tecnologia"),
        ("Histórias de viagem de baixo custo", 41_000, "viagem"),
    ];

    entries
        .iter()
        .map(|(title, value, category)| TrendingTopic {
            title: title.to_string(),
            value: *value,
            category: category.to_string(),
            related_videos: None,
        })
        .collect()
}
