pub mod competition;
pub mod config;
pub mod extract;
pub mod metrics;
pub mod prioritize;
pub mod schedule;
pub mod titles;
pub mod validate;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::metrics::MetricsSource;
use crate::prioritize::NarrativeThresholds;
use crate::validate::ValidationCriteria;

pub const MIN_CHANNEL_LIMIT: u32 = 10;
pub const MAX_CHANNEL_LIMIT: u32 = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    pub channel_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub video_count: u64,
    pub subscriber_count: u64,
    pub recent_titles: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subnicho {
    pub label: String,
    pub channels: Vec<Channel>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubnichoMetrics {
    #[serde(flatten)]
    pub subnicho: Subnicho,
    pub avg_subscribers_per_video: f64,
    pub growth_rate: f64,
    pub avg_views: f64,
    pub avg_channel_age_months: f64,
    pub view_variance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubnichoValidated {
    #[serde(flatten)]
    pub metrics: SubnichoMetrics,
    pub validated: bool,
    pub reasons: Vec<String>,
}

impl SubnichoValidated {
    pub fn label(&self) -> &str {
        &self.metrics.subnicho.label
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubnichoPrioritized {
    #[serde(flatten)]
    pub validated: SubnichoValidated,
    pub score: f64,
    pub strengths: String,
    pub risks: String,
}

impl SubnichoPrioritized {
    pub fn label(&self) -> &str {
        self.validated.label()
    }

    pub fn metrics(&self) -> &SubnichoMetrics {
        &self.validated.metrics
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisParams {
    pub niche: String,
    pub language: String,
    pub max_channels: u32,
    pub seed: u64,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            niche: String::new(),
            language: "pt".to_string(),
            max_channels: 50,
            seed: 0,
        }
    }
}

impl AnalysisParams {
    pub fn channel_limit(&self) -> u32 {
        self.max_channels.clamp(MIN_CHANNEL_LIMIT, MAX_CHANNEL_LIMIT)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutput {
    pub validated: Vec<SubnichoValidated>,
    pub prioritized: Vec<SubnichoPrioritized>,
}

impl AnalysisOutput {
    pub fn validated_count(&self) -> usize {
        self.validated.iter().filter(|s| s.validated).count()
    }
}

pub fn run_analysis(
    subnichos: Vec<Subnicho>,
    source: &mut dyn MetricsSource,
    criteria: &ValidationCriteria,
    narrative: &NarrativeThresholds,
    now: DateTime<Utc>,
) -> AnalysisOutput {
    let metrics = metrics::compute_metrics(subnichos, source, now);
    let validated = validate::validate_all(metrics, criteria);
    let prioritized = prioritize::prioritize(&validated, narrative);
    AnalysisOutput {
        validated,
        prioritized,
    }
}

/// Whole calendar months elapsed between `from` and `to`; never negative.
pub fn months_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    if to <= from {
        return 0.0;
    }
    let mut months =
        (to.year() - from.year()) as i64 * 12 + (to.month() as i64 - from.month() as i64);
    if to.day() < from.day() {
        months -= 1;
    }
    months.max(0) as f64
}

pub fn stable_hash64(value: &str) -> u64 {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

pub fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.max(0.0).min(1.0)
}

pub fn format_number(value: f64) -> String {
    let rounded = value.round().max(0.0) as i64;
    let mut chars: Vec<char> = rounded.to_string().chars().collect();
    let mut result = String::new();
    let mut count = 0usize;

    while let Some(ch) = chars.pop() {
        if count == 3 {
            result.push('.');
            count = 0;
        }
        result.push(ch);
        count += 1;
    }

    result.chars().rev().collect()
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.1$}", value, digits)
}
