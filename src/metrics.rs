use chrono::{DateTime, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{clamp01, months_between, Subnicho, SubnichoMetrics};

/// Source of the per-subniche figures that are not derivable from the channel
/// list itself. A real historical-data adapter slots in behind this trait.
pub trait MetricsSource {
    /// Monthly growth rate, percent.
    fn growth_rate(&mut self, label: &str) -> f64;
    /// Average views per video.
    fn avg_views(&mut self, label: &str) -> f64;
    /// View variance, 0..1.
    fn view_variance(&mut self, label: &str) -> f64;
}

pub struct SyntheticMetricsSource {
    rng: StdRng,
}

impl SyntheticMetricsSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl MetricsSource for SyntheticMetricsSource {
    fn growth_rate(&mut self, _label: &str) -> f64 {
        self.rng.gen_range(0.0..20.0)
    }

    fn avg_views(&mut self, _label: &str) -> f64 {
        self.rng.gen_range(1_000..16_000) as f64
    }

    fn view_variance(&mut self, _label: &str) -> f64 {
        self.rng.gen_range(0.0..0.5)
    }
}

/// Fixed figures for every subniche; used to pin tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedMetricsSource {
    pub growth_rate: f64,
    pub avg_views: f64,
    pub view_variance: f64,
}

impl MetricsSource for FixedMetricsSource {
    fn growth_rate(&mut self, _label: &str) -> f64 {
        self.growth_rate
    }

    fn avg_views(&mut self, _label: &str) -> f64 {
        self.avg_views
    }

    fn view_variance(&mut self, _label: &str) -> f64 {
        self.view_variance
    }
}

pub fn compute_metrics(
    subnichos: Vec<Subnicho>,
    source: &mut dyn MetricsSource,
    now: DateTime<Utc>,
) -> Vec<SubnichoMetrics> {
    subnichos
        .into_iter()
        .map(|subnicho| compute_one(subnicho, source, now))
        .collect()
}

fn compute_one(
    subnicho: Subnicho,
    source: &mut dyn MetricsSource,
    now: DateTime<Utc>,
) -> SubnichoMetrics {
    if subnicho.channels.is_empty() {
        return SubnichoMetrics {
            subnicho,
            avg_subscribers_per_video: 0.0,
            growth_rate: 0.0,
            avg_views: 0.0,
            avg_channel_age_months: 0.0,
            view_variance: 0.0,
        };
    }

    let total_videos: u64 = subnicho.channels.iter().map(|c| c.video_count).sum();
    let total_subscribers: u64 = subnicho.channels.iter().map(|c| c.subscriber_count).sum();

    let avg_subscribers_per_video = if total_videos == 0 {
        0.0
    } else {
        total_subscribers as f64 / total_videos as f64
    };

    let age_sum: f64 = subnicho
        .channels
        .iter()
        .map(|c| months_between(c.created_at, now))
        .sum();
    let avg_channel_age_months = age_sum / subnicho.channels.len() as f64;

    let growth_rate = source.growth_rate(&subnicho.label);
    let avg_views = source.avg_views(&subnicho.label);
    let view_variance = clamp01(source.view_variance(&subnicho.label));

    SubnichoMetrics {
        subnicho,
        avg_subscribers_per_video,
        growth_rate,
        avg_views,
        avg_channel_age_months,
        view_variance,
    }
}
