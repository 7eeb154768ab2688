use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::titles::{self, TitleCatalog, TitleOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    Diario,
    Semanal,
    Quinzenal,
    Mensal,
}

impl Cadence {
    pub fn from_label(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "diario" | "diário" | "diaria" | "diária" => Some(Cadence::Diario),
            "semanal" => Some(Cadence::Semanal),
            "quinzenal" => Some(Cadence::Quinzenal),
            "mensal" => Some(Cadence::Mensal),
            _ => None,
        }
    }

    pub fn interval_days(self) -> i64 {
        match self {
            Cadence::Diario => 1,
            Cadence::Semanal => 7,
            Cadence::Quinzenal => 14,
            Cadence::Mensal => 30,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Cadence::Diario => "diario",
            Cadence::Semanal => "semanal",
            Cadence::Quinzenal => "quinzenal",
            Cadence::Mensal => "mensal",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub publish_hour: u32,
    pub base_phrase: String,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            publish_hour: 10,
            base_phrase: "Guia essencial de {tema}".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRecommendation {
    pub micro_subnicho: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub date: DateTime<Utc>,
    pub micro_subnicho: String,
    pub title: String,
}

/// Round-robins through the recommendations, one entry per cycle, dates
/// spaced by the cadence interval at a fixed publication hour.
pub fn build_schedule(
    recommendations: &[ScheduleRecommendation],
    cadence: Cadence,
    cycles: u32,
    start: DateTime<Utc>,
    config: &ScheduleConfig,
    catalog: &TitleCatalog,
    seed: u64,
) -> Vec<ScheduleEntry> {
    if recommendations.is_empty() {
        return Vec::new();
    }

    let hour = config.publish_hour.min(23);
    let interval = cadence.interval_days();

    (0..cycles)
        .map(|cycle| {
            let recommendation = &recommendations[cycle as usize % recommendations.len()];
            let base = config
                .base_phrase
                .replace("{tema}", &recommendation.micro_subnicho);

            let opts = TitleOptions {
                count: 1,
                seed: seed.wrapping_add(cycle as u64),
                ..TitleOptions::default()
            };
            let title = titles::generate_titles(&base, &opts, catalog)
                .into_iter()
                .next()
                .unwrap_or(base);

            let day = start.date_naive() + Duration::days(cycle as i64 * interval);
            let date = Utc.from_utc_datetime(
                &day.and_hms_opt(hour, 0, 0).unwrap_or_default(),
            );

            ScheduleEntry {
                date,
                micro_subnicho: recommendation.micro_subnicho.clone(),
                title,
            }
        })
        .collect()
}
