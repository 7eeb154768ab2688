use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::stable_hash64;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitionConfig {
    pub max_competitors: u32,
    pub max_avg_age_months: f64,
    pub days_per_month: f64,
    pub direct_strategy_max_competitors: u32,
}

impl Default for CompetitionConfig {
    fn default() -> Self {
        Self {
            max_competitors: 10,
            max_avg_age_months: 3.0,
            days_per_month: 30.0,
            direct_strategy_max_competitors: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitionData {
    pub language: String,
    pub competitor_count: u32,
    pub avg_channel_age_months: f64,
    pub avg_top_views: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageComparison {
    #[serde(flatten)]
    pub data: CompetitionData,
    pub open_window: bool,
    pub days_until_close: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleStrategy {
    DirectKeyword,
    MicroSubnicho,
}

impl TitleStrategy {
    pub fn label(self) -> &'static str {
        match self {
            TitleStrategy::DirectKeyword => "palavra-chave direta",
            TitleStrategy::MicroSubnicho => "diferenciação por micro-subnicho",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitionRecommendation {
    pub language: String,
    pub competitor_count: u32,
    pub strategy: TitleStrategy,
    pub reason: String,
}

/// Simulated per-language snapshots, used when no API key is available.
/// Seeded per subniche label.
pub fn simulate_competition(
    label: &str,
    languages: &[String],
    seed: u64,
    _config: &CompetitionConfig,
) -> Vec<CompetitionData> {
    let mut rng = StdRng::seed_from_u64(seed ^ stable_hash64(label));
    languages
        .iter()
        .map(|language| CompetitionData {
            language: language.clone(),
            competitor_count: rng.gen_range(2..=28),
            avg_channel_age_months: rng.gen_range(0.5..12.0),
            avg_top_views: rng.gen_range(5_000..400_000) as f64,
        })
        .collect()
}

/// Classifies each language's entry window and sorts open windows first,
/// then by ascending competitor count.
pub fn compare_languages(
    data: Vec<CompetitionData>,
    config: &CompetitionConfig,
) -> Vec<LanguageComparison> {
    let mut comparisons: Vec<LanguageComparison> = data
        .into_iter()
        .map(|data| {
            let open_window = data.competitor_count <= config.max_competitors
                && data.avg_channel_age_months <= config.max_avg_age_months;
            let days_until_close = if open_window {
                ((config.max_avg_age_months - data.avg_channel_age_months)
                    * config.days_per_month)
                    .ceil() as i64
            } else {
                0
            };
            LanguageComparison {
                data,
                open_window,
                days_until_close,
            }
        })
        .collect();

    comparisons.sort_by(|a, b| {
        b.open_window
            .cmp(&a.open_window)
            .then(a.data.competitor_count.cmp(&b.data.competitor_count))
    });
    comparisons
}

/// Best open-window language (fewest competitors), or the overall least
/// saturated one when every window is closed. Empty input yields None.
pub fn recommend(
    comparisons: &[LanguageComparison],
    config: &CompetitionConfig,
) -> Option<CompetitionRecommendation> {
    let best = comparisons
        .iter()
        .filter(|c| c.open_window)
        .min_by_key(|c| c.data.competitor_count)
        .or_else(|| comparisons.iter().min_by_key(|c| c.data.competitor_count))?;

    let strategy = if best.data.competitor_count < config.direct_strategy_max_competitors {
        TitleStrategy::DirectKeyword
    } else {
        TitleStrategy::MicroSubnicho
    };

    let reason = if best.open_window {
        format!(
            "Janela aberta em {}: {} concorrentes com {:.1} meses de idade média",
            best.data.language, best.data.competitor_count, best.data.avg_channel_age_months
        )
    } else {
        format!(
            "Nenhuma janela aberta; {} é o mercado menos saturado ({} concorrentes)",
            best.data.language, best.data.competitor_count
        )
    };

    Some(CompetitionRecommendation {
        language: best.data.language.clone(),
        competitor_count: best.data.competitor_count,
        strategy,
        reason,
    })
}
