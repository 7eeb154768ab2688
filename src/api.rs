use serde::{Deserialize, Serialize};

use niche_radar::competition::{CompetitionRecommendation, LanguageComparison};
use niche_radar::schedule::{Cadence, ScheduleEntry, ScheduleRecommendation};
use niche_radar::titles::{EmotionalTone, TitleOptions, TitleVariation};
use niche_radar::validate::ValidationCriteria;
use niche_radar::{AnalysisOutput, AnalysisParams, SubnichoPrioritized, SubnichoValidated};

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub niche: Option<String>,
    pub language: Option<String>,
    pub max_channels: Option<u32>,
    pub seed: Option<u64>,
    pub request_id: Option<String>,
    pub synthetic: Option<bool>,
    pub min_growth_rate: Option<f64>,
    pub min_avg_views: Option<f64>,
    pub max_avg_age_months: Option<f64>,
}

impl AnalyzeRequest {
    pub fn into_params(self, default_seed: u64) -> Result<AnalysisParams, String> {
        let niche = self.niche.unwrap_or_default().trim().to_string();
        if niche.is_empty() {
            return Err("Informe o nicho principal".to_string());
        }

        let mut params = AnalysisParams {
            niche,
            seed: self.seed.unwrap_or(default_seed),
            ..AnalysisParams::default()
        };
        if let Some(language) = self.language {
            if !language.trim().is_empty() {
                params.language = language.trim().to_string();
            }
        }
        if let Some(max_channels) = self.max_channels {
            params.max_channels = max_channels;
        }

        Ok(params)
    }

    pub fn criteria(&self, defaults: &ValidationCriteria) -> ValidationCriteria {
        ValidationCriteria {
            min_growth_rate: self.min_growth_rate.unwrap_or(defaults.min_growth_rate),
            min_avg_views: self.min_avg_views.unwrap_or(defaults.min_avg_views),
            max_avg_age_months: self
                .max_avg_age_months
                .unwrap_or(defaults.max_avg_age_months),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub request_id: String,
    pub niche: String,
    pub language: String,
    pub source: String,
    pub total_subnichos: usize,
    pub validated_count: usize,
    pub subnichos: Vec<SubnichoValidated>,
    pub prioritized: Vec<SubnichoPrioritized>,
    pub failures: Vec<String>,
}

impl AnalyzeResponse {
    pub fn from_output(
        output: AnalysisOutput,
        params: &AnalysisParams,
        source: &str,
        failures: Vec<String>,
        request_id: String,
    ) -> Self {
        Self {
            request_id,
            niche: params.niche.clone(),
            language: params.language.clone(),
            source: source.to_string(),
            total_subnichos: output.validated.len(),
            validated_count: output.validated_count(),
            subnichos: output.validated,
            prioritized: output.prioritized,
            failures,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TitlesRequest {
    pub title: Option<String>,
    pub language: Option<String>,
    pub tone: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub count: Option<usize>,
    pub seed: Option<u64>,
    pub include_translations: Option<bool>,
}

impl TitlesRequest {
    pub fn into_options(self, default_seed: u64) -> Result<(String, TitleOptions), String> {
        let original = self.title.unwrap_or_default().trim().to_string();
        if original.is_empty() {
            return Err("Informe o título original".to_string());
        }

        let tone = match self.tone.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => Some(
                EmotionalTone::from_str(value)
                    .ok_or_else(|| format!("Tom emocional inválido: {}", value))?,
            ),
            _ => None,
        };

        let mut opts = TitleOptions {
            tone,
            seed: self.seed.unwrap_or(default_seed),
            ..TitleOptions::default()
        };
        if let Some(language) = self.language {
            if !language.trim().is_empty() {
                opts.language = language.trim().to_string();
            }
        }
        if let Some(keywords) = self.keywords {
            opts.keywords = keywords;
        }
        if let Some(count) = self.count {
            opts.count = count;
        }
        if let Some(include_translations) = self.include_translations {
            opts.include_translations = include_translations;
        }

        Ok((original, opts))
    }
}

#[derive(Debug, Serialize)]
pub struct TitlesResponse {
    pub variations: Vec<TitleVariation>,
}

#[derive(Debug, Deserialize)]
pub struct CompetitionRequest {
    pub subnicho: Option<String>,
    pub languages: Option<Vec<String>>,
    pub seed: Option<u64>,
}

impl CompetitionRequest {
    pub fn into_parts(self, default_seed: u64) -> Result<(String, Vec<String>, u64), String> {
        let subnicho = self.subnicho.unwrap_or_default().trim().to_string();
        if subnicho.is_empty() {
            return Err("Informe o subnicho a comparar".to_string());
        }

        let languages = match self.languages {
            Some(languages) if !languages.is_empty() => languages,
            _ => vec!["pt".to_string(), "en".to_string(), "es".to_string()],
        };

        Ok((subnicho, languages, self.seed.unwrap_or(default_seed)))
    }
}

#[derive(Debug, Serialize)]
pub struct CompetitionResponse {
    pub subnicho: String,
    pub comparisons: Vec<LanguageComparison>,
    pub recommendation: Option<CompetitionRecommendation>,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleRequest {
    pub recommendations: Option<Vec<ScheduleRecommendation>>,
    pub cadence: Option<String>,
    pub cycles: Option<u32>,
    pub seed: Option<u64>,
}

impl ScheduleRequest {
    pub fn into_parts(
        self,
        default_seed: u64,
    ) -> Result<(Vec<ScheduleRecommendation>, Cadence, u32, u64), String> {
        let recommendations = self.recommendations.unwrap_or_default();

        let cadence_label = self.cadence.unwrap_or_else(|| "semanal".to_string());
        let cadence = Cadence::from_label(&cadence_label)
            .ok_or_else(|| format!("Cadência inválida: {}", cadence_label))?;

        let cycles = self.cycles.unwrap_or(4).min(60);

        Ok((
            recommendations,
            cadence,
            cycles,
            self.seed.unwrap_or(default_seed),
        ))
    }
}

#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub cadence: String,
    pub entries: Vec<ScheduleEntry>,
}

#[derive(Debug, Deserialize)]
pub struct TrendingRequest {
    pub region: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SaveSearchRequest {
    pub id: Option<String>,
    pub name: Option<String>,
    pub params: Option<serde_json::Value>,
    pub owner_id: Option<String>,
}
