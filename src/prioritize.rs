use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{clamp01, format_number, SubnichoPrioritized, SubnichoValidated};

const TOP_N: usize = 5;

/// Cutoffs for the strength/risk narratives; first matching rule wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrativeThresholds {
    pub high_growth: f64,
    pub high_views: f64,
    pub low_variance: f64,
    pub high_variance: f64,
    pub young_age_months: f64,
    pub modest_growth: f64,
}

impl Default for NarrativeThresholds {
    fn default() -> Self {
        Self {
            high_growth: 15.0,
            high_views: 10_000.0,
            low_variance: 0.2,
            high_variance: 0.35,
            young_age_months: 6.0,
            modest_growth: 12.0,
        }
    }
}

/// Ranks the validated subniches by a batch-relative composite score and
/// keeps the top five. An empty validated subset yields an empty vector.
pub fn prioritize(
    validated: &[SubnichoValidated],
    thresholds: &NarrativeThresholds,
) -> Vec<SubnichoPrioritized> {
    let pool: Vec<&SubnichoValidated> = validated.iter().filter(|s| s.validated).collect();
    if pool.is_empty() {
        return Vec::new();
    }

    let max_growth = pool
        .iter()
        .map(|s| s.metrics.growth_rate)
        .fold(0.0, f64::max);
    let max_views = pool.iter().map(|s| s.metrics.avg_views).fold(0.0, f64::max);

    let mut ranked: Vec<SubnichoPrioritized> = pool
        .into_iter()
        .map(|s| {
            let growth_part = if max_growth > 0.0 {
                s.metrics.growth_rate / max_growth
            } else {
                0.0
            };
            let views_part = if max_views > 0.0 {
                s.metrics.avg_views / max_views
            } else {
                0.0
            };

            SubnichoPrioritized {
                validated: s.clone(),
                score: clamp01((growth_part + views_part) / 2.0),
                strengths: strengths_for(s, thresholds),
                risks: risks_for(s, thresholds),
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    ranked.truncate(TOP_N);
    ranked
}

fn strengths_for(s: &SubnichoValidated, thresholds: &NarrativeThresholds) -> String {
    let m = &s.metrics;
    if m.growth_rate >= thresholds.high_growth {
        format!(
            "Crescimento acelerado de {:.1}% ao mês, bem acima da média do nicho",
            m.growth_rate
        )
    } else if m.avg_views >= thresholds.high_views {
        format!(
            "Média de {} visualizações por vídeo indica demanda consistente",
            format_number(m.avg_views)
        )
    } else if m.view_variance <= thresholds.low_variance {
        "Visualizações estáveis entre os canais, com baixa variância".to_string()
    } else {
        "Métricas equilibradas, sem ponto fraco evidente".to_string()
    }
}

fn risks_for(s: &SubnichoValidated, thresholds: &NarrativeThresholds) -> String {
    let m = &s.metrics;
    if m.view_variance >= thresholds.high_variance {
        "Alta variância de visualizações: os resultados dependem de poucos vídeos".to_string()
    } else if m.avg_channel_age_months <= thresholds.young_age_months {
        "Subnicho muito recente; a demanda ainda pode ser passageira".to_string()
    } else if m.growth_rate < thresholds.modest_growth {
        "Crescimento moderado; a janela de entrada pode fechar antes do canal maturar".to_string()
    } else {
        "Concorrência tende a aumentar conforme o subnicho amadurece".to_string()
    }
}
