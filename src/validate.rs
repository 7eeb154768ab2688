use serde::{Deserialize, Serialize};

use crate::{format_number, SubnichoMetrics, SubnichoValidated};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationCriteria {
    pub min_growth_rate: f64,
    pub min_avg_views: f64,
    pub max_avg_age_months: f64,
}

impl Default for ValidationCriteria {
    fn default() -> Self {
        Self {
            min_growth_rate: 10.0,
            min_avg_views: 5_000.0,
            max_avg_age_months: 30.0,
        }
    }
}

pub fn validate_all(
    metrics: Vec<SubnichoMetrics>,
    criteria: &ValidationCriteria,
) -> Vec<SubnichoValidated> {
    metrics
        .into_iter()
        .map(|m| validate_one(m, criteria))
        .collect()
}

pub fn validate_one(metrics: SubnichoMetrics, criteria: &ValidationCriteria) -> SubnichoValidated {
    let mut reasons = Vec::new();

    if metrics.growth_rate < criteria.min_growth_rate {
        reasons.push(format!(
            "Taxa de crescimento ({:.1}%) abaixo do mínimo ({}%)",
            metrics.growth_rate, criteria.min_growth_rate
        ));
    }
    if metrics.avg_views < criteria.min_avg_views {
        reasons.push(format!(
            "Média de visualizações ({}) abaixo do mínimo ({})",
            format_number(metrics.avg_views),
            format_number(criteria.min_avg_views)
        ));
    }
    if metrics.avg_channel_age_months > criteria.max_avg_age_months {
        reasons.push(format!(
            "Idade média dos canais ({:.1} meses) acima do máximo ({} meses)",
            metrics.avg_channel_age_months, criteria.max_avg_age_months
        ));
    }

    SubnichoValidated {
        metrics,
        validated: reasons.is_empty(),
        reasons,
    }
}
