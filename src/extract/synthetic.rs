use chrono::{DateTime, Duration, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::Channel;

const THEMES_PT: &[&str] = &[
    "iniciantes",
    "avançado",
    "dicas",
    "segredos",
    "rotina",
    "estratégia",
    "ferramentas",
    "erros",
    "desafios",
    "resultados",
];

const THEMES_EN: &[&str] = &[
    "beginners",
    "advanced",
    "tips",
    "secrets",
    "routine",
    "strategy",
    "tools",
    "mistakes",
    "challenges",
    "results",
];

const THEMES_ES: &[&str] = &[
    "principiantes",
    "avanzado",
    "consejos",
    "secretos",
    "rutina",
    "estrategia",
    "herramientas",
    "errores",
    "retos",
    "resultados",
];

const PATTERNS_PT: &[&str] = &[
    "{n} {kw} de {niche} que funcionam de verdade",
    "Como {kw} transformou meu canal de {niche}",
    "{kw} em {niche}: o guia sem enrolação",
    "Os {kw} que todo canal de {niche} precisa conhecer",
    "Minha rotina de {kw} para crescer em {niche}",
    "A verdade sobre {kw} no mundo de {niche}",
];

const PATTERNS_EN: &[&str] = &[
    "{n} {niche} {kw} that actually work",
    "How {kw} changed my {niche} channel",
    "The truth about {kw} in {niche}",
    "{kw} every {niche} creator needs",
    "My {kw} routine for growing in {niche}",
];

const PATTERNS_ES: &[&str] = &[
    "{n} {kw} de {niche} que funcionan",
    "Cómo {kw} cambió mi canal de {niche}",
    "La verdad sobre {kw} en {niche}",
    "{kw} que todo canal de {niche} necesita",
];

const TITLES_PER_CHANNEL: usize = 8;

fn themes_for(language: &str) -> &'static [&'static str] {
    match language_key(language) {
        "en" => THEMES_EN,
        "es" => THEMES_ES,
        _ => THEMES_PT,
    }
}

fn patterns_for(language: &str) -> &'static [&'static str] {
    match language_key(language) {
        "en" => PATTERNS_EN,
        "es" => PATTERNS_ES,
        _ => PATTERNS_PT,
    }
}

fn language_key(language: &str) -> &'static str {
    let lower = language.trim().to_lowercase();
    if lower.starts_with("en") {
        "en"
    } else if lower.starts_with("es") {
        "es"
    } else {
        "pt"
    }
}

/// Deterministic stand-in for the channel search when no API key is set.
/// Each channel leans on two themes so keyword grouping finds overlap.
pub fn generate_channels(
    niche: &str,
    language: &str,
    count: u32,
    seed: u64,
    now: DateTime<Utc>,
) -> Vec<Channel> {
    let mut rng = StdRng::seed_from_u64(seed);
    let themes = themes_for(language);
    let patterns = patterns_for(language);
    let channel_word = if language_key(language) == "en" {
        "Channel"
    } else {
        "Canal"
    };

    (0..count)
        .map(|idx| {
            let primary = themes[rng.gen_range(0..themes.len())];
            let secondary = themes[rng.gen_range(0..themes.len())];

            let age_days = rng.gen_range(1..=48) * 30 + rng.gen_range(0..28) as i64;
            let created_at = now - Duration::days(age_days);
            let video_count = rng.gen_range(12..600u64);
            let subscriber_count = video_count * rng.gen_range(50..2_000u64);

            let recent_titles = (0..TITLES_PER_CHANNEL)
                .map(|title_idx| {
                    let keyword = if title_idx % 2 == 0 { primary } else { secondary };
                    let pattern = patterns[rng.gen_range(0..patterns.len())];
                    pattern
                        .replace("{kw}", keyword)
                        .replace("{niche}", niche)
                        .replace("{n}", &rng.gen_range(3..=12u32).to_string())
                })
                .collect();

            Channel {
                channel_id: format!("synthetic_{}", idx),
                name: format!("{} {} {}", channel_word, title_case(primary), idx + 1),
                created_at,
                video_count,
                subscriber_count,
                recent_titles,
            }
        })
        .collect()
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
