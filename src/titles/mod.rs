pub mod catalog;

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

pub use catalog::{SynonymEntry, TitleCatalog, TitleTemplate, TranslatedPrefix};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmotionalTone {
    Curiosity,
    Urgency,
    Fear,
    Desire,
}

impl EmotionalTone {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "curiosity" | "curiosidade" => Some(EmotionalTone::Curiosity),
            "urgency" | "urgencia" | "urgência" => Some(EmotionalTone::Urgency),
            "fear" | "medo" => Some(EmotionalTone::Fear),
            "desire" | "desejo" => Some(EmotionalTone::Desire),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EmotionalTone::Curiosity => "curiosidade",
            EmotionalTone::Urgency => "urgência",
            EmotionalTone::Fear => "medo",
            EmotionalTone::Desire => "desejo",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaturationBucket {
    Low,
    Medium,
    High,
}

impl SaturationBucket {
    pub fn label(self) -> &'static str {
        match self {
            SaturationBucket::Low => "baixa",
            SaturationBucket::Medium => "média",
            SaturationBucket::High => "alta",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Translation {
    pub language: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleVariation {
    pub title: String,
    pub tone: EmotionalTone,
    pub saturation: SaturationBucket,
    pub language: String,
    pub translations: Vec<Translation>,
}

#[derive(Debug, Clone)]
pub struct TitleOptions {
    pub language: String,
    pub tone: Option<EmotionalTone>,
    pub keywords: Vec<String>,
    pub count: usize,
    pub seed: u64,
    pub include_translations: bool,
}

impl Default for TitleOptions {
    fn default() -> Self {
        Self {
            language: "pt".to_string(),
            tone: None,
            keywords: Vec::new(),
            count: 5,
            seed: 0,
            include_translations: false,
        }
    }
}

/// Shuffles the template catalogue and renders up to `count` variations.
/// Asking for more variations than the catalogue holds caps silently.
pub fn generate_variations(
    original: &str,
    opts: &TitleOptions,
    catalog: &TitleCatalog,
) -> Vec<TitleVariation> {
    let mut rng = StdRng::seed_from_u64(opts.seed);
    let base = apply_synonyms(original, &opts.keywords, &opts.language, catalog, &mut rng);

    let mut pool: Vec<&TitleTemplate> = match opts.tone {
        Some(tone) => {
            let filtered: Vec<&TitleTemplate> = catalog
                .templates
                .iter()
                .filter(|tpl| tpl.tone == tone)
                .collect();
            if filtered.is_empty() {
                catalog.templates.iter().collect()
            } else {
                filtered
            }
        }
        None => catalog.templates.iter().collect(),
    };
    pool.shuffle(&mut rng);

    let count = opts.count.min(pool.len());
    pool.into_iter()
        .take(count)
        .map(|tpl| {
            let number = rng.gen_range(3..=9u32).to_string();
            let rendered = tpl.pattern.replace("{title}", &base).replace("{n}", &number);
            let title = truncate_title(&rendered, catalog.max_len);
            let translations = if opts.include_translations {
                build_translations(&base, &opts.language, catalog)
            } else {
                Vec::new()
            };

            TitleVariation {
                title,
                tone: tpl.tone,
                saturation: pick_saturation(&mut rng),
                language: opts.language.clone(),
                translations,
            }
        })
        .collect()
}

pub fn generate_titles(original: &str, opts: &TitleOptions, catalog: &TitleCatalog) -> Vec<String> {
    generate_variations(original, opts, catalog)
        .into_iter()
        .map(|variation| variation.title)
        .collect()
}

pub fn truncate_title(title: &str, max_len: usize) -> String {
    if title.chars().count() <= max_len {
        return title.to_string();
    }
    let mut truncated: String = title.chars().take(max_len.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}

fn apply_synonyms(
    original: &str,
    keywords: &[String],
    language: &str,
    catalog: &TitleCatalog,
    rng: &mut StdRng,
) -> String {
    let mut result = original.to_string();
    for entry in &catalog.synonyms {
        if !entry.language.eq_ignore_ascii_case(language) || entry.replacements.is_empty() {
            continue;
        }
        if !keywords.is_empty()
            && !keywords.iter().any(|k| k.eq_ignore_ascii_case(&entry.term))
        {
            continue;
        }
        let replacement = &entry.replacements[rng.gen_range(0..entry.replacements.len())];
        if let Some(replaced) = replace_case_insensitive(&result, &entry.term, replacement) {
            result = replaced;
        }
    }
    result
}

fn build_translations(base: &str, language: &str, catalog: &TitleCatalog) -> Vec<Translation> {
    catalog
        .translations
        .iter()
        .filter(|prefix| !prefix.language.eq_ignore_ascii_case(language))
        .map(|prefix| Translation {
            language: prefix.language.clone(),
            title: truncate_title(&format!("{} {}", prefix.prefix, base), catalog.max_len),
        })
        .collect()
}

fn pick_saturation(rng: &mut StdRng) -> SaturationBucket {
    match rng.gen_range(0..3u8) {
        0 => SaturationBucket::Low,
        1 => SaturationBucket::Medium,
        _ => SaturationBucket::High,
    }
}

/// Replaces the first case-insensitive occurrence of `term` in `text`.
fn replace_case_insensitive(text: &str, term: &str, replacement: &str) -> Option<String> {
    let text_chars: Vec<char> = text.chars().collect();
    let term_chars: Vec<char> = term.chars().collect();
    if term_chars.is_empty() || text_chars.len() < term_chars.len() {
        return None;
    }

    for start in 0..=(text_chars.len() - term_chars.len()) {
        let matches = term_chars.iter().enumerate().all(|(offset, tc)| {
            text_chars[start + offset]
                .to_lowercase()
                .eq(tc.to_lowercase())
        });
        if matches {
            let mut out: String = text_chars[..start].iter().collect();
            out.push_str(replacement);
            out.extend(text_chars[start + term_chars.len()..].iter());
            return Some(out);
        }
    }

    None
}
