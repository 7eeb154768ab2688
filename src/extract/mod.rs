pub mod synthetic;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{Channel, Subnicho};

pub use synthetic::generate_channels;

const KEYWORDS_PER_CHANNEL: usize = 5;
const MIN_KEYWORD_LEN: usize = 4;

const STOPWORDS_PT: &[&str] = &[
    "para", "como", "com", "que", "uma", "umas", "aqui", "pelo", "pela", "dos", "das", "por",
    "mais", "menos", "sem", "este", "esta", "isso", "essa", "esse", "você", "voce", "vocês",
    "seu", "sua", "seus", "suas", "não", "nao", "tem", "ter", "vai", "ser", "são", "sao", "foi",
    "era", "muito", "muita", "todo", "toda", "todos", "todas", "quando", "onde", "porque",
    "sobre", "entre", "até", "ate", "depois", "antes", "cada", "mesmo", "ainda", "já", "bem",
    "anos", "fazer", "feito", "assim", "agora", "hoje", "nunca", "sempre", "coisa", "coisas",
];

const STOPWORDS_EN: &[&str] = &[
    "the", "and", "for", "with", "that", "this", "from", "your", "yours", "how", "what", "when",
    "where", "why", "will", "can", "could", "should", "would", "have", "has", "had", "are",
    "was", "were", "been", "they", "them", "their", "you", "its", "about", "into", "over",
    "under", "after", "before", "more", "most", "less", "only", "just", "than", "then", "also",
    "some", "every", "make", "made", "makes", "gets", "things", "thing", "here", "there",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub subnichos: Vec<Subnicho>,
    pub failures: Vec<String>,
}

impl ExtractionReport {
    pub fn from_channels(channels: &[Channel], failures: Vec<String>) -> Self {
        Self {
            subnichos: extract_subnichos(channels),
            failures,
        }
    }
}

fn is_stopword(word: &str) -> bool {
    STOPWORDS_PT.contains(&word) || STOPWORDS_EN.contains(&word)
}

fn candidate_words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|word| {
            word.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|word| word.chars().count() >= MIN_KEYWORD_LEN)
        .filter(|word| !word.chars().all(|c| c.is_ascii_digit()))
        .filter(|word| !is_stopword(word))
        .collect()
}

/// Most frequent candidate words across `titles`, ties broken alphabetically.
pub fn top_keywords(titles: &[String], limit: usize) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for title in titles {
        for word in candidate_words(title) {
            *counts.entry(word).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.into_iter().take(limit).map(|(word, _)| word).collect()
}

/// Groups channels under their frequent title keywords. A channel may land in
/// several groups; within one group it appears once.
pub fn extract_subnichos(channels: &[Channel]) -> Vec<Subnicho> {
    let mut groups: HashMap<String, Vec<Channel>> = HashMap::new();

    for channel in channels {
        for keyword in top_keywords(&channel.recent_titles, KEYWORDS_PER_CHANNEL) {
            let members = groups.entry(keyword).or_default();
            if !members.iter().any(|c| c.channel_id == channel.channel_id) {
                members.push(channel.clone());
            }
        }
    }

    let mut subnichos: Vec<Subnicho> = groups
        .into_iter()
        .map(|(label, channels)| Subnicho { label, channels })
        .collect();
    subnichos.sort_by(|a, b| {
        b.channels
            .len()
            .cmp(&a.channels.len())
            .then_with(|| a.label.cmp(&b.label))
    });
    subnichos
}

/// Micro-subniches from a single channel: frequent pairs of adjacent
/// candidate words in its own titles.
pub fn micro_subnichos(channel: &Channel, limit: usize) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for title in &channel.recent_titles {
        let words = candidate_words(title);
        for pair in words.windows(2) {
            let label = format!("{} {}", pair[0], pair[1]);
            *counts.entry(label).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.into_iter().take(limit).map(|(label, _)| label).collect()
}
