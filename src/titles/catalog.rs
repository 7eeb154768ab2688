use serde::{Deserialize, Serialize};

use crate::titles::EmotionalTone;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleTemplate {
    pub pattern: String,
    pub tone: EmotionalTone,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynonymEntry {
    pub language: String,
    pub term: String,
    pub replacements: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatedPrefix {
    pub language: String,
    pub prefix: String,
}

/// Template catalogue and synonym dictionaries. Lives in config so the
/// phrasing can be swapped without recompiling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleCatalog {
    pub templates: Vec<TitleTemplate>,
    pub synonyms: Vec<SynonymEntry>,
    pub translations: Vec<TranslatedPrefix>,
    pub max_len: usize,
}

impl Default for TitleCatalog {
    fn default() -> Self {
        Self {
            templates: default_templates(),
            synonyms: default_synonyms(),
            translations: default_translations(),
            max_len: 100,
        }
    }
}

fn template(pattern: &str, tone: EmotionalTone) -> TitleTemplate {
    TitleTemplate {
        pattern: pattern.to_string(),
        tone,
    }
}

fn default_templates() -> Vec<TitleTemplate> {
    use EmotionalTone::*;

    vec![
        template("O que ninguém te conta sobre {title}", Curiosity),
        template("{n} segredos de {title} que quase ninguém conhece", Curiosity),
        template("A verdade sobre {title}", Curiosity),
        template("Por que {title} funciona melhor do que você imagina?", Curiosity),
        template("{title}: faça isso antes que a janela feche", Urgency),
        template("Comece {title} hoje: o passo a passo rápido", Urgency),
        template("{title} agora ou nunca: o momento é esse", Urgency),
        template("{n} erros de {title} que travam seu canal", Fear),
        template("Pare de sabotar {title} com esses hábitos", Fear),
        template("Como dominar {title} em 30 dias", Desire),
        template("{title}: do zero ao avançado", Desire),
        template("O método definitivo de {title}", Desire),
    ]
}

fn synonym(language: &str, term: &str, replacements: &[&str]) -> SynonymEntry {
    SynonymEntry {
        language: language.to_string(),
        term: term.to_string(),
        replacements: replacements.iter().map(|s| s.to_string()).collect(),
    }
}

fn default_synonyms() -> Vec<SynonymEntry> {
    vec![
        synonym("pt", "dicas", &["truques", "segredos", "estratégias"]),
        synonym("pt", "iniciantes", &["novatos", "quem está começando"]),
        synonym("pt", "dinheiro", &["renda", "lucro"]),
        synonym("en", "tips", &["tricks", "secrets"]),
        synonym("en", "beginners", &["newcomers", "starters"]),
    ]
}

fn default_translations() -> Vec<TranslatedPrefix> {
    vec![
        TranslatedPrefix {
            language: "en".to_string(),
            prefix: "The ultimate guide to".to_string(),
        },
        TranslatedPrefix {
            language: "es".to_string(),
            prefix: "La guía definitiva de".to_string(),
        },
    ]
}
