use niche_radar::titles::{
    generate_titles, generate_variations, truncate_title, EmotionalTone, TitleCatalog,
    TitleOptions,
};

fn default_opts() -> TitleOptions {
    TitleOptions {
        seed: 42,
        ..TitleOptions::default()
    }
}

#[test]
fn titles_never_exceed_one_hundred_chars() {
    let catalog = TitleCatalog::default();
    let original = "a".repeat(150);
    let opts = TitleOptions {
        count: catalog.templates.len(),
        ..default_opts()
    };

    let titles = generate_titles(&original, &opts, &catalog);

    assert_eq!(titles.len(), catalog.templates.len());
    for title in &titles {
        assert!(title.chars().count() <= 100);
        assert!(title.ends_with('…'));
    }
}

#[test]
fn short_titles_are_left_untouched_by_truncation() {
    assert_eq!(truncate_title("renda fixa", 100), "renda fixa");

    let long = "x".repeat(101);
    let truncated = truncate_title(&long, 100);
    assert_eq!(truncated.chars().count(), 100);
    assert!(truncated.ends_with('…'));
}

#[test]
fn requesting_more_than_the_catalogue_caps_silently() {
    let catalog = TitleCatalog::default();
    let opts = TitleOptions {
        count: 999,
        ..default_opts()
    };

    let titles = generate_titles("como investir melhor", &opts, &catalog);
    assert_eq!(titles.len(), catalog.templates.len());
}

#[test]
fn generation_is_deterministic_per_seed() {
    let catalog = TitleCatalog::default();
    let opts = default_opts();

    let first = generate_titles("como investir melhor", &opts, &catalog);
    let second = generate_titles("como investir melhor", &opts, &catalog);

    assert_eq!(first, second);
}

#[test]
fn tone_filter_restricts_templates() {
    let catalog = TitleCatalog::default();
    let fear_templates = catalog
        .templates
        .iter()
        .filter(|tpl| tpl.tone == EmotionalTone::Fear)
        .count();
    let opts = TitleOptions {
        tone: Some(EmotionalTone::Fear),
        count: 999,
        ..default_opts()
    };

    let variations = generate_variations("como investir melhor", &opts, &catalog);

    assert_eq!(variations.len(), fear_templates);
    assert!(variations
        .iter()
        .all(|variation| variation.tone == EmotionalTone::Fear));
}

#[test]
fn synonym_substitution_is_case_insensitive() {
    let catalog = TitleCatalog::default();
    let opts = TitleOptions {
        keywords: vec!["dicas".to_string()],
        count: 4,
        ..default_opts()
    };

    let titles = generate_titles("DICAS de inglês para viagens", &opts, &catalog);

    assert!(!titles.is_empty());
    for title in &titles {
        assert!(!title.to_lowercase().contains("dicas"));
    }
}

#[test]
fn keywords_outside_the_dictionary_leave_the_title_alone() {
    let catalog = TitleCatalog::default();
    let opts = TitleOptions {
        keywords: vec!["inexistente".to_string()],
        count: 3,
        ..default_opts()
    };

    let titles = generate_titles("dicas de inglês", &opts, &catalog);
    assert!(titles.iter().all(|title| title.contains("dicas de inglês")));
}

#[test]
fn translations_follow_the_catalogue_languages() {
    let catalog = TitleCatalog::default();
    let opts = TitleOptions {
        include_translations: true,
        count: 2,
        ..default_opts()
    };

    let variations = generate_variations("como investir melhor", &opts, &catalog);

    assert_eq!(variations.len(), 2);
    for variation in &variations {
        let languages: Vec<&str> = variation
            .translations
            .iter()
            .map(|t| t.language.as_str())
            .collect();
        assert_eq!(languages, vec!["en", "es"]);
        assert!(variation
            .translations
            .iter()
            .all(|t| t.title.chars().count() <= 100));
    }
}

#[test]
fn structured_variations_carry_language_tag() {
    let catalog = TitleCatalog::default();
    let opts = TitleOptions {
        language: "en".to_string(),
        count: 3,
        ..default_opts()
    };

    let variations = generate_variations("passive income ideas", &opts, &catalog);
    assert!(variations
        .iter()
        .all(|variation| variation.language == "en"));
}
