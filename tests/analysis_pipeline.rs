use chrono::{DateTime, Duration, TimeZone, Utc};

use niche_radar::competition::{
    compare_languages, recommend, simulate_competition, CompetitionConfig, CompetitionData,
    TitleStrategy,
};
use niche_radar::extract::{extract_subnichos, micro_subnichos, synthetic::generate_channels};
use niche_radar::metrics::{compute_metrics, FixedMetricsSource};
use niche_radar::prioritize::{prioritize, NarrativeThresholds};
use niche_radar::schedule::{build_schedule, Cadence, ScheduleConfig, ScheduleRecommendation};
use niche_radar::titles::TitleCatalog;
use niche_radar::validate::{validate_all, validate_one, ValidationCriteria};
use niche_radar::{months_between, run_analysis, Channel, Subnicho, SubnichoMetrics};

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap()
}

fn channel(id: &str, created_at: DateTime<Utc>, videos: u64, subs: u64, titles: &[&str]) -> Channel {
    Channel {
        channel_id: id.to_string(),
        name: format!("Canal {}", id),
        created_at,
        video_count: videos,
        subscriber_count: subs,
        recent_titles: titles.iter().map(|t| t.to_string()).collect(),
    }
}

fn subnicho(label: &str, channels: Vec<Channel>) -> Subnicho {
    Subnicho {
        label: label.to_string(),
        channels,
    }
}

fn metrics_record(label: &str, growth: f64, views: f64, age: f64, variance: f64) -> SubnichoMetrics {
    SubnichoMetrics {
        subnicho: subnicho(label, Vec::new()),
        avg_subscribers_per_video: 0.0,
        growth_rate: growth,
        avg_views: views,
        avg_channel_age_months: age,
        view_variance: variance,
    }
}

fn default_criteria() -> ValidationCriteria {
    ValidationCriteria {
        min_growth_rate: 10.0,
        min_avg_views: 5_000.0,
        max_avg_age_months: 30.0,
    }
}

fn fixed_source() -> FixedMetricsSource {
    FixedMetricsSource {
        growth_rate: 12.0,
        avg_views: 8_000.0,
        view_variance: 0.1,
    }
}

#[test]
fn metrics_zero_channels_yield_zeroes() {
    let mut source = fixed_source();
    let metrics = compute_metrics(vec![subnicho("vazio", Vec::new())], &mut source, fixed_now());

    assert_eq!(metrics.len(), 1);
    let m = &metrics[0];
    assert_eq!(m.avg_subscribers_per_video, 0.0);
    assert_eq!(m.growth_rate, 0.0);
    assert_eq!(m.avg_views, 0.0);
    assert_eq!(m.avg_channel_age_months, 0.0);
    assert_eq!(m.view_variance, 0.0);
}

#[test]
fn metrics_average_subscribers_and_age() {
    let older = Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap();
    let newer = Utc.with_ymd_and_hms(2025, 8, 1, 0, 0, 0).unwrap();
    let channels = vec![
        channel("a", older, 100, 50_000, &[]),
        channel("b", newer, 100, 150_000, &[]),
    ];

    let mut source = fixed_source();
    let metrics = compute_metrics(
        vec![subnicho("financas", channels)],
        &mut source,
        fixed_now(),
    );

    let m = &metrics[0];
    assert!((m.avg_subscribers_per_video - 1_000.0).abs() < 1e-9);
    assert!((m.avg_channel_age_months - 16.0).abs() < 1e-9);
    assert!((m.growth_rate - 12.0).abs() < 1e-9);
    assert!((m.avg_views - 8_000.0).abs() < 1e-9);
}

#[test]
fn months_between_rounds_down_partial_months() {
    let from = Utc.with_ymd_and_hms(2026, 7, 15, 0, 0, 0).unwrap();
    assert_eq!(months_between(from, fixed_now()), 0.0);

    let future = Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap();
    assert_eq!(months_between(future, fixed_now()), 0.0);
}

#[test]
fn validator_accepts_within_thresholds() {
    let result = validate_one(
        metrics_record("pets", 15.0, 8_000.0, 20.0, 0.1),
        &default_criteria(),
    );

    assert!(result.validated);
    assert!(result.reasons.is_empty());
}

#[test]
fn validator_rejects_low_growth_with_exact_reason() {
    let result = validate_one(
        metrics_record("pets", 5.0, 8_000.0, 20.0, 0.1),
        &default_criteria(),
    );

    assert!(!result.validated);
    assert_eq!(
        result.reasons,
        vec!["Taxa de crescimento (5.0%) abaixo do mínimo (10%)".to_string()]
    );
}

#[test]
fn validator_reports_each_failing_condition() {
    let result = validate_one(
        metrics_record("pets", 5.0, 1_000.0, 40.0, 0.1),
        &default_criteria(),
    );

    assert!(!result.validated);
    assert_eq!(result.reasons.len(), 3);
}

#[test]
fn validator_reasons_empty_iff_validated() {
    let criteria = default_criteria();
    let grid = [
        (15.0, 8_000.0, 20.0),
        (5.0, 8_000.0, 20.0),
        (15.0, 1_000.0, 20.0),
        (15.0, 8_000.0, 40.0),
        (10.0, 5_000.0, 30.0),
    ];

    for (growth, views, age) in grid {
        let result = validate_one(metrics_record("x", growth, views, age, 0.1), &criteria);
        assert_eq!(result.validated, result.reasons.is_empty());
    }
}

#[test]
fn prioritizer_returns_top_five_sorted() {
    let records: Vec<SubnichoMetrics> = (0..7)
        .map(|idx| {
            metrics_record(
                &format!("s{}", idx),
                10.0 + idx as f64,
                5_000.0 + 1_000.0 * idx as f64,
                12.0,
                0.1,
            )
        })
        .collect();
    let validated = validate_all(records, &default_criteria());
    let ranked = prioritize(&validated, &NarrativeThresholds::default());

    assert_eq!(ranked.len(), 5);
    for pair in ranked.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    assert!(ranked.iter().all(|item| item.validated.validated));
    assert_eq!(ranked[0].label(), "s6");
}

#[test]
fn prioritizer_excludes_unvalidated() {
    let records = vec![
        metrics_record("bom", 15.0, 8_000.0, 20.0, 0.1),
        metrics_record("ruim", 2.0, 8_000.0, 20.0, 0.1),
    ];
    let validated = validate_all(records, &default_criteria());
    let ranked = prioritize(&validated, &NarrativeThresholds::default());

    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].label(), "bom");
}

#[test]
fn prioritizer_empty_validated_yields_empty() {
    let records = vec![
        metrics_record("a", 2.0, 8_000.0, 20.0, 0.1),
        metrics_record("b", 3.0, 8_000.0, 20.0, 0.1),
    ];
    let validated = validate_all(records, &default_criteria());
    let ranked = prioritize(&validated, &NarrativeThresholds::default());

    assert!(ranked.is_empty());
}

#[test]
fn prioritizer_score_is_batch_relative() {
    let records = vec![
        metrics_record("lider", 20.0, 10_000.0, 12.0, 0.1),
        metrics_record("meio", 10.0, 5_000.0, 12.0, 0.1),
    ];
    let validated = validate_all(records, &default_criteria());
    let ranked = prioritize(&validated, &NarrativeThresholds::default());

    assert!((ranked[0].score - 1.0).abs() < 1e-9);
    assert!((ranked[1].score - 0.5).abs() < 1e-9);
}

#[test]
fn prioritizer_is_idempotent() {
    let records = vec![
        metrics_record("a", 18.0, 9_000.0, 12.0, 0.1),
        metrics_record("b", 12.0, 7_000.0, 8.0, 0.3),
        metrics_record("c", 16.0, 6_000.0, 25.0, 0.2),
    ];
    let validated = validate_all(records, &default_criteria());
    let thresholds = NarrativeThresholds::default();

    let first = prioritize(&validated, &thresholds);
    let second = prioritize(&validated, &thresholds);

    let labels_first: Vec<&str> = first.iter().map(|item| item.label()).collect();
    let labels_second: Vec<&str> = second.iter().map(|item| item.label()).collect();
    assert_eq!(labels_first, labels_second);
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.score, b.score);
    }
}

#[test]
fn extraction_groups_channels_by_shared_keyword() {
    let created = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let channels = vec![
        channel(
            "a",
            created,
            50,
            10_000,
            &[
                "Investimentos para quem está começando",
                "Investimentos em renda fixa sem medo",
            ],
        ),
        channel(
            "b",
            created,
            80,
            20_000,
            &[
                "Meus investimentos do mês",
                "Investimentos que mudaram minha vida",
            ],
        ),
    ];

    let subnichos = extract_subnichos(&channels);
    let group = subnichos
        .iter()
        .find(|s| s.label == "investimentos")
        .expect("expected an 'investimentos' group");

    assert_eq!(group.channels.len(), 2);
    assert!(subnichos.iter().all(|s| s.label != "para"));
    assert!(subnichos.iter().all(|s| s.label.chars().count() >= 4));
}

#[test]
fn extraction_empty_input_yields_empty_list() {
    assert!(extract_subnichos(&[]).is_empty());
}

#[test]
fn micro_subnichos_use_adjacent_word_pairs() {
    let created = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let one = channel(
        "a",
        created,
        50,
        10_000,
        &[
            "Renda fixa para iniciantes",
            "Renda fixa sem mistério",
            "Renda fixa na prática",
        ],
    );

    let micro = micro_subnichos(&one, 2);
    assert_eq!(micro.first().map(String::as_str), Some("renda fixa"));
}

#[test]
fn synthetic_channels_are_deterministic_per_seed() {
    let now = fixed_now();
    let first = generate_channels("culinária", "pt", 20, 7, now);
    let second = generate_channels("culinária", "pt", 20, 7, now);

    assert_eq!(first.len(), 20);
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.name, b.name);
        assert_eq!(a.recent_titles, b.recent_titles);
        assert_eq!(a.subscriber_count, b.subscriber_count);
    }
}

#[test]
fn full_pipeline_over_synthetic_channels() {
    let now = fixed_now();
    let channels = generate_channels("marketing digital", "pt", 30, 11, now);
    let subnichos = extract_subnichos(&channels);
    assert!(!subnichos.is_empty());

    let mut source = fixed_source();
    let output = run_analysis(
        subnichos,
        &mut source,
        &default_criteria(),
        &NarrativeThresholds::default(),
        now,
    );

    assert!(output.prioritized.len() <= 5);
    assert!(output
        .prioritized
        .iter()
        .all(|item| item.validated.validated));
}

#[test]
fn competition_open_windows_sort_first() {
    let config = CompetitionConfig::default();
    let data = vec![
        CompetitionData {
            language: "pt".to_string(),
            competitor_count: 20,
            avg_channel_age_months: 10.0,
            avg_top_views: 50_000.0,
        },
        CompetitionData {
            language: "en".to_string(),
            competitor_count: 5,
            avg_channel_age_months: 2.0,
            avg_top_views: 80_000.0,
        },
        CompetitionData {
            language: "es".to_string(),
            competitor_count: 3,
            avg_channel_age_months: 1.0,
            avg_top_views: 30_000.0,
        },
    ];

    let comparisons = compare_languages(data, &config);

    assert_eq!(comparisons.len(), 3);
    assert_eq!(comparisons[0].data.language, "es");
    assert_eq!(comparisons[1].data.language, "en");
    assert!(comparisons[0].open_window && comparisons[1].open_window);
    assert!(!comparisons[2].open_window);
    assert!(comparisons[0].days_until_close > 0);
    assert_eq!(comparisons[2].days_until_close, 0);

    let recommendation = recommend(&comparisons, &config).expect("non-empty input");
    assert_eq!(recommendation.language, "es");
    assert_eq!(recommendation.strategy, TitleStrategy::DirectKeyword);
}

#[test]
fn competition_falls_back_when_all_windows_closed() {
    let config = CompetitionConfig::default();
    let data = vec![
        CompetitionData {
            language: "pt".to_string(),
            competitor_count: 25,
            avg_channel_age_months: 10.0,
            avg_top_views: 50_000.0,
        },
        CompetitionData {
            language: "en".to_string(),
            competitor_count: 12,
            avg_channel_age_months: 8.0,
            avg_top_views: 70_000.0,
        },
    ];

    let comparisons = compare_languages(data, &config);
    let recommendation = recommend(&comparisons, &config).expect("non-empty input");

    assert_eq!(recommendation.language, "en");
    assert_eq!(recommendation.strategy, TitleStrategy::MicroSubnicho);
}

#[test]
fn competition_simulation_covers_every_language() {
    let config = CompetitionConfig::default();
    let languages = vec!["pt".to_string(), "en".to_string(), "es".to_string()];

    let first = simulate_competition("receitas", &languages, 3, &config);
    let second = simulate_competition("receitas", &languages, 3, &config);

    assert_eq!(first.len(), 3);
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.language, b.language);
        assert_eq!(a.competitor_count, b.competitor_count);
    }
}

#[test]
fn schedule_weekly_three_cycles() {
    let recommendations = vec![ScheduleRecommendation {
        micro_subnicho: "A".to_string(),
    }];
    let entries = build_schedule(
        &recommendations,
        Cadence::Semanal,
        3,
        fixed_now(),
        &ScheduleConfig::default(),
        &TitleCatalog::default(),
        42,
    );

    assert_eq!(entries.len(), 3);
    assert!(entries.iter().all(|entry| entry.micro_subnicho == "A"));
    for pair in entries.windows(2) {
        assert_eq!(pair[1].date - pair[0].date, Duration::days(7));
    }
    for pair in entries.windows(2) {
        assert!(pair[1].date > pair[0].date);
    }
}

#[test]
fn schedule_round_robin_wraps() {
    let recommendations = vec![
        ScheduleRecommendation {
            micro_subnicho: "A".to_string(),
        },
        ScheduleRecommendation {
            micro_subnicho: "B".to_string(),
        },
    ];
    let entries = build_schedule(
        &recommendations,
        Cadence::Diario,
        5,
        fixed_now(),
        &ScheduleConfig::default(),
        &TitleCatalog::default(),
        1,
    );

    let labels: Vec<&str> = entries
        .iter()
        .map(|entry| entry.micro_subnicho.as_str())
        .collect();
    assert_eq!(labels, vec!["A", "B", "A", "B", "A"]);
}

#[test]
fn schedule_empty_recommendations_yield_empty_calendar() {
    let entries = build_schedule(
        &[],
        Cadence::Mensal,
        4,
        fixed_now(),
        &ScheduleConfig::default(),
        &TitleCatalog::default(),
        1,
    );
    assert!(entries.is_empty());
}

#[test]
fn cadence_labels_map_to_intervals() {
    assert_eq!(Cadence::from_label("semanal"), Some(Cadence::Semanal));
    assert_eq!(Cadence::from_label("Quinzenal"), Some(Cadence::Quinzenal));
    assert_eq!(Cadence::from_label("diária"), Some(Cadence::Diario));
    assert_eq!(Cadence::from_label("anual"), None);
    assert_eq!(Cadence::Mensal.interval_days(), 30);
}
