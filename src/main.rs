mod api;
mod searches;
mod server;
mod trending;
mod youtube_api;

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::warn;

use niche_radar::config::AppConfig;
use niche_radar::extract::{self, synthetic};
use niche_radar::metrics::SyntheticMetricsSource;
use niche_radar::schedule::{Cadence, ScheduleRecommendation};
use niche_radar::titles::{EmotionalTone, TitleOptions};
use niche_radar::{
    competition, format_float, format_number, format_percent, run_analysis, schedule, titles,
    AnalysisParams, Channel,
};
use youtube_api::YoutubeClient;

#[derive(Parser)]
#[command(name = "niche-radar", about = "YouTube niche research toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract, validate and rank subniches for a principal niche
    Analyze(AnalyzeArgs),
    /// Generate title variations from an original title
    Titles(TitlesArgs),
    /// Compare per-language competition for a subniche
    Competition(CompetitionArgs),
    /// Lay out a publication calendar
    Schedule(ScheduleArgs),
    /// Run the HTTP server
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone)]
struct AnalyzeArgs {
    #[arg(long)]
    niche: String,
    #[arg(long, default_value = "pt")]
    language: String,
    #[arg(long, default_value_t = 50)]
    max_channels: u32,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    api_key: Option<String>,
    #[arg(long)]
    synthetic: bool,
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    min_growth_rate: Option<f64>,
    #[arg(long)]
    min_avg_views: Option<f64>,
    #[arg(long)]
    max_avg_age_months: Option<f64>,
    #[arg(long)]
    details: bool,
}

#[derive(Args, Debug, Clone)]
struct TitlesArgs {
    #[arg(long)]
    title: String,
    #[arg(long, default_value = "pt")]
    language: String,
    #[arg(long)]
    tone: Option<String>,
    #[arg(long, value_delimiter = ',')]
    keywords: Vec<String>,
    #[arg(long, default_value_t = 5)]
    count: usize,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    translations: bool,
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
struct CompetitionArgs {
    #[arg(long)]
    subnicho: String,
    #[arg(long, value_delimiter = ',', default_value = "pt,en,es")]
    languages: Vec<String>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
struct ScheduleArgs {
    #[arg(long, value_delimiter = ',')]
    subniches: Vec<String>,
    #[arg(long, default_value = "semanal")]
    cadence: String,
    #[arg(long, default_value_t = 4)]
    cycles: u32,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    #[arg(long, default_value_t = 8787)]
    port: u16,
    #[arg(long, default_value = "webapp/dist")]
    web_root: String,
    #[arg(long, default_value = "data/saved_searches.json")]
    searches_path: String,
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();

    match cli.command {
        Command::Analyze(args) => run_analyze(args).await,
        Command::Titles(args) => run_titles(args),
        Command::Competition(args) => run_competition(args),
        Command::Schedule(args) => run_schedule(args),
        Command::Serve(args) => {
            let (config, _) = AppConfig::load(args.config.clone())?;
            server::serve(args, config).await
        }
    }
}

async fn run_analyze(args: AnalyzeArgs) -> Result<(), String> {
    let (config, _) = AppConfig::load(args.config.clone())?;

    let mut criteria = config.validation.clone();
    if let Some(value) = args.min_growth_rate {
        criteria.min_growth_rate = value;
    }
    if let Some(value) = args.min_avg_views {
        criteria.min_avg_views = value;
    }
    if let Some(value) = args.max_avg_age_months {
        criteria.max_avg_age_months = value;
    }

    let params = AnalysisParams {
        niche: args.niche.trim().to_string(),
        language: args.language.clone(),
        max_channels: args.max_channels,
        seed: args.seed.unwrap_or_else(default_seed),
    };
    if params.niche.is_empty() {
        return Err("Informe o nicho principal".to_string());
    }

    let client = if args.synthetic {
        None
    } else {
        match args.api_key {
            Some(key) => Some(YoutubeClient::new(key, &config.youtube)?),
            None => YoutubeClient::from_env(&config.youtube),
        }
    };

    let now = Utc::now();
    let (channels, failures, source_label) = match client {
        Some(client) => {
            let (channels, failures) = client
                .fetch_channels(
                    &params.niche,
                    &params.language,
                    params.channel_limit(),
                    config.youtube.recent_videos_limit,
                )
                .await?;
            (channels, failures, "youtube")
        }
        None => (
            synthetic::generate_channels(
                &params.niche,
                &params.language,
                params.channel_limit(),
                params.seed,
                now,
            ),
            Vec::new(),
            "sintética",
        ),
    };

    let report = extract::ExtractionReport::from_channels(&channels, failures);
    let mut source = SyntheticMetricsSource::new(params.seed);
    let output = run_analysis(report.subnichos, &mut source, &criteria, &config.narrative, now);
    let failures = report.failures;

    println!(
        "Nicho: {} ({}) — fonte: {}",
        params.niche, params.language, source_label
    );
    println!(
        "Canais: {} | subnichos: {} | validados: {}",
        channels.len(),
        output.validated.len(),
        output.validated_count()
    );

    if !failures.is_empty() {
        warn!(count = failures.len(), "some channels failed to fetch");
        println!("Canais ignorados por falha de busca: {}", failures.len());
        for failure in &failures {
            println!("  - {}", failure);
        }
    }

    if output.prioritized.is_empty() {
        println!("\nNenhum subnicho passou nos critérios de validação.");
    } else {
        println!("\nTop subnichos:");
        for (position, item) in output.prioritized.iter().enumerate() {
            let metrics = item.metrics();
            println!(
                "{}. {} — score {}",
                position + 1,
                item.label(),
                format_float(item.score, 2)
            );
            println!(
                "   Crescimento: {} | Média de views: {} | Idade média: {:.1} meses",
                format_percent(metrics.growth_rate),
                format_number(metrics.avg_views),
                metrics.avg_channel_age_months
            );
            println!("   Pontos fortes: {}", item.strengths);
            println!("   Riscos: {}", item.risks);
        }

        if let Some(top) = output.prioritized.first() {
            if let Some(channel) = strongest_channel(&top.metrics().subnicho.channels) {
                let micro = extract::micro_subnichos(channel, 3);
                if !micro.is_empty() {
                    println!("\nMicro-subnichos a partir de \"{}\": {}", channel.name, micro.join(", "));
                }
            }
        }
    }

    if args.details {
        let rejected: Vec<_> = output.validated.iter().filter(|s| !s.validated).collect();
        if !rejected.is_empty() {
            println!("\nSubnichos reprovados:");
            for item in rejected {
                println!("- {}", item.label());
                for reason in &item.reasons {
                    println!("    {}", reason);
                }
            }
        }
    }

    Ok(())
}

fn strongest_channel(channels: &[Channel]) -> Option<&Channel> {
    channels.iter().max_by_key(|c| c.subscriber_count)
}

fn run_titles(args: TitlesArgs) -> Result<(), String> {
    let (config, _) = AppConfig::load(args.config.clone())?;

    let tone = match args.tone.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => Some(
            EmotionalTone::from_str(value)
                .ok_or_else(|| format!("Tom emocional inválido: {}", value))?,
        ),
        _ => None,
    };

    let opts = TitleOptions {
        language: args.language,
        tone,
        keywords: args.keywords,
        count: args.count,
        seed: args.seed.unwrap_or_else(default_seed),
        include_translations: args.translations,
    };

    let variations = titles::generate_variations(&args.title, &opts, &config.titles);
    if variations.is_empty() {
        println!("Nenhuma variação gerada.");
        return Ok(());
    }

    for variation in variations {
        println!("[{}] {}", variation.tone.label(), variation.title);
        for translation in &variation.translations {
            println!("    ({}) {}", translation.language, translation.title);
        }
    }

    Ok(())
}

fn run_competition(args: CompetitionArgs) -> Result<(), String> {
    let (config, _) = AppConfig::load(args.config.clone())?;
    let seed = args.seed.unwrap_or_else(default_seed);

    let data = competition::simulate_competition(
        &args.subnicho,
        &args.languages,
        seed,
        &config.competition,
    );
    let comparisons = competition::compare_languages(data, &config.competition);

    println!("Concorrência para \"{}\":", args.subnicho);
    for comparison in &comparisons {
        let window = if comparison.open_window {
            format!("janela aberta ({} dias restantes)", comparison.days_until_close)
        } else {
            "janela fechada".to_string()
        };
        println!(
            "- {}: {} concorrentes | idade média {:.1} meses | {}",
            comparison.data.language,
            comparison.data.competitor_count,
            comparison.data.avg_channel_age_months,
            window
        );
    }

    if let Some(recommendation) = competition::recommend(&comparisons, &config.competition) {
        println!(
            "\nRecomendação: {} — estratégia de {}",
            recommendation.language,
            recommendation.strategy.label()
        );
        println!("{}", recommendation.reason);
    }

    Ok(())
}

fn run_schedule(args: ScheduleArgs) -> Result<(), String> {
    let (config, _) = AppConfig::load(args.config.clone())?;

    if args.subniches.is_empty() {
        return Err("Informe ao menos um subnicho (--subniches)".to_string());
    }
    let cadence = Cadence::from_label(&args.cadence)
        .ok_or_else(|| format!("Cadência inválida: {}", args.cadence))?;

    let recommendations: Vec<ScheduleRecommendation> = args
        .subniches
        .iter()
        .map(|label| ScheduleRecommendation {
            micro_subnicho: label.trim().to_string(),
        })
        .collect();

    let entries = schedule::build_schedule(
        &recommendations,
        cadence,
        args.cycles,
        Utc::now(),
        &config.schedule,
        &config.titles,
        args.seed.unwrap_or_else(default_seed),
    );

    println!(
        "Calendário ({}, {} ciclos):",
        cadence.label(),
        entries.len()
    );
    for entry in entries {
        println!(
            "{} | {} | {}",
            entry.date.format("%d/%m/%Y %H:%M"),
            entry.micro_subnicho,
            entry.title
        );
    }

    Ok(())
}

pub fn default_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_nanos() as u64)
        .unwrap_or(0)
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
