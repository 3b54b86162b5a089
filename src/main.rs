// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use ransomscope::utils::{format_success, format_warning};
use ransomscope::{
    AttackStixClient, Config, Deduplicator, DisabledLookup, IncidentRecord, IncidentSource,
    JsonExporter, ProfileMatcher, RansomfeedClient, RansomwareLiveClient, ReportRenderer,
    TargetingAnalyzer, TechniqueLookup, TtpCache,
    prompt::{self, ProfileSelection},
};
use std::path::PathBuf;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "ransomscope")]
#[command(version = "0.1.0")]
#[command(about = "Ransomware disclosure aggregation and threat-actor targeting analysis", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch both feeds, pick a profile, and rank actors against it
    Analyze {
        /// Industry profile numbers (comma-separated); prompts when absent
        #[arg(long, value_name = "NUMS")]
        industries: Option<String>,

        /// Region profile numbers (comma-separated); prompts when absent
        #[arg(long, value_name = "NUMS")]
        regions: Option<String>,

        /// Country/sub-region keywords; defaults to all keywords of the chosen regions
        #[arg(long, value_name = "KEYWORDS", value_delimiter = ',')]
        countries: Option<Vec<String>>,

        /// Skip MITRE ATT&CK technique enrichment
        #[arg(long)]
        no_ttp: bool,
    },

    /// Fetch and deduplicate both feeds without analysis
    Fetch {
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[arg(short, long)]
        pretty: bool,
    },

    /// List the selectable industry and region profiles
    Profiles,

    /// Look up MITRE ATT&CK techniques for a single actor
    Ttp {
        /// Threat group name or alias
        actor: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    ransomscope::utils::logging::init_logger(cli.color, cli.verbose);

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    match cli.command {
        Commands::Analyze {
            industries,
            regions,
            countries,
            no_ttp,
        } => {
            cmd_analyze(&config, industries, regions, countries, no_ttp).await?;
        }
        Commands::Fetch { output, pretty } => {
            cmd_fetch(&config, output, pretty).await?;
        }
        Commands::Profiles => {
            cmd_profiles();
        }
        Commands::Ttp { actor } => {
            cmd_ttp(&config, &actor).await?;
        }
    }

    Ok(())
}

/// Fetches both feeds sequentially. A failing source is logged and
/// contributes zero records; it never aborts the run on its own.
async fn fetch_all(config: &Config) -> Result<Vec<IncidentRecord>> {
    let sources: Vec<Box<dyn IncidentSource>> = vec![
        Box::new(RansomfeedClient::new(&config.sources)?),
        Box::new(RansomwareLiveClient::new(&config.sources)?),
    ];

    let mut all_records = Vec::new();
    for source in &sources {
        info!("Fetching from {}", source.name());
        match source.fetch().await {
            Ok(records) => {
                info!("{}: {} raw entries", source.name(), records.len());
                all_records.extend(records);
            }
            Err(e) => {
                error!("{}: {}", source.name(), e);
            }
        }
    }

    Ok(all_records)
}

async fn fetch_deduplicated(config: &Config) -> Result<Vec<IncidentRecord>> {
    let raw = fetch_all(config).await?;
    info!("Fetched {} raw entries total", raw.len());

    let merged = Deduplicator::merge_fetched(raw)?;
    info!("Combined into {} unique entries", merged.len());
    Ok(merged)
}

fn technique_lookup(config: &Config, no_ttp: bool) -> Result<Box<dyn TechniqueLookup>> {
    if no_ttp || !config.attack.enabled {
        info!("Technique enrichment disabled");
        return Ok(Box::new(DisabledLookup));
    }
    let client = AttackStixClient::new(
        config.attack.stix_url.clone(),
        &config.sources.user_agent,
        config.attack.timeout_secs,
    )?;
    Ok(Box::new(client))
}

fn select_profile(
    industries: Option<String>,
    regions: Option<String>,
    countries: Option<Vec<String>>,
) -> Result<(ProfileSelection, ProfileSelection)> {
    let mut stdin = std::io::stdin().lock();

    let industry = match industries {
        Some(keys) => {
            let indices = prompt::parse_selection(&keys, ransomscope::INDUSTRY_PROFILES.len())?;
            prompt::industry_selection(&indices)
        }
        None => prompt::select_industries(&mut stdin)?,
    };

    let country = match prompt::country_selection_from_flags(regions.as_deref(), countries)? {
        Some(selection) => selection,
        None => prompt::select_countries(&mut stdin)?,
    };

    Ok((industry, country))
}

async fn cmd_analyze(
    config: &Config,
    industries: Option<String>,
    regions: Option<String>,
    countries: Option<Vec<String>>,
    no_ttp: bool,
) -> Result<()> {
    let records = fetch_deduplicated(config).await?;

    let (industry_selection, country_selection) = select_profile(industries, regions, countries)?;
    info!(
        "Profile: industries [{}], countries [{}]",
        industry_selection.names.join(", "),
        country_selection.names.join(", ")
    );

    let industry_matcher = ProfileMatcher::new(&industry_selection.keywords);
    let country_matcher = ProfileMatcher::new(&country_selection.keywords);

    let ttp_cache = TtpCache::new(technique_lookup(config, no_ttp)?);
    let mut analyzer = TargetingAnalyzer::new(config.analysis.clone(), ttp_cache);
    let stats = analyzer
        .analyze(records, &industry_matcher, &country_matcher)
        .await;

    let renderer = ReportRenderer::new(&config.report);
    let report = renderer.render(
        &stats,
        &industry_selection.names,
        &country_selection.names,
    );
    println!("\n{}", report);

    Ok(())
}

async fn cmd_fetch(config: &Config, output: Option<PathBuf>, pretty: bool) -> Result<()> {
    let records = fetch_deduplicated(config).await?;

    let known_actors = records.iter().filter(|r| r.has_known_actor()).count();
    println!("{}", format_success(&format!("{} unique records", records.len())));
    println!("  with resolved actor: {}", known_actors);
    if known_actors < records.len() {
        println!(
            "{}",
            format_warning(&format!(
                "{} records have no resolved actor",
                records.len() - known_actors
            ))
        );
    }

    if let Some(output) = output {
        let exporter = JsonExporter::new(output);
        let count = exporter
            .export_records(&records, pretty)
            .context("Failed to export records")?;
        println!("{}", format_success(&format!("exported {} records", count)));
    }

    Ok(())
}

fn cmd_profiles() {
    println!("Industry profiles:");
    for (i, profile) in ransomscope::INDUSTRY_PROFILES.iter().enumerate() {
        println!("  {}: {}", i + 1, profile.name);
    }
    println!("\nRegion profiles:");
    for (i, profile) in ransomscope::REGION_PROFILES.iter().enumerate() {
        println!("  {}: {} ({})", i + 1, profile.name, profile.keywords.join(", "));
    }
}

async fn cmd_ttp(config: &Config, actor: &str) -> Result<()> {
    let mut cache = TtpCache::new(technique_lookup(config, false)?);
    let techniques = cache.techniques_for(actor).await;

    if techniques.is_empty() {
        println!("No techniques recorded for '{}'", actor);
        return Ok(());
    }

    println!("Techniques for '{}':", actor);
    for (ttp_id, name) in &techniques {
        println!("  - {}: {}", ttp_id, name);
    }
    Ok(())
}
