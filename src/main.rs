//! mini-ats: score a resume against a job description by skill coverage

use anyhow::{bail, Context};
use clap::Parser;
use log::{error, info};
use mini_ats::cli::{self, Cli, Commands, ConfigAction, SkillAction};
use mini_ats::config::Config;
use mini_ats::input::file_detector::FileType;
use mini_ats::input::InputManager;
use mini_ats::output::{save_report_to_file, suggest_filename, FitReport, ReportGenerator, ReportMetadata};
use mini_ats::processing::vocabulary::{SkillCategory, SkillSource, SkillVocabulary};
use mini_ats::storage::defaults::default_skill_rows;
use mini_ats::storage::{SkillCatalog, SqliteSkillSource};
use mini_ats::{AnalysisEngine, AnalysisRequest};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            process::exit(1);
        }
    };

    let database_path = cli
        .database
        .clone()
        .unwrap_or_else(|| config.database_path().to_path_buf());

    if let Err(e) = run_command(cli.command, config, database_path, cli.config).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Could not read configuration from {}", path.display())),
        None => Config::load().context("Could not load the default configuration"),
    }
}

async fn run_command(
    command: Commands,
    config: Config,
    database_path: PathBuf,
    config_override: Option<PathBuf>,
) -> anyhow::Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            title,
            output,
            detailed,
            save,
            no_color,
        } => {
            let options = AnalyzeOptions {
                title,
                output,
                detailed,
                save,
                no_color,
            };
            run_analyze(&resume, &job, options, &config, database_path).await
        }

        Commands::Skills { action } => match action {
            SkillAction::List { category } => list_skills(&database_path, category.as_deref()),
            SkillAction::Init { force } => init_skills(&database_path, force),
            SkillAction::Add { name, category } => add_skill(&database_path, &name, &category),
        },

        Commands::Config { action } => {
            let config_path = config_override.unwrap_or_else(Config::config_path);
            match action.unwrap_or(ConfigAction::Show) {
                ConfigAction::Show => {
                    let rendered = toml::to_string_pretty(&config).context("Failed to render configuration")?;
                    println!("# {}", config_path.display());
                    println!("{}", rendered);
                }
                ConfigAction::Path => {
                    println!("{}", config_path.display());
                }
                ConfigAction::Reset => {
                    Config::default()
                        .save_to(&config_path)
                        .with_context(|| format!("Failed to write {}", config_path.display()))?;
                    println!("Configuration reset to defaults at {}", config_path.display());
                }
            }
            Ok(())
        }
    }
}

struct AnalyzeOptions {
    title: Option<String>,
    output: Option<String>,
    detailed: bool,
    save: Option<PathBuf>,
    no_color: bool,
}

async fn run_analyze(
    resume: &Path,
    job: &Path,
    options: AnalyzeOptions,
    config: &Config,
    database_path: PathBuf,
) -> anyhow::Result<()> {
    let started = Instant::now();

    cli::validate_file_extension(resume, &FileType::SUPPORTED_EXTENSIONS)
        .map_err(|e| anyhow::anyhow!("Resume file: {}", e))?;
    cli::validate_file_extension(job, &FileType::SUPPORTED_EXTENSIONS)
        .map_err(|e| anyhow::anyhow!("Job description file: {}", e))?;

    let output_format = match options.output.as_deref() {
        Some(format) => cli::parse_output_format(format).map_err(anyhow::Error::msg)?,
        None => config.output.format,
    };

    let mut inputs = InputManager::new();
    let resume_text = inputs
        .extract_text(resume)
        .await
        .with_context(|| format!("Failed to read resume {}", resume.display()))?;
    let job_text = inputs
        .extract_text(job)
        .await
        .with_context(|| format!("Failed to read job description {}", job.display()))?;

    info!("Using skill database at {}", database_path.display());
    let engine = AnalysisEngine::new(SqliteSkillSource::new(database_path))
        .with_job_title_max_chars(config.analysis.job_title_max_chars);

    let request = AnalysisRequest::new(&job_text, &resume_text).with_job_title(options.title.as_deref());
    let analysis = engine.analyze(&request)?;
    let vocabulary_size = engine.loaded_vocabulary_size();

    let elapsed_ms = started.elapsed().as_millis() as u64;
    let metadata = ReportMetadata::new(resume, job, elapsed_ms, vocabulary_size);
    let report = FitReport::new(analysis, metadata);

    let detailed = options.detailed || config.output.detailed;
    let use_colors = config.output.color_output && !options.no_color && options.save.is_none();
    let generator = ReportGenerator::with_options(use_colors, detailed, config.output.max_suggestions);
    let content = generator.generate_report(&report, &output_format)?;

    match options.save {
        Some(path) => {
            let path = if path.is_dir() {
                path.join(suggest_filename(&output_format, &resume.to_string_lossy(), true))
            } else {
                path
            };
            save_report_to_file(&content, &path)
                .with_context(|| format!("Failed to save report to {}", path.display()))?;
            println!("Report saved to {}", path.display());
        }
        None => println!("{}", content),
    }

    Ok(())
}

fn list_skills(database_path: &Path, category: Option<&str>) -> anyhow::Result<()> {
    let filter = category
        .map(cli::parse_category)
        .transpose()
        .map_err(anyhow::Error::msg)?;

    let source = SqliteSkillSource::new(database_path);
    let vocabulary = SkillVocabulary::from_rows(source.fetch_rows()?)?;

    let categories: Vec<SkillCategory> = match filter {
        Some(category) => vec![category],
        None => SkillCategory::ALL.to_vec(),
    };

    for category in categories {
        let phrases = vocabulary.phrases(category);
        println!("{} ({}):", category, phrases.len());
        for phrase in phrases {
            println!("  {}", phrase);
        }
    }

    Ok(())
}

fn init_skills(database_path: &Path, force: bool) -> anyhow::Result<()> {
    let mut catalog = SkillCatalog::open(database_path)
        .with_context(|| format!("Failed to open skill database {}", database_path.display()))?;

    let existing = catalog.count()?;
    if existing > 0 {
        if !force {
            bail!(
                "{} already holds {} skills; use --force to replace them",
                database_path.display(),
                existing
            );
        }
        catalog.clear()?;
    }

    let inserted = catalog.insert_rows(&default_skill_rows())?;
    println!("Initialized {} with {} skills", database_path.display(), inserted);
    Ok(())
}

fn add_skill(database_path: &Path, name: &str, category: &str) -> anyhow::Result<()> {
    let category = cli::parse_category(category).map_err(anyhow::Error::msg)?;
    if name.trim().is_empty() {
        bail!("Skill name must not be blank");
    }

    let catalog = SkillCatalog::open(database_path)
        .with_context(|| format!("Failed to open skill database {}", database_path.display()))?;
    catalog.add(name, category)?;

    println!("Added '{}' as a {} skill", name.trim().to_lowercase(), category);
    Ok(())
}
