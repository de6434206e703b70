//! CLI interface for mini-ats

use crate::config::OutputFormat;
use crate::processing::vocabulary::SkillCategory;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "mini-ats")]
#[command(about = "Score how well a resume covers the skills in a job description")]
#[command(long_about = "Extract hard skills, tools and soft skills from a resume and a job description, \
compute a weighted fit score and suggest which missing skills to add")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Skill database path (overrides the configuration)
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a resume against a job description
    Analyze {
        /// Path to resume file (PDF, DOCX, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (PDF, DOCX, TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Job title used to personalize suggestions
        #[arg(short, long)]
        title: Option<String>,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Show every suggestion and the raw per-category extraction
        #[arg(short, long)]
        detailed: bool,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Disable colored console output
        #[arg(long)]
        no_color: bool,
    },

    /// Skill vocabulary management
    Skills {
        #[command(subcommand)]
        action: SkillAction,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum SkillAction {
    /// List the skill vocabulary
    List {
        /// Only show one category (hard, tools, soft)
        #[arg(long)]
        category: Option<String>,
    },

    /// Create the skill database with the starter vocabulary
    Init {
        /// Replace existing rows
        #[arg(short, long)]
        force: bool,
    },

    /// Add a skill to the database
    Add {
        /// Skill name, e.g. "power bi"
        name: String,

        /// Category: hard, tools or soft
        #[arg(long, default_value = "hard")]
        category: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown, html", format)),
    }
}

/// Parse a skill category argument
pub fn parse_category(category: &str) -> Result<SkillCategory, String> {
    SkillCategory::parse(category)
        .ok_or_else(|| format!("Invalid skill category: {}. Supported: hard, tools, soft", category))
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::file_detector::FileType;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("md"), Ok(OutputFormat::Markdown));
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_parse_category() {
        assert_eq!(parse_category("Tools"), Ok(SkillCategory::Tools));
        assert!(parse_category("hobby").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        let allowed = FileType::SUPPORTED_EXTENSIONS;
        assert!(validate_file_extension(Path::new("resume.PDF"), &allowed).is_ok());
        assert!(validate_file_extension(Path::new("resume.docx"), &allowed).is_ok());
        assert!(validate_file_extension(Path::new("resume.doc"), &allowed).is_err());
        assert!(validate_file_extension(Path::new("resume"), &allowed).is_err());
    }

    #[test]
    fn test_cli_parses_analyze() {
        let cli = Cli::try_parse_from([
            "mini-ats", "analyze", "--resume", "cv.pdf", "--job", "jd.txt", "--title", "Data Analyst",
        ])
        .unwrap();

        match cli.command {
            Commands::Analyze { resume, title, output, .. } => {
                assert_eq!(resume, PathBuf::from("cv.pdf"));
                assert_eq!(title.as_deref(), Some("Data Analyst"));
                assert!(output.is_none());
            }
            _ => panic!("expected analyze command"),
        }
    }
}
