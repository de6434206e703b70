//! Integration tests for mini-ats

use mini_ats::input::manager::InputManager;
use mini_ats::output::{FitReport, ReportGenerator, ReportMetadata};
use mini_ats::config::OutputFormat;
use mini_ats::processing::scoring::FitLabel;
use mini_ats::storage::defaults::default_skill_rows;
use mini_ats::storage::{SkillCatalog, SqliteSkillSource};
use mini_ats::{AnalysisEngine, AnalysisRequest, MiniAtsError};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join(name)
}

fn seeded_database(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("skills.db");
    let mut catalog = SkillCatalog::open(&path).unwrap();
    catalog.insert_rows(&default_skill_rows()).unwrap();
    path
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();

    let text = manager.extract_text(&fixture("sample_resume.txt")).await.unwrap();

    assert!(text.contains("Jane Doe"));
    assert!(text.contains("Power BI"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();

    let text = manager.extract_text(&fixture("sample_resume.md")).await.unwrap();

    assert!(text.contains("Jane Doe"));
    assert!(text.contains("Acme Corp, Data Analyst"));
    // Markup is gone
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
    assert!(!text.contains('`'));
}

#[tokio::test]
async fn test_text_extraction_from_docx() {
    let mut manager = InputManager::new();

    let text = manager.extract_text(&fixture("sample_resume.docx")).await.unwrap();

    let expected: Vec<String> = std::fs::read_to_string(fixture("sample_resume.txt"))
        .unwrap()
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| line.trim_start_matches("- ").to_string())
        .collect();
    assert_eq!(text, expected.join("\n"));
}

#[tokio::test]
async fn test_corrupt_docx_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.docx");
    std::fs::write(&path, "not a zip archive").unwrap();

    let mut manager = InputManager::new();
    let result = manager.extract_text(&path).await;

    assert!(matches!(result, Err(MiniAtsError::DocxExtraction(_))));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = fixture("sample_resume.txt");

    let text1 = manager.extract_text(&path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(&path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();

    let result = manager.extract_text(&fixture("unsupported.xyz")).await;

    assert!(matches!(result, Err(MiniAtsError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();

    let result = manager.extract_text(&fixture("nonexistent.txt")).await;

    assert!(matches!(result, Err(MiniAtsError::InvalidInput(_))));
}

#[tokio::test]
async fn test_end_to_end_analysis_with_sqlite_vocabulary() {
    let dir = TempDir::new().unwrap();
    let database = seeded_database(&dir);

    let mut manager = InputManager::new();
    let resume = manager.extract_text(&fixture("sample_resume.txt")).await.unwrap();
    let job = manager.extract_text(&fixture("sample_job.txt")).await.unwrap();

    let engine = AnalysisEngine::new(SqliteSkillSource::new(&database));
    let analysis = engine.analyze(&AnalysisRequest::new(&job, &resume)).unwrap();

    assert_eq!(analysis.job_skills.hard, set(&["python", "sql", "statistics"]));
    assert_eq!(analysis.job_skills.tools, set(&["excel", "tableau"]));
    assert_eq!(analysis.job_skills.soft, set(&["communication", "teamwork"]));
    assert_eq!(analysis.resume_skills.tools, set(&["excel", "pandas", "power bi"]));

    assert_eq!(analysis.overall_score, 50.0);
    assert_eq!(analysis.label, FitLabel::WeakFit);
    assert_eq!(analysis.overlap.matched, set(&["excel", "python", "sql"]));
    assert_eq!(analysis.overlap.missing, set(&["communication", "statistics", "tableau", "teamwork"]));
    assert_eq!(analysis.overlap.extra, set(&["pandas", "power bi"]));

    assert_eq!(analysis.job_title.as_deref(), Some("Data Analyst"));
    assert_eq!(analysis.suggestions.len(), 5);
    assert!(analysis.suggestions[0].starts_with("Demonstrate communication"));
    assert!(analysis.suggestions[1].contains("statistics in your Experience or Projects section for this Data Analyst role"));
    assert!(analysis.suggestions[2].starts_with("Either list tableau"));
    assert!(analysis.suggestions[3].starts_with("Demonstrate teamwork"));
    assert!(analysis.suggestions[4].starts_with("Prioritize adding 2-4"));
}

#[tokio::test]
async fn test_markdown_and_text_resumes_agree() {
    let dir = TempDir::new().unwrap();
    let engine = AnalysisEngine::new(SqliteSkillSource::new(seeded_database(&dir)));

    let mut manager = InputManager::new();
    let job = manager.extract_text(&fixture("sample_job.txt")).await.unwrap();
    let txt = manager.extract_text(&fixture("sample_resume.txt")).await.unwrap();
    let md = manager.extract_text(&fixture("sample_resume.md")).await.unwrap();

    let from_txt = engine.analyze(&AnalysisRequest::new(&job, &txt)).unwrap();
    let from_md = engine.analyze(&AnalysisRequest::new(&job, &md)).unwrap();

    assert_eq!(from_txt, from_md);

    let docx = manager.extract_text(&fixture("sample_resume.docx")).await.unwrap();
    let from_docx = engine.analyze(&AnalysisRequest::new(&job, &docx)).unwrap();
    assert_eq!(from_txt, from_docx);
}

#[test]
fn test_empty_inputs_without_database_still_report() {
    let dir = TempDir::new().unwrap();
    let database = dir.path().join("absent.db");
    let engine = AnalysisEngine::new(SqliteSkillSource::new(&database));

    let analysis = engine.analyze(&AnalysisRequest::new("", "")).unwrap();
    let metadata = ReportMetadata::new(Path::new("cv.txt"), Path::new("jd.txt"), 0, engine.loaded_vocabulary_size());
    let report = FitReport::new(analysis, metadata);

    assert_eq!(report.analysis.overall_score, 0.0);
    assert_eq!(report.metadata.vocabulary_size, None);
    assert!(!database.exists());
}

#[test]
fn test_missing_database_is_fatal_and_not_created() {
    let dir = TempDir::new().unwrap();
    let database = dir.path().join("absent.db");
    let engine = AnalysisEngine::new(SqliteSkillSource::new(&database));

    let result = engine.analyze(&AnalysisRequest::new("We need SQL", "I know SQL"));

    assert!(matches!(result, Err(MiniAtsError::VocabularyUnavailable(_))));
    assert!(!database.exists());
}

#[test]
fn test_explicit_title_overrides_first_line() {
    let dir = TempDir::new().unwrap();
    let engine = AnalysisEngine::new(SqliteSkillSource::new(seeded_database(&dir)));

    let request = AnalysisRequest::new("Data Analyst\nWe need SQL", "")
        .with_job_title(Some("Senior BI Analyst"));
    let analysis = engine.analyze(&request).unwrap();

    assert_eq!(analysis.overall_score, 0.0);
    assert_eq!(analysis.label, FitLabel::PoorFit);
    assert!(analysis.suggestions[0].contains("for this Senior BI Analyst role"));
}

#[tokio::test]
async fn test_json_report_from_fixtures() {
    let dir = TempDir::new().unwrap();
    let engine = AnalysisEngine::new(SqliteSkillSource::new(seeded_database(&dir)));

    let mut manager = InputManager::new();
    let job_path = fixture("sample_job.txt");
    let resume_path = fixture("sample_resume.md");
    let job = manager.extract_text(&job_path).await.unwrap();
    let resume = manager.extract_text(&resume_path).await.unwrap();

    let analysis = engine.analyze(&AnalysisRequest::new(&job, &resume)).unwrap();
    let vocabulary_size = engine.loaded_vocabulary_size();
    let report = FitReport::new(analysis, ReportMetadata::new(&resume_path, &job_path, 3, vocabulary_size));

    let json = ReportGenerator::new()
        .generate_report(&report, &OutputFormat::Json)
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["analysis"]["label"], "Weak fit");
    assert_eq!(value["analysis"]["overall_score"], 50.0);
    assert_eq!(value["metadata"]["resume_file"], "sample_resume.md");
    assert_eq!(value["metadata"]["vocabulary_size"], default_skill_rows().len());
}
