//! Output formatters for console, JSON, Markdown and HTML reports

use crate::config::OutputFormat;
use crate::error::{MiniAtsError, Result};
use crate::output::report::*;
use crate::processing::scoring::FitLabel;
use crate::processing::vocabulary::SkillCategory;
use askama::Template;
use colored::{Color, Colorize};
use std::collections::BTreeSet;
use std::path::Path;

/// Trait for formatting fit reports
pub trait OutputFormatter {
    fn format_report(&self, report: &FitReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
    max_suggestions: usize,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

/// Askama template for HTML output
#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }}</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 900px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container {
            background: white;
            padding: 30px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        .header {
            text-align: center;
            border-bottom: 3px solid #007acc;
            padding-bottom: 20px;
        }
        .score-badge {
            display: inline-block;
            padding: 8px 16px;
            border-radius: 20px;
            font-weight: bold;
            color: white;
            margin-left: 10px;
        }
        .fit-strong { background: #28a745; }
        .fit-moderate { background: #17a2b8; }
        .fit-weak { background: #ffc107; color: #000; }
        .fit-poor { background: #dc3545; }
        .section h2 {
            color: #007acc;
            border-bottom: 2px solid #e9ecef;
            padding-bottom: 10px;
        }
        table { border-collapse: collapse; width: 100%; }
        th, td { text-align: left; padding: 8px; border-bottom: 1px solid #e9ecef; }
        .chip {
            display: inline-block;
            padding: 2px 10px;
            margin: 3px;
            border-radius: 12px;
            background: #e9ecef;
        }
        .matched .chip { background: #d4edda; }
        .missing .chip { background: #f8d7da; }
        .suggestion {
            background: #f8f9fa;
            padding: 12px;
            margin: 10px 0;
            border-radius: 6px;
            border-left: 4px solid #17a2b8;
        }
        .metadata {
            background: #e9ecef;
            padding: 15px;
            border-radius: 6px;
            margin-top: 30px;
            font-size: 0.9em;
            color: #6c757d;
        }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>{{ title }}</h1>
            <p>Generated: {{ generated_at }} | Processing time: {{ processing_time }}ms</p>
        </div>

        <div class="section">
            <h2>Overall Fit</h2>
            <h3>{{ overall_score }}% <span class="score-badge {{ label_class }}">{{ label }}</span></h3>
            <table>
                <tr><th>Category</th><th>Coverage</th><th>Matched</th><th>Weight</th></tr>
                {% for row in breakdown %}
                <tr><td>{{ row.heading }}</td><td>{{ row.coverage }}%</td><td>{{ row.matched }}</td><td>{{ row.weight }}%</td></tr>
                {% endfor %}
            </table>
        </div>

        <div class="section matched">
            <h2>Matched Skills</h2>
            {% if matched.is_empty() %}
            <p><em>None</em></p>
            {% else %}
            {% for skill in matched %}<span class="chip">{{ skill }}</span>
            {% endfor %}
            {% endif %}
        </div>

        <div class="section missing">
            <h2>Missing Skills</h2>
            {% if missing.is_empty() %}
            <p><em>None</em></p>
            {% else %}
            {% for skill in missing %}<span class="chip">{{ skill }}</span>
            {% endfor %}
            {% endif %}
        </div>

        <div class="section">
            <h2>Other Resume Skills</h2>
            {% if extra.is_empty() %}
            <p><em>None</em></p>
            {% else %}
            {% for skill in extra %}<span class="chip">{{ skill }}</span>
            {% endfor %}
            {% endif %}
        </div>

        <div class="section">
            <h2>Suggestions</h2>
            {% for suggestion in suggestions %}
            <div class="suggestion">{{ suggestion }}</div>
            {% endfor %}
        </div>

        <div class="metadata">
            <p><strong>Generated by mini-ats v{{ version }}</strong> | Vocabulary: {{ vocabulary }}</p>
            <p><strong>Resume:</strong> {{ resume_file }} | <strong>Job:</strong> {{ job_file }}</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate<'a> {
    include_styles: bool,
    title: String,
    generated_at: String,
    processing_time: u64,
    overall_score: String,
    label: &'a str,
    label_class: &'a str,
    breakdown: Vec<HtmlBreakdownRow>,
    matched: &'a BTreeSet<String>,
    missing: &'a BTreeSet<String>,
    extra: &'a BTreeSet<String>,
    suggestions: &'a [String],
    version: &'a str,
    vocabulary: String,
    resume_file: &'a str,
    job_file: &'a str,
}

struct HtmlBreakdownRow {
    heading: &'static str,
    coverage: String,
    matched: String,
    weight: String,
}

fn category_heading(category: SkillCategory) -> &'static str {
    match category {
        SkillCategory::Hard => "Hard skills",
        SkillCategory::Tools => "Tools",
        SkillCategory::Soft => "Soft skills",
    }
}

fn vocabulary_note(size: Option<usize>) -> String {
    match size {
        Some(size) => format!("{} skills", size),
        None => "not loaded".to_string(),
    }
}

fn join_skills(skills: &BTreeSet<String>) -> String {
    if skills.is_empty() {
        "(none)".to_string()
    } else {
        skills.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool, max_suggestions: usize) -> Self {
        Self {
            use_colors,
            detailed,
            max_suggestions,
        }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_label_badge(&self, label: FitLabel) -> String {
        let color = match label {
            FitLabel::StrongFit => Color::Green,
            FitLabel::ModerateFit => Color::BrightGreen,
            FitLabel::WeakFit => Color::Yellow,
            FitLabel::PoorFit => Color::Red,
        };

        let badge = label.as_str().to_uppercase();
        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_skill_list(&self, title: &str, skills: &BTreeSet<String>, color: Color) -> String {
        let mut output = self.format_header(&format!("{} ({})", title, skills.len()), 3);
        output.push_str(&format!("  {}\n", self.colorize(&join_skills(skills), color)));
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &FitReport) -> Result<String> {
        let analysis = &report.analysis;
        let mut output = String::new();

        output.push_str(&self.format_header(&report.title().to_uppercase(), 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.processing_time_ms
        ));

        output.push_str(&self.format_header("Overall Fit", 2));
        output.push_str(&format!(
            "Fit score: {:.1}% {}\n",
            analysis.overall_score,
            self.format_label_badge(analysis.label)
        ));

        output.push_str(&self.format_header("Category Breakdown", 3));
        for row in &report.breakdown {
            output.push_str(&format!(
                "  {:<12} {:>5.1}%  ({}/{} matched, weight {:.0}%)\n",
                category_heading(row.category),
                row.score_percentage,
                row.matched_count,
                row.job_skill_count,
                row.weight_percentage
            ));
        }

        output.push_str(&self.format_skill_list("Matched skills", &analysis.overlap.matched, Color::Green));
        output.push_str(&self.format_skill_list("Missing skills", &analysis.overlap.missing, Color::Red));
        output.push_str(&self.format_skill_list(
            "Other skills in your resume",
            &analysis.overlap.extra,
            Color::BrightBlack,
        ));

        output.push_str(&self.format_header("Suggestions", 2));
        let shown = if self.detailed {
            analysis.suggestions.len()
        } else {
            self.max_suggestions.min(analysis.suggestions.len())
        };
        for (i, suggestion) in analysis.suggestions.iter().take(shown).enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, suggestion));
        }
        let hidden = analysis.suggestions.len() - shown;
        if hidden > 0 {
            output.push_str(&self.colorize(
                &format!("... and {} more suggestions (use --detailed to see all)\n", hidden),
                Color::BrightBlack,
            ));
        }

        if self.detailed {
            output.push_str(&self.format_header("Detailed Extraction", 2));
            for category in SkillCategory::ALL {
                output.push_str(&format!("{}:\n", self.colorize(category_heading(category), Color::Cyan)));
                output.push_str(&format!("  Job description: {}\n", join_skills(analysis.job_skills.get(category))));
                output.push_str(&format!("  Resume:          {}\n", join_skills(analysis.resume_skills.get(category))));
            }

            output.push_str(&format!(
                "\nResume: {} | Job: {} | Vocabulary: {} | mini-ats v{}\n",
                report.metadata.resume_file,
                report.metadata.job_file,
                vocabulary_note(report.metadata.vocabulary_size),
                report.metadata.version
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &FitReport) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(json)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn label_class(label: FitLabel) -> &'static str {
        match label {
            FitLabel::StrongFit => "fit-strong",
            FitLabel::ModerateFit => "fit-moderate",
            FitLabel::WeakFit => "fit-weak",
            FitLabel::PoorFit => "fit-poor",
        }
    }

    fn breakdown_rows(report: &FitReport) -> Vec<HtmlBreakdownRow> {
        report
            .breakdown
            .iter()
            .map(|row| HtmlBreakdownRow {
                heading: category_heading(row.category),
                coverage: format!("{:.1}", row.score_percentage),
                matched: format!("{}/{}", row.matched_count, row.job_skill_count),
                weight: format!("{:.0}", row.weight_percentage),
            })
            .collect()
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &FitReport) -> Result<String> {
        let analysis = &report.analysis;
        let template = HtmlTemplate {
            include_styles: self.include_styles,
            title: report.title(),
            generated_at: report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            processing_time: report.metadata.processing_time_ms,
            overall_score: format!("{:.1}", analysis.overall_score),
            label: analysis.label.as_str(),
            label_class: Self::label_class(analysis.label),
            breakdown: Self::breakdown_rows(report),
            matched: &analysis.overlap.matched,
            missing: &analysis.overlap.missing,
            extra: &analysis.overlap.extra,
            suggestions: &analysis.suggestions,
            version: &report.metadata.version,
            vocabulary: vocabulary_note(report.metadata.vocabulary_size),
            resume_file: &report.metadata.resume_file,
            job_file: &report.metadata.job_file,
        };

        template
            .render()
            .map_err(|e| MiniAtsError::OutputFormatting(format!("HTML rendering failed: {}", e)))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn skill_line(skills: &BTreeSet<String>) -> String {
        if skills.is_empty() {
            "_None_".to_string()
        } else {
            skills
                .iter()
                .map(|skill| format!("`{}`", skill))
                .collect::<Vec<_>>()
                .join(", ")
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &FitReport) -> Result<String> {
        let analysis = &report.analysis;
        let mut content = String::new();

        content.push_str(&format!("# {}\n\n", report.title()));

        if self.include_metadata {
            content.push_str(&format!(
                "**Generated:** {}  \n**Resume:** {}  \n**Job:** {}  \n**Processing time:** {}ms\n\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.resume_file,
                report.metadata.job_file,
                report.metadata.processing_time_ms
            ));
        }

        content.push_str("## Overall Fit\n\n");
        content.push_str(&format!(
            "**{:.1}%** ({})\n\n",
            analysis.overall_score, analysis.label
        ));

        content.push_str("| Category | Coverage | Matched | Weight |\n");
        content.push_str("|----------|----------|---------|--------|\n");
        for row in &report.breakdown {
            content.push_str(&format!(
                "| {} | {:.1}% | {}/{} | {:.0}% |\n",
                category_heading(row.category),
                row.score_percentage,
                row.matched_count,
                row.job_skill_count,
                row.weight_percentage
            ));
        }
        content.push('\n');

        content.push_str("## Skills\n\n");
        content.push_str(&format!("- **Matched:** {}\n", Self::skill_line(&analysis.overlap.matched)));
        content.push_str(&format!("- **Missing:** {}\n", Self::skill_line(&analysis.overlap.missing)));
        content.push_str(&format!("- **Other resume skills:** {}\n\n", Self::skill_line(&analysis.overlap.extra)));

        content.push_str("## Suggestions\n\n");
        for (i, suggestion) in analysis.suggestions.iter().enumerate() {
            content.push_str(&format!("{}. {}\n", i + 1, suggestion));
        }

        if self.include_metadata {
            content.push_str(&format!(
                "\n---\n\n*Generated by mini-ats v{} | Vocabulary: {}*\n",
                report.metadata.version,
                vocabulary_note(report.metadata.vocabulary_size)
            ));
        }

        Ok(content)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, 8)
    }

    pub fn with_options(use_colors: bool, detailed: bool, max_suggestions: usize) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed, max_suggestions),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
            html_formatter: HtmlFormatter::new(true),
        }
    }

    pub fn generate_report(&self, report: &FitReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };

    format!("{}_fit{}.{}", base_name, timestamp_suffix, extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::analyzer::AnalysisRequest;
    use crate::processing::vocabulary::SkillRow;
    use crate::AnalysisEngine;
    use tempfile::TempDir;

    fn sample_report(resume: &str) -> FitReport {
        let mut rows = vec![
            SkillRow::new("python", "hard"),
            SkillRow::new("sql", "hard"),
            SkillRow::new("tableau", "tools"),
            SkillRow::new("communication", "soft"),
        ];
        for skill in ["airflow", "spark", "dbt", "kafka", "docker", "kubernetes", "scala", "go"] {
            rows.push(SkillRow::new(skill, "hard"));
        }
        let engine = AnalysisEngine::new(rows);
        let request = AnalysisRequest::new(
            "Data Engineer\nPython SQL Tableau communication airflow spark dbt kafka docker kubernetes scala go",
            resume,
        );
        let analysis = engine.analyze(&request).unwrap();
        let metadata = ReportMetadata::new(Path::new("cv.txt"), Path::new("jd.txt"), 5, Some(12));
        FitReport::new(analysis, metadata)
    }

    #[test]
    fn test_console_folds_suggestions() {
        let report = sample_report("Python and <b>SQL</b>");
        assert_eq!(report.analysis.suggestions.len(), 11);

        let output = ConsoleFormatter::new(false, false, 8).format_report(&report).unwrap();

        assert!(output.contains("Fit score:"));
        assert!(output.contains("[POOR FIT]"));
        assert!(output.contains("8. "));
        assert!(!output.contains("9. "));
        assert!(output.contains("... and 3 more suggestions"));
        assert!(!output.contains("Detailed Extraction"));
    }

    #[test]
    fn test_console_detailed_shows_everything() {
        let report = sample_report("Python and SQL");

        let output = ConsoleFormatter::new(false, true, 8).format_report(&report).unwrap();

        assert!(output.contains("11. "));
        assert!(!output.contains("more suggestions"));
        assert!(output.contains("Detailed Extraction"));
        assert!(output.contains("Resume:          python, sql"));
    }

    #[test]
    fn test_json_contains_analysis() {
        let report = sample_report("Python");

        let json = JsonFormatter::new(true).format_report(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["analysis"]["job_title"], "Data Engineer");
        assert_eq!(value["analysis"]["overlap"]["matched"][0], "python");
        assert_eq!(value["metadata"]["vocabulary_size"], 12);
    }

    #[test]
    fn test_markdown_sections() {
        let report = sample_report("Python and SQL");

        let markdown = MarkdownFormatter::new(true).format_report(&report).unwrap();

        assert!(markdown.starts_with("# Skill Fit Report: Data Engineer"));
        assert!(markdown.contains("- **Matched:** `python`, `sql`"));
        assert!(markdown.contains("| Hard skills |"));
    }

    #[test]
    fn test_html_escapes_suggestions() {
        let report = sample_report("Python and SQL");

        let html = HtmlFormatter::new(false).format_report(&report).unwrap();

        assert!(html.contains("<title>Skill Fit Report: Data Engineer</title>"));
        assert!(html.contains("<span class=\"chip\">python</span>"));
        assert!(html.contains("<td>Hard skills</td><td>20.0%</td>"));
        assert!(html.contains("Used airflow to analyze data"));
        assert!(!html.contains("for example: \"Used airflow"));
        assert!(html.contains("Vocabulary: 12 skills"));
        assert!(!html.contains("<style>"));
    }

    #[test]
    fn test_html_escapes_job_title_without_vocabulary() {
        let engine = AnalysisEngine::new(Vec::<SkillRow>::new());
        let request = AnalysisRequest::new("", "").with_job_title(Some("Data <Lead> & Analyst"));
        let analysis = engine.analyze(&request).unwrap();
        let metadata = ReportMetadata::new(Path::new("cv.txt"), Path::new("jd.txt"), 1, None);
        let report = FitReport::new(analysis, metadata);

        let html = HtmlFormatter::new(true).format_report(&report).unwrap();

        assert!(html.contains("Skill Fit Report: Data &lt;Lead&gt; &amp; Analyst"));
        assert!(!html.contains("<Lead>"));
        assert!(html.contains("<p><em>None</em></p>"));
        assert!(html.contains("Vocabulary: not loaded"));
        assert!(html.contains("<style>"));
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(suggest_filename(&OutputFormat::Json, "/tmp/jane_cv.pdf", false), "jane_cv_fit.json");
        assert_eq!(suggest_filename(&OutputFormat::Html, "cv.md", false), "cv_fit.html");
        assert!(suggest_filename(&OutputFormat::Markdown, "cv.md", true).ends_with(".md"));
    }

    #[test]
    fn test_save_report_creates_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reports").join("cv_fit.md");

        save_report_to_file("# report", &path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# report");
    }
}
