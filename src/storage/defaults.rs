//! Starter skill vocabulary written by `mini-ats skills init`

use crate::processing::vocabulary::{SkillCategory, SkillRow};

/// Technical and domain skills
const HARD_SKILLS: &[&str] = &[
    // Programming languages
    "python", "r", "sql", "java", "javascript", "typescript", "c++", "c#", "go", "rust",
    "ruby", "php", "swift", "kotlin", "scala", "matlab", "bash",

    // Web and backend
    "html", "css", "node.js", "rest api", "graphql", "microservices",

    // Data and analytics
    "statistics", "data analysis", "data visualization", "data modeling", "etl",
    "machine learning", "deep learning", "natural language processing", "a/b testing",
    "forecasting", "regression", "database", "data warehousing",

    // Engineering practice
    "ci/cd", "unit testing", "system design", "cloud computing", "devops", "agile", "scrum",
];

/// Named software and platforms
const TOOLS: &[&str] = &[
    "excel", "tableau", "power bi", "looker", "jupyter", "pandas", "numpy", "scikit-learn",
    "tensorflow", "pytorch", "spark", "hadoop", "kafka", "airflow", "dbt", "snowflake",
    "bigquery", "redshift", "postgresql", "mysql", "mongodb", "redis", "elasticsearch",
    "docker", "kubernetes", "terraform", "aws", "azure", "gcp", "git", "github", "gitlab",
    "jenkins", "jira", "confluence", "salesforce", "sap", "servicenow", "linux",
];

/// Interpersonal and behavioral skills
const SOFT_SKILLS: &[&str] = &[
    "communication", "leadership", "teamwork", "collaboration", "problem solving",
    "critical thinking", "creativity", "adaptability", "time management", "project management",
    "stakeholder management", "mentoring", "presentation", "negotiation", "customer service",
    "attention to detail", "organization",
];

/// Every default skill as a storable row
pub fn default_skill_rows() -> Vec<SkillRow> {
    [
        (SkillCategory::Hard, HARD_SKILLS),
        (SkillCategory::Tools, TOOLS),
        (SkillCategory::Soft, SOFT_SKILLS),
    ]
    .iter()
    .flat_map(|(category, skills)| {
        skills
            .iter()
            .map(move |skill| SkillRow::new(*skill, category.as_str()))
    })
    .collect()
}
