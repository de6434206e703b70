//! Vocabulary backing store
//! Read access for analyses, write access for seeding and maintenance

pub mod defaults;
pub mod sqlite;

pub use sqlite::{SkillCatalog, SqliteSkillSource};
