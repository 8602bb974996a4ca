use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A course offered in the catalog, tagged with the skills it teaches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogCourse {
    pub course_code: String,
    pub course_name: String,
    #[serde(default)]
    pub provides_skills: Vec<String>,
}

/// The skills a job title requires.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobRequirement {
    #[serde(default)]
    pub required_skills: Vec<String>,
}

/// Job title → requirement. Ordered so listings are deterministic.
pub type JobRequirements = BTreeMap<String, JobRequirement>;
