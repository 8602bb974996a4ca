//! Shared fixtures for unit tests: a canned `LlmGateway` and sample datasets.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use crate::data::Datasets;
use crate::llm_client::{GatewayError, LlmGateway};
use crate::models::alumni::AlumniRecord;
use crate::models::catalog::{CatalogCourse, JobRequirement, JobRequirements};
use crate::models::profile::StudentProfile;

/// Replies with a fixed object, or fails with `RequestFailed` when `reply` is `None`.
/// Records every prompt it receives.
pub struct FakeGateway {
    reply: Option<Value>,
    prompts: Mutex<Vec<String>>,
}

impl FakeGateway {
    pub fn replying(reply: Value) -> Self {
        Self {
            reply: Some(reply),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmGateway for FakeGateway {
    async fn get_llm_response(&self, prompt: &str) -> Result<Map<String, Value>, GatewayError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Some(Value::Object(map)) => Ok(map.clone()),
            Some(other) => Err(GatewayError::MalformedJson {
                raw_text: other.to_string(),
            }),
            None => Err(GatewayError::RequestFailed {
                detail: "connection refused".to_string(),
            }),
        }
    }
}

/// Transcript skills {Python, SQL}.
pub fn sample_profile() -> StudentProfile {
    serde_json::from_value(json!({
        "student_name": "Rhett Terrier",
        "major": "Data Science",
        "courses": [
            {"course_code": "CS 111", "course_name": "Introduction to Computer Science 1", "skills": ["Python"]},
            {"course_code": "DS 110", "course_name": "Introduction to Data Science", "skills": ["Python", "SQL"]}
        ]
    }))
    .unwrap()
}

/// "Cloud Engineer" requires {Python, SQL, Git, AWS}.
pub fn sample_requirements() -> JobRequirements {
    let mut table = JobRequirements::new();
    table.insert(
        "Cloud Engineer".to_string(),
        JobRequirement {
            required_skills: vec!["Python".into(), "SQL".into(), "Git".into(), "AWS".into()],
        },
    );
    table.insert(
        "Data Analyst".to_string(),
        JobRequirement {
            required_skills: vec!["SQL".into(), "Tableau".into(), "Statistics".into()],
        },
    );
    table
}

pub fn catalog_course(code: &str, skills: &[&str]) -> CatalogCourse {
    CatalogCourse {
        course_code: code.to_string(),
        course_name: format!("{code} course"),
        provides_skills: skills.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn sample_catalog() -> Vec<CatalogCourse> {
    vec![
        catalog_course("CS 210", &["Java"]),
        catalog_course("CS 460", &["AWS", "Cloud"]),
        catalog_course("MA 214", &["Statistics", "R"]),
    ]
}

pub fn alumnus(name: &str, job_title: &str, company: &str) -> AlumniRecord {
    AlumniRecord {
        name: name.to_string(),
        job_title: job_title.to_string(),
        company: company.to_string(),
        extra: Default::default(),
    }
}

pub fn sample_alumni() -> Vec<AlumniRecord> {
    vec![
        alumnus("Ada Park", "Data Analyst", "Fidelity"),
        alumnus("Sam Cole", "Software Engineer", "HubSpot"),
        alumnus("Lee Wong", "data analyst", "Wayfair"),
        alumnus("Kai Ruiz", "Cloud Engineer", "Akamai"),
    ]
}

pub fn sample_datasets() -> Datasets {
    Datasets {
        profile: sample_profile(),
        job_requirements: sample_requirements(),
        course_catalog: sample_catalog(),
        alumni: sample_alumni(),
    }
}
