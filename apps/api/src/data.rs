use std::fs::File;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::de::DeserializeOwned;
use tracing::info;

use crate::models::alumni::AlumniRecord;
use crate::models::catalog::{CatalogCourse, JobRequirements};
use crate::models::profile::StudentProfile;

pub const STUDENT_FILE: &str = "student_data.json";
pub const JOB_REQUIREMENTS_FILE: &str = "job_requirements.json";
pub const COURSE_CATALOG_FILE: &str = "course_catalog.json";
pub const ALUMNI_FILE: &str = "alumni_database.csv";

/// The four static datasets. Read-only after load; shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Datasets {
    pub profile: StudentProfile,
    pub job_requirements: JobRequirements,
    pub course_catalog: Vec<CatalogCourse>,
    pub alumni: Vec<AlumniRecord>,
}

/// Loads every dataset from `data_dir`. Any missing or malformed file is fatal.
pub fn load_datasets(data_dir: &Path) -> Result<Datasets> {
    info!("Loading datasets from {}", data_dir.display());

    let profile: StudentProfile = read_json(&data_dir.join(STUDENT_FILE))?;
    let job_requirements: JobRequirements = read_json(&data_dir.join(JOB_REQUIREMENTS_FILE))?;
    let course_catalog: Vec<CatalogCourse> = read_json(&data_dir.join(COURSE_CATALOG_FILE))?;
    let alumni = read_alumni_csv(&data_dir.join(ALUMNI_FILE))?;

    info!(
        "Datasets loaded: {} courses on transcript, {} job titles, {} catalog courses, {} alumni",
        profile.courses.len(),
        job_requirements.len(),
        course_catalog.len(),
        alumni.len()
    );

    Ok(Datasets {
        profile,
        job_requirements,
        course_catalog,
        alumni,
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)
        .with_context(|| format!("A required data file was not found: {}", path.display()))?;
    serde_json::from_reader(std::io::BufReader::new(file))
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Reads the alumni roster. Requires a `job_title` column; `name` and `company`
/// fall back to empty strings when the roster lacks them.
pub fn read_alumni_csv(path: &Path) -> Result<Vec<AlumniRecord>> {
    let file = File::open(path)
        .with_context(|| format!("A required data file was not found: {}", path.display()))?;
    parse_alumni(file).with_context(|| format!("Failed to parse {}", path.display()))
}

fn parse_alumni<R: std::io::Read>(reader: R) -> Result<Vec<AlumniRecord>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = reader.headers()?.clone();

    if !headers.iter().any(|h| h == "job_title") {
        return Err(anyhow!("alumni roster has no 'job_title' column"));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut row = AlumniRecord {
            name: String::new(),
            job_title: String::new(),
            company: String::new(),
            extra: Default::default(),
        };
        for (header, value) in headers.iter().zip(record.iter()) {
            match header {
                "name" => row.name = value.to_string(),
                "job_title" => row.job_title = value.to_string(),
                "company" => row.company = value.to_string(),
                other => {
                    row.extra.insert(other.to_string(), value.to_string());
                }
            }
        }
        rows.push(row);
    }

    Ok(rows)
}
