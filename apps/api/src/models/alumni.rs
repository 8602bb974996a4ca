use std::collections::BTreeMap;

use serde::Serialize;

/// One row of the alumni roster.
///
/// `name`, `job_title` and `company` are the display columns; every other CSV
/// column is carried in `extra` keyed by its header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlumniRecord {
    pub name: String,
    pub job_title: String,
    pub company: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}
