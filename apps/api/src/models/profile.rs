use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The student's academic profile. Loaded once at startup and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentProfile {
    pub student_name: String,
    pub major: String,
    #[serde(default)]
    pub courses: Vec<Course>,
    /// Any other fields in the profile document, kept so the prompt sees all of it.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A transcript entry: a course the student has taken and the skills it taught.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub course_code: String,
    pub course_name: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl StudentProfile {
    /// Every skill taught by any course on the transcript, duplicates included.
    pub fn course_skills(&self) -> impl Iterator<Item = &str> {
        self.courses
            .iter()
            .flat_map(|c| c.skills.iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_keeps_unknown_fields() {
        let profile: StudentProfile = serde_json::from_value(json!({
            "student_name": "Rhett",
            "major": "Computer Science",
            "graduation_year": 2026,
            "courses": [
                {"course_code": "CS 111", "course_name": "Intro to CS", "skills": ["Python"]}
            ]
        }))
        .unwrap();

        assert_eq!(profile.extra["graduation_year"], json!(2026));
        let round = serde_json::to_value(&profile).unwrap();
        assert_eq!(round["graduation_year"], json!(2026));
        assert_eq!(round["courses"][0]["skills"], json!(["Python"]));
    }

    #[test]
    fn test_course_skills_flattens_transcript() {
        let profile: StudentProfile = serde_json::from_value(json!({
            "student_name": "Rhett",
            "major": "Data Science",
            "courses": [
                {"course_code": "DS 110", "course_name": "Intro", "skills": ["Python", "SQL"]},
                {"course_code": "DS 210", "course_name": "Programming", "skills": ["Python"]},
                {"course_code": "WR 100", "course_name": "Writing"}
            ]
        }))
        .unwrap();

        let skills: Vec<&str> = profile.course_skills().collect();
        assert_eq!(skills, vec!["Python", "SQL", "Python"]);
    }
}
