//! Skill gap — set algebra between what the student knows and what a job requires.
//!
//! known    = transcript skills ∪ user skills
//! required = requirements[job_title] (∅ when the title is unknown)
//! have     = known ∩ required
//! needed   = required − known
//!
//! `have` and `needed` partition `required`. Sets are `BTreeSet` so every
//! serialization is sorted and repeatable.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::warn;

use crate::models::catalog::JobRequirements;
use crate::models::profile::StudentProfile;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GapAnalysis {
    pub skills_have: BTreeSet<String>,
    pub skills_needed: BTreeSet<String>,
    /// False when `job_title` had no entry in the requirements table.
    pub requirements_known: bool,
}

/// Counts behind the have-vs-need bar chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkillChart {
    pub skills_you_have: usize,
    pub skills_you_need: usize,
}

impl GapAnalysis {
    pub fn chart(&self) -> SkillChart {
        SkillChart {
            skills_you_have: self.skills_have.len(),
            skills_you_need: self.skills_needed.len(),
        }
    }
}

pub fn perform_skill_gap_analysis(
    profile: &StudentProfile,
    user_skills: &[String],
    job_title: &str,
    requirements: &JobRequirements,
) -> GapAnalysis {
    let known: BTreeSet<&str> = profile
        .course_skills()
        .chain(user_skills.iter().map(String::as_str))
        .collect();

    let Some(requirement) = requirements.get(job_title) else {
        warn!("No requirements known for job title '{job_title}'; treating as empty");
        return GapAnalysis {
            skills_have: BTreeSet::new(),
            skills_needed: BTreeSet::new(),
            requirements_known: false,
        };
    };

    let (have, needed): (BTreeSet<String>, BTreeSet<String>) = requirement
        .required_skills
        .iter()
        .cloned()
        .partition(|skill| known.contains(skill.as_str()));

    GapAnalysis {
        skills_have: have,
        skills_needed: needed,
        requirements_known: true,
    }
}

/// Splits comma-separated free text into skills, trimming and dropping blanks.
pub fn parse_skill_list(text: &str) -> Vec<String> {
    normalize_skills(text.split(','))
}

/// Trims each skill and drops the empty ones, keeping order.
pub fn normalize_skills<'a>(skills: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    skills
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
