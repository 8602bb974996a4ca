use std::collections::BTreeSet;

use crate::models::catalog::CatalogCourse;

/// Every catalog course that teaches at least one needed skill, in catalog order.
/// No ranking, no dedup of overlapping courses, no cap.
pub fn recommend_courses<'a>(
    skills_needed: &BTreeSet<String>,
    catalog: &'a [CatalogCourse],
) -> Vec<&'a CatalogCourse> {
    if skills_needed.is_empty() {
        return Vec::new();
    }

    catalog
        .iter()
        .filter(|course| {
            course
                .provides_skills
                .iter()
                .any(|skill| skills_needed.contains(skill))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{catalog_course, sample_catalog};

    fn needed(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_needed_skills_recommends_nothing() {
        assert!(recommend_courses(&BTreeSet::new(), &sample_catalog()).is_empty());
    }

    #[test]
    fn test_intersecting_course_is_recommended_disjoint_is_not() {
        let catalog = sample_catalog();
        let picks = recommend_courses(&needed(&["AWS"]), &catalog);

        let codes: Vec<&str> = picks.iter().map(|c| c.course_code.as_str()).collect();
        assert_eq!(codes, vec!["CS 460"]);
    }

    #[test]
    fn test_overlapping_courses_keep_catalog_order() {
        let catalog = vec![
            catalog_course("MA 214", &["Statistics"]),
            catalog_course("CS 210", &["Java"]),
            catalog_course("CS 506", &["Statistics", "Python"]),
        ];
        let picks = recommend_courses(&needed(&["Statistics", "Python"]), &catalog);

        let codes: Vec<&str> = picks.iter().map(|c| c.course_code.as_str()).collect();
        assert_eq!(codes, vec!["MA 214", "CS 506"]);
    }

    #[test]
    fn test_course_without_skills_is_never_recommended() {
        let catalog = vec![catalog_course("WR 100", &[])];
        assert!(recommend_courses(&needed(&["Writing"]), &catalog).is_empty());
    }
}
