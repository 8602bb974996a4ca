//! Axum route handlers for the advisor API.

use std::collections::BTreeSet;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::advisor::alumni::find_relevant_alumni;
use crate::advisor::course_recommender::recommend_courses;
use crate::advisor::profile_analysis::get_profile_analysis;
use crate::advisor::skill_gap::{
    normalize_skills, parse_skill_list, perform_skill_gap_analysis, GapAnalysis, SkillChart,
};
use crate::advisor::tracker::{AnalysisSnapshot, Published};
use crate::errors::AppError;
use crate::models::alumni::AlumniRecord;
use crate::models::catalog::CatalogCourse;
use crate::models::profile::StudentProfile;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Target job plus the skills the student claims beyond their transcript.
/// Skills may come as a list, as comma-separated text, or both. The title is
/// looked up verbatim; an unknown or blank one simply has no requirements.
#[derive(Debug, Deserialize)]
pub struct SkillGapRequest {
    pub job_title: String,
    #[serde(default)]
    pub user_skills: Vec<String>,
    #[serde(default)]
    pub user_skills_text: Option<String>,
}

impl SkillGapRequest {
    fn skills(&self) -> Vec<String> {
        let mut skills = normalize_skills(self.user_skills.iter().map(String::as_str));
        if let Some(text) = &self.user_skills_text {
            skills.extend(parse_skill_list(text));
        }
        skills
    }
}

#[derive(Debug, Deserialize)]
pub struct RecommendationsRequest {
    pub skills_needed: BTreeSet<String>,
}

#[derive(Debug, Deserialize)]
pub struct AlumniQuery {
    pub job_title: String,
}

#[derive(Debug, Serialize)]
pub struct JobListResponse {
    pub job_titles: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub courses: Vec<CatalogCourse>,
}

#[derive(Debug, Serialize)]
pub struct AlumniResponse {
    pub alumni: Vec<AlumniRecord>,
}

#[derive(Debug, Serialize)]
pub struct ExploreResponse {
    pub job_title: String,
    pub gap: GapAnalysis,
    pub chart: SkillChart,
    pub recommended_courses: Vec<CatalogCourse>,
    pub alumni: Vec<AlumniRecord>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/profile
pub async fn handle_get_profile(State(state): State<AppState>) -> Json<StudentProfile> {
    Json(state.datasets.profile.clone())
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(State(state): State<AppState>) -> Json<JobListResponse> {
    Json(JobListResponse {
        job_titles: state.datasets.job_requirements.keys().cloned().collect(),
    })
}

/// POST /api/v1/analysis
///
/// Runs one profile analysis against the model. A failed analysis is still a
/// well-formed body carrying `error`, returned with 502.
pub async fn handle_run_analysis(
    State(state): State<AppState>,
) -> (StatusCode, Json<Published>) {
    let ticket = state.analysis.begin();
    let result = get_profile_analysis(&state.datasets.profile, state.llm.as_ref()).await;
    let published = state.analysis.publish(ticket, result).await;

    let status = if published.snapshot.result.is_success() {
        StatusCode::OK
    } else {
        StatusCode::BAD_GATEWAY
    };
    (status, Json(published))
}

/// GET /api/v1/analysis
pub async fn handle_get_analysis(
    State(state): State<AppState>,
) -> Result<Json<AnalysisSnapshot>, AppError> {
    state
        .analysis
        .latest()
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No analysis has been run yet".to_string()))
}

/// POST /api/v1/skill-gap
pub async fn handle_skill_gap(
    State(state): State<AppState>,
    Json(request): Json<SkillGapRequest>,
) -> Json<GapAnalysis> {
    let data = &state.datasets;

    Json(perform_skill_gap_analysis(
        &data.profile,
        &request.skills(),
        &request.job_title,
        &data.job_requirements,
    ))
}

/// POST /api/v1/recommendations
pub async fn handle_recommendations(
    State(state): State<AppState>,
    Json(request): Json<RecommendationsRequest>,
) -> Json<RecommendationsResponse> {
    let courses = recommend_courses(&request.skills_needed, &state.datasets.course_catalog)
        .into_iter()
        .cloned()
        .collect();
    Json(RecommendationsResponse { courses })
}

/// GET /api/v1/alumni?job_title=
pub async fn handle_alumni(
    State(state): State<AppState>,
    Query(query): Query<AlumniQuery>,
) -> Json<AlumniResponse> {
    let alumni = find_relevant_alumni(&query.job_title, &state.datasets.alumni)
        .into_iter()
        .cloned()
        .collect();
    Json(AlumniResponse { alumni })
}

/// POST /api/v1/explore
///
/// Everything shown for one career path: gap, chart counts, courses, alumni.
/// Refused until the latest analysis succeeded, since those sections build on it.
pub async fn handle_explore(
    State(state): State<AppState>,
    Json(request): Json<SkillGapRequest>,
) -> Result<Json<ExploreResponse>, AppError> {
    let job_title = request.job_title.as_str();

    match state.analysis.latest().await {
        Some(snapshot) if snapshot.result.is_success() => {
            let suggested = snapshot.result.suggested_paths();
            if !suggested.iter().any(|p| p.eq_ignore_ascii_case(job_title)) {
                info!("Exploring '{job_title}', which the analysis did not suggest");
            }
        }
        Some(_) => {
            return Err(AppError::Conflict(
                "The latest analysis failed; run the analysis again before exploring paths"
                    .to_string(),
            ))
        }
        None => {
            return Err(AppError::Conflict(
                "Run a profile analysis before exploring career paths".to_string(),
            ))
        }
    }

    let data = &state.datasets;
    let gap = perform_skill_gap_analysis(
        &data.profile,
        &request.skills(),
        job_title,
        &data.job_requirements,
    );
    let recommended_courses = recommend_courses(&gap.skills_needed, &data.course_catalog)
        .into_iter()
        .cloned()
        .collect();
    let alumni = find_relevant_alumni(job_title, &data.alumni)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(ExploreResponse {
        job_title: job_title.to_string(),
        chart: gap.chart(),
        gap,
        recommended_courses,
        alumni,
    }))
}
