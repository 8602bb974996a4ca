//! Profile analysis — asks the model for academic strengths and two career paths.
//!
//! The model's reply is untrusted: it is validated against `AnalysisPayload`
//! before anything downstream sees it. Every failure, whether from the gateway or
//! from validation, becomes `AnalysisResult::Failure` rather than an `Err`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{error, info};

use crate::advisor::prompts::PROFILE_ANALYSIS_PROMPT_TEMPLATE;
use crate::llm_client::prompts::{ADVISOR_PERSONA, JSON_ONLY_INSTRUCTION};
use crate::llm_client::{GatewayError, LlmGateway};
use crate::models::profile::StudentProfile;

/// Why an analysis failed. Serialized next to the error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisErrorKind {
    RequestFailed,
    NoJsonFound,
    MalformedJson,
    UnexpectedResponseShape,
    ResponseTooLarge,
    /// The reply parsed, but `strengths` / `suggested_paths` were missing or mistyped.
    InvalidSchema,
}

/// Outcome of one profile analysis. Exactly one of the two shapes, never both.
///
/// Serialized untagged, so clients branch on the presence of an `error` key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisResult {
    Success {
        strengths: Vec<String>,
        suggested_paths: Vec<String>,
    },
    Failure {
        error: String,
        kind: AnalysisErrorKind,
        #[serde(skip_serializing_if = "Option::is_none")]
        raw_response: Option<String>,
    },
}

/// The schema the model is asked to follow.
#[derive(Debug, Deserialize)]
struct AnalysisPayload {
    strengths: Vec<String>,
    suggested_paths: Vec<String>,
}

impl AnalysisResult {
    pub fn is_success(&self) -> bool {
        matches!(self, AnalysisResult::Success { .. })
    }

    pub fn suggested_paths(&self) -> &[String] {
        match self {
            AnalysisResult::Success {
                suggested_paths, ..
            } => suggested_paths,
            AnalysisResult::Failure { .. } => &[],
        }
    }

    fn failure(kind: AnalysisErrorKind, error: String, raw_response: Option<String>) -> Self {
        AnalysisResult::Failure {
            error,
            kind,
            raw_response,
        }
    }
}

impl From<GatewayError> for AnalysisResult {
    fn from(err: GatewayError) -> Self {
        let message = err.to_string();
        match err {
            GatewayError::RequestFailed { .. } => {
                Self::failure(AnalysisErrorKind::RequestFailed, message, None)
            }
            GatewayError::NoJsonFound { raw_text } => {
                Self::failure(AnalysisErrorKind::NoJsonFound, message, Some(raw_text))
            }
            GatewayError::MalformedJson { raw_text } => {
                Self::failure(AnalysisErrorKind::MalformedJson, message, Some(raw_text))
            }
            GatewayError::UnexpectedResponseShape => {
                Self::failure(AnalysisErrorKind::UnexpectedResponseShape, message, None)
            }
            GatewayError::ResponseTooLarge { .. } => {
                Self::failure(AnalysisErrorKind::ResponseTooLarge, message, None)
            }
        }
    }
}

/// Builds the analysis prompt. Deterministic for a given profile.
pub fn build_profile_prompt(profile: &StudentProfile) -> Result<String, serde_json::Error> {
    let student_data = serde_json::to_string_pretty(profile)?;
    Ok(PROFILE_ANALYSIS_PROMPT_TEMPLATE
        .replace("{persona}", ADVISOR_PERSONA)
        .replace("{json_only_instruction}", JSON_ONLY_INSTRUCTION)
        .replace("{student_data}", &student_data))
}

/// Analyzes the profile through the gateway and validates the reply.
pub async fn get_profile_analysis(
    profile: &StudentProfile,
    llm: &dyn LlmGateway,
) -> AnalysisResult {
    let prompt = match build_profile_prompt(profile) {
        Ok(prompt) => prompt,
        Err(e) => {
            error!("Failed to serialize student profile: {e}");
            return AnalysisResult::failure(
                AnalysisErrorKind::RequestFailed,
                format!("Could not build the analysis request: {e}"),
                None,
            );
        }
    };

    match llm.get_llm_response(&prompt).await {
        Ok(reply) => validate_reply(reply),
        Err(e) => e.into(),
    }
}

fn validate_reply(reply: Map<String, Value>) -> AnalysisResult {
    let raw = Value::Object(reply);
    match serde_json::from_value::<AnalysisPayload>(raw.clone()) {
        Ok(payload) => {
            info!(
                "Profile analysis produced {} strengths and {} paths",
                payload.strengths.len(),
                payload.suggested_paths.len()
            );
            AnalysisResult::Success {
                strengths: payload.strengths,
                suggested_paths: payload.suggested_paths,
            }
        }
        Err(e) => {
            error!("AI response failed schema validation: {e}. Parsed object: {raw}");
            AnalysisResult::failure(
                AnalysisErrorKind::InvalidSchema,
                format!("The AI response did not match the expected format: {e}"),
                Some(raw.to_string()),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_profile, FakeGateway};
    use serde_json::json;

    #[tokio::test]
    async fn test_successful_analysis_is_returned_verbatim() {
        let llm = FakeGateway::replying(json!({
            "strengths": ["Quantitative reasoning", "Programming"],
            "suggested_paths": ["Data Analyst", "Software Engineer"]
        }));

        let result = get_profile_analysis(&sample_profile(), &llm).await;
        assert_eq!(
            result,
            AnalysisResult::Success {
                strengths: vec!["Quantitative reasoning".into(), "Programming".into()],
                suggested_paths: vec!["Data Analyst".into(), "Software Engineer".into()],
            }
        );
    }

    #[tokio::test]
    async fn test_prompt_embeds_profile_and_schema() {
        let llm = FakeGateway::replying(json!({"strengths": [], "suggested_paths": []}));
        get_profile_analysis(&sample_profile(), &llm).await;

        let prompts = llm.prompts();
        assert_eq!(prompts.len(), 1);
        let prompt = &prompts[0];
        assert!(prompt.contains("\"student_name\": \"Rhett Terrier\""));
        assert!(prompt.contains("\"course_code\": \"CS 111\""));
        assert!(prompt.contains("exactly two"));
        assert!(prompt.contains("\"suggested_paths\""));
        assert!(!prompt.contains("{student_data}"));
        assert!(!prompt.contains("{persona}"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let profile = sample_profile();
        assert_eq!(
            build_profile_prompt(&profile).unwrap(),
            build_profile_prompt(&profile).unwrap()
        );
    }

    #[tokio::test]
    async fn test_gateway_failure_becomes_failure_result() {
        let llm = FakeGateway::failing();

        let result = get_profile_analysis(&sample_profile(), &llm).await;
        match result {
            AnalysisResult::Failure { kind, error, .. } => {
                assert_eq!(kind, AnalysisErrorKind::RequestFailed);
                assert!(error.contains("API request error"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_key_is_invalid_schema() {
        let llm = FakeGateway::replying(json!({"strengths": ["Math"]}));

        let result = get_profile_analysis(&sample_profile(), &llm).await;
        assert!(matches!(
            result,
            AnalysisResult::Failure {
                kind: AnalysisErrorKind::InvalidSchema,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_mistyped_paths_is_invalid_schema() {
        let llm = FakeGateway::replying(json!({"strengths": ["Math"], "suggested_paths": "Quant"}));

        let result = get_profile_analysis(&sample_profile(), &llm).await;
        assert!(!result.is_success());
        assert!(result.suggested_paths().is_empty());
    }

    #[test]
    fn test_no_json_found_keeps_raw_text() {
        let result: AnalysisResult = GatewayError::NoJsonFound {
            raw_text: "sorry".to_string(),
        }
        .into();
        assert_eq!(
            result,
            AnalysisResult::Failure {
                error: "AI response did not contain a valid JSON object.".to_string(),
                kind: AnalysisErrorKind::NoJsonFound,
                raw_response: Some("sorry".to_string()),
            }
        );
    }

    #[test]
    fn test_results_serialize_with_error_marker_only_on_failure() {
        let ok = AnalysisResult::Success {
            strengths: vec!["A".into()],
            suggested_paths: vec!["B".into(), "C".into()],
        };
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({"strengths": ["A"], "suggested_paths": ["B", "C"]})
        );

        let failed: AnalysisResult = GatewayError::UnexpectedResponseShape.into();
        let value = serde_json::to_value(&failed).unwrap();
        assert_eq!(value["kind"], json!("unexpected_response_shape"));
        assert!(value.get("error").is_some());
        assert!(value.get("strengths").is_none());
    }
}
