// All LLM prompt templates for the advisor module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Profile analysis prompt template.
/// Replace: {persona}, {student_data}, {json_only_instruction}
pub const PROFILE_ANALYSIS_PROMPT_TEMPLATE: &str = r#"{persona} Your task is to analyze a student's academic profile and return a JSON object.

**Student Data:**
{student_data}

**Your Instructions:**
1.  Analyze the student's major and courses to identify 2-3 of their key academic strengths.
2.  Based on these strengths, suggest exactly two relevant and specific career paths.

{json_only_instruction} The JSON object must contain two keys: "strengths" (a list of strings) and "suggested_paths" (a list of strings). Both keys are mandatory.

**Example Format:**
{"strengths": ["Strength 1", "Strength 2"], "suggested_paths": ["Career Path 1", "Career Path 2"]}"#;
