// Advisory logic: profile analysis, skill gap, course recommendation, alumni lookup.
// All LLM calls go through llm_client::LlmGateway — no direct Gemini calls here.

pub mod alumni;
pub mod course_recommender;
pub mod handlers;
pub mod profile_analysis;
pub mod prompts;
pub mod skill_gap;
pub mod tracker;
