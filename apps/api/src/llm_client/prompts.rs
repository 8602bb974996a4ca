// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Persona line opening every advisor prompt.
pub const ADVISOR_PERSONA: &str = "You are a career advisor AI for Boston University.";

/// Instruction that enforces a bare JSON reply.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    **CRITICAL:** You MUST respond with a single, valid JSON object and nothing else. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";
