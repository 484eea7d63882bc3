// Shared prompt constants.
// Each pipeline stage that needs LLM calls keeps its own templates alongside it
// (see recommendation::prompts). This file holds the cross-cutting system message.

/// System message sent with every generation call.
pub const ASSISTANT_SYSTEM: &str = "You are a skill recommendation assistant.";
