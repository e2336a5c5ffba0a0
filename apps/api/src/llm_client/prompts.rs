// Cross-cutting prompt fragments. Feature prompts live next to their feature.

/// Keeps generated text consistent with the deterministic scores it is given.
pub const SCORE_FIDELITY_INSTRUCTION: &str = "\
    CRITICAL: The trait scores and career rankings below are final. \
    Do NOT invent new careers, re-order the list, or change any match score. \
    Describe only what the provided data supports.";
