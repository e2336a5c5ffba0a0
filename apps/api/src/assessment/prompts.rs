// Prompt constants for narrative enrichment.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for the career-counsellor narrative.
pub const NARRATIVE_SYSTEM: &str =
    "You are an expert career counsellor for Indian students. \
    You write warm, specific, practical guidance grounded in the Indian job market. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Narrative prompt template. Replace `{fidelity_instruction}`, `{traits_json}`,
/// `{careers_json}` before sending.
pub const NARRATIVE_PROMPT_TEMPLATE: &str = r#"A student has completed a psychometric career assessment.

{fidelity_instruction}

Trait scores (higher is stronger; each answer adds 5 points to one trait):
{traits_json}

Ranked career matches (score is 0-100 sufficiency of the student's traits):
{careers_json}

Return a JSON object with this EXACT schema (no extra fields):
{
  "summary": "2-3 sentence personality description addressed to the student",
  "work_style": "one or two sentences on the work environment they would thrive in",
  "advice": "a short paragraph of concrete next steps for the top-ranked careers"
}
"#;
