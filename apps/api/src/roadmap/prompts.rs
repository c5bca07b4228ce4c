// All LLM prompt constants for the roadmap module.

/// System prompt for gap analysis — enforces JSON-only output.
pub const GAP_ANALYSIS_SYSTEM: &str =
    "You are an expert career gap analyzer. You strictly compare a candidate's \
    verified skills against market requirements. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Gap analysis prompt template. Replace `{current_role}`, `{dream_role}`,
/// `{technical_skills}`, `{soft_skills}` and `{market_skills}` before
/// sending.
pub const GAP_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Strictly compare a candidate's current skills against the actual market requirements.

Candidate's Current Role: {current_role}
Candidate's Dream Role: {dream_role}
Candidate's Verified Technical Skills: {technical_skills}
Candidate's Verified Soft Skills: {soft_skills}
Market Required Skills for {dream_role}: {market_skills}

Perform a strict gap analysis. Output ONLY a raw JSON object with these exact keys:
{
  "validated_strengths": ["skills they already have that match the market perfectly"],
  "critical_missing_skills": ["high-priority missing skills they entirely lack"],
  "skills_to_upgrade": ["foundational skills they have, but need to be elevated to a professional level"]
}"#;

/// System prompt for roadmap generation — enforces JSON-only output.
pub const ROADMAP_SYSTEM: &str =
    "You are an expert career co-pilot creating highly actionable learning \
    roadmaps. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Roadmap prompt template. Replace `{target_skills}` and
/// `{time_commitment}` before sending.
pub const ROADMAP_PROMPT_TEMPLATE: &str = r#"The user needs to learn these skills: {target_skills}.
They can commit {time_commitment}.

Create a highly actionable 30-day learning roadmap.

Output ONLY a raw JSON object. Use this EXACT structure:
{
  "roadmap": [
    {
      "week": 1,
      "theme": "Foundations of X",
      "focus_skills": ["Skill 1", "Skill 2"],
      "actionable_task": "What they need to do",
      "resource_suggestion": "Where to learn it",
      "vibe_check": "How to prove they learned it"
    }
  ],
  "adaptability_note": "How this plan adapts if they fall behind in week 1."
}

Generate roadmap objects for weeks 1 through 4."#;
