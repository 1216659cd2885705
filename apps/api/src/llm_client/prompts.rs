// Shared prompt fragments. Each service that needs LLM calls defines its own
// prompts.rs alongside it and composes these.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// The resume shape every structured reply must follow.
pub const RESUME_JSON_SHAPE: &str = r#"{
  "personal_info": {
    "name": "string",
    "email": "string",
    "phone": "string",
    "location": "string",
    "summary": "string"
  },
  "education": [
    { "school": "string", "degree": "string", "year": "string" }
  ],
  "experience": [
    { "company": "string", "position": "string", "duration": "string", "description": "string" }
  ],
  "skills": ["skill1", "skill2", "skill3"]
}"#;
