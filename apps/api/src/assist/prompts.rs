// Prompt constants for the assistant. `{placeholders}` are replaced before sending.

/// System prompt for CV re-analysis.
pub const ENHANCE_SYSTEM: &str = "You are an experienced technical recruiter. \
    You rewrite résumé text so it is clear, well structured and easy to scan. \
    Preserve every fact exactly. Do NOT invent employers, dates, skills or metrics. \
    Respond with the rewritten résumé text only, without commentary or markdown code fences.";

/// CV re-analysis prompt. Replace `{name}` and `{content}`.
pub const ENHANCE_PROMPT_TEMPLATE: &str = r#"Re-analyze and restructure the following résumé for {name}.
Group the content into a short summary, skills, and experience. Keep the candidate's wording where it is already precise.

Résumé:
"""
{content}
"""
"#;

/// System prompt for pitch generation.
pub const PITCH_SYSTEM: &str = "You write concise, first-person application pitches. \
    Only use facts present in the candidate's résumé and the job request. \
    Respond in markdown, without a preamble.";

/// Pitch prompt. Replace `{candidate}`, `{title}`, `{description}`, `{requirements}`,
/// `{score}`, `{keywords}` and `{content}`.
pub const PITCH_PROMPT_TEMPLATE: &str = r#"Write a pitch from {candidate} for the position "{title}".

Use these sections, in order:
# Pitch for {candidate} - {title}
## Introduction — interest in the role, grounded in: {keywords}
## Match Analysis — state that the keyword match score is {score}%
## Key Qualifications — drawn from the résumé below
## Why I'm Interested — relate the role description to the candidate's experience
## Next Steps — invite an interview
Close with "Best regards," and the candidate's name.

Role description:
"""
{description}
"""

Requirements:
"""
{requirements}
"""

Résumé:
"""
{content}
"""
"#;
