//! Prompt builder — renders one fixed template per `Mode` with truncated inputs.

use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, RECRUITER_SYSTEM};
use crate::llm_client::CompletionParams;

/// Input cap for the conversational modes.
pub const CONVERSATIONAL_MAX_CHARS: usize = 3_000;
/// Input cap for the strict-JSON scoring mode.
pub const SCORING_MAX_CHARS: usize = 30_000;

/// Which report the model is asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Initial,
    Rerun,
    MissingKeywords,
    TailoredSummary,
    ScoringJson,
}

impl Mode {
    pub fn max_input_chars(self) -> usize {
        match self {
            Mode::ScoringJson => SCORING_MAX_CHARS,
            _ => CONVERSATIONAL_MAX_CHARS,
        }
    }

    pub fn params(self) -> CompletionParams {
        match self {
            Mode::Initial | Mode::Rerun => CompletionParams {
                system: RECRUITER_SYSTEM,
                temperature: 0.3,
                max_tokens: 700,
            },
            Mode::MissingKeywords => CompletionParams {
                system: RECRUITER_SYSTEM,
                temperature: 0.2,
                max_tokens: 500,
            },
            Mode::TailoredSummary => CompletionParams {
                system: RECRUITER_SYSTEM,
                temperature: 0.6,
                max_tokens: 400,
            },
            Mode::ScoringJson => CompletionParams {
                system: JSON_ONLY_SYSTEM,
                temperature: 0.0,
                max_tokens: 800,
            },
        }
    }

    fn template(self) -> &'static str {
        match self {
            Mode::Initial | Mode::Rerun => ATS_REPORT_TEMPLATE,
            Mode::MissingKeywords => MISSING_KEYWORDS_TEMPLATE,
            Mode::TailoredSummary => TAILORED_SUMMARY_TEMPLATE,
            Mode::ScoringJson => SCORING_JSON_TEMPLATE,
        }
    }

    fn preamble(self) -> &'static str {
        match self {
            Mode::Rerun => RERUN_PREAMBLE,
            _ => "",
        }
    }
}

/// One comparison, built per action and dropped once rendered.
#[derive(Debug, Clone, Copy)]
pub struct ComparisonRequest<'a> {
    pub resume_text: &'a str,
    pub job_text: &'a str,
    pub mode: Mode,
}

impl<'a> ComparisonRequest<'a> {
    pub fn new(resume_text: &'a str, job_text: &'a str, mode: Mode) -> Self {
        Self {
            resume_text,
            job_text,
            mode,
        }
    }

    /// Renders the prompt. Inputs are inserted verbatim after truncation.
    pub fn build_prompt(&self) -> String {
        let limit = self.mode.max_input_chars();
        let body = self
            .mode
            .template()
            .replace("{job_text}", truncate_chars(self.job_text, limit))
            .replace("{resume_text}", truncate_chars(self.resume_text, limit));
        format!("{}{}", self.mode.preamble(), body)
    }
}

/// Returns at most `max_chars` characters of `text`, cut on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

const RERUN_PREAMBLE: &str = "This is a fresh second pass over the same resume and job \
description. Re-evaluate independently; do not assume a previous score.\n\n";

/// Shared by `Initial` and `Rerun`. Replace `{resume_text}` and `{job_text}`.
const ATS_REPORT_TEMPLATE: &str = r#"Act as an Applicant Tracking System. Compare the resume with the job description and produce a compatibility report.

Respond in EXACTLY this structure, keeping the headers and emoji markers:

📊 ATS Score: <0-100>/100

✅ Matched Keywords:
• <keyword>
• <keyword>

❌ Missing Keywords:
• <keyword>
• <keyword>

💡 Suggestions:
• <one concrete improvement per bullet, at most 5>

Rules:
- Base the score on keyword coverage, relevant experience, and seniority fit.
- Only list keywords that actually appear in the job description.
- Keep the whole report under 1200 characters.

RESUME:
"""
{resume_text}
"""

JOB DESCRIPTION:
"""
{job_text}
""""#;

/// Replace `{resume_text}` and `{job_text}`.
const MISSING_KEYWORDS_TEMPLATE: &str = r#"List the skills, tools, and qualifications the job description asks for that the resume does not demonstrate.

Respond in EXACTLY this structure:

🧩 Missing Skills:
• <skill> — <why it matters for this role, one short clause>

🎯 Top 3 To Add First:
1. <skill>
2. <skill>
3. <skill>

Rules:
- Only include items that appear in the job description.
- Do not list skills the resume already shows.
- Keep it under 1000 characters.

RESUME:
"""
{resume_text}
"""

JOB DESCRIPTION:
"""
{job_text}
""""#;

/// Replace `{resume_text}` and `{job_text}`.
const TAILORED_SUMMARY_TEMPLATE: &str = r#"Write a professional resume summary tailored to the job description, using ONLY facts present in the resume.

Respond in EXACTLY this structure:

✍️ Tailored Summary:
<3-4 sentences, first person implied, no pronouns>

🔑 Keywords Used:
• <keyword>
• <keyword>

Rules:
- Weave in the job description's most important keywords where the resume supports them.
- Never invent employers, titles, metrics, or years of experience.
- Keep it under 800 characters.

RESUME:
"""
{resume_text}
"""

JOB DESCRIPTION:
"""
{job_text}
""""#;

/// Strict-JSON scoring. Replace `{resume_text}` and `{job_text}`.
const SCORING_JSON_TEMPLATE: &str = r#"Score how well the resume matches the job description as an Applicant Tracking System would.

Return a JSON object with this EXACT schema (no extra fields):
{
  "score": 0,
  "matched_keywords": ["keyword"],
  "missing_keywords": ["keyword"],
  "suggestions": ["one concrete improvement"],
  "short_summary": "one or two sentences"
}

Rules:
- "score" is an integer from 0 to 100.
- Keywords must come from the job description.
- At most 15 matched keywords, 15 missing keywords, and 5 suggestions.

RESUME:
{resume_text}

JOB DESCRIPTION:
{job_text}"#;
