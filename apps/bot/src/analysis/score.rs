//! Strict-JSON ATS scoring — prompt the model for a JSON record, parse it leniently,
//! and fall back to a fixed default record when the output cannot be read.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::analysis::prompts::{ComparisonRequest, Mode};
use crate::llm_client::{strip_json_fences, Inference, LlmError};

pub const PARSE_FAILURE_SUGGESTION: &str =
    "The model response could not be read as a score. Please try again.";
pub const PARSE_FAILURE_SUMMARY: &str = "Unable to parse model response.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsScore {
    /// 0 – 100
    pub score: u32,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub suggestions: Vec<String>,
    pub short_summary: String,
}

impl AtsScore {
    /// Record returned whenever the model output is not a usable JSON object.
    pub fn parse_failure() -> Self {
        Self {
            score: 0,
            matched_keywords: vec![],
            missing_keywords: vec![],
            suggestions: vec![PARSE_FAILURE_SUGGESTION.to_string()],
            short_summary: PARSE_FAILURE_SUMMARY.to_string(),
        }
    }
}

/// Runs the scoring mode end to end. Only transport failures are errors;
/// unreadable output degrades to `AtsScore::parse_failure()`.
pub async fn score_resume(
    llm: &dyn Inference,
    resume_text: &str,
    job_text: &str,
) -> Result<AtsScore, LlmError> {
    let request = ComparisonRequest::new(resume_text, job_text, Mode::ScoringJson);
    let raw = llm
        .complete(&request.build_prompt(), Mode::ScoringJson.params())
        .await?;
    Ok(parse_score(&raw))
}

/// Parses the first top-level `{...}` span of `raw` into an `AtsScore`.
pub fn parse_score(raw: &str) -> AtsScore {
    let Some(span) = first_json_object(strip_json_fences(raw)) else {
        warn!("Scoring response contained no JSON object");
        return AtsScore::parse_failure();
    };

    match serde_json::from_str::<AtsScore>(span) {
        Ok(mut score) => {
            score.score = score.score.min(100);
            score
        }
        Err(e) => {
            warn!("Scoring response was not a valid score record: {e}");
            AtsScore::parse_failure()
        }
    }
}

/// Finds the first balanced `{...}` span, ignoring braces inside JSON strings.
fn first_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}
