// User-facing texts. Everything here is Telegram HTML; model output is escaped
// before it is embedded.

use teloxide::utils::html;

use crate::analysis::prompts::Mode;
use crate::analysis::score::AtsScore;

pub const HELP: &str = "👋 <b>ATS Resume Checker</b>\n\n\
    1. Upload your resume as a <b>PDF</b> file.\n\
    2. Send the job description as text, or paste a link to the posting.\n\
    3. Get an ATS-style compatibility report with matched and missing keywords.\n\n\
    Use the buttons under each report to re-run the check, list missing skills, \
    get a tailored summary, or compare against a new job.\n\n\
    /score gives a compact numeric score card.\n\
    /help shows this message again.";

pub const UPLOAD_PDF: &str = "⚠️ Please upload your resume as a <b>PDF</b> file.";

pub const EXTRACTION_FAILED: &str = "⚠️ <b>Could not extract text from this PDF.</b>\n\
    It may be a scanned image. Please upload a text-based PDF.";

pub const UPLOAD_RESUME_FIRST: &str = "📄 Please upload your resume (PDF) first.";

pub const NEED_RESUME_AND_JOB: &str =
    "📄 Please upload your resume and send a job description first.";

pub const NEW_JOB_PROMPT: &str =
    "🆕 Send me the new job description as text or a link.";

pub const SOMETHING_WENT_WRONG: &str =
    "❌ Something went wrong while processing your request. Please try again.";

pub const EMPTY_JOB_PAGE_NOTE: &str = "<i>⚠️ I couldn't read any text from that link. \
    Pasting the job description as text usually gives a better report.</i>";

pub fn resume_saved(chars: usize) -> String {
    format!(
        "✅ <b>Resume received</b> ({chars} characters extracted).\n\
        Now send me the job description as text or a link."
    )
}

fn report_title(mode: Mode) -> &'static str {
    match mode {
        Mode::Initial => "📋 <b>ATS Compatibility Report</b>",
        Mode::Rerun => "🔁 <b>ATS Compatibility Report (re-run)</b>",
        Mode::MissingKeywords => "🧩 <b>Missing Skills</b>",
        Mode::TailoredSummary => "✍️ <b>Tailored Summary</b>",
        Mode::ScoringJson => "📊 <b>ATS Score Card</b>",
    }
}

/// Model output shown verbatim under a mode title, with an optional notice first.
pub fn report(mode: Mode, body: &str, note: Option<&str>) -> String {
    let mut out = String::new();
    if let Some(note) = note {
        out.push_str(note);
        out.push_str("\n\n");
    }
    out.push_str(report_title(mode));
    out.push_str("\n\n");
    out.push_str(&html::escape(body));
    out
}

pub fn score_card(score: &AtsScore) -> String {
    let mut out = format!(
        "{}\n\n<b>Score:</b> {}/100\n<i>{}</i>",
        report_title(Mode::ScoringJson),
        score.score,
        html::escape(&score.short_summary)
    );
    push_list(&mut out, "✅ Matched", &score.matched_keywords);
    push_list(&mut out, "❌ Missing", &score.missing_keywords);
    push_list(&mut out, "💡 Suggestions", &score.suggestions);
    out
}

fn push_list(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    out.push_str(&format!("\n\n<b>{title}:</b>"));
    for item in items {
        out.push_str("\n• ");
        out.push_str(&html::escape(item));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_escapes_model_output() {
        let text = report(Mode::Initial, "Use <b>C++</b> & Rust", None);
        assert!(text.starts_with("📋 <b>ATS Compatibility Report</b>"));
        assert!(text.contains("Use &lt;b&gt;C++&lt;/b&gt; &amp; Rust"));
    }

    #[test]
    fn test_report_note_comes_first() {
        let text = report(Mode::Initial, "body", Some(EMPTY_JOB_PAGE_NOTE));
        assert!(text.starts_with(EMPTY_JOB_PAGE_NOTE));
        assert!(text.ends_with("body"));
    }

    #[test]
    fn test_score_card_lists_and_skips_empty_sections() {
        let score = AtsScore {
            score: 64,
            matched_keywords: vec!["Go".into()],
            missing_keywords: vec![],
            suggestions: vec!["Add <metrics>".into()],
            short_summary: "Decent fit".into(),
        };
        let card = score_card(&score);
        assert!(card.contains("<b>Score:</b> 64/100"));
        assert!(card.contains("• Go"));
        assert!(!card.contains("❌ Missing"));
        assert!(card.contains("• Add &lt;metrics&gt;"));
    }
}
