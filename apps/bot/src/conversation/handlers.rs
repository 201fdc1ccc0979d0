//! Event handlers — the state machine over session presence.
//!
//! | event            | needs                 | effect                                  |
//! |------------------|-----------------------|-----------------------------------------|
//! | start / help     | -                     | instructions                            |
//! | document (.pdf)  | -                     | extract, store resume                   |
//! | text             | resume                | resolve job, initial report, store job  |
//! | rerun/missing/.. | resume + job          | report for the button's mode (replace)  |
//! | new_job          | -                     | clear job description                   |
//!
//! Session writes happen only after every fallible step has succeeded.

use tracing::info;

use crate::analysis::prompts::{ComparisonRequest, Mode};
use crate::analysis::score::score_resume;
use crate::conversation::{messages, Action, ConversationState, Event, Reply};
use crate::errors::BotError;
use crate::ingest::upload::DocumentSource;
use crate::session::{ChatKey, Session};
use crate::state::AppState;

/// Handles one event for one chat. Never fails: errors become replies.
pub async fn handle_event(state: &AppState, chat: ChatKey, event: Event<'_>) -> Reply {
    let result = match event {
        Event::Start | Event::Help => Ok(Reply::text(messages::HELP)),
        Event::Score => handle_score(state, chat).await,
        Event::Document { file_name, source } => {
            handle_document(state, chat, file_name.unwrap_or_default(), source).await
        }
        Event::Text(text) => handle_job_description(state, chat, text).await,
        Event::Button(action) => handle_action(state, chat, action).await,
    };
    result.unwrap_or_else(BotError::into_reply)
}

async fn handle_document(
    state: &AppState,
    chat: ChatKey,
    file_name: &str,
    source: &dyn DocumentSource,
) -> Result<Reply, BotError> {
    if !is_pdf_name(file_name) {
        return Err(BotError::UnsupportedDocument(file_name.to_string()));
    }

    let upload = state
        .uploads
        .scratch_file()
        .map_err(|e| anyhow::anyhow!("Failed to create scratch file: {e}"))?;
    source.download_to(upload.path()).await?;

    let text = state.extractor.extract(upload.path()).await;
    if text.is_empty() {
        return Err(BotError::EmptyResume(file_name.to_string()));
    }

    let path = state
        .uploads
        .finish(upload)
        .map_err(|e| anyhow::anyhow!("Failed to finalize upload: {e}"))?;

    let chars = text.chars().count();
    info!("Chat {chat}: stored resume from {file_name:?} ({chars} chars)");
    state.sessions.set_resume(chat, text, path).await;

    Ok(Reply::text(messages::resume_saved(chars)))
}

async fn handle_job_description(
    state: &AppState,
    chat: ChatKey,
    raw: &str,
) -> Result<Reply, BotError> {
    let session = state.sessions.get(chat).await;
    if ConversationState::of(session.as_ref()) == ConversationState::NoResume {
        return Err(BotError::ResumeMissing);
    }
    let resume = session
        .and_then(|s| s.resume_text)
        .ok_or(BotError::ResumeMissing)?;

    let job = state.jobs.resolve(raw).await;
    let body = run_mode(state, &resume, &job.text, Mode::Initial).await?;

    let note = (job.from_url && job.text.trim().is_empty())
        .then_some(messages::EMPTY_JOB_PAGE_NOTE);
    info!(
        "Chat {chat}: initial report for {} job description ({} chars)",
        if job.from_url { "linked" } else { "pasted" },
        job.text.chars().count()
    );
    state.sessions.set_last_job_description(chat, job.text).await;

    Ok(Reply::report(messages::report(Mode::Initial, &body, note)))
}

async fn handle_action(state: &AppState, chat: ChatKey, action: Action) -> Result<Reply, BotError> {
    let Some(mode) = action.mode() else {
        state.sessions.clear_last_job_description(chat).await;
        info!("Chat {chat}: cleared job description");
        return Ok(Reply::text(messages::NEW_JOB_PROMPT));
    };

    let session = state.sessions.get(chat).await;
    let (resume, job) = session
        .as_ref()
        .and_then(Session::comparison_inputs)
        .ok_or(BotError::ComparisonIncomplete)?;

    let body = run_mode(state, resume, job, mode).await?;
    info!("Chat {chat}: {mode:?} report");

    Ok(Reply::report(messages::report(mode, &body, None)).replacing())
}

async fn handle_score(state: &AppState, chat: ChatKey) -> Result<Reply, BotError> {
    let session = state.sessions.get(chat).await;
    let (resume, job) = session
        .as_ref()
        .and_then(Session::comparison_inputs)
        .ok_or(BotError::ComparisonIncomplete)?;

    let score = score_resume(state.llm.as_ref(), resume, job).await?;
    info!("Chat {chat}: score card {}/100", score.score);

    Ok(Reply::report(messages::score_card(&score)))
}

async fn run_mode(state: &AppState, resume: &str, job: &str, mode: Mode) -> Result<String, BotError> {
    let prompt = ComparisonRequest::new(resume, job, mode).build_prompt();
    Ok(state.llm.complete(&prompt, mode.params()).await?)
}

fn is_pdf_name(file_name: &str) -> bool {
    file_name.to_ascii_lowercase().ends_with(".pdf")
}
