//! Conversation controller — transport-agnostic events in, formatted replies out.
//! The telegram module adapts teloxide updates to `Event`s and `Reply`s to API calls.

pub mod handlers;
pub mod messages;

use crate::analysis::prompts::Mode;
use crate::ingest::upload::DocumentSource;
use crate::session::Session;

/// Per-chat state, derived from what the session currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationState {
    NoResume,
    ResumeLoaded,
    AwaitingAction,
}

impl ConversationState {
    pub fn of(session: Option<&Session>) -> Self {
        match session {
            Some(s) if s.comparison_inputs().is_some() => ConversationState::AwaitingAction,
            Some(s) if s.has_resume() => ConversationState::ResumeLoaded,
            _ => ConversationState::NoResume,
        }
    }
}

/// A follow-up button on the action menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Rerun,
    Missing,
    Summary,
    NewJob,
}

/// Two rows, two columns, attached to every report.
pub const ACTION_MENU: [[Action; 2]; 2] = [
    [Action::Rerun, Action::Missing],
    [Action::Summary, Action::NewJob],
];

impl Action {
    pub fn callback_data(self) -> &'static str {
        match self {
            Action::Rerun => "rerun",
            Action::Missing => "missing",
            Action::Summary => "summary",
            Action::NewJob => "new_job",
        }
    }

    pub fn from_callback_data(data: &str) -> Option<Self> {
        match data {
            "rerun" => Some(Action::Rerun),
            "missing" => Some(Action::Missing),
            "summary" => Some(Action::Summary),
            "new_job" => Some(Action::NewJob),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Action::Rerun => "🔁 Re-run check",
            Action::Missing => "🧩 Missing skills",
            Action::Summary => "✍️ Tailored summary",
            Action::NewJob => "🆕 New job",
        }
    }

    /// Report mode behind the button; `NewJob` runs no inference.
    pub fn mode(self) -> Option<Mode> {
        match self {
            Action::Rerun => Some(Mode::Rerun),
            Action::Missing => Some(Mode::MissingKeywords),
            Action::Summary => Some(Mode::TailoredSummary),
            Action::NewJob => None,
        }
    }
}

/// Inbound event for one chat.
pub enum Event<'a> {
    Start,
    Help,
    /// Strict-JSON score card for the stored resume and job description.
    Score,
    Document {
        file_name: Option<&'a str>,
        source: &'a dyn DocumentSource,
    },
    Text(&'a str),
    Button(Action),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// New message in the chat.
    Send,
    /// Edit the message whose button was pressed.
    Replace,
}

/// Outbound reply. `text` is Telegram HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub menu: bool,
    pub delivery: Delivery,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            menu: false,
            delivery: Delivery::Send,
        }
    }

    pub fn report(text: impl Into<String>) -> Self {
        Self {
            menu: true,
            ..Self::text(text)
        }
    }

    pub fn replacing(self) -> Self {
        Self {
            delivery: Delivery::Replace,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callback_data_round_trips_for_menu_buttons() {
        for action in ACTION_MENU.iter().flatten() {
            assert_eq!(
                Action::from_callback_data(action.callback_data()),
                Some(*action)
            );
        }
        assert_eq!(Action::from_callback_data("delete_everything"), None);
    }

    #[test]
    fn test_menu_layout() {
        assert_eq!(ACTION_MENU[0], [Action::Rerun, Action::Missing]);
        assert_eq!(ACTION_MENU[1], [Action::Summary, Action::NewJob]);
    }

    #[test]
    fn test_state_derivation() {
        assert_eq!(ConversationState::of(None), ConversationState::NoResume);

        let mut session = Session::default();
        assert_eq!(ConversationState::of(Some(&session)), ConversationState::NoResume);

        session.resume_text = Some("cv".into());
        assert_eq!(
            ConversationState::of(Some(&session)),
            ConversationState::ResumeLoaded
        );

        session.last_job_description = Some("jd".into());
        assert_eq!(
            ConversationState::of(Some(&session)),
            ConversationState::AwaitingAction
        );
    }

    #[test]
    fn test_reply_builders() {
        let reply = Reply::report("r").replacing();
        assert!(reply.menu);
        assert_eq!(reply.delivery, Delivery::Replace);
        assert!(!Reply::text("t").menu);
    }
}
