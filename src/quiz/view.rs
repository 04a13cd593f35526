//! Text and keyboard layout for a session. Nothing here talks to Telegram,
//! the bot turns these rows into reply keyboards.

use crate::quiz::{Catalog, QuizError, QuizSession, ResultItem, SessionState};

pub const PREVIOUS: &str = "⬅️ Previous";
pub const NEXT: &str = "Next ➡️";
pub const FINISH: &str = "Finish 🎵";
pub const RESTART: &str = "Take the Quiz Again";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Select(String),
    Next,
    Previous,
    Restart,
    Unknown,
}

impl Command {
    pub fn parse(text: &str, session: &QuizSession) -> Self {
        let text = text.trim();
        match text {
            NEXT | FINISH => Command::Next,
            PREVIOUS => Command::Previous,
            RESTART | "/start" | "/restart" => Command::Restart,
            _ => match session.state() {
                SessionState::Active { question, .. } if question.has_option(text) => {
                    Command::Select(text.to_string())
                }
                _ => Command::Unknown,
            },
        }
    }
}

pub fn greeting_text(catalog: &Catalog) -> String {
    format!("<b>{}</b>\n{}", catalog.title(), catalog.description())
}

pub fn question_text(session: &QuizSession) -> String {
    match session.state() {
        SessionState::Completed { result } => result_text(result),
        SessionState::Active {
            index,
            question,
            answers,
        } => {
            let mut text = format!(
                "Question {} of {}\n\n<b>{}</b>",
                index + 1,
                session.catalog().question_count(),
                question.prompt
            );
            if let Some(answer) = answers[index].as_deref() {
                text.push_str(&format!("\n\nYour answer: <i>{}</i>", answer));
            }
            text
        }
    }
}

pub fn result_text(result: &ResultItem) -> String {
    format!(
        "Your Lana Del Rey song is:\n\n<b>{}</b>\n\nThis song perfectly captures your current vibe. Give it a listen!",
        result.title
    )
}

/// What to tell the user when the session refused an operation.
pub fn rejection_text(err: &QuizError, session: &QuizSession) -> &'static str {
    match err {
        QuizError::InvalidChoice { .. } => "That's not one of the options, pick one from the keyboard.",
        QuizError::IllegalTransition { .. } if session.is_completed() => {
            "The quiz is over! Tap \"Take the Quiz Again\" to play once more."
        }
        QuizError::IllegalTransition { .. } => "Pick an answer first!",
        _ => "Something went wrong, please try again.",
    }
}

/// Option buttons one per row, then whichever of Previous / Next is enabled.
pub fn keyboard(session: &QuizSession) -> Vec<Vec<String>> {
    let question = match session.state() {
        SessionState::Completed { .. } => return vec![vec![RESTART.to_string()]],
        SessionState::Active { question, .. } => question,
    };

    let mut rows: Vec<Vec<String>> = question
        .options
        .iter()
        .map(|option| vec![option.clone()])
        .collect();

    let mut navigation = Vec::new();
    if session.can_retreat() {
        navigation.push(PREVIOUS.to_string());
    }
    if session.can_advance() {
        let label = if session.is_last_question() { FINISH } else { NEXT };
        navigation.push(label.to_string());
    }
    if !navigation.is_empty() {
        rows.push(navigation);
    }
    rows
}
