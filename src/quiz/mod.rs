pub mod catalog;
pub mod session;
pub mod view;

use std::collections::BTreeMap;

pub use catalog::Catalog;
pub use session::{Progress, QuizSession, SessionState};

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
pub struct Question {
    pub prompt: String,
    pub options: Vec<String>,
}
impl Question {
    pub fn new(prompt: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            prompt: prompt.into(),
            options,
        }
    }

    pub fn has_option(&self, choice: &str) -> bool {
        self.options.iter().any(|option| option == choice)
    }
}

/// A song the quiz can land on. Attributes are descriptive tags only,
/// nothing in the session reads them.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
pub struct ResultItem {
    pub title: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}
impl ResultItem {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum QuizError {
    #[error("{kind} index {index} is out of range (there are {len})")]
    OutOfRange {
        kind: &'static str,
        index: usize,
        len: usize,
    },

    #[error("\"{choice}\" is not an option for question {question}")]
    InvalidChoice { question: usize, choice: String },

    #[error("cannot {action}: {reason}")]
    IllegalTransition {
        action: &'static str,
        reason: &'static str,
    },

    #[error("the result catalog is empty")]
    EmptyCatalog,

    #[error("the quiz has no questions")]
    NoQuestions,

    #[error("question {index} is invalid: {reason}")]
    InvalidQuestion { index: usize, reason: String },

    #[error("failed to parse quiz data: {0}")]
    Data(#[from] serde_json::Error),
}
