use std::sync::Arc;

use log::debug;
use rand::Rng;

use crate::quiz::{Catalog, Question, QuizError, ResultItem};

/// One run through the quiz. Every chat owns its own session; the catalog
/// behind it is shared and read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    catalog: Arc<Catalog>,
    question_index: usize,
    answers: Vec<Option<String>>,
    result: Option<ResultItem>,
}

/// Where the session landed after a successful `advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Question(usize),
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState<'a> {
    Active {
        index: usize,
        question: &'a Question,
        answers: &'a [Option<String>],
    },
    Completed {
        result: &'a ResultItem,
    },
}

impl QuizSession {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let answers = vec![None; catalog.question_count()];
        Self {
            catalog,
            question_index: 0,
            answers,
            result: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> SessionState<'_> {
        match &self.result {
            Some(result) => SessionState::Completed { result },
            None => SessionState::Active {
                index: self.question_index,
                question: &self.catalog.questions()[self.question_index],
                answers: &self.answers,
            },
        }
    }

    /// Records `choice` for the current question, replacing any earlier answer.
    pub fn select_answer(&mut self, choice: &str) -> Result<(), QuizError> {
        if self.is_completed() {
            return Err(QuizError::IllegalTransition {
                action: "select an answer",
                reason: "the quiz is already completed",
            });
        }

        let index = self.question_index;
        if !self.catalog.question_at(index)?.has_option(choice) {
            return Err(QuizError::InvalidChoice {
                question: index,
                choice: choice.to_string(),
            });
        }

        debug!("Question {} answered with {:?}", index, choice);
        self.answers[index] = Some(choice.to_string());
        Ok(())
    }

    pub fn advance(&mut self) -> Result<Progress, QuizError> {
        self.advance_with(&mut rand::thread_rng())
    }

    /// Moves to the next question, or draws the result after the last one.
    ///
    /// The result is picked uniformly from the catalog. The collected answers
    /// do not influence the draw.
    pub fn advance_with<R: Rng>(&mut self, rng: &mut R) -> Result<Progress, QuizError> {
        if self.is_completed() {
            return Err(QuizError::IllegalTransition {
                action: "advance",
                reason: "the quiz is already completed",
            });
        }
        if self.current_answer().is_none() {
            return Err(QuizError::IllegalTransition {
                action: "advance",
                reason: "the current question is unanswered",
            });
        }

        if !self.is_last_question() {
            self.question_index += 1;
            debug!("Advanced to question {}", self.question_index);
            return Ok(Progress::Question(self.question_index));
        }

        let drawn = rng.gen_range(0..self.catalog.catalog_size());
        let result = self.catalog.result_at(drawn)?.clone();
        debug!("Quiz completed, drew result {} ({:?})", drawn, result.title);
        self.result = Some(result);
        Ok(Progress::Completed)
    }

    /// Steps back one question. Returns `false` without touching anything on
    /// the first question or after completion.
    pub fn retreat(&mut self) -> bool {
        if self.is_completed() || self.question_index == 0 {
            return false;
        }
        self.question_index -= 1;
        debug!("Went back to question {}", self.question_index);
        true
    }

    pub fn reset(&mut self) {
        self.question_index = 0;
        self.answers.iter_mut().for_each(|answer| *answer = None);
        self.result = None;
        debug!("Session reset");
    }

    pub fn question_index(&self) -> usize {
        self.question_index
    }

    /// 1-based position for "Question N of M".
    pub fn question_number(&self) -> usize {
        self.question_index + 1
    }

    pub fn answers(&self) -> &[Option<String>] {
        &self.answers
    }

    pub fn current_answer(&self) -> Option<&str> {
        self.answers
            .get(self.question_index)
            .and_then(|answer| answer.as_deref())
    }

    pub fn result(&self) -> Option<&ResultItem> {
        self.result.as_ref()
    }

    pub fn is_completed(&self) -> bool {
        self.result.is_some()
    }

    pub fn is_last_question(&self) -> bool {
        self.question_index + 1 >= self.catalog.question_count()
    }

    pub fn can_advance(&self) -> bool {
        !self.is_completed() && self.current_answer().is_some()
    }

    pub fn can_retreat(&self) -> bool {
        !self.is_completed() && self.question_index > 0
    }
}
