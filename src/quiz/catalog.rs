use std::collections::HashSet;

use crate::quiz::{Question, QuizError, ResultItem};

const BUILTIN_DATA: &str = include_str!("../../data/quiz.json");

const MIN_OPTIONS: usize = 2;
const MAX_OPTIONS: usize = 5;

/// Questions and songs for one quiz. Built once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    title: String,
    description: String,
    questions: Vec<Question>,
    results: Vec<ResultItem>,
}

#[derive(serde::Deserialize)]
struct CatalogData {
    title: String,
    #[serde(default)]
    description: String,
    questions: Vec<Question>,
    results: Vec<ResultItem>,
}

impl Catalog {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        questions: Vec<Question>,
        results: Vec<ResultItem>,
    ) -> Result<Self, QuizError> {
        if results.is_empty() {
            return Err(QuizError::EmptyCatalog);
        }
        if questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }
        for (index, question) in questions.iter().enumerate() {
            validate_question(index, question)?;
        }

        Ok(Self {
            title: title.into(),
            description: description.into(),
            questions,
            results,
        })
    }

    /// The quiz shipped with the bot.
    pub fn builtin() -> Result<Self, QuizError> {
        Self::from_json(BUILTIN_DATA)
    }

    pub fn from_json(json: &str) -> Result<Self, QuizError> {
        let data: CatalogData = serde_json::from_str(json)?;
        Self::new(data.title, data.description, data.questions, data.results)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn results(&self) -> &[ResultItem] {
        &self.results
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn question_at(&self, index: usize) -> Result<&Question, QuizError> {
        self.questions.get(index).ok_or(QuizError::OutOfRange {
            kind: "question",
            index,
            len: self.questions.len(),
        })
    }

    pub fn catalog_size(&self) -> usize {
        self.results.len()
    }

    pub fn result_at(&self, index: usize) -> Result<&ResultItem, QuizError> {
        self.results.get(index).ok_or(QuizError::OutOfRange {
            kind: "result",
            index,
            len: self.results.len(),
        })
    }
}

fn validate_question(index: usize, question: &Question) -> Result<(), QuizError> {
    let count = question.options.len();
    if !(MIN_OPTIONS..=MAX_OPTIONS).contains(&count) {
        return Err(QuizError::InvalidQuestion {
            index,
            reason: format!("expected {MIN_OPTIONS} to {MAX_OPTIONS} options, got {count}"),
        });
    }

    let mut seen = HashSet::new();
    if let Some(duplicate) = question.options.iter().find(|o| !seen.insert(o.as_str())) {
        return Err(QuizError::InvalidQuestion {
            index,
            reason: format!("duplicate option \"{duplicate}\""),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.title(), "Which Lana Del Rey Song Are You?");
        assert_eq!(catalog.question_count(), 5);
        assert_eq!(catalog.catalog_size(), 5);

        let first = catalog.question_at(0).unwrap();
        assert_eq!(first.prompt, "How would you describe your current mood?");
        assert_eq!(first.options.len(), 5);
        assert_eq!(catalog.question_at(1).unwrap().options.len(), 3);

        let song = catalog.result_at(2).unwrap();
        assert_eq!(song.title, "Summertime Sadness");
        assert_eq!(song.attribute("tempo"), Some("upbeat"));
    }

    #[test]
    fn out_of_range_lookups_fail() {
        let catalog = Catalog::builtin().unwrap();
        assert!(matches!(
            catalog.question_at(5),
            Err(QuizError::OutOfRange { kind: "question", index: 5, len: 5 })
        ));
        assert!(matches!(
            catalog.result_at(usize::MAX),
            Err(QuizError::OutOfRange { kind: "result", .. })
        ));
    }

    #[test]
    fn empty_result_catalog_is_rejected() {
        let questions = vec![Question::new("Q", options(&["a", "b"]))];
        let err = Catalog::new("t", "d", questions, vec![]).unwrap_err();
        assert!(matches!(err, QuizError::EmptyCatalog));
    }

    #[test]
    fn quiz_without_questions_is_rejected() {
        let err = Catalog::new("t", "d", vec![], vec![ResultItem::new("song")]).unwrap_err();
        assert!(matches!(err, QuizError::NoQuestions));
    }

    #[test]
    fn option_count_is_bounded() {
        let results = vec![ResultItem::new("song")];

        let too_few = vec![Question::new("Q", options(&["only"]))];
        let err = Catalog::new("t", "d", too_few, results.clone()).unwrap_err();
        assert!(matches!(err, QuizError::InvalidQuestion { index: 0, .. }));

        let too_many = vec![
            Question::new("Q1", options(&["a", "b"])),
            Question::new("Q2", options(&["a", "b", "c", "d", "e", "f"])),
        ];
        let err = Catalog::new("t", "d", too_many, results).unwrap_err();
        assert!(matches!(err, QuizError::InvalidQuestion { index: 1, .. }));
    }

    #[test]
    fn duplicate_options_are_rejected() {
        let questions = vec![Question::new("Q", options(&["a", "b", "a"]))];
        let err = Catalog::new("t", "d", questions, vec![ResultItem::new("song")]).unwrap_err();
        match err {
            QuizError::InvalidQuestion { index, reason } => {
                assert_eq!(index, 0);
                assert!(reason.contains("\"a\""));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_a_data_error() {
        let err = Catalog::from_json("{\"title\": 3}").unwrap_err();
        assert!(matches!(err, QuizError::Data(_)));
    }

    #[test]
    fn json_with_empty_results_is_rejected() {
        let json = r#"{
            "title": "t",
            "questions": [{ "prompt": "Q", "options": ["a", "b"] }],
            "results": []
        }"#;
        assert!(matches!(Catalog::from_json(json), Err(QuizError::EmptyCatalog)));
    }
}
