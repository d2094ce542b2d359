use crate::models::QuestionRecord;
use crate::session::{QuizView, category_status};

/// What the presenter screen currently shows.
///
/// The controller writes to it through [`QuizView`]; the render functions
/// only read it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    number: Option<u32>,
    category: Option<String>,
    content: Option<String>,
    answer: Option<String>,
    status: String,
    elapsed_seconds: u64,
}

impl Board {
    pub fn new(initial_category: &str) -> Self {
        Self {
            status: category_status(initial_category),
            ..Self::default()
        }
    }

    pub fn number(&self) -> Option<u32> {
        self.number
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    fn clear_question(&mut self) {
        self.number = None;
        self.category = None;
        self.content = None;
        self.answer = None;
    }
}

impl QuizView for Board {
    fn render_question(&mut self, question: &QuestionRecord) {
        self.number = Some(question.number);
        self.category = Some(question.category.clone());
        self.content = Some(question.content.clone());
        self.answer = None;
    }

    fn render_answer(&mut self, answer: &str) {
        self.answer = Some(answer.to_string());
    }

    fn render_message(&mut self, message: &str) {
        self.clear_question();
        self.status = message.to_string();
    }

    fn render_timer(&mut self, seconds: u64) {
        self.elapsed_seconds = seconds;
    }
}
