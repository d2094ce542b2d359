//! The contract between the session controller and whatever displays it.

use crate::models::QuestionRecord;

/// Render calls issued by the controller.
pub trait QuizView {
    /// Show a freshly drawn question, hiding any previous answer.
    fn render_question(&mut self, question: &QuestionRecord);

    /// Show the answer of the current question.
    fn render_answer(&mut self, answer: &str);

    /// Replace the question area with a status message.
    fn render_message(&mut self, message: &str);

    /// Show the seconds elapsed since the last draw.
    fn render_timer(&mut self, seconds: u64);
}

/// Something the operator asked for.
///
/// Each intent maps onto exactly one controller operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Draw,
    Reveal,
    SwitchCategory(String),
}

/// A render call captured by [`RecordingView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderCall {
    Question(QuestionRecord),
    Answer(String),
    Message(String),
    Timer(u64),
}

/// A view that records every render call in order.
///
/// Handy for driving the controller without a terminal.
#[derive(Debug, Default)]
pub struct RecordingView {
    calls: Vec<RenderCall>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[RenderCall] {
        &self.calls
    }

    /// Drain the recorded calls.
    pub fn take_calls(&mut self) -> Vec<RenderCall> {
        std::mem::take(&mut self.calls)
    }
}

impl QuizView for RecordingView {
    fn render_question(&mut self, question: &QuestionRecord) {
        self.calls.push(RenderCall::Question(question.clone()));
    }

    fn render_answer(&mut self, answer: &str) {
        self.calls.push(RenderCall::Answer(answer.to_string()));
    }

    fn render_message(&mut self, message: &str) {
        self.calls.push(RenderCall::Message(message.to_string()));
    }

    fn render_timer(&mut self, seconds: u64) {
        self.calls.push(RenderCall::Timer(seconds));
    }
}
