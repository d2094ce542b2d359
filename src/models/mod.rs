mod question;

pub use question::QuestionRecord;

/// Where the session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// Nothing drawn yet.
    #[default]
    Idle,
    /// The last draw produced a question.
    QuestionShown,
    /// The last draw found no question in the current category.
    NoMatchShown,
}
