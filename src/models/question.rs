use serde::Deserialize;

/// One row of the question pool.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuestionRecord {
    pub number: u32,
    pub category: String,
    pub content: String,
    pub answer: String,
}

impl QuestionRecord {
    pub fn new(
        number: u32,
        category: impl Into<String>,
        content: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            number,
            category: category.into(),
            content: content.into(),
            answer: answer.into(),
        }
    }
}
