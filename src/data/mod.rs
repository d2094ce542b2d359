mod loader;
mod store;

pub use loader::{LoadError, load_questions, load_questions_from_json};
pub use store::QuestionStore;
