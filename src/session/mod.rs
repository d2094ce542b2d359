//! Presenter session state machine.
//!
//! The [`SessionController`] owns the current category, the drawn question
//! and the elapsed-time counter. Views implement [`QuizView`] and feed
//! operator [`Intent`]s back in.

mod controller;
mod timer;
mod view;

pub use controller::{DEFAULT_CATEGORY, NO_MATCH_MESSAGE, SessionController, category_status};
pub use timer::RepeatingTimer;
pub use view::{Intent, QuizView, RecordingView, RenderCall};
