//! # quiz-presenter
//!
//! A terminal presenter for quiz sessions: draw a random question of the
//! chosen category, reveal its answer, switch categories, and watch the time
//! elapsed since the draw.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use quiz_presenter::{Presenter, QuizError, Settings};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), QuizError> {
//!     let settings = Settings::new("questions.csv");
//!
//!     // Load the question pool and take over the terminal
//!     Presenter::from_settings(&settings)?.run().await?;
//!
//!     Ok(())
//! }
//! ```

pub mod config;
mod data;
mod input;
mod models;
pub mod session;
pub mod terminal;
mod ui;

use std::future;
use std::io;
use std::time::Instant;

use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind};
use futures_util::{Stream, StreamExt};
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;
use tokio::time;
use tracing::{info, warn};

pub use config::{ConfigError, Settings};
pub use data::{LoadError, QuestionStore, load_questions, load_questions_from_json};
pub use input::{Command, map_key};
pub use models::{QuestionRecord, SessionPhase};
pub use session::{Intent, QuizView, SessionController};
pub use ui::Board;

/// Error type for presenter operations.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("failed to load questions: {0}")]
    Load(#[from] LoadError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A presenter session bound to the terminal.
pub struct Presenter {
    controller: SessionController<Board>,
    categories: Vec<String>,
}

impl Presenter {
    /// Assemble a presenter around an already loaded store.
    pub fn new(store: QuestionStore, settings: &Settings) -> Self {
        for category in &settings.categories {
            let count = store.count_in(category);
            if count == 0 {
                warn!(%category, "no questions in category");
            } else {
                info!(%category, count, "category available");
            }
        }

        let board = Board::new(&settings.initial_category);
        let category = settings.initial_category.clone();
        let controller = match settings.seed {
            Some(seed) => {
                SessionController::with_rng(store, board, category, StdRng::seed_from_u64(seed))
            }
            None => SessionController::new(store, board, category),
        };

        Self {
            controller,
            categories: settings.categories.clone(),
        }
    }

    /// Load the question source named in `settings` and assemble a presenter.
    pub fn from_settings(settings: &Settings) -> Result<Self, QuizError> {
        let store = QuestionStore::load(&settings.questions)?;
        Ok(Self::new(store, settings))
    }

    pub fn controller(&self) -> &SessionController<Board> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut SessionController<Board> {
        &mut self.controller
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Apply one key press. Returns true if the presenter should close.
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        self.handle_key_at(key, Instant::now())
    }

    /// Apply one key press received at `now`.
    pub fn handle_key_at(&mut self, key: KeyCode, now: Instant) -> bool {
        match map_key(key, &self.categories, self.controller.category()) {
            Some(Command::Intent(intent)) => {
                self.controller.handle_at(intent, now);
                false
            }
            Some(Command::Close) => true,
            None => false,
        }
    }

    /// Take over the terminal and run until the operator closes the screen.
    pub async fn run(mut self) -> Result<(), QuizError> {
        let mut terminal = terminal::TerminalGuard::enter()?;
        info!(session = %self.controller.id(), "presenter started");
        let result = run_event_loop(EventStream::new(), &mut self, |presenter| {
            terminal.draw(|frame| {
                ui::render(
                    frame,
                    presenter.controller.view(),
                    &presenter.categories,
                    presenter.controller.category(),
                )
            })?;
            Ok(())
        })
        .await;
        info!(session = %self.controller.id(), "presenter closed");
        result
    }
}

/// Single-threaded loop: each iteration either handles one terminal event or
/// fires the due timer tick, then redraws.
///
/// Time is read from the tokio clock, so the loop follows a paused clock in
/// tests.
async fn run_event_loop<S, D>(
    mut events: S,
    presenter: &mut Presenter,
    mut redraw: D,
) -> Result<(), QuizError>
where
    S: Stream<Item = io::Result<Event>> + Unpin,
    D: FnMut(&Presenter) -> Result<(), QuizError>,
{
    loop {
        redraw(presenter)?;

        // Re-read every iteration: a draw that stopped or restarted the timer
        // drops the previous sleep before it can fire.
        let deadline = presenter.controller.next_tick_at();

        tokio::select! {
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    if presenter.handle_key_at(key.code, time::Instant::now().into_std()) {
                        break;
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(err)) => return Err(err.into()),
                None => break,
            },
            () = wait_for_tick(deadline) => {
                presenter.controller.tick(time::Instant::now().into_std());
            }
        }
    }

    Ok(())
}

async fn wait_for_tick(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(time::Instant::from_std(deadline)).await,
        None => future::pending().await,
    }
}
