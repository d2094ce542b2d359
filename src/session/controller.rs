use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{Span, debug, info, info_span};
use uuid::Uuid;

use crate::data::QuestionStore;
use crate::models::{QuestionRecord, SessionPhase};

use super::timer::RepeatingTimer;
use super::view::{Intent, QuizView};

/// Category selected when a session starts, unless configured otherwise.
pub const DEFAULT_CATEGORY: &str = "单选题";

pub const NO_MATCH_MESSAGE: &str = "No questions in this category";

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Drives one presenter session: draws, reveals, category switches and the
/// elapsed-time counter.
///
/// All state changes go through [`draw`](Self::draw),
/// [`reveal_answer`](Self::reveal_answer),
/// [`switch_category`](Self::switch_category) and [`tick`](Self::tick).
pub struct SessionController<V> {
    store: QuestionStore,
    view: V,
    rng: StdRng,
    category: String,
    current_question: Option<QuestionRecord>,
    phase: SessionPhase,
    elapsed_seconds: u64,
    timer: RepeatingTimer,
    id: Uuid,
    span: Span,
}

impl<V: QuizView> SessionController<V> {
    /// Create a controller seeded from the operating system.
    pub fn new(store: QuestionStore, view: V, category: impl Into<String>) -> Self {
        Self::with_rng(store, view, category, StdRng::from_os_rng())
    }

    /// Create a controller whose draws follow the given generator.
    pub fn with_rng(
        store: QuestionStore,
        view: V,
        category: impl Into<String>,
        rng: StdRng,
    ) -> Self {
        let id = Uuid::new_v4();
        let category = category.into();
        let span = info_span!("session", %id);

        span.in_scope(|| info!(%category, questions = store.len(), "session created"));

        Self {
            store,
            view,
            rng,
            category,
            current_question: None,
            phase: SessionPhase::Idle,
            elapsed_seconds: 0,
            timer: RepeatingTimer::new(TICK_PERIOD),
            id,
            span,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn current_question(&self) -> Option<&QuestionRecord> {
        self.current_question.as_ref()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn timer_active(&self) -> bool {
        self.timer.is_active()
    }

    /// When the event loop should next call [`tick`](Self::tick).
    pub fn next_tick_at(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    pub fn store(&self) -> &QuestionStore {
        &self.store
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Dispatch one operator intent to its operation.
    pub fn handle(&mut self, intent: Intent) {
        self.handle_at(intent, Instant::now());
    }

    /// Same as [`handle`](Self::handle), with the timer restarted from `now`.
    pub fn handle_at(&mut self, intent: Intent, now: Instant) {
        match intent {
            Intent::Draw => self.draw_at(now),
            Intent::Reveal => self.reveal_answer(),
            Intent::SwitchCategory(category) => self.switch_category_at(category, now),
        }
    }

    /// Draw a random question of the current category.
    pub fn draw(&mut self) {
        self.draw_at(Instant::now());
    }

    /// Draw at a given instant; the first tick falls one second after `now`.
    pub fn draw_at(&mut self, now: Instant) {
        let _entered = self.span.enter();

        // Cancel before resetting so no pending tick can land on the new count.
        if self.timer.stop() {
            debug!("timer stopped");
        }
        self.elapsed_seconds = 0;
        self.view.render_timer(self.elapsed_seconds);

        let picked = self
            .store
            .pick_random_with(&self.category, &mut self.rng)
            .cloned();

        match picked {
            Some(question) => {
                info!(category = %self.category, number = question.number, "question drawn");
                self.view.render_question(&question);
                self.current_question = Some(question);
                self.phase = SessionPhase::QuestionShown;
                self.timer.start(now);
                debug!("timer started");
            }
            None => {
                info!(category = %self.category, "no question in category");
                self.current_question = None;
                self.view.render_message(NO_MATCH_MESSAGE);
                self.phase = SessionPhase::NoMatchShown;
            }
        }
    }

    /// Show the answer of the current question. Does nothing if there is none.
    pub fn reveal_answer(&mut self) {
        let _entered = self.span.enter();

        if let Some(question) = &self.current_question {
            debug!(number = question.number, "answer revealed");
            self.view.render_answer(&question.answer);
        }
    }

    /// Select a new category and immediately draw from it.
    pub fn switch_category(&mut self, category: impl Into<String>) {
        self.switch_category_at(category, Instant::now());
    }

    pub fn switch_category_at(&mut self, category: impl Into<String>, now: Instant) {
        self.category = category.into();
        {
            let _entered = self.span.enter();
            info!(category = %self.category, "category switched");
        }
        self.view.render_message(&category_status(&self.category));
        self.draw_at(now);
    }

    /// Advance the elapsed-time counter if a tick is due at `now`.
    ///
    /// A late call counts every second that has passed since the draw and
    /// renders the timer once. Returns whether anything was counted.
    pub fn tick(&mut self, now: Instant) -> bool {
        let fired = self.timer.fire(now);
        if fired == 0 {
            return false;
        }

        self.elapsed_seconds += u64::from(fired);
        self.span.in_scope(|| debug!(elapsed = self.elapsed_seconds, "tick"));
        self.view.render_timer(self.elapsed_seconds);
        true
    }
}

/// The transient status shown while switching categories.
pub fn category_status(category: &str) -> String {
    format!("Current category: {}", category)
}
