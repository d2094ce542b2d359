use std::io::Write;
use std::time::{Duration, Instant};

use quiz_presenter::session::{NO_MATCH_MESSAGE, RecordingView, RenderCall};
use quiz_presenter::{QuestionRecord, QuestionStore, SessionController, SessionPhase};

fn load_store() -> QuestionStore {
    let mut source = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("create question source");
    writeln!(source, "number,category,content,answer").expect("write header");
    writeln!(source, "1,A,q1,a1").expect("write row");
    writeln!(source, "2,B,q2,a2").expect("write row");

    QuestionStore::load(source.path()).expect("load question source")
}

#[test]
fn test_presenter_session_walkthrough() {
    let store = load_store();
    assert_eq!(store.len(), 2);

    let mut session = SessionController::new(store, RecordingView::new(), "A");

    // Nothing drawn yet: revealing shows nothing.
    session.reveal_answer();
    assert!(session.view().calls().is_empty());

    for _ in 0..10 {
        session.draw();
        assert_eq!(
            session.current_question(),
            Some(&QuestionRecord::new(1, "A", "q1", "a1"))
        );
        assert_eq!(session.elapsed_seconds(), 0);
    }

    session.view_mut().take_calls();
    session.reveal_answer();
    assert_eq!(
        session.view_mut().take_calls(),
        vec![RenderCall::Answer("a1".to_string())]
    );

    // The timer is running: a tick one second out counts.
    assert!(session.tick(Instant::now() + Duration::from_secs(1)));
    assert_eq!(session.elapsed_seconds(), 1);

    session.switch_category("C");
    assert_eq!(session.category(), "C");
    assert_eq!(session.phase(), SessionPhase::NoMatchShown);
    assert!(session.current_question().is_none());
    assert_eq!(session.elapsed_seconds(), 0);
    assert!(!session.timer_active());

    let calls = session.view_mut().take_calls();
    assert_eq!(
        calls.last(),
        Some(&RenderCall::Message(NO_MATCH_MESSAGE.to_string()))
    );
    assert_eq!(
        calls
            .iter()
            .filter(|call| matches!(call, RenderCall::Question(_)))
            .count(),
        0
    );

    // No stale tick after the switch, and no answer to reveal.
    assert!(!session.tick(Instant::now() + Duration::from_secs(30)));
    session.reveal_answer();
    assert!(session.view().calls().is_empty());

    session.switch_category("B");
    assert_eq!(session.current_question().map(|q| q.number), Some(2));
    assert!(session.timer_active());
}
