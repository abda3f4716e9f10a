mod common;

use common::two_category_catalog;
use gapmap::{Advance, Answer, AssessmentSession, FlowError, FlowState, SESSION_VERSION};
use pretty_assertions::assert_eq;

fn started_session() -> AssessmentSession {
    let mut session = AssessmentSession::new(two_category_catalog());
    session.start().expect("start");
    session
}

#[test]
fn consent_gate_blocks_start_until_checked() {
    let mut session = AssessmentSession::with_consent_gate(two_category_catalog());
    assert_eq!(session.start(), Err(FlowError::ConsentPending));
    assert_eq!(session.state(), FlowState::Intro);

    session.give_consent();
    session.start().expect("start after consent");
    assert_eq!(session.state(), FlowState::Assessing);
}

#[test]
fn start_without_gate_needs_no_consent() {
    let mut session = AssessmentSession::new(two_category_catalog());
    session.start().expect("start");
    assert_eq!(session.start(), Err(FlowError::AlreadyStarted));
}

#[test]
fn next_requires_an_answer_and_does_not_advance_without_one() {
    let mut session = started_session();
    assert_eq!(session.current_index(), 0);
    assert!(matches!(session.next(), Err(FlowError::Unanswered)));
    assert_eq!(session.current_index(), 0);

    session.answer(Answer::Level3).expect("answer");
    match session.next().expect("advance") {
        Advance::Question(index) => assert_eq!(index, 1),
        Advance::Review(_) => panic!("should not review before the last question"),
    }
}

#[test]
fn answering_does_not_auto_advance() {
    let mut session = started_session();
    session.answer(Answer::Level5).expect("answer");
    assert_eq!(session.current_index(), 0);
    // re-answering the same question overwrites
    session.answer(Answer::Level1).expect("answer again");
    assert_eq!(
        session.answers().get("GV.AA-01").copied(),
        Some(Answer::Level1)
    );
}

#[test]
fn next_past_the_last_question_enters_review_with_a_report() {
    let mut session = started_session();
    for answer in [Answer::Level4, Answer::Level2, Answer::NotApplicable] {
        session.answer(answer).expect("answer");
        let _ = session.next().expect("advance");
    }
    assert_eq!(session.state(), FlowState::Reviewing);

    // the final advance carried the recomputed report
    let mut again = started_session();
    again.answer(Answer::Level4).expect("a");
    let _ = again.next().expect("n");
    again.answer(Answer::Level2).expect("a");
    let _ = again.next().expect("n");
    again.answer(Answer::NotApplicable).expect("a");
    match again.next().expect("final advance") {
        Advance::Review(report) => {
            assert_eq!(report.summary.scored, 2);
            assert_eq!(report.summary.overall, 50);
        }
        Advance::Question(_) => panic!("expected review"),
    }
}

#[test]
fn open_review_needs_at_least_one_answer() {
    let mut session = started_session();
    assert!(matches!(session.open_review(), Err(FlowError::NoAnswers)));

    session.answer(Answer::NotApplicable).expect("answer");
    let report = session.open_review().expect("review");
    assert_eq!(session.state(), FlowState::Reviewing);
    assert_eq!(report.summary.scored, 0);
}

#[test]
fn back_to_review_only_after_arriving_from_review() {
    let mut session = started_session();
    session.answer(Answer::Level3).expect("answer");

    // never visited review: rejected
    assert!(matches!(
        session.back_to_review(),
        Err(FlowError::NotFromReview)
    ));

    session.open_review().expect("review");
    session.back_to_assess().expect("back to assess");
    assert_eq!(session.state(), FlowState::Assessing);

    session.back_to_review().expect("back to review");
    assert_eq!(session.state(), FlowState::Reviewing);
}

#[test]
fn jumping_out_of_review_arms_the_return_path() {
    let mut session = started_session();
    session.answer(Answer::Level3).expect("answer");
    session.open_review().expect("review");

    let index = session.jump_to(2);
    assert_eq!(index, 2);
    assert_eq!(session.state(), FlowState::Assessing);
    session.back_to_review().expect("return to review");
}

#[test]
fn restart_clears_everything() {
    let mut session = started_session();
    session.answer(Answer::Level5).expect("answer");
    let _ = session.next().expect("advance");

    session.restart();
    assert_eq!(session.state(), FlowState::Intro);
    assert_eq!(session.current_index(), 0);
    assert!(session.answers().is_empty());
    assert!(!session.has_any_answer());
}

#[test]
fn import_resumes_assessing_at_first_unanswered() {
    let mut session = started_session();
    let json = format!(
        r#"{{"kind":"gapmap-session","version":{SESSION_VERSION},"currentIndex":0,
            "answers":{{"GV.AA-01":"4"}}}}"#
    );
    let imported = session.import(&json).expect("import");
    assert_eq!(imported.dropped, 0);
    assert_eq!(session.state(), FlowState::Assessing);
    assert_eq!(session.current_index(), 1);
}

#[test]
fn fully_answered_import_resumes_into_review() {
    let mut session = started_session();
    let json = format!(
        r#"{{"kind":"gapmap-session","version":{SESSION_VERSION},"currentIndex":1,
            "answers":{{"GV.AA-01":"4","GV.AA-02":"na","GV.BB-01":"2"}}}}"#
    );
    session.import(&json).expect("import");
    assert_eq!(session.state(), FlowState::Reviewing);
}

#[test]
fn failed_import_leaves_state_untouched() {
    let mut session = started_session();
    session.answer(Answer::Level2).expect("answer");

    let bad = r#"{"kind":"gapmap-session","version":1,"answers":{"GV.AA-01":"5"}}"#;
    assert!(session.import(bad).is_err());

    assert_eq!(
        session.answers().get("GV.AA-01").copied(),
        Some(Answer::Level2)
    );
    assert_eq!(session.state(), FlowState::Assessing);
}

#[test]
fn export_reflects_cursor_and_catalogue() {
    let mut session = started_session();
    session.answer(Answer::Level3).expect("answer");
    let _ = session.next().expect("advance");

    let doc = session.export_session("catalog.json");
    assert_eq!(doc.current_index, 1);
    assert_eq!(doc.question_count, 3);
    assert_eq!(doc.data_file, "catalog.json");
    assert_eq!(doc.answers.len(), 1);
}
