use std::time::Duration;

use exam_core::model::{ChoiceKey, ResultsHandoff, THEME_PREFERENCE_KEY};
use services::DashboardConfig;
use services::exam::ExamIntent;
use storage::repository::PreferencesRepository;

use super::test_harness::{
    ViewKind, sample_questions, setup_view_harness, setup_view_harness_with_config,
    setup_view_harness_with_questions,
};
use crate::routes::Route;

fn exam_view() -> ViewKind {
    ViewKind::Exam {
        exam: "1101".into(),
        count: "2".into(),
    }
}

#[tokio::test(flavor = "current_thread")]
async fn exam_view_smoke_renders_first_question() {
    let mut harness = setup_view_harness(exam_view());
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Question 1 of 2"), "missing position in {html}");
    assert!(html.contains("Time Remaining: 90:00"), "missing timer in {html}");
    assert!(html.contains("Submit Exam"), "missing submit in {html}");
    assert!(html.contains("nav-cell--current"), "missing navigator in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn exam_view_smoke_renders_load_failure() {
    let mut harness = setup_view_harness_with_questions(exam_view(), Vec::new());
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(
        html.contains("Failed to load exam questions. Please try again."),
        "missing error in {html}"
    );
    assert!(!html.contains("Time Remaining"), "timer shown in {html}");

    // Past the first tick the failure page is unchanged and nothing submits.
    tokio::time::sleep(Duration::from_millis(1100)).await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Back to Dashboard"), "missing back link in {html}");
    assert_eq!(harness.exam_handles.handoff(), None);
}

#[tokio::test(flavor = "current_thread")]
async fn exam_view_smoke_selects_and_confirms() {
    let mut harness = setup_view_harness(exam_view());
    harness.rebuild();
    harness.drive_async().await;

    let dispatch = harness.exam_handles.dispatch();
    harness
        .dom
        .in_runtime(|| dispatch.call(ExamIntent::Select(ChoiceKey::A)));
    harness
        .dom
        .in_runtime(|| dispatch.call(ExamIntent::RequestSubmit));
    harness.drive();
    let html = harness.render();
    assert!(html.contains("exam-option--selected"), "missing selection in {html}");
    assert!(
        html.contains("You have answered 1 of 2 questions."),
        "missing confirm prompt in {html}"
    );
    assert!(html.contains("1 unanswered"), "missing unanswered count in {html}");

    harness
        .dom
        .in_runtime(|| dispatch.call(ExamIntent::CancelSubmit));
    harness.drive();
    let html = harness.render();
    assert!(!html.contains("Submit Exam?"), "modal still open in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn exam_view_smoke_confirmed_submit_hands_off_results() {
    let mut harness = setup_view_harness(exam_view());
    harness.rebuild();
    harness.drive_async().await;

    let dispatch = harness.exam_handles.dispatch();
    for intent in [
        ExamIntent::Select(ChoiceKey::B),
        ExamIntent::Next,
        ExamIntent::Select(ChoiceKey::B),
        ExamIntent::RequestSubmit,
        ExamIntent::ConfirmSubmit,
    ] {
        harness.dom.in_runtime(|| dispatch.call(intent));
    }
    harness.drive();

    let expected = Route::results(&ResultsHandoff {
        score: 2,
        total: 2,
        time: 0,
        exam: Some("1101".into()),
        count: Some(2),
    });
    assert_eq!(harness.exam_handles.handoff(), Some(expected));
}

#[tokio::test(flavor = "current_thread")]
async fn exam_view_smoke_expiry_submits_unanswered() {
    let config = DashboardConfig {
        time_budget_secs: 1,
        ..DashboardConfig::default()
    };
    let mut harness = setup_view_harness_with_config(exam_view(), sample_questions(), &config);
    harness.rebuild();
    harness
        .drive_until(Duration::from_secs(5), |harness| {
            harness.exam_handles.handoff().is_some()
        })
        .await;

    let expected = Route::results(&ResultsHandoff {
        score: 0,
        total: 2,
        time: 1,
        exam: Some("1101".into()),
        count: Some(2),
    });
    assert_eq!(harness.exam_handles.handoff(), Some(expected));
}

#[tokio::test(flavor = "current_thread")]
async fn exam_view_smoke_route_change_starts_new_session() {
    let mut harness = setup_view_harness(exam_view());
    harness.rebuild();
    harness.drive_async().await;
    let dispatch = harness.exam_handles.dispatch();
    harness
        .dom
        .in_runtime(|| dispatch.call(ExamIntent::Select(ChoiceKey::A)));
    harness.drive();
    assert!(harness.render().contains("Question 1 of 2"));

    harness.switch_exam("1101", "1");
    harness
        .drive_until(Duration::from_secs(1), |harness| {
            harness.render().contains("Question 1 of 1")
        })
        .await;
    let html = harness.render();
    assert!(html.contains("Question 1 of 1"), "old session kept in {html}");
    assert!(!html.contains("nav-cell--answered"), "answers carried over in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_renders_dial() {
    let mut harness = setup_view_harness(ViewKind::Results(ResultsHandoff {
        score: 45,
        total: 60,
        time: 754,
        exam: Some("1102".into()),
        count: Some(60),
    }));
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("75%"), "missing percentage in {html}");
    assert!(html.contains("45/60"), "missing score in {html}");
    assert!(html.contains("12:34"), "missing time in {html}");
    assert!(html.contains("270deg"), "missing dial in {html}");
    assert!(html.contains("Generate New Test"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_tolerates_missing_values() {
    let mut harness = setup_view_harness(ViewKind::Results(ResultsHandoff::default()));
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("0%"), "missing percentage in {html}");
    assert!(html.contains("0/0"), "missing score in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_renders_widgets() {
    let mut harness = setup_view_harness(ViewKind::Dashboard);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Select an exam"), "missing exam select in {html}");
    assert!(html.contains("A+ Core 1 (220-1101)"), "missing catalog in {html}");
    assert!(html.contains("Generate Question"), "missing generate in {html}");
    assert!(html.contains("Ask the Tutor"), "missing chat in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn community_view_smoke_renders_empty_room() {
    let mut harness = setup_view_harness(ViewKind::Community);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Community Chat"), "missing title in {html}");
    assert!(html.contains("No messages yet."), "missing empty state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn theme_toggle_smoke_names_target_theme() {
    let mut harness = setup_view_harness(ViewKind::ThemeToggle);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Light Mode"), "missing toggle label in {html}");

    let stored = harness
        .storage
        .preferences
        .get_preference(THEME_PREFERENCE_KEY)
        .await
        .expect("read preference");
    assert_eq!(stored, None);
}

#[tokio::test(flavor = "current_thread")]
async fn theme_toggle_smoke_persists_flipped_theme() {
    let mut harness = setup_view_harness(ViewKind::ThemeToggle);
    harness.rebuild();

    let toggle = harness.theme_handles.toggle();
    harness.dom.in_runtime(|| toggle.call(()));
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Dark Mode"), "label not flipped in {html}");

    let stored = harness
        .storage
        .preferences
        .get_preference(THEME_PREFERENCE_KEY)
        .await
        .expect("read preference");
    assert_eq!(stored.as_deref(), Some("light"));
}
