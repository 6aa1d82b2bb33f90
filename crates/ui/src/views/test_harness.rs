use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use exam_core::Clock;
use exam_core::model::{ChoiceKey, ChoiceMap, Domain, ExamCatalog, Question, ResultsHandoff, Theme};
use exam_core::time::fixed_now;
use services::tutor::ChatRequest;
use services::{
    AppServices, ChatClient, ChatError, DashboardConfig, ExamService, LoadFailure,
    PracticeService, QuestionBank, QuestionQuery, ThemeService, TutorService,
};
use storage::repository::Storage;

use crate::context::{UiApp, build_app_context, use_theme_provider};
use crate::views::exam::ExamTestHandles;
use crate::views::theme::ThemeTestHandles;
use crate::views::{CommunityView, DashboardView, ExamView, ResultsView, ThemeToggle};

struct FakeBank {
    questions: Vec<Question>,
}

#[async_trait]
impl QuestionBank for FakeBank {
    async fn fetch(&self, _query: &QuestionQuery) -> Result<Vec<Question>, LoadFailure> {
        if self.questions.is_empty() {
            return Err(LoadFailure::NotAList);
        }
        Ok(self.questions.clone())
    }
}

struct EchoChat;

#[async_trait]
impl ChatClient for EchoChat {
    async fn send(&self, request: &ChatRequest) -> Result<String, ChatError> {
        Ok(format!("**Echo:** {}", request.message))
    }
}

pub fn sample_questions() -> Vec<Question> {
    vec![
        Question::new(
            None,
            "Which port does SSH use?",
            Some(Domain::new("2.1").unwrap()),
            ChoiceMap::new("21".into(), "22".into(), "23".into(), "25".into()),
            ChoiceKey::B,
        )
        .unwrap(),
        Question::new(
            None,
            "Which RAID level mirrors two disks?",
            Some(Domain::new("3.3").unwrap()),
            ChoiceMap::new("RAID 0".into(), "RAID 1".into(), "RAID 5".into(), "RAID 10".into()),
            ChoiceKey::B,
        )
        .unwrap(),
    ]
}

#[derive(Clone)]
struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn initial_theme(&self) -> Theme {
        Theme::Dark
    }

    fn clock(&self) -> Clock {
        self.services.clock()
    }

    fn catalog(&self) -> ExamCatalog {
        self.services.catalog().clone()
    }

    fn exam_service(&self) -> Arc<ExamService> {
        self.services.exam()
    }

    fn practice_service(&self) -> Arc<PracticeService> {
        self.services.practice()
    }

    fn tutor_service(&self) -> Arc<TutorService> {
        self.services.tutor()
    }

    fn theme_service(&self) -> Arc<ThemeService> {
        self.services.theme()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Dashboard,
    Exam { exam: String, count: String },
    Results(ResultsHandoff),
    Community,
    ThemeToggle,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    exam_handles: ExamTestHandles,
    exam_route: ExamRouteHandle,
    theme_handles: ThemeTestHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_theme_provider();
    use_context_provider(|| props.view.clone());
    use_context_provider(|| props.exam_handles.clone());
    use_context_provider(|| props.exam_route.clone());
    use_context_provider(|| props.theme_handles.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
    #[route("/:..segments")]
    Landed { segments: Vec<String> },
}

/// Stands in for any page the view under test navigates to.
#[component]
fn Landed(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! { p { "landed:/{path}" } }
}

/// Lets a test change the exam props in place, as a route change would.
#[derive(Clone, Default)]
pub struct ExamRouteHandle {
    props: Rc<RefCell<Option<Signal<(String, String)>>>>,
}

impl ExamRouteHandle {
    fn register(&self, props: Signal<(String, String)>) {
        *self.props.borrow_mut() = Some(props);
    }

    fn get(&self) -> Signal<(String, String)> {
        (*self.props.borrow()).expect("exam host mounted")
    }
}

#[component]
fn ExamHost(exam: String, count: String) -> Element {
    let props = use_signal(|| (exam, count));
    let handle = use_context::<ExamRouteHandle>();
    use_hook(|| handle.register(props));
    let (exam, count) = props();
    rsx! { ExamView { exam, count } }
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Dashboard => rsx! { DashboardView {} },
        ViewKind::Exam { exam, count } => rsx! { ExamHost { exam, count } },
        ViewKind::Results(handoff) => rsx! {
            ResultsView {
                score: handoff.score.to_string(),
                total: handoff.total.to_string(),
                time: handoff.time.to_string(),
                exam: handoff.exam.clone().unwrap_or_default(),
                count: handoff.count.map(|count| count.to_string()).unwrap_or_default(),
            }
        },
        ViewKind::Community => rsx! { CommunityView {} },
        ViewKind::ThemeToggle => rsx! { ThemeToggle {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
    pub exam_handles: ExamTestHandles,
    pub theme_handles: ThemeTestHandles,
    exam_route: ExamRouteHandle,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub fn drive(&mut self) {
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Polls until `done` holds or `limit` of wall time has passed.
    pub async fn drive_until(&mut self, limit: Duration, mut done: impl FnMut(&Self) -> bool) {
        let deadline = tokio::time::Instant::now() + limit;
        while !done(self) && tokio::time::Instant::now() < deadline {
            self.drive_async().await;
        }
    }

    /// Re-render the exam view with new route values.
    pub fn switch_exam(&mut self, exam: &str, count: &str) {
        let mut props = self.exam_route.get();
        let next = (exam.to_string(), count.to_string());
        self.dom.in_runtime(|| props.set(next));
        self.drive();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind) -> ViewHarness {
    setup_view_harness_with_questions(view, sample_questions())
}

/// An empty question list makes every bank request fail.
pub fn setup_view_harness_with_questions(view: ViewKind, questions: Vec<Question>) -> ViewHarness {
    setup_view_harness_with_config(view, questions, &DashboardConfig::default())
}

pub fn setup_view_harness_with_config(
    view: ViewKind,
    questions: Vec<Question>,
    config: &DashboardConfig,
) -> ViewHarness {
    let storage = Storage::in_memory();
    let services = AppServices::with_backends(
        config,
        Clock::fixed(fixed_now()),
        Arc::new(FakeBank { questions }),
        Arc::new(EchoChat),
        &storage,
    );
    let exam_handles = ExamTestHandles::default();
    let exam_route = ExamRouteHandle::default();
    let theme_handles = ThemeTestHandles::default();

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app: Arc::new(TestApp { services }),
            view,
            exam_handles: exam_handles.clone(),
            exam_route: exam_route.clone(),
            theme_handles: theme_handles.clone(),
        },
    );

    ViewHarness {
        dom,
        storage,
        exam_handles,
        theme_handles,
        exam_route,
    }
}
