use egui_kittest::Harness;
use yishan_business::AdminConfig;
use yishan_ui::AdminApp;
use yishan_ui::state::State;

/// Large enough that the search form lays out three fields per row and the
/// whole table is on screen.
pub const SCREEN_SIZE: egui::Vec2 = egui::vec2(1400.0, 1000.0);

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub struct TestCtx<'a, T = State> {
    harness: Harness<'a, T>,
}

impl<'a, T> TestCtx<'a, T> {
    pub fn harness_mut(&mut self) -> &mut Harness<'a, T> {
        &mut self.harness
    }

    #[allow(unused)]
    pub fn harness(&self) -> &Harness<'a, T> {
        &self.harness
    }
}

impl<'a, T> TestCtx<'a, T> {
    /// Draws `state` with `app` every frame.
    #[allow(unused)]
    pub fn new(app: impl FnMut(&mut egui::Ui, &mut T) + 'a, state: T) -> Self {
        init_logger();
        let harness = Harness::builder()
            .with_size(SCREEN_SIZE)
            .build_ui_state(app, state);
        Self { harness }
    }
}

impl<'a> TestCtx<'a, AdminApp> {
    #[allow(unused)]
    pub fn new_app() -> Self {
        init_logger();
        let app = AdminApp::new(State::new(AdminConfig::default()));
        let harness = Harness::builder()
            .with_size(SCREEN_SIZE)
            .build_eframe(|_| app);
        Self { harness }
    }
}
