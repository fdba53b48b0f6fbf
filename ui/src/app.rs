use egui::{RichText, ScrollArea};

use crate::pages;
use crate::state::{Route, State};

const NAV_WIDTH: f32 = 160.0;

pub struct AdminApp {
    state: State,
}

impl AdminApp {
    /// Called once before the first frame.
    pub fn new(state: State) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }

    /// Draws the shell into `ctx`. Shared by eframe and the UI tests.
    pub fn show(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("nav_panel")
            .resizable(false)
            .exact_width(NAV_WIDTH)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.heading("Yishan Admin");
                ui.separator();
                for route in Route::ALL {
                    if ui
                        .selectable_label(self.state.route == route, route.label())
                        .clicked()
                    {
                        navigate(&mut self.state, route);
                    }
                }
            });

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("管理系统");
                ui.label("/");
                ui.label(RichText::new(self.state.route.label()).strong());
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(self.state.route.label());
            ui.add_space(8.0);
            let route = self.state.route;
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| match route {
                    Route::Dashboard => {
                        if let Some(route) = pages::dashboard(ui) {
                            navigate(&mut self.state, route);
                        }
                    }
                    Route::Alerts => self.state.alerts.ui(ui),
                    Route::Users => self.state.users.ui(ui),
                    Route::Roles => self.state.roles.ui(ui),
                    Route::Departments => self.state.departments.ui(ui),
                    Route::Positions => self.state.positions.ui(ui),
                });
        });
    }
}

fn navigate(state: &mut State, route: Route) {
    if state.route != route {
        log::info!("navigate to {}", route.label());
        state.route = route;
    }
}

impl eframe::App for AdminApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show(ctx);
    }
}
