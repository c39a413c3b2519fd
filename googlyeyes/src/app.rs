use egui::{Context, Key};
use googlycore::geometry::ScleraShape;
use googlycore::theme::{menu_bar, status_bar, Palette};
use googlycore::{EyesConfig, GooglyEyes};

/// Sizes offered in the menu, in points.
const SIZES: &[(&str, f32)] = &[
    ("small", 80.0),
    ("medium", 120.0),
    ("large", 200.0),
    ("huge", 320.0),
];

pub struct GooglyEyesApp {
    eyes: GooglyEyes,
    show_about: bool,
}

impl GooglyEyesApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config = EyesConfig::load();
        tracing::info!(size = config.size, "starting googlyEyes");
        Self {
            eyes: GooglyEyes::new(config),
            show_about: false,
        }
    }

    fn set_size(&mut self, size: f32) {
        let config = self.eyes.config().clone().with_size(size);
        config.save();
        self.eyes.set_config(config);
    }

    fn status_text(&self) -> String {
        let engine = self.eyes.engine();
        let pointer = engine.pointer();
        let gaze = if pointer.inside_viewport { "watching" } else { "waiting" };
        let lids = match engine.shape() {
            ScleraShape::Open => "open",
            ScleraShape::Blink => "blinking",
            ScleraShape::Squint => "squinting",
        };
        format!("{}  |  {}  |  {:.0}pt", gaze, lids, self.eyes.config().size)
    }
}

impl eframe::App for GooglyEyesApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.modifiers.command && i.key_pressed(Key::Q)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            menu_bar(ui, |ui| {
                ui.menu_button("file", |ui| {
                    if ui.button("quit       ⌘Q").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        ui.close_menu();
                    }
                });

                ui.menu_button("size", |ui| {
                    let current = self.eyes.config().size;
                    let mut new_size = None;
                    for (name, size) in SIZES {
                        let label = if *size == current {
                            format!("* {}", name)
                        } else {
                            format!("  {}", name)
                        };
                        if ui.button(label).clicked() {
                            new_size = Some(*size);
                            ui.close_menu();
                        }
                    }
                    if let Some(size) = new_size {
                        self.set_size(size);
                    }
                });

                ui.menu_button("help", |ui| {
                    if ui.button("about").clicked() {
                        self.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            status_bar(ui, &self.status_text());
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Palette::PAPER))
            .show(ctx, |ui| {
                let size = self.eyes.config().desired_size();
                let available = ui.available_size();
                let pad = ((available - size) * 0.5).max(egui::Vec2::ZERO);
                ui.add_space(pad.y);
                ui.horizontal(|ui| {
                    ui.add_space(pad.x);
                    ui.add(&mut self.eyes);
                });
            });

        if self.show_about {
            egui::Window::new("about googlyEyes")
                .collapsible(false)
                .resizable(false)
                .default_width(260.0)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("googlyEyes");
                        ui.label(format!("version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        ui.label("move the pointer around, then hold still");
                        ui.label("press and hold to make them squint");
                        ui.add_space(8.0);
                        if ui.button("ok").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.eyes.teardown();
    }
}
