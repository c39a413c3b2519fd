//! The egui widget.
//!
//! Keep one `GooglyEyes` in your app state and add it every frame with
//! `ui.add(&mut eyes)`. It listens to pointer movement across the whole
//! viewport, not just its own rect, and keeps itself repainting once per
//! refresh until torn down.

use crate::animation::{EyeRender, FrameOutcome};
use crate::clock::{Clock, SystemClock};
use crate::config::EyesConfig;
use crate::engine::EyesEngine;
use crate::frame_loop::{CancelToken, FrameLoop};
use crate::geometry::{ScleraShape, SCLERA_STROKE};
use egui::{Color32, Event, Painter, Pos2, Rect, Response, Sense, Shape, Stroke, Ui, Vec2, Widget};
use std::f32::consts::TAU;
use std::sync::atomic::{AtomicU64, Ordering};

/// Segments used to approximate the sclera ellipse.
const ELLIPSE_SEGMENTS: usize = 48;

/// Source of per-instance ids so two pairs of eyes never share one.
static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(0);

pub struct GooglyEyes<C = SystemClock> {
    instance: egui::Id,
    config: EyesConfig,
    engine: EyesEngine,
    frames: FrameLoop,
    clock: C,
}

impl GooglyEyes<SystemClock> {
    pub fn new(config: EyesConfig) -> Self {
        Self::with_clock(config, SystemClock::new())
    }
}

impl<C: Clock> GooglyEyes<C> {
    pub fn with_clock(config: EyesConfig, clock: C) -> Self {
        let token = CancelToken::new();
        let instance = egui::Id::new(("googly_eyes", NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed)));
        Self {
            instance,
            config,
            engine: EyesEngine::new(clock.now()).with_token(token.clone()),
            frames: FrameLoop::new(token),
            clock,
        }
    }

    pub fn show(&mut self, ui: &mut Ui) -> Response {
        let now = self.clock.now();
        let id = self.id();
        let (rect, _) = ui.allocate_exact_size(self.config.desired_size(), Sense::hover());
        let response = ui.interact(rect, id, Sense::click());

        if !self.frames.begin_frame(ui.ctx()) {
            return response;
        }

        // pointer tracking is viewport-wide
        let engine = &mut self.engine;
        ui.input(|i| {
            for event in &i.events {
                match event {
                    Event::PointerMoved(pos) => engine.pointer_moved(*pos, now),
                    Event::PointerGone => engine.pointer_left(),
                    _ => {}
                }
            }
        });

        // released on button up or when the pointer leaves the widget
        let over = ui
            .input(|i| i.pointer.interact_pos())
            .is_some_and(|p| rect.contains(p));
        self.engine.set_pressed(response.is_pointer_button_down_on() && over);

        let container = ui.is_rect_visible(rect).then_some(rect);
        let outcome = self.engine.frame(now, container);
        if outcome == FrameOutcome::Rendered {
            if let Some(eyes) = self.engine.eyes() {
                paint_eyes(ui.painter(), eyes, self.config.sclera(), self.config.pupil());
            }
        }
        self.frames.end_frame(ui.ctx(), outcome);

        response
    }

    /// Interaction id: unique per instance, salted with the style tag.
    pub fn id(&self) -> egui::Id {
        self.instance.with(&self.config.extra_style)
    }

    pub fn config(&self) -> &EyesConfig {
        &self.config
    }

    /// Swap styling or size. Physics and timers carry on.
    pub fn set_config(&mut self, config: EyesConfig) {
        self.config = config;
    }

    pub fn engine(&self) -> &EyesEngine {
        &self.engine
    }

    pub fn frame_loop(&self) -> &FrameLoop {
        &self.frames
    }

    /// Token that stops the widget when cancelled from elsewhere.
    pub fn cancel_token(&self) -> CancelToken {
        self.frames.token().clone()
    }

    pub fn teardown(&mut self) {
        self.engine.teardown();
    }
}

impl<C> Drop for GooglyEyes<C> {
    fn drop(&mut self) {
        self.engine.teardown();
    }
}

impl<C: Clock> Widget for &mut GooglyEyes<C> {
    fn ui(self, ui: &mut Ui) -> Response {
        self.show(ui)
    }
}

fn paint_eyes(painter: &Painter, eyes: &[EyeRender; 2], sclera: Color32, pupil: Color32) {
    for eye in eyes {
        let stroke_width = (SCLERA_STROKE * eye.sclera_radii.x / ScleraShape::Open.radii().x).max(1.0);
        let outline = ellipse_points(eye.center, eye.sclera_radii, ELLIPSE_SEGMENTS);
        painter.add(Shape::convex_polygon(
            outline,
            Color32::WHITE,
            Stroke::new(stroke_width, sclera),
        ));

        if eye.pupil_visible {
            // keep the pupil inside the lids when squinting
            let clip = Rect::from_center_size(eye.center, eye.sclera_radii * 2.0);
            painter
                .with_clip_rect(clip.intersect(painter.clip_rect()))
                .circle_filled(eye.pupil_center, eye.pupil_radius, pupil);
        }
    }
}

fn ellipse_points(center: Pos2, radii: Vec2, segments: usize) -> Vec<Pos2> {
    (0..segments)
        .map(|i| {
            let angle = i as f32 * TAU / segments as f32;
            center + Vec2::new(angle.cos() * radii.x, angle.sin() * radii.y)
        })
        .collect()
}
