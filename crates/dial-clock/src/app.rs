//! Wires the clock face to the engine runtime.

use dial_engine::coords::Viewport;
use dial_engine::core::{App, AppControl, FrameCtx};
use dial_engine::paint::Color;
use dial_engine::render::shapes::circle::CircleRenderer;
use dial_engine::render::shapes::line::LineRenderer;
use dial_engine::render::shapes::text::TextRenderer;
use dial_engine::text::FontSystem;

use crate::config::ClockConfig;
use crate::face::{ClockFace, Redraw};
use crate::fonts::FaceFonts;
use crate::time::{LocalTime, TimeSource};

/// Engine app that owns the face, its fonts and the GPU renderers.
///
/// The face only rebuilds its draw list when the second changes; every frame
/// still clears the surface and replays the retained list.
pub struct ClockApp<T: TimeSource = LocalTime> {
    face: ClockFace,
    time: T,
    font_system: FontSystem,
    background: Color,

    line_renderer: LineRenderer,
    circle_renderer: CircleRenderer,
    text_renderer: TextRenderer,

    first_drawn: bool,
}

impl ClockApp<LocalTime> {
    pub fn new(config: &ClockConfig) -> Self {
        Self::with_time_source(config, LocalTime)
    }
}

impl<T: TimeSource> ClockApp<T> {
    /// Loads the configured fonts and builds an app reading `time`.
    pub fn with_time_source(config: &ClockConfig, time: T) -> Self {
        let mut font_system = FontSystem::new();
        let fonts = FaceFonts::load(&config.fonts, &mut font_system);
        log::info!("clock reads {} time", time.name());

        Self {
            face: ClockFace::new(config.fill, config.ink, fonts),
            time,
            font_system,
            background: config.background,
            line_renderer: LineRenderer::new(),
            circle_renderer: CircleRenderer::new(),
            text_renderer: TextRenderer::new(),
            first_drawn: false,
        }
    }

    pub fn face(&self) -> &ClockFace {
        &self.face
    }

    /// Runs the face for the current instant without touching the GPU.
    pub fn tick(&mut self) -> Redraw {
        let result = self.face.draw(&self.time);
        if result == Redraw::Drawn && !self.first_drawn {
            self.first_drawn = true;
            log::info!("first face drawn");
        }
        result
    }
}

impl<T: TimeSource> App for ClockApp<T> {
    fn on_resize(&mut self, viewport: Viewport) {
        self.face.resize(viewport);
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.tick();

        let dl = self.face.draw_list();
        let fs = &self.font_system;
        let r_l = &mut self.line_renderer;
        let r_c = &mut self.circle_renderer;
        let r_t = &mut self.text_renderer;

        ctx.render(self.background, |rctx, target| {
            r_l.render(rctx, target, dl);
            r_c.render(rctx, target, dl);
            r_t.render(rctx, target, dl, fs);
        })
    }
}
