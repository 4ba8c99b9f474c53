//! The clock face: decides when to redraw and what goes on the draw list.

use dial_engine::coords::Viewport;
use dial_engine::paint::Color;
use dial_engine::scene::{DrawList, TextAlign, TextBaseline};

use crate::canvas::Canvas;
use crate::fonts::FaceFonts;
use crate::geometry::{self, Hand, CENTER_DOT_RADIUS};
use crate::time::{ClockReading, TimeSource};

/// Outcome of one [`ClockFace::draw`] call.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Redraw {
    /// The draw list was rebuilt for a new second.
    Drawn,
    /// Same second as the last draw; the draw list was left alone.
    Skipped,
    /// No canvas yet (or the viewport is empty); nothing to draw on.
    NoCanvas,
}

/// Retained clock face.
///
/// Drawn content is a function of the canvas and the reading only; the last
/// drawn second is kept so an unchanged second costs nothing.
pub struct ClockFace {
    canvas: Option<Canvas>,
    fill: f32,
    ink: Color,
    fonts: FaceFonts,
    last_second: Option<u32>,
    draw_list: DrawList,
}

impl ClockFace {
    pub fn new(fill: f32, ink: Color, fonts: FaceFonts) -> Self {
        Self {
            canvas: None,
            fill,
            ink,
            fonts,
            last_second: None,
            draw_list: DrawList::new(),
        }
    }

    pub fn canvas(&self) -> Option<Canvas> {
        self.canvas
    }

    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    /// Refits the canvas to `viewport` and forces the next draw.
    pub fn resize(&mut self, viewport: Viewport) {
        self.canvas = Canvas::fit(viewport, self.fill);
        self.last_second = None;

        match self.canvas {
            Some(c) => log::debug!(
                "canvas {0}x{0} at {1:?}, {2} px per design unit",
                c.size(),
                c.rect().origin,
                c.scale().factor()
            ),
            None => {
                log::debug!("viewport {viewport:?} leaves no canvas");
                self.draw_list.clear();
            }
        }
    }

    /// Rebuilds the draw list if the second changed since the last draw.
    pub fn draw(&mut self, time: &impl TimeSource) -> Redraw {
        let Some(canvas) = self.canvas else {
            return Redraw::NoCanvas;
        };

        let reading = time.now();
        if self.last_second == Some(reading.seconds) {
            return Redraw::Skipped;
        }

        self.draw_list.clear();
        self.paint(canvas, reading);
        self.last_second = Some(reading.seconds);

        log::trace!(
            "redrew {:02}:{:02}:{:02} from {} time ({} commands)",
            reading.hours,
            reading.minutes,
            reading.seconds,
            time.name(),
            self.draw_list.len()
        );
        Redraw::Drawn
    }

    fn paint(&mut self, canvas: Canvas, reading: ClockReading) {
        let center = canvas.center();
        let scale = canvas.scale();

        for tick in geometry::ticks() {
            let (inner, outer) = tick.endpoints(center, scale);
            self.draw_list
                .push_line(inner, outer, scale.units(tick.width), self.ink);
        }

        self.draw_list
            .push_solid_circle(center, scale.units(CENTER_DOT_RADIUS), self.ink);

        for hand in Hand::ALL {
            let style = hand.style();
            let Some(font) = self.fonts.resolve(style.font) else {
                continue;
            };
            let label = hand.value(reading).to_string();
            let size = scale.units(style.size);

            for at in style.trail(center, hand.angle(reading), scale) {
                self.draw_list.push_text(
                    label.clone(),
                    font,
                    size,
                    self.ink,
                    at,
                    TextAlign::Center,
                    TextBaseline::Middle,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::DEFAULT_FILL;
    use crate::fonts::FontRole;
    use crate::time::FixedTime;
    use dial_engine::coords::Vec2;
    use dial_engine::scene::DrawCmd;
    use dial_engine::text::FontId;

    fn all_fonts() -> FaceFonts {
        let mut f = FaceFonts::default();
        f.set(FontRole::Light, FontId(0));
        f.set(FontRole::Regular, FontId(1));
        f.set(FontRole::Black, FontId(2));
        f
    }

    fn face(viewport: Viewport) -> ClockFace {
        let mut face = ClockFace::new(DEFAULT_FILL, Color::BLACK, all_fonts());
        face.resize(viewport);
        face
    }

    fn at(h: u32, m: u32, s: u32) -> FixedTime {
        FixedTime::new(ClockReading::new(h, m, s).unwrap())
    }

    fn texts(face: &ClockFace) -> Vec<(String, FontId, Vec2)> {
        face.draw_list()
            .items()
            .iter()
            .filter_map(DrawCmd::as_text)
            .map(|t| (t.text.clone(), t.font, t.anchor))
            .collect()
    }

    #[test]
    fn draws_nothing_before_first_resize() {
        let mut face = ClockFace::new(DEFAULT_FILL, Color::BLACK, all_fonts());
        assert_eq!(face.draw(&at(1, 2, 3)), Redraw::NoCanvas);
        assert!(face.draw_list().is_empty());
    }

    #[test]
    fn full_face_has_ticks_dot_and_trails() {
        let mut face = face(Viewport::new(1000.0, 800.0));
        assert_eq!(face.draw(&at(10, 20, 30)), Redraw::Drawn);

        let items = face.draw_list().items();
        assert_eq!(items.iter().filter(|c| c.as_line().is_some()).count(), 60);
        assert_eq!(items.iter().filter(|c| c.as_circle().is_some()).count(), 1);
        assert_eq!(texts(&face).len(), 6 + 7 + 7);

        // Paint order: ticks, dot, then text.
        assert!(items[0].as_line().is_some());
        assert!(items[60].as_circle().is_some());
        assert!(items[61..].iter().all(|c| c.as_text().is_some()));
    }

    #[test]
    fn same_second_is_skipped_without_touching_the_list() {
        let mut face = face(Viewport::new(800.0, 800.0));
        assert_eq!(face.draw(&at(12, 0, 7)), Redraw::Drawn);
        let revision = face.draw_list().revision();

        // A different minute in the same second still counts as the same second.
        assert_eq!(face.draw(&at(12, 1, 7)), Redraw::Skipped);
        assert_eq!(face.draw_list().revision(), revision);

        assert_eq!(face.draw(&at(12, 1, 8)), Redraw::Drawn);
        assert!(face.draw_list().revision() > revision);
        assert_eq!(face.draw_list().len(), 60 + 1 + 20);
    }

    #[test]
    fn resize_forces_redraw_at_new_scale() {
        let mut face = face(Viewport::new(400.0 / DEFAULT_FILL, 400.0 / DEFAULT_FILL));
        let time = at(0, 0, 0);
        face.draw(&time);
        let dot_before = face.draw_list().items()[60].as_circle().unwrap().radius;

        face.resize(Viewport::new(1000.0, 800.0));
        assert_eq!(face.draw(&time), Redraw::Drawn);
        let dot_after = face.draw_list().items()[60].as_circle().unwrap().radius;

        assert!((dot_before - 5.0).abs() < 1e-3);
        assert!((dot_after - 9.0).abs() < 1e-3);
    }

    #[test]
    fn collapsing_viewport_clears_the_face() {
        let mut face = face(Viewport::new(800.0, 800.0));
        face.draw(&at(1, 1, 1));
        face.resize(Viewport::new(0.0, 0.0));

        assert!(face.canvas().is_none());
        assert!(face.draw_list().is_empty());
        assert_eq!(face.draw(&at(1, 1, 2)), Redraw::NoCanvas);
    }

    #[test]
    fn midnight_trails_point_straight_up() {
        let mut face = face(Viewport::new(1000.0, 800.0));
        face.draw(&at(0, 0, 0));
        let center = Vec2::new(500.0, 400.0);

        for (text, _, anchor) in texts(&face) {
            assert_eq!(text, "0");
            assert!((anchor.x - center.x).abs() < 1e-3, "{anchor:?}");
            assert!(anchor.y < center.y);
        }
    }

    #[test]
    fn hour_numerals_print_raw_value_in_black() {
        let mut face = face(Viewport::new(800.0, 800.0));
        face.draw(&at(15, 0, 1));

        let hours: Vec<_> = texts(&face)
            .into_iter()
            .filter(|(_, font, _)| *font == FontId(2))
            .collect();
        assert_eq!(hours.len(), 7);
        assert!(hours.iter().all(|(t, _, _)| t == "15"));

        // Fifteen hundred points right, like three o'clock.
        let center = Vec2::new(400.0, 400.0);
        assert!(hours.iter().all(|(_, _, p)| (p.y - center.y).abs() < 1e-3 && p.x > center.x));
    }

    #[test]
    fn missing_fonts_skip_numerals_only() {
        let mut face = ClockFace::new(DEFAULT_FILL, Color::BLACK, FaceFonts::default());
        face.resize(Viewport::new(800.0, 800.0));
        assert_eq!(face.draw(&at(3, 4, 5)), Redraw::Drawn);
        assert_eq!(face.draw_list().len(), 61);
        assert!(texts(&face).is_empty());
    }

    #[test]
    fn numerals_are_centered_on_their_anchor() {
        let mut face = face(Viewport::new(800.0, 800.0));
        face.draw(&at(0, 0, 9));
        let cmd = face
            .draw_list()
            .items()
            .iter()
            .find_map(DrawCmd::as_text)
            .unwrap();
        assert_eq!(cmd.align, TextAlign::Center);
        assert_eq!(cmd.baseline, TextBaseline::Middle);
        // Seconds at scale 720/400.
        assert!((cmd.size - 12.0 * 1.8).abs() < 1e-3);
    }
}
