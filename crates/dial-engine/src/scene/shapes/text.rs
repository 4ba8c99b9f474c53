use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList};
use crate::text::FontId;

/// Horizontal placement of a text run relative to its anchor.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum TextAlign {
    /// Anchor is the left edge.
    #[default]
    Left,
    /// Anchor is the horizontal midpoint.
    Center,
    /// Anchor is the right edge.
    Right,
}

/// Vertical placement of a text run relative to its anchor.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum TextBaseline {
    /// Anchor is the top of the em box (ascent line).
    #[default]
    Top,
    /// Anchor is the middle of the em box.
    Middle,
    /// Anchor sits on the alphabetic baseline.
    Alphabetic,
}

/// Text draw payload.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub text: String,
    pub font: FontId,
    /// Font size in logical pixels.
    pub size: f32,
    pub color: Color,
    /// Reference point in logical pixels, interpreted through `align`/`baseline`.
    pub anchor: Vec2,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

/// Vertical font metrics for one size, in logical pixels.
///
/// `descent` is negative below the baseline, matching font tables.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct LineExtent {
    pub ascent: f32,
    pub descent: f32,
}

/// Computes the top-left corner of a single text line.
///
/// `advance` is the laid-out width of the run.
pub fn aligned_origin(
    anchor: Vec2,
    advance: f32,
    extent: LineExtent,
    align: TextAlign,
    baseline: TextBaseline,
) -> Vec2 {
    let x = match align {
        TextAlign::Left => anchor.x,
        TextAlign::Center => anchor.x - advance / 2.0,
        TextAlign::Right => anchor.x - advance,
    };
    let y = match baseline {
        TextBaseline::Top => anchor.y,
        TextBaseline::Middle => anchor.y - (extent.ascent - extent.descent) / 2.0,
        TextBaseline::Alphabetic => anchor.y - extent.ascent,
    };
    Vec2::new(x, y)
}

impl DrawList {
    /// Records a single-line text draw command.
    #[allow(clippy::too_many_arguments)]
    pub fn push_text(
        &mut self,
        text: impl Into<String>,
        font: FontId,
        size: f32,
        color: Color,
        anchor: Vec2,
        align: TextAlign,
        baseline: TextBaseline,
    ) {
        self.push(DrawCmd::Text(TextCmd {
            text: text.into(),
            font,
            size,
            color,
            anchor,
            align,
            baseline,
        }));
    }
}
