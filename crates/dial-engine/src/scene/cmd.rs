use crate::scene::shapes::circle::CircleCmd;
use crate::scene::shapes::line::LineCmd;
use crate::scene::shapes::text::TextCmd;

/// Renderer-agnostic draw command stream.
///
/// Extending the scene:
/// - add a new shape module under `scene::shapes::*`
/// - add a new variant here
/// - implement push helpers inside that shape module
/// - add a matching renderer under `render::shapes::*`
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Line(LineCmd),
    Circle(CircleCmd),
    Text(TextCmd),
}

impl DrawCmd {
    pub fn as_line(&self) -> Option<&LineCmd> {
        match self {
            DrawCmd::Line(cmd) => Some(cmd),
            _ => None,
        }
    }

    pub fn as_circle(&self) -> Option<&CircleCmd> {
        match self {
            DrawCmd::Circle(cmd) => Some(cmd),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextCmd> {
        match self {
            DrawCmd::Text(cmd) => Some(cmd),
            _ => None,
        }
    }
}
