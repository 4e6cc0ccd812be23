use nalgebra::Point2;

/// Cursor snapshot supplied by the input collaborator
///
/// The core only reads this. `just_pressed` marks the press instant and is
/// cleared by the input side on the next movement event; it is what lets the
/// interaction laws tell "pressed inside a body" apart from "pressed outside
/// and dragged in". Which body (if any) the pointer has locked onto is owned
/// by the interaction law itself, not stored here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    pub position: Point2<f64>,
    pub pressed: bool,
    pub just_pressed: bool,
}

impl PointerState {
    /// A released pointer at the given coordinates
    pub fn hover(x: f64, y: f64) -> Self {
        Self {
            position: Point2::new(x, y),
            pressed: false,
            just_pressed: false,
        }
    }

    /// A pointer at the press instant
    pub fn press(x: f64, y: f64) -> Self {
        Self {
            position: Point2::new(x, y),
            pressed: true,
            just_pressed: true,
        }
    }

    /// A held pointer that has moved since the press
    pub fn drag(x: f64, y: f64) -> Self {
        Self {
            position: Point2::new(x, y),
            pressed: true,
            just_pressed: false,
        }
    }
}

impl Default for PointerState {
    fn default() -> Self {
        Self::hover(0.0, 0.0)
    }
}
