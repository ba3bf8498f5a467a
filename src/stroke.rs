use egui::{Color32, Pos2};

/// Lower bound for any rendered line width, in logical pixels
pub const MIN_STROKE_WIDTH: f32 = 0.5;

/// One pointer sample in logical (device independent) coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub pos: Pos2,
    pub pressure: f32,
}

impl Point {
    /// Creates a sample, normalizing pressure into `(0, 1]`.
    ///
    /// Devices that report no pressure (or zero) draw at full pressure.
    pub fn new(pos: Pos2, pressure: Option<f32>) -> Self {
        let pressure = match pressure {
            Some(p) if p.is_finite() && p > 0.0 => p.min(1.0),
            _ => 1.0,
        };
        Self { pos, pressure }
    }

    pub fn at(x: f32, y: f32) -> Self {
        Self::new(Pos2::new(x, y), None)
    }
}

/// What a stroke does to the ink layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum StrokeOp {
    /// Paints ink
    Pen,
    /// Removes previously painted ink, never the background
    Erase,
}

/// A single pen or eraser gesture.
///
/// Points are only appended by the board while the gesture that created the
/// stroke is still active; everything public is read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    color: Color32,
    width: f32,
    op: StrokeOp,
    points: Vec<Point>,
}

impl Stroke {
    pub fn new(color: Color32, width: f32, op: StrokeOp, start: Point) -> Self {
        let width = if width.is_finite() {
            width.max(MIN_STROKE_WIDTH)
        } else {
            MIN_STROKE_WIDTH
        };
        Self {
            color,
            width,
            op,
            points: vec![start],
        }
    }

    pub(crate) fn push_point(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn op(&self) -> StrokeOp {
        self.op
    }

    /// Strokes with fewer than two samples leave no mark
    pub fn is_drawable(&self) -> bool {
        self.points.len() >= 2
    }

    /// Rendered line width: base width scaled by the pressure of the final sample
    pub fn line_width(&self) -> f32 {
        let pressure = self.points.last().map_or(1.0, |p| p.pressure);
        (self.width * pressure).max(MIN_STROKE_WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_or_invalid_pressure_defaults_to_full() {
        assert_eq!(Point::new(Pos2::ZERO, None).pressure, 1.0);
        assert_eq!(Point::new(Pos2::ZERO, Some(0.0)).pressure, 1.0);
        assert_eq!(Point::new(Pos2::ZERO, Some(-0.3)).pressure, 1.0);
        assert_eq!(Point::new(Pos2::ZERO, Some(f32::NAN)).pressure, 1.0);
        assert_eq!(Point::new(Pos2::ZERO, Some(3.0)).pressure, 1.0);
        assert_eq!(Point::new(Pos2::ZERO, Some(0.25)).pressure, 0.25);
    }

    #[test]
    fn test_line_width_uses_last_sample_pressure() {
        let mut stroke = Stroke::new(Color32::RED, 10.0, StrokeOp::Pen, Point::new(Pos2::ZERO, Some(1.0)));
        stroke.push_point(Point::new(Pos2::new(5.0, 5.0), Some(0.9)));
        stroke.push_point(Point::new(Pos2::new(9.0, 9.0), Some(0.5)));
        assert_eq!(stroke.line_width(), 5.0);
    }

    #[test]
    fn test_width_is_clamped() {
        let stroke = Stroke::new(Color32::RED, -4.0, StrokeOp::Pen, Point::at(0.0, 0.0));
        assert_eq!(stroke.width(), MIN_STROKE_WIDTH);

        let mut faint = Stroke::new(Color32::RED, 1.0, StrokeOp::Pen, Point::at(0.0, 0.0));
        faint.push_point(Point::new(Pos2::new(1.0, 1.0), Some(0.01)));
        assert_eq!(faint.line_width(), MIN_STROKE_WIDTH);
    }

    #[test]
    fn test_single_point_is_not_drawable() {
        let mut stroke = Stroke::new(Color32::RED, 2.0, StrokeOp::Erase, Point::at(3.0, 4.0));
        assert!(!stroke.is_drawable());
        stroke.push_point(Point::at(5.0, 6.0));
        assert!(stroke.is_drawable());
    }
}
