//! Turns the stroke history into a finished picture.
//!
//! Every pass starts from scratch: background colour and image, then the
//! grid, then a separate ink layer holding all strokes. Erasers cut alpha out
//! of the ink layer only, so the background always shows through where ink
//! was removed. Because strokes are stored in logical coordinates, the same
//! pass works for any target size or density.

use egui::{Pos2, Rect, Vec2};

use crate::config::{CanvasConfig, GRID_COLOR, GRID_LINE_WIDTH};
use crate::error::BoardResult;
use crate::renderer::{BlendMode, LineCap, LineStyle, RenderSurface, RenderTarget, StrokePath};
use crate::stroke::{Stroke, StrokeOp};

/// Renders the board into a freshly allocated surface
pub fn compose<S: RenderSurface>(config: &CanvasConfig, strokes: &[Stroke], target: RenderTarget) -> BoardResult<S> {
    let mut output = S::allocate(target)?;
    paint_background(&mut output, config);
    if config.grid_enabled {
        paint_grid(&mut output, config.grid_spacing());
    }

    let mut ink = S::allocate(target)?;
    paint_ink(&mut ink, strokes);
    output.composite_layer(&ink, BlendMode::Replace);

    Ok(output)
}

fn paint_background<S: RenderSurface>(surface: &mut S, config: &CanvasConfig) {
    let canvas = surface.target().logical_rect();
    surface.fill_rect(canvas, config.background_color);

    if let Some(image) = &config.background_image {
        if let Some(placement) = fit_within(image.size(), canvas.size()) {
            surface.draw_image_fit(image, placement);
        }
    }
}

fn paint_grid<S: RenderSurface>(surface: &mut S, spacing: f32) {
    let style = LineStyle {
        color: GRID_COLOR,
        width: GRID_LINE_WIDTH,
        cap: LineCap::Butt,
    };
    let size = surface.target().logical_size;
    for line in grid_lines(size, spacing) {
        surface.stroke_path(&line, &style, BlendMode::Replace);
    }
}

fn paint_ink<S: RenderSurface>(ink: &mut S, strokes: &[Stroke]) {
    for stroke in strokes {
        let Some(path) = smooth_path(stroke) else { continue };
        let blend = match stroke.op() {
            StrokeOp::Pen => BlendMode::Replace,
            StrokeOp::Erase => BlendMode::SubtractAlpha,
        };
        let style = LineStyle {
            color: stroke.color(),
            width: stroke.line_width(),
            cap: LineCap::Round,
        };
        ink.stroke_path(&path, &style, blend);
    }
}

/// Letterboxed placement of an image inside a canvas.
///
/// The image keeps its aspect ratio, touches the canvas on its relatively
/// longer side and is centred along the other. Returns `None` for degenerate
/// sizes.
pub fn fit_within(image: Vec2, canvas: Vec2) -> Option<Rect> {
    if image.x <= 0.0 || image.y <= 0.0 || canvas.x <= 0.0 || canvas.y <= 0.0 {
        return None;
    }
    let image_aspect = image.x / image.y;
    let canvas_aspect = canvas.x / canvas.y;

    let rect = if image_aspect > canvas_aspect {
        let height = canvas.x / image_aspect;
        Rect::from_min_size(Pos2::new(0.0, (canvas.y - height) / 2.0), Vec2::new(canvas.x, height))
    } else {
        let width = canvas.y * image_aspect;
        Rect::from_min_size(Pos2::new((canvas.x - width) / 2.0, 0.0), Vec2::new(width, canvas.y))
    };
    Some(rect)
}

/// Vertical then horizontal lines at every multiple of `spacing`, edges included
pub fn grid_lines(size: Vec2, spacing: f32) -> Vec<StrokePath> {
    if spacing.is_nan() || spacing <= 0.0 || size.x < 0.0 || size.y < 0.0 {
        return Vec::new();
    }
    let columns = (size.x / spacing).floor() as usize;
    let rows = (size.y / spacing).floor() as usize;

    let mut lines = Vec::with_capacity(columns + rows + 2);
    for i in 0..=columns {
        let x = i as f32 * spacing;
        lines.push(StrokePath::line(Pos2::new(x, 0.0), Pos2::new(x, size.y)));
    }
    for i in 0..=rows {
        let y = i as f32 * spacing;
        lines.push(StrokePath::line(Pos2::new(0.0, y), Pos2::new(size.x, y)));
    }
    lines
}

/// Quadratic smoothing through the midpoints of consecutive samples.
///
/// Each interior sample becomes the control point of a curve ending halfway
/// to the next sample; a final straight segment reaches the last sample.
/// Strokes with fewer than two samples produce no path.
pub fn smooth_path(stroke: &Stroke) -> Option<StrokePath> {
    let points = stroke.points();
    let (first, last) = match points {
        [first, .., last] => (first.pos, last.pos),
        _ => return None,
    };

    let mut path = StrokePath::new();
    path.move_to(first);
    for pair in points[1..].windows(2) {
        let (p0, p1) = (pair[0].pos, pair[1].pos);
        path.quad_to(p0, p0 + (p1 - p0) * 0.5);
    }
    path.line_to(last);
    Some(path)
}
