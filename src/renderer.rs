//! Raster surfaces the compositor paints onto.
//!
//! The compositor only talks to [`RenderSurface`], always in logical board
//! coordinates. Each surface maps those onto its own pixels using the
//! density of the [`RenderTarget`] it was allocated for. [`Raster`] is the
//! software implementation backed by `tiny-skia`.

use egui::{Color32, Pos2, Rect, Vec2};
use tiny_skia::{FilterQuality, Paint, PathBuilder, Pixmap, PixmapPaint, Transform};

use crate::background::BackgroundImage;
use crate::error::{BoardError, BoardResult};

/// Logical size plus pixel density of a surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderTarget {
    pub logical_size: Vec2,
    pub density: f32,
}

impl RenderTarget {
    /// Densities below 1 are raised to 1
    pub fn new(logical_size: Vec2, density: f32) -> Self {
        let density = if density.is_finite() { density.max(1.0) } else { 1.0 };
        Self { logical_size, density }
    }

    /// One pixel per logical unit
    pub fn logical(logical_size: Vec2) -> Self {
        Self::new(logical_size, 1.0)
    }

    pub fn pixel_size(&self) -> [u32; 2] {
        [
            (self.logical_size.x * self.density).floor() as u32,
            (self.logical_size.y * self.density).floor() as u32,
        ]
    }

    pub fn logical_rect(&self) -> Rect {
        Rect::from_min_size(Pos2::ZERO, self.logical_size)
    }
}

/// How new paint combines with what is already on a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    /// Normal painting: source over destination
    Replace,
    /// Removes destination alpha where the source covers it (destination-out)
    SubtractAlpha,
}

impl BlendMode {
    fn to_skia(self) -> tiny_skia::BlendMode {
        match self {
            Self::Replace => tiny_skia::BlendMode::SourceOver,
            Self::SubtractAlpha => tiny_skia::BlendMode::DestinationOut,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCap {
    /// Rounded caps and joins, used for ink
    Round,
    /// Flat ends, used for grid lines
    Butt,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: Color32,
    pub width: f32,
    pub cap: LineCap,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo(Pos2),
    QuadTo { ctrl: Pos2, to: Pos2 },
    LineTo(Pos2),
}

/// An open path in logical coordinates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrokePath {
    segments: Vec<PathSegment>,
}

impl StrokePath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(from: Pos2, to: Pos2) -> Self {
        let mut path = Self::new();
        path.move_to(from);
        path.line_to(to);
        path
    }

    pub fn move_to(&mut self, pos: Pos2) {
        self.segments.push(PathSegment::MoveTo(pos));
    }

    pub fn quad_to(&mut self, ctrl: Pos2, to: Pos2) {
        self.segments.push(PathSegment::QuadTo { ctrl, to });
    }

    pub fn line_to(&mut self, pos: Pos2) {
        self.segments.push(PathSegment::LineTo(pos));
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Paint primitives the compositor needs from a graphics surface.
///
/// All geometry is in logical coordinates.
pub trait RenderSurface: Sized {
    /// Creates a fully transparent surface
    fn allocate(target: RenderTarget) -> BoardResult<Self>;

    fn target(&self) -> RenderTarget;

    fn fill_rect(&mut self, rect: Rect, color: Color32);

    fn stroke_path(&mut self, path: &StrokePath, style: &LineStyle, blend: BlendMode);

    /// Draws the whole image scaled into `rect`
    fn draw_image_fit(&mut self, image: &BackgroundImage, rect: Rect);

    /// Draws a same-sized surface over this one
    fn composite_layer(&mut self, layer: &Self, blend: BlendMode);
}

/// CPU pixel buffer (premultiplied RGBA)
#[derive(Clone)]
pub struct Raster {
    pixmap: Pixmap,
    target: RenderTarget,
}

impl std::fmt::Debug for Raster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Raster")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .field("target", &self.target)
            .finish()
    }
}

impl Raster {
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Straight-alpha RGBA of one device pixel
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// Straight-alpha RGBA8 rows, top to bottom
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixmap.pixels().len() * 4);
        for pixel in self.pixmap.pixels() {
            let c = pixel.demultiply();
            out.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        out
    }

    fn device_transform(&self) -> Transform {
        Transform::from_scale(self.target.density, self.target.density)
    }

    fn paint(color: Color32, blend: BlendMode) -> Paint<'static> {
        let [r, g, b, a] = color.to_srgba_unmultiplied();
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;
        paint.blend_mode = blend.to_skia();
        paint
    }
}

impl RenderSurface for Raster {
    fn allocate(target: RenderTarget) -> BoardResult<Self> {
        let [width, height] = target.pixel_size();
        let pixmap = Pixmap::new(width, height).ok_or(BoardError::InvalidSurface { width, height })?;
        Ok(Self { pixmap, target })
    }

    fn target(&self) -> RenderTarget {
        self.target
    }

    fn fill_rect(&mut self, rect: Rect, color: Color32) {
        let Some(rect) = tiny_skia::Rect::from_ltrb(rect.min.x, rect.min.y, rect.max.x, rect.max.y) else {
            return;
        };
        let paint = Self::paint(color, BlendMode::Replace);
        let transform = self.device_transform();
        self.pixmap.fill_rect(rect, &paint, transform, None);
    }

    fn stroke_path(&mut self, path: &StrokePath, style: &LineStyle, blend: BlendMode) {
        let mut builder = PathBuilder::new();
        for segment in path.segments() {
            match *segment {
                PathSegment::MoveTo(p) => builder.move_to(p.x, p.y),
                PathSegment::QuadTo { ctrl, to } => builder.quad_to(ctrl.x, ctrl.y, to.x, to.y),
                PathSegment::LineTo(p) => builder.line_to(p.x, p.y),
            }
        }
        let Some(skia_path) = builder.finish() else { return };

        let mut stroke = tiny_skia::Stroke::default();
        stroke.width = style.width;
        match style.cap {
            LineCap::Round => {
                stroke.line_cap = tiny_skia::LineCap::Round;
                stroke.line_join = tiny_skia::LineJoin::Round;
            }
            LineCap::Butt => {
                stroke.line_cap = tiny_skia::LineCap::Butt;
            }
        }

        let paint = Self::paint(style.color, blend);
        let transform = self.device_transform();
        self.pixmap.stroke_path(&skia_path, &paint, &stroke, transform, None);
    }

    fn draw_image_fit(&mut self, image: &BackgroundImage, rect: Rect) {
        let source = image.pixmap();
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return;
        }
        let transform = self
            .device_transform()
            .pre_translate(rect.min.x, rect.min.y)
            .pre_scale(
                rect.width() / source.width() as f32,
                rect.height() / source.height() as f32,
            );

        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        self.pixmap.draw_pixmap(0, 0, source.as_ref(), &paint, transform, None);
    }

    fn composite_layer(&mut self, layer: &Self, blend: BlendMode) {
        let paint = PixmapPaint {
            blend_mode: blend.to_skia(),
            quality: FilterQuality::Nearest,
            ..PixmapPaint::default()
        };
        self.pixmap
            .draw_pixmap(0, 0, layer.pixmap.as_ref(), &paint, Transform::identity(), None);
    }
}
