use std::sync::Arc;

use crate::assets::decode::{DecodedImage, unpremultiply_rgba8_in_place};
use crate::assets::fonts::{FontSet, FontWeight, TextBrushRgba8, TextLayoutEngine};
use crate::foundation::core::{BezPath, Canvas, Point, Rect, Rgba8};
use crate::foundation::error::{CardError, CardResult};
use crate::render::frame::FrameRGBA;
use crate::render::surface::{GradientStop, Surface, TextAlign, TextBaseline, TextStyle};

/// CPU raster [`Surface`] powered by `vello_cpu`, with Parley for text shaping.
pub struct CpuSurface {
    canvas: Canvas,
    size: (u16, u16),
    ctx: vello_cpu::RenderContext,
    fonts: Option<CpuFonts>,
    image_cache: Option<CachedImage>,
    clip_depth: usize,
}

struct CpuFonts {
    engine: TextLayoutEngine,
    regular: vello_cpu::peniko::FontData,
    bold: vello_cpu::peniko::FontData,
}

impl CpuFonts {
    fn font_for(&self, weight: FontWeight) -> &vello_cpu::peniko::FontData {
        match weight {
            FontWeight::Regular => &self.regular,
            FontWeight::Bold => &self.bold,
        }
    }
}

// Holding `source` keeps its address from being reused by a later image.
struct CachedImage {
    source: Arc<Vec<u8>>,
    width: u32,
    height: u32,
    paint: vello_cpu::Image,
}

impl CachedImage {
    fn matches(&self, image: &DecodedImage) -> bool {
        Arc::ptr_eq(&self.source, &image.rgba8_premul)
            && self.width == image.width
            && self.height == image.height
    }
}

impl CpuSurface {
    /// Transparent surface of `canvas` size without fonts.
    ///
    /// Text operations fail until fonts are attached with [`CpuSurface::with_fonts`].
    pub fn new(canvas: Canvas) -> CardResult<Self> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| CardError::render("surface width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| CardError::render("surface height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(CardError::render("surface must be non-empty"));
        }
        Ok(Self {
            canvas,
            size: (width, height),
            ctx: vello_cpu::RenderContext::new(width, height),
            fonts: None,
            image_cache: None,
            clip_depth: 0,
        })
    }

    /// Attach fonts for text measurement and drawing.
    pub fn with_fonts(mut self, fonts: &FontSet) -> CardResult<Self> {
        let engine = TextLayoutEngine::new(fonts)?;
        let face = |w: FontWeight| {
            vello_cpu::peniko::FontData::new(
                vello_cpu::peniko::Blob::from(fonts.bytes_for(w).as_ref().clone()),
                0,
            )
        };
        self.fonts = Some(CpuFonts {
            engine,
            regular: face(FontWeight::Regular),
            bold: face(FontWeight::Bold),
        });
        Ok(self)
    }

    /// `true` when fonts are attached.
    pub fn has_fonts(&self) -> bool {
        self.fonts.is_some()
    }

    /// Discard everything drawn so far, including cached image paints.
    pub fn reset(&mut self) {
        self.ctx.reset();
        self.image_cache = None;
        self.clip_depth = 0;
    }

    /// Rasterize the recorded drawing into a straight-alpha frame.
    pub fn finish(&mut self) -> CardResult<FrameRGBA> {
        if self.clip_depth != 0 {
            return Err(CardError::render(format!(
                "{} clip(s) still pushed at finish",
                self.clip_depth
            )));
        }
        let mut pixmap = vello_cpu::Pixmap::new(self.size.0, self.size.1);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);

        let mut data = pixmap.data_as_u8_slice().to_vec();
        unpremultiply_rgba8_in_place(&mut data);
        Ok(FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data,
            premultiplied: false,
        })
    }

    fn reset_transforms(&mut self) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    }

    fn image_paint_for(&mut self, image: &DecodedImage) -> CardResult<vello_cpu::Image> {
        if let Some(cached) = self.image_cache.as_ref().filter(|c| c.matches(image)) {
            return Ok(cached.paint.clone());
        }
        let paint = rgba_premul_to_image(&image.rgba8_premul, image.width, image.height)?;
        self.image_cache = Some(CachedImage {
            source: Arc::clone(&image.rgba8_premul),
            width: image.width,
            height: image.height,
            paint: paint.clone(),
        });
        Ok(paint)
    }
}

impl Surface for CpuSurface {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn clear(&mut self) -> CardResult<()> {
        self.reset();
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8) -> CardResult<()> {
        self.reset_transforms();
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.fill_rect(&rect_to_cpu(rect));
        Ok(())
    }

    fn fill_linear_gradient(
        &mut self,
        rect: Rect,
        start: Point,
        end: Point,
        stops: &[GradientStop],
    ) -> CardResult<()> {
        let w = rect.width().ceil().max(1.0) as u32;
        let h = rect.height().ceil().max(1.0) as u32;
        let bytes = linear_gradient_premul(
            w,
            h,
            Point::new(start.x - rect.x0, start.y - rect.y0),
            Point::new(end.x - rect.x0, end.y - rect.y0),
            stops,
        );
        let img = rgba_premul_to_image(&bytes, w, h)?;

        self.reset_transforms();
        self.ctx
            .set_transform(vello_cpu::kurbo::Affine::translate((rect.x0, rect.y0)));
        self.ctx.set_paint(img);
        self.ctx
            .fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, rect.width(), rect.height()));
        Ok(())
    }

    fn push_clip(&mut self, path: &BezPath) -> CardResult<()> {
        self.reset_transforms();
        self.ctx.push_clip_layer(&bezpath_to_cpu(path));
        self.clip_depth += 1;
        Ok(())
    }

    fn pop_clip(&mut self) -> CardResult<()> {
        if self.clip_depth == 0 {
            return Err(CardError::render("pop_clip without matching push_clip"));
        }
        self.ctx.pop_layer();
        self.clip_depth -= 1;
        Ok(())
    }

    fn draw_image(&mut self, image: &DecodedImage, dest: Rect) -> CardResult<()> {
        if image.is_empty() {
            return Err(CardError::render("cannot draw an empty image"));
        }
        let paint = self.image_paint_for(image)?;
        let sx = dest.width() / f64::from(image.width);
        let sy = dest.height() / f64::from(image.height);

        self.reset_transforms();
        self.ctx.set_transform(
            vello_cpu::kurbo::Affine::translate((dest.x0, dest.y0))
                * vello_cpu::kurbo::Affine::scale_non_uniform(sx, sy),
        );
        self.ctx.set_paint(paint);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(image.width),
            f64::from(image.height),
        ));
        Ok(())
    }

    fn measure_text(&mut self, text: &str, style: &TextStyle) -> CardResult<f64> {
        let fonts = self
            .fonts
            .as_mut()
            .ok_or_else(|| CardError::font("no fonts attached to surface"))?;
        fonts
            .engine
            .measure(text, style.size_px as f32, style.weight)
    }

    fn fill_text(
        &mut self,
        text: &str,
        anchor: Point,
        style: &TextStyle,
        align: TextAlign,
        baseline: TextBaseline,
    ) -> CardResult<()> {
        let Self { ctx, fonts, .. } = self;
        let fonts = fonts
            .as_mut()
            .ok_or_else(|| CardError::font("no fonts attached to surface"))?;
        if text.is_empty() {
            return Ok(());
        }

        let layout = fonts.engine.layout_line(
            text,
            style.size_px as f32,
            style.weight,
            TextBrushRgba8::from(style.color),
        )?;
        let w = f64::from(layout.full_width());
        let h = f64::from(layout.height());
        let x = match align {
            TextAlign::Left => anchor.x,
            TextAlign::Center => anchor.x - w / 2.0,
        };
        let y = match baseline {
            TextBaseline::Top => anchor.y,
            TextBaseline::Middle => anchor.y - h / 2.0,
        };

        let font = fonts.font_for(style.weight);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((x, y)));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        Ok(())
    }
}

/// Premultiplied RGBA8 pixels of a linear gradient over a `w` x `h` area.
///
/// Each pixel center is projected onto the `start` → `end` axis; positions before the first or
/// after the last stop take that stop's color.
pub(crate) fn linear_gradient_premul(
    w: u32,
    h: u32,
    start: Point,
    end: Point,
    stops: &[GradientStop],
) -> Vec<u8> {
    let mut bytes = vec![0u8; (w as usize).saturating_mul(h as usize).saturating_mul(4)];
    let axis = end - start;
    let len2 = axis.hypot2();
    for y in 0..h {
        for x in 0..w {
            let p = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            let t = if len2 > 0.0 {
                ((p - start).dot(axis) / len2).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let idx = ((y as usize) * (w as usize) + (x as usize)) * 4;
            bytes[idx..idx + 4].copy_from_slice(&sample_stops(stops, t).to_premul_array());
        }
    }
    bytes
}

fn sample_stops(stops: &[GradientStop], t: f64) -> Rgba8 {
    let Some(first) = stops.first() else {
        return Rgba8 {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        };
    };
    if t <= first.offset {
        return first.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = b.offset - a.offset;
            let local = if span > 0.0 {
                (t - a.offset) / span
            } else {
                1.0
            };
            return a.color.lerp(b.color, local);
        }
    }
    stops[stops.len() - 1].color
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> CardResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| CardError::render("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| CardError::render("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(CardError::render("pixmap byte len mismatch"));
    }
    // Pixmap stores PremulRgba8; our bytes are already premultiplied.
    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity((width as usize) * (height as usize));
    for px in bytes.chunks_exact(4) {
        may_have_opacities |= px[3] != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        });
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

fn rgba_premul_to_image(
    bytes_premul: &[u8],
    width: u32,
    height: u32,
) -> CardResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(bytes_premul, width, height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
