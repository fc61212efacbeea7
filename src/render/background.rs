use crate::foundation::core::{Canvas, Point, Rect};
use crate::foundation::error::CardResult;
use crate::render::surface::{GradientStop, Surface, TextAlign, TextBaseline, TextStyle};
use crate::render::theme::Theme;
use crate::scene::model::{BackgroundState, BackgroundTransform};

/// Size of an image scaled to cover `canvas` at zoom 100, aspect ratio preserved.
///
/// Images wider than the canvas fit its height and overflow horizontally; all others fit its
/// width and overflow vertically.
pub fn cover_size(img_w: f64, img_h: f64, canvas: Canvas) -> (f64, f64) {
    let cw = f64::from(canvas.width);
    let ch = f64::from(canvas.height);
    if img_w / img_h > canvas.aspect_ratio() {
        (img_w * (ch / img_h), ch)
    } else {
        (cw, img_h * (cw / img_w))
    }
}

/// Destination rectangle of the background image: cover fit, then zoom, then centered pan.
pub fn cover_rect(img_w: f64, img_h: f64, canvas: Canvas, transform: &BackgroundTransform) -> Rect {
    let (base_w, base_h) = cover_size(img_w, img_h, canvas);
    let scale = transform.scale();
    let draw_w = base_w * scale;
    let draw_h = base_h * scale;
    let draw_x = (f64::from(canvas.width) - draw_w) / 2.0 + transform.offset_x;
    let draw_y = (f64::from(canvas.height) - draw_h) / 2.0 + transform.offset_y;
    Rect::new(draw_x, draw_y, draw_x + draw_w, draw_y + draw_h)
}

/// Paint the whole canvas: the background image, or the placeholder gradient when there is none.
pub fn draw_background(
    surface: &mut dyn Surface,
    background: &BackgroundState,
    theme: &Theme,
) -> CardResult<()> {
    let canvas = surface.canvas();
    let full = canvas.rect();

    match background.image().filter(|img| !img.is_empty()) {
        Some(img) => {
            let dest = cover_rect(
                f64::from(img.width),
                f64::from(img.height),
                canvas,
                &background.transform,
            );
            tracing::trace!(?dest, "background cover rect");
            surface.draw_image(img, dest)
        }
        None => {
            let stops = [
                GradientStop {
                    offset: 0.0,
                    color: theme.placeholder_start,
                },
                GradientStop {
                    offset: 1.0,
                    color: theme.placeholder_end,
                },
            ];
            surface.fill_linear_gradient(
                full,
                Point::new(full.x0, full.y0),
                Point::new(full.x1, full.y1),
                &stops,
            )?;
            if let Some(hint) = &theme.placeholder_hint {
                let style = TextStyle {
                    size_px: theme.placeholder_hint_font_size,
                    weight: crate::assets::fonts::FontWeight::Bold,
                    color: theme.placeholder_hint_color,
                };
                // The hint is decoration only; a surface without fonts still gets the gradient.
                if let Err(e) = surface.fill_text(
                    hint,
                    full.center(),
                    &style,
                    TextAlign::Center,
                    TextBaseline::Middle,
                ) {
                    tracing::debug!(error = %e, "placeholder hint not drawn");
                }
            }
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/background.rs"]
mod tests;
