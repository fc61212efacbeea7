use super::*;
use crate::assets::decode::DecodedImage;
use crate::render::recording::{AdvanceMetrics, DrawCmd, RecordingSurface};

const SIZES: &[(f64, f64)] = &[
    (1200.0, 675.0),
    (1920.0, 1080.0),
    (4000.0, 1000.0),
    (1000.0, 4000.0),
    (1.0, 1.0),
    (675.0, 1200.0),
    (3.0, 2.0),
    (333.0, 187.0),
];

#[test]
fn cover_always_covers_and_keeps_aspect() {
    for &(w, h) in SIZES {
        let (dw, dh) = cover_size(w, h, Canvas::CARD);
        assert!(dw >= 1200.0 - 1e-9, "{w}x{h} -> {dw}");
        assert!(dh >= 675.0 - 1e-9, "{w}x{h} -> {dh}");
        assert!(((dw / dh) - (w / h)).abs() < 1e-9, "{w}x{h} aspect");
        // One side matches the canvas exactly.
        assert!((dw - 1200.0).abs() < 1e-9 || (dh - 675.0).abs() < 1e-9);
    }
}

#[test]
fn wide_images_fit_height() {
    let (w, h) = cover_size(4000.0, 1000.0, Canvas::CARD);
    assert!((w - 2700.0).abs() < 1e-9 && h == 675.0);
    let (w, h) = cover_size(1000.0, 4000.0, Canvas::CARD);
    assert!(w == 1200.0 && (h - 4800.0).abs() < 1e-9);
}

#[test]
fn zoom_100_without_pan_is_centered() {
    for &(w, h) in SIZES {
        let r = cover_rect(w, h, Canvas::CARD, &BackgroundTransform::default());
        let c = r.center();
        assert!((c.x - 600.0).abs() < 1e-9);
        assert!((c.y - 337.5).abs() < 1e-9);
    }
}

#[test]
fn zoom_scales_both_sides_proportionally() {
    let base = cover_rect(1920.0, 1080.0, Canvas::CARD, &BackgroundTransform::default());
    let mut prev = base;
    for zoom in [110.0, 150.0, 200.0, 250.0] {
        let t = BackgroundTransform::default().with_zoom(zoom);
        let r = cover_rect(1920.0, 1080.0, Canvas::CARD, &t);
        assert!(r.width() > prev.width());
        assert!(r.height() > prev.height());
        assert!((r.width() / base.width() - zoom / 100.0).abs() < 1e-12);
        assert!((r.height() / base.height() - zoom / 100.0).abs() < 1e-12);
        prev = r;
    }
}

#[test]
fn pan_shifts_without_resizing() {
    let t = BackgroundTransform::default()
        .with_zoom(50.0)
        .with_offset(-40.0, 25.0);
    let r = cover_rect(1200.0, 675.0, Canvas::CARD, &t);
    assert_eq!(r, Rect::new(260.0, 193.75, 860.0, 531.25));

    // Fully off-canvas is allowed.
    let far = BackgroundTransform::default().with_offset(5000.0, 0.0);
    let r = cover_rect(1200.0, 675.0, Canvas::CARD, &far);
    assert!(r.x0 > 1200.0);
}

#[test]
fn no_image_draws_diagonal_gradient() {
    let mut s = RecordingSurface::new(Canvas::CARD, AdvanceMetrics::Em(1.0));
    let theme = Theme::default();
    draw_background(&mut s, &BackgroundState::empty(), &theme).unwrap();

    match &s.commands()[0] {
        DrawCmd::FillGradient {
            rect,
            start,
            end,
            stops,
        } => {
            assert_eq!(*rect, Canvas::CARD.rect());
            assert_eq!(*start, Point::new(0.0, 0.0));
            assert_eq!(*end, Point::new(1200.0, 675.0));
            assert_eq!(stops[0].color, theme.placeholder_start);
            assert_eq!(stops[1].color, theme.placeholder_end);
        }
        other => panic!("expected gradient, got {other:?}"),
    }
    assert_eq!(s.texts().len(), 1);
    assert_eq!(s.texts()[0].1, Point::new(600.0, 337.5));
}

#[test]
fn image_is_blitted_into_cover_rect() {
    let mut s = RecordingSurface::new(Canvas::CARD, AdvanceMetrics::Em(1.0));
    let bg = BackgroundState::with_image(DecodedImage::solid(400, 400, [0, 0, 0, 255]));
    draw_background(&mut s, &bg, &Theme::default()).unwrap();
    assert_eq!(
        s.commands(),
        &[DrawCmd::DrawImage {
            width: 400,
            height: 400,
            dest: Rect::new(0.0, -262.5, 1200.0, 937.5),
        }]
    );
}

#[test]
fn empty_image_falls_back_to_gradient() {
    let mut s = RecordingSurface::new(Canvas::CARD, AdvanceMetrics::Em(1.0));
    let bg = BackgroundState::with_image(DecodedImage::solid(0, 10, [0, 0, 0, 0]));
    draw_background(&mut s, &bg, &Theme::default().without_placeholder_hint()).unwrap();
    assert_eq!(s.commands().len(), 1);
    assert!(matches!(s.commands()[0], DrawCmd::FillGradient { .. }));
}
