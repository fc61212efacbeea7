use super::*;
use crate::render::surface::rounded_rect_path;

fn small() -> CpuSurface {
    CpuSurface::new(Canvas {
        width: 64,
        height: 32,
    })
    .unwrap()
}

fn close(a: [u8; 4], b: [u8; 4], tol: u8) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| x.abs_diff(*y) <= tol)
}

fn test_font() -> Option<FontSet> {
    let path = std::env::var("PROFILE_CARD_TEST_FONT")
        .unwrap_or_else(|_| "assets/fonts/NotoSansJP-Regular.ttf".to_string());
    let bytes = std::fs::read(path).ok()?;
    FontSet::from_bytes(bytes, None).ok()
}

#[test]
fn rejects_oversized_and_empty_canvas() {
    assert!(
        CpuSurface::new(Canvas {
            width: 70_000,
            height: 10
        })
        .is_err()
    );
    assert!(
        CpuSurface::new(Canvas {
            width: 0,
            height: 10
        })
        .is_err()
    );
}

#[test]
fn untouched_surface_is_transparent() {
    let mut s = small();
    let frame = s.finish().unwrap();
    assert_eq!((frame.width, frame.height), (64, 32));
    assert!(!frame.premultiplied);
    assert!(frame.data.iter().all(|&b| b == 0));
}

#[test]
fn opaque_rect_fills_exact_pixels() {
    let mut s = small();
    s.fill_rect(Rect::new(0.0, 0.0, 32.0, 32.0), Rgba8::rgb(255, 0, 0))
        .unwrap();
    let frame = s.finish().unwrap();
    assert_eq!(frame.pixel(5, 5), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(40, 5), Some([0, 0, 0, 0]));
}

#[test]
fn translucent_panel_blends_over_backdrop() {
    let mut s = small();
    s.fill_rect(Rect::new(0.0, 0.0, 64.0, 32.0), Rgba8::BLACK)
        .unwrap();
    s.fill_rect(Rect::new(0.0, 0.0, 64.0, 32.0), Rgba8::rgba(255, 255, 255, 0.6))
        .unwrap();
    let frame = s.finish().unwrap();
    assert!(close(frame.pixel(10, 10).unwrap(), [153, 153, 153, 255], 2));
}

#[test]
fn rounded_clip_hides_corners() {
    let mut s = small();
    s.push_clip(&rounded_rect_path(Rect::new(0.0, 0.0, 64.0, 32.0), 10.0))
        .unwrap();
    s.fill_rect(Rect::new(0.0, 0.0, 64.0, 32.0), Rgba8::WHITE)
        .unwrap();
    s.pop_clip().unwrap();
    let frame = s.finish().unwrap();
    assert_eq!(frame.pixel(0, 0).unwrap()[3], 0);
    assert_eq!(frame.pixel(63, 31).unwrap()[3], 0);
    assert_eq!(frame.pixel(32, 16), Some([255, 255, 255, 255]));
}

#[test]
fn unbalanced_clips_are_errors() {
    let mut s = small();
    assert!(s.pop_clip().is_err());
    s.push_clip(&rounded_rect_path(Rect::new(0.0, 0.0, 10.0, 10.0), 2.0))
        .unwrap();
    assert!(s.finish().is_err());
}

#[test]
fn gradient_runs_from_start_to_end_color() {
    let mut s = small();
    let start = Rgba8::rgb(0, 0, 0);
    let end = Rgba8::rgb(255, 255, 255);
    s.fill_linear_gradient(
        Rect::new(0.0, 0.0, 64.0, 32.0),
        Point::new(0.0, 0.0),
        Point::new(64.0, 32.0),
        &[
            GradientStop {
                offset: 0.0,
                color: start,
            },
            GradientStop {
                offset: 1.0,
                color: end,
            },
        ],
    )
    .unwrap();
    let frame = s.finish().unwrap();
    let tl = frame.pixel(0, 0).unwrap();
    let br = frame.pixel(63, 31).unwrap();
    let mid = frame.pixel(32, 16).unwrap();
    assert!(tl[0] < 20, "{tl:?}");
    assert!(br[0] > 235, "{br:?}");
    assert!(mid[0] > 100 && mid[0] < 160, "{mid:?}");
    assert_eq!(mid[3], 255);
}

#[test]
fn gradient_sampling_clamps_outside_stops() {
    let stops = [
        GradientStop {
            offset: 0.25,
            color: Rgba8::rgb(10, 0, 0),
        },
        GradientStop {
            offset: 0.75,
            color: Rgba8::rgb(200, 0, 0),
        },
    ];
    let bytes = linear_gradient_premul(100, 1, Point::new(0.0, 0.0), Point::new(100.0, 0.0), &stops);
    assert_eq!(&bytes[0..4], &[10, 0, 0, 255]);
    assert_eq!(&bytes[99 * 4..100 * 4], &[200, 0, 0, 255]);
    assert!(linear_gradient_premul(4, 4, Point::ZERO, Point::ZERO, &[])
        .iter()
        .all(|&b| b == 0));
}

#[test]
fn image_is_stretched_into_destination() {
    let mut s = small();
    let img = DecodedImage::solid(2, 2, [0, 0, 255, 255]);
    s.draw_image(&img, Rect::new(0.0, 0.0, 32.0, 32.0)).unwrap();
    // Second draw reuses the cached paint.
    s.draw_image(&img, Rect::new(32.0, 0.0, 64.0, 32.0)).unwrap();
    let frame = s.finish().unwrap();
    assert!(close(frame.pixel(16, 16).unwrap(), [0, 0, 255, 255], 1));
    assert!(close(frame.pixel(48, 16).unwrap(), [0, 0, 255, 255], 1));
}

#[test]
fn empty_image_is_rejected() {
    let mut s = small();
    let img = DecodedImage::solid(0, 0, [0, 0, 0, 0]);
    assert!(s.draw_image(&img, Rect::new(0.0, 0.0, 1.0, 1.0)).is_err());
}

#[test]
fn text_without_fonts_is_a_font_error() {
    let mut s = small();
    assert!(!s.has_fonts());
    let style = TextStyle {
        size_px: 16.0,
        weight: FontWeight::Regular,
        color: Rgba8::BLACK,
    };
    let err = s.measure_text("a", &style).unwrap_err();
    assert!(matches!(err, CardError::Font(_)));
    let err = s
        .fill_text("a", Point::ZERO, &style, TextAlign::Left, TextBaseline::Top)
        .unwrap_err();
    assert!(matches!(err, CardError::Font(_)));
}

#[test]
fn text_paints_glyph_pixels() {
    let Some(fonts) = test_font() else {
        eprintln!("skipping: no test font available");
        return;
    };
    let mut s = small().with_fonts(&fonts).unwrap();
    let style = TextStyle {
        size_px: 24.0,
        weight: FontWeight::Bold,
        color: Rgba8::BLACK,
    };
    assert!(s.measure_text("MM", &style).unwrap() > s.measure_text("M", &style).unwrap());
    s.fill_text(
        "MM",
        Point::new(32.0, 16.0),
        &style,
        TextAlign::Center,
        TextBaseline::Middle,
    )
    .unwrap();
    let frame = s.finish().unwrap();
    assert!(frame.data.chunks_exact(4).any(|px| px[3] > 0));
}

#[test]
fn clear_discards_previous_drawing() {
    let mut s = small();
    s.fill_rect(Rect::new(0.0, 0.0, 64.0, 32.0), Rgba8::WHITE)
        .unwrap();
    s.push_clip(&rounded_rect_path(Rect::new(0.0, 0.0, 8.0, 8.0), 2.0))
        .unwrap();
    s.clear().unwrap();
    s.fill_rect(Rect::new(0.0, 0.0, 8.0, 8.0), Rgba8::BLACK)
        .unwrap();
    let frame = s.finish().unwrap();
    assert_eq!(frame.pixel(4, 4), Some([0, 0, 0, 255]));
    assert_eq!(frame.pixel(40, 20), Some([0, 0, 0, 0]));
}

#[test]
fn reused_surface_draws_each_new_image() {
    let mut s = small();
    let dest = Rect::new(0.0, 0.0, 64.0, 32.0);
    for i in 0..50u8 {
        let img = DecodedImage::solid(4, 4, [i, 0, 255 - i, 255]);
        s.clear().unwrap();
        s.draw_image(&img, dest).unwrap();
        let frame = s.finish().unwrap();
        let px = frame.pixel(32, 16).unwrap();
        assert!(close(px, [i, 0, 255 - i, 255], 1), "pass {i}: {px:?}");
    }
}

#[test]
fn dropped_image_does_not_alias_the_next() {
    let mut s = small();
    let red = DecodedImage::solid(2, 2, [255, 0, 0, 255]);
    s.draw_image(&red, Rect::new(0.0, 0.0, 32.0, 32.0)).unwrap();
    drop(red);
    let green = DecodedImage::solid(2, 2, [0, 255, 0, 255]);
    s.draw_image(&green, Rect::new(32.0, 0.0, 64.0, 32.0)).unwrap();
    let frame = s.finish().unwrap();
    assert!(close(frame.pixel(16, 16).unwrap(), [255, 0, 0, 255], 1));
    assert!(close(frame.pixel(48, 16).unwrap(), [0, 255, 0, 255], 1));
}
