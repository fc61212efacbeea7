use super::*;

fn frame(premultiplied: bool) -> FrameRGBA {
    FrameRGBA {
        width: 2,
        height: 1,
        data: vec![255, 0, 0, 255, 64, 64, 64, 128],
        premultiplied,
    }
}

#[test]
fn png_decodes_back_to_same_pixels() {
    let bytes = encode_png(&frame(false)).unwrap();
    assert_eq!(&bytes[1..4], b"PNG");
    let img = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (2, 1));
    assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 255]);
    assert_eq!(img.get_pixel(1, 0).0, [64, 64, 64, 128]);
}

#[test]
fn premultiplied_frames_are_converted() {
    let bytes = encode_png(&frame(true)).unwrap();
    let img = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(img.get_pixel(1, 0).0, [128, 128, 128, 128]);
}

#[test]
fn mismatched_length_is_rejected() {
    let mut f = frame(false);
    f.data.pop();
    assert!(matches!(encode_png(&f), Err(CardError::Render(_))));
}

#[test]
fn write_png_creates_parent_dirs() {
    let dir = std::env::temp_dir().join(format!("profile-card-png-{}", std::process::id()));
    let path = dir.join("nested").join("out.png");
    write_png(&frame(false), &path).unwrap();
    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 255]);
    let _ = std::fs::remove_dir_all(&dir);
}
