//! Integration tests for jsharp crates.
//!
//! End-to-end checks of decode -> filter -> encode across `jsharp-io` and
//! `jsharp-ops`.

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use jsharp_core::{ColorType, Image};
    use jsharp_io::{fs, jpeg};
    use jsharp_ops::{Method, filter, sharpness};
    use tempfile::tempdir;

    /// Soft horizontal ramp with a blurred vertical edge in the middle.
    fn soft_edge(color_type: ColorType) -> Image {
        Image::from_fn(64, 48, color_type, |x, y, c| {
            let edge = match x {
                0..=27 => 60,
                28..=35 => 60 + (x as u32 - 27) * 16,
                _ => 188,
            };
            (edge + (y as u32 % 4) + c as u32 * 5) as u8
        })
        .unwrap()
    }

    fn assert_border_equal(a: &Image, b: &Image) {
        assert!(a.same_shape(b));
        for y in 0..a.height() as usize {
            for x in 0..a.width() as usize {
                if a.is_border(x, y) {
                    assert_eq!(a.pixel(x, y), b.pixel(x, y), "border pixel ({x}, {y})");
                }
            }
        }
    }

    /// Full pipeline: write source JPEG, read, sharpen, write, read back.
    #[test]
    fn test_pipeline_rgb_unsharp() {
        let dir = tempdir().unwrap();
        let src_path = dir.path().join("in.jpg");
        let dst_path = dir.path().join("out").join("in.jpg");

        jpeg::write(&src_path, &soft_edge(ColorType::Rgb), 95).expect("write source");
        fs::ensure_dir(dst_path.parent().unwrap()).unwrap();

        let decoded = jpeg::read(&src_path).expect("read source");
        let sharpened = Method::default().apply(&decoded).expect("sharpen");
        assert_border_equal(&decoded, &sharpened);

        jpeg::write(&dst_path, &sharpened, 95).expect("write result");
        let reloaded = jpeg::read(&dst_path).expect("read result");
        assert_eq!(reloaded.width(), 64);
        assert_eq!(reloaded.height(), 48);
        assert_eq!(reloaded.color_type(), ColorType::Rgb);
    }

    #[test]
    fn test_pipeline_gray_laplacian() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gray.jpg");

        jpeg::write(&path, &soft_edge(ColorType::Gray), 95).unwrap();
        let decoded = jpeg::read(&path).unwrap();
        assert_eq!(decoded.color_type(), ColorType::Gray);

        let sharpened = filter::sharpen(&decoded).unwrap();
        assert_border_equal(&decoded, &sharpened);
        assert_ne!(decoded, sharpened);
    }

    #[test]
    fn test_sharpening_raises_tenengrad() {
        let src = soft_edge(ColorType::Gray);
        let before = sharpness::tenengrad(&src);

        let unsharp = filter::unsharp_mask(&src, 1.35).unwrap();
        let laplacian = filter::sharpen(&src).unwrap();

        assert!(sharpness::tenengrad(&unsharp) > before);
        assert!(sharpness::tenengrad(&laplacian) > before);
    }

    #[test]
    fn test_zero_amount_is_identity_after_decode() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("id.jpg");
        jpeg::write(&path, &soft_edge(ColorType::Rgb), 90).unwrap();

        let decoded = jpeg::read(&path).unwrap();
        let out = Method::UnsharpMask { amount: 0.0 }.apply(&decoded).unwrap();
        assert_eq!(out, decoded);
        assert_relative_eq!(sharpness::tenengrad(&out), sharpness::tenengrad(&decoded));
    }

    #[test]
    fn test_tiny_images_pass_through() {
        let dir = tempdir().unwrap();
        for (w, h) in [(1, 1), (2, 5), (5, 2)] {
            let path = dir.path().join(format!("tiny_{w}x{h}.jpg"));
            let img = Image::from_fn(w, h, ColorType::Rgb, |x, y, c| (x * 40 + y * 20 + c) as u8)
                .unwrap();
            jpeg::write(&path, &img, 95).unwrap();

            let decoded = jpeg::read(&path).unwrap();
            assert_eq!(filter::sharpen(&decoded).unwrap(), decoded);
            assert_eq!(filter::unsharp_mask(&decoded, 1.35).unwrap(), decoded);
        }
    }

    #[test]
    fn test_gray_and_rgb_of_same_plane_agree() {
        let gray = soft_edge(ColorType::Gray);
        let rgb = Image::from_fn(gray.width(), gray.height(), ColorType::Rgb, |x, y, _| {
            gray.sample(x, y, 0)
        })
        .unwrap();

        let g = filter::unsharp_mask(&gray, 1.35).unwrap();
        let c = filter::unsharp_mask(&rgb, 1.35).unwrap();
        for y in 0..g.height() as usize {
            for x in 0..g.width() as usize {
                assert!(c.pixel(x, y).iter().all(|&v| v == g.sample(x, y, 0)));
            }
        }
    }
}
