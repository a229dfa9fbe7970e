// 魔数探测性质测试：任意尾部字节都不影响前缀判定
use iconkit::icon::{ImageFormat, detect_format};
use proptest::prelude::*;

const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF];
const ICO: &[u8] = &[0x00, 0x00, 0x01, 0x00];

fn with_prefix(prefix: &[u8], tail: &[u8]) -> Vec<u8> {
    let mut bytes = prefix.to_vec();
    bytes.extend_from_slice(tail);
    bytes
}

#[test]
fn exact_signatures_without_trailing_bytes() {
    assert_eq!(detect_format(PNG), ImageFormat::Png);
    assert_eq!(detect_format(JPEG), ImageFormat::Jpeg);
    assert_eq!(detect_format(ICO), ImageFormat::Ico);
    assert_eq!(detect_format(b"BM"), ImageFormat::Bmp);
    assert_eq!(detect_format(b"RIFF\0\0\0\0WEBP"), ImageFormat::WebP);
}

#[test]
fn plain_text_is_unknown() {
    assert_eq!(detect_format(b"hello world"), ImageFormat::Unknown);
    assert_eq!(detect_format(b"<svg xmlns=\"http://www.w3.org/2000/svg\"/>"), ImageFormat::Unknown);
}

proptest! {
    #[test]
    fn detection_is_total_and_deterministic(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let first = detect_format(&bytes);
        let second = detect_format(&bytes);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn png_prefix_is_sufficient(tail in prop::collection::vec(any::<u8>(), 0..64)) {
        prop_assert_eq!(detect_format(&with_prefix(PNG, &tail)), ImageFormat::Png);
    }

    #[test]
    fn jpeg_prefix_is_sufficient(tail in prop::collection::vec(any::<u8>(), 0..64)) {
        prop_assert_eq!(detect_format(&with_prefix(JPEG, &tail)), ImageFormat::Jpeg);
    }

    #[test]
    fn bmp_prefix_is_sufficient(tail in prop::collection::vec(any::<u8>(), 0..64)) {
        prop_assert_eq!(detect_format(&with_prefix(b"BM", &tail)), ImageFormat::Bmp);
    }

    #[test]
    fn ico_prefix_is_sufficient(tail in prop::collection::vec(any::<u8>(), 0..64)) {
        prop_assert_eq!(detect_format(&with_prefix(ICO, &tail)), ImageFormat::Ico);
    }

    #[test]
    fn webp_container_is_detected_for_any_size_field(
        riff_size in any::<u32>(),
        tail in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        let mut bytes = b"RIFF".to_vec();
        bytes.extend_from_slice(&riff_size.to_le_bytes());
        bytes.extend_from_slice(b"WEBP");
        bytes.extend_from_slice(&tail);

        prop_assert_eq!(detect_format(&bytes), ImageFormat::WebP);
    }

    #[test]
    fn inputs_shorter_than_two_bytes_are_unknown(bytes in prop::collection::vec(any::<u8>(), 0..2)) {
        prop_assert_eq!(detect_format(&bytes), ImageFormat::Unknown);
    }
}
