//! Thumbnail generation.
//!
//! Decodes an uploaded image, narrows it to at most `max_width` pixels while
//! keeping the aspect ratio (images already narrower keep their size), and
//! re-encodes the result as JPEG.

use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use mg_core::config::ThumbnailConfig;
use mg_core::{Error, MimeType, Result};

/// A generated thumbnail. Always JPEG.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub mime_type: MimeType,
    pub data: Bytes,
}

/// Build a thumbnail from encoded JPEG or PNG bytes.
///
/// CPU-bound; async callers should run it on the blocking pool.
pub fn generate(data: &[u8], settings: &ThumbnailConfig) -> Result<Thumbnail> {
    if settings.max_width == 0 {
        return Err(Error::thumbnail("max_width must be positive"));
    }

    let img = image::load_from_memory(data)
        .map_err(|e| Error::thumbnail(format!("failed to decode image: {e}")))?;

    let img = if img.width() > settings.max_width {
        img.resize(settings.max_width, u32::MAX, FilterType::Lanczos3)
    } else {
        img
    };

    // JPEG has no alpha channel.
    let rgb = img.to_rgb8();

    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, settings.quality.clamp(1, 100))
        .encode_image(&rgb)
        .map_err(|e| Error::thumbnail(format!("failed to encode JPEG: {e}")))?;

    Ok(Thumbnail {
        mime_type: MimeType::Jpeg,
        data: Bytes::from(buf),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::encoded_image;
    use image::{GenericImageView, ImageFormat};

    fn dimensions(thumb: &Thumbnail) -> (u32, u32) {
        image::load_from_memory_with_format(&thumb.data, ImageFormat::Jpeg)
            .unwrap()
            .dimensions()
    }

    #[test]
    fn wide_image_is_narrowed_to_max_width() {
        let data = encoded_image(1200, 600, ImageFormat::Png);
        let thumb = generate(&data, &ThumbnailConfig::default()).unwrap();
        assert_eq!(thumb.mime_type, MimeType::Jpeg);
        assert_eq!(dimensions(&thumb), (300, 150));

        // Height never collapses to zero.
        let data = encoded_image(100_000, 1, ImageFormat::Png);
        let thumb = generate(&data, &ThumbnailConfig::default()).unwrap();
        assert_eq!(dimensions(&thumb), (300, 1));
    }

    #[test]
    fn narrow_image_is_not_enlarged() {
        let data = encoded_image(120, 80, ImageFormat::Jpeg);
        let thumb = generate(&data, &ThumbnailConfig::default()).unwrap();
        assert_eq!(dimensions(&thumb), (120, 80));
    }

    #[test]
    fn image_exactly_max_width_keeps_size() {
        let data = encoded_image(300, 450, ImageFormat::Png);
        let thumb = generate(&data, &ThumbnailConfig::default()).unwrap();
        assert_eq!(dimensions(&thumb), (300, 450));
    }

    #[test]
    fn output_is_jpeg_even_for_png_input() {
        let data = encoded_image(64, 64, ImageFormat::Png);
        let thumb = generate(&data, &ThumbnailConfig::default()).unwrap();
        assert!(thumb.data.starts_with(&[0xFF, 0xD8, 0xFF]));
    }

    #[test]
    fn generation_is_deterministic() {
        let data = encoded_image(900, 300, ImageFormat::Jpeg);
        let a = generate(&data, &ThumbnailConfig::default()).unwrap();
        let b = generate(&data, &ThumbnailConfig::default()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn custom_width_is_honoured() {
        let data = encoded_image(1000, 500, ImageFormat::Png);
        let settings = ThumbnailConfig {
            max_width: 100,
            quality: 50,
        };
        let thumb = generate(&data, &settings).unwrap();
        assert_eq!(dimensions(&thumb), (100, 50));
    }

    #[test]
    fn corrupt_bytes_fail_with_thumbnail_error() {
        let err = generate(b"\xFF\xD8\xFF definitely not a jpeg", &ThumbnailConfig::default())
            .unwrap_err();
        assert!(matches!(err, Error::Thumbnail(_)));
    }

    #[test]
    fn zero_width_is_rejected() {
        let data = encoded_image(10, 10, ImageFormat::Png);
        let settings = ThumbnailConfig {
            max_width: 0,
            quality: 75,
        };
        assert!(generate(&data, &settings).is_err());
    }
}
