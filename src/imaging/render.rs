//! Adjustment renderer
//!
//! Bakes pending brightness/contrast/saturation values into a new snapshot.
//! The three filters follow the CSS filter definitions so a baked export
//! matches what the sliders previewed:
//! - brightness(p): linear multiply of each channel
//! - contrast(p): scale around mid-gray
//! - saturate(p): interpolate between luminance gray and the source color
//!
//! All three are channel-independent multiplicative transforms applied as a
//! single combined pass per pixel, brightness → contrast → saturation.
//!
//! Neutral settings (100/100/100) short-circuit: the input snapshot is
//! returned unchanged, byte-identical, with no decode or re-encode.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, RgbaImage};
use tokio::task;

use crate::error::RenderError;
use crate::state::adjust::Adjustments;

use super::snapshot::Snapshot;

/// Longest edge of the slider preview render
pub const PREVIEW_MAX_DIM: u32 = 1280;

// Rec. 709-style luminance weights used by the CSS saturate() matrix
const LUMA_R: f32 = 0.213;
const LUMA_G: f32 = 0.715;
const LUMA_B: f32 = 0.072;

/// Bake adjustments into a new full-resolution snapshot
///
/// Pure with respect to its input: the source snapshot is never mutated.
/// CPU-bound work runs on a blocking task.
pub async fn apply_adjustments(
    snapshot: &Snapshot,
    adjustments: Adjustments,
) -> Result<Snapshot, RenderError> {
    if adjustments.is_neutral() {
        // Identity: reuse the exact source bytes instead of re-encoding
        return Ok(snapshot.clone());
    }

    let snapshot = snapshot.clone();
    task::spawn_blocking(move || apply_adjustments_blocking(&snapshot, adjustments)).await?
}

/// Render a downscaled PNG preview of the current snapshot with the pending
/// adjustments applied, for live display while the sliders move
pub async fn render_preview(
    snapshot: &Snapshot,
    adjustments: Adjustments,
) -> Result<Vec<u8>, RenderError> {
    let snapshot = snapshot.clone();
    task::spawn_blocking(move || {
        let (_, source) = decode_snapshot(&snapshot)?;
        let mut preview = source.thumbnail(PREVIEW_MAX_DIM, PREVIEW_MAX_DIM).to_rgba8();
        filter_pixels(&mut preview, adjustments);

        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(preview)
            .write_to(&mut out, ImageFormat::Png)
            .map_err(RenderError::Encode)?;
        Ok(out.into_inner())
    })
    .await?
}

fn apply_adjustments_blocking(
    snapshot: &Snapshot,
    adjustments: Adjustments,
) -> Result<Snapshot, RenderError> {
    let (source_format, source) = decode_snapshot(snapshot)?;
    let mut rgba = source.to_rgba8();

    filter_pixels(&mut rgba, adjustments);

    // Re-encode in the source format where the encoder supports it,
    // falling back to PNG otherwise (mirrors canvas.toDataURL behavior)
    let (target_format, target_mime) = encode_target(source_format, snapshot.mime_type());

    let result = DynamicImage::ImageRgba8(rgba);
    let result = if target_format == ImageFormat::Jpeg {
        // The JPEG encoder rejects alpha
        DynamicImage::ImageRgb8(result.to_rgb8())
    } else {
        result
    };

    let mut out = Cursor::new(Vec::new());
    result
        .write_to(&mut out, target_format)
        .map_err(RenderError::Encode)?;

    println!(
        "🎛️  Baked adjustments b={} c={} s={} → {} bytes ({})",
        adjustments.brightness,
        adjustments.contrast,
        adjustments.saturation,
        out.get_ref().len(),
        target_mime,
    );

    Ok(Snapshot::from_bytes(out.get_ref(), &target_mime))
}

fn decode_snapshot(snapshot: &Snapshot) -> Result<(ImageFormat, DynamicImage), RenderError> {
    let bytes = snapshot.decode()?;
    let format = image::guess_format(&bytes).map_err(RenderError::Decode)?;
    let image =
        image::load_from_memory_with_format(&bytes, format).map_err(RenderError::Decode)?;
    Ok((format, image))
}

/// The single combined filter pass, brightness → contrast → saturation
fn filter_pixels(rgba: &mut RgbaImage, adjustments: Adjustments) {
    let (brightness, contrast, saturation) = adjustments.factors();

    for pixel in rgba.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        let mut channels = [
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
        ];

        for value in &mut channels {
            *value *= brightness;
            *value = (*value - 0.5) * contrast + 0.5;
        }

        let luma = LUMA_R * channels[0] + LUMA_G * channels[1] + LUMA_B * channels[2];
        for value in &mut channels {
            *value = luma + (*value - luma) * saturation;
        }

        pixel.0 = [
            to_u8(channels[0]),
            to_u8(channels[1]),
            to_u8(channels[2]),
            a,
        ];
    }
}

fn to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Pick the output format, keeping the source format when it is writable
fn encode_target(source: ImageFormat, source_mime: &str) -> (ImageFormat, String) {
    match source {
        ImageFormat::Png
        | ImageFormat::Jpeg
        | ImageFormat::WebP
        | ImageFormat::Bmp
        | ImageFormat::Tiff => (source, source_mime.to_string()),
        _ => (ImageFormat::Png, "image/png".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Encode a tiny RGBA image into a PNG snapshot
    fn png_snapshot(pixels: &[[u8; 4]]) -> Snapshot {
        let width = pixels.len() as u32;
        let mut img = RgbaImage::new(width, 1);
        for (x, p) in pixels.iter().enumerate() {
            img.put_pixel(x as u32, 0, image::Rgba(*p));
        }
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        Snapshot::from_bytes(out.get_ref(), "image/png")
    }

    fn rendered_pixels(snapshot: &Snapshot) -> Vec<[u8; 4]> {
        let bytes = snapshot.decode().unwrap();
        let img = image::load_from_memory(&bytes).unwrap().to_rgba8();
        img.pixels().map(|p| p.0).collect()
    }

    #[tokio::test]
    async fn test_neutral_is_byte_identical() {
        let snapshot = png_snapshot(&[[10, 20, 30, 255]]);
        let rendered = apply_adjustments(&snapshot, Adjustments::default())
            .await
            .unwrap();

        // Identity contract: the exact same data URI, not a re-encode
        assert_eq!(rendered.as_data_uri(), snapshot.as_data_uri());
    }

    #[tokio::test]
    async fn test_brightness_doubles_channels() {
        let snapshot = png_snapshot(&[[100, 50, 25, 255]]);
        let adjustments = Adjustments {
            brightness: 200,
            contrast: 100,
            saturation: 100,
        };

        let rendered = apply_adjustments(&snapshot, adjustments).await.unwrap();
        let pixels = rendered_pixels(&rendered);

        assert_eq!(pixels[0], [200, 100, 50, 255]);
    }

    #[tokio::test]
    async fn test_brightness_clamps_at_white() {
        let snapshot = png_snapshot(&[[200, 200, 200, 255]]);
        let adjustments = Adjustments {
            brightness: 200,
            contrast: 100,
            saturation: 100,
        };

        let rendered = apply_adjustments(&snapshot, adjustments).await.unwrap();
        assert_eq!(rendered_pixels(&rendered)[0], [255, 255, 255, 255]);
    }

    #[tokio::test]
    async fn test_zero_saturation_is_grayscale() {
        let snapshot = png_snapshot(&[[255, 0, 0, 255]]);
        let adjustments = Adjustments {
            brightness: 100,
            contrast: 100,
            saturation: 0,
        };

        let rendered = apply_adjustments(&snapshot, adjustments).await.unwrap();
        let [r, g, b, a] = rendered_pixels(&rendered)[0];

        // Pure red collapses to its luminance weight: 0.213 * 255 ≈ 54
        assert_eq!(r, g);
        assert_eq!(g, b);
        assert_eq!(r, 54);
        assert_eq!(a, 255);
    }

    #[tokio::test]
    async fn test_zero_contrast_flattens_to_gray() {
        let snapshot = png_snapshot(&[[0, 0, 0, 255], [255, 255, 255, 255]]);
        let adjustments = Adjustments {
            brightness: 100,
            contrast: 0,
            saturation: 100,
        };

        let rendered = apply_adjustments(&snapshot, adjustments).await.unwrap();
        let pixels = rendered_pixels(&rendered);

        assert_eq!(pixels[0], [128, 128, 128, 255]);
        assert_eq!(pixels[1], [128, 128, 128, 255]);
    }

    #[tokio::test]
    async fn test_alpha_is_preserved() {
        let snapshot = png_snapshot(&[[100, 100, 100, 77]]);
        let adjustments = Adjustments {
            brightness: 150,
            contrast: 100,
            saturation: 100,
        };

        let rendered = apply_adjustments(&snapshot, adjustments).await.unwrap();
        assert_eq!(rendered_pixels(&rendered)[0][3], 77);
    }

    #[tokio::test]
    async fn test_output_keeps_png_mime() {
        let snapshot = png_snapshot(&[[1, 2, 3, 255]]);
        let adjustments = Adjustments {
            brightness: 110,
            contrast: 100,
            saturation: 100,
        };

        let rendered = apply_adjustments(&snapshot, adjustments).await.unwrap();
        assert_eq!(rendered.mime_type(), "image/png");
    }

    #[tokio::test]
    async fn test_render_rejects_garbage_bytes() {
        let snapshot = Snapshot::from_bytes(b"definitely not an image", "image/png");
        let adjustments = Adjustments {
            brightness: 150,
            contrast: 100,
            saturation: 100,
        };

        let result = apply_adjustments(&snapshot, adjustments).await;
        assert!(matches!(result, Err(RenderError::Decode(_))));
    }

    #[tokio::test]
    async fn test_preview_is_png_and_bounded() {
        let snapshot = png_snapshot(&[[10, 20, 30, 255]]);
        let adjustments = Adjustments {
            brightness: 120,
            contrast: 100,
            saturation: 100,
        };

        let bytes = render_preview(&snapshot, adjustments).await.unwrap();
        let preview = image::load_from_memory(&bytes).unwrap();
        assert!(preview.width() <= PREVIEW_MAX_DIM);
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Png);
    }
}
