//! The rendered chart and its encodings.

use crate::error::RenderResult;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{codecs::png::PngEncoder, ColorType, ImageEncoder};
use std::fmt;

/// The eight bytes every PNG file starts with.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Encodes an RGB pixel buffer as PNG.
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> RenderResult<Vec<u8>> {
    let mut png = Vec::new();
    PngEncoder::new(&mut png).write_image(pixels, width, height, ColorType::Rgb8)?;
    Ok(png)
}

/// An immutable PNG line chart together with its base64 text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedChart {
    png: Vec<u8>,
    encoded: String,
    width: u32,
    height: u32,
    point_count: usize,
}

impl RenderedChart {
    /// Wraps encoded PNG bytes and computes their base64 form.
    pub fn from_png(png: Vec<u8>, (width, height): (u32, u32), point_count: usize) -> Self {
        let encoded = STANDARD.encode(&png);
        Self {
            png,
            encoded,
            width,
            height,
            point_count,
        }
    }

    /// The PNG bytes.
    pub fn png_bytes(&self) -> &[u8] {
        &self.png
    }

    /// Consumes the chart, returning the PNG bytes.
    pub fn into_png(self) -> Vec<u8> {
        self.png
    }

    /// Standard, padded base64 of the PNG bytes.
    pub fn encoded(&self) -> &str {
        &self.encoded
    }

    /// `data:` URI suitable for an `img` element's `src`.
    pub fn data_uri(&self) -> String {
        format!("data:image/png;base64,{}", self.encoded)
    }

    /// `(width, height)` in pixels.
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of samples plotted.
    pub const fn point_count(&self) -> usize {
        self.point_count
    }
}

impl fmt::Display for RenderedChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_png_has_signature() {
        let pixels = vec![255u8; 2 * 2 * 3];
        let png = encode_png(&pixels, 2, 2).unwrap();
        assert_eq!(png[..8], PNG_SIGNATURE);
    }

    #[test]
    fn test_encodings() {
        let chart = RenderedChart::from_png(vec![1, 2, 3], (10, 20), 4);
        assert_eq!(chart.encoded(), "AQID");
        assert_eq!(chart.data_uri(), "data:image/png;base64,AQID");
        assert_eq!(chart.to_string(), "AQID");
        assert_eq!(chart.dimensions(), (10, 20));
        assert_eq!(chart.point_count(), 4);
        assert_eq!(chart.into_png(), vec![1, 2, 3]);
    }
}
