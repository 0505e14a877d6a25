//! Image XObject creation
//!
//! Decoded images are re-encoded as JPEG and embedded with the `DCTDecode`
//! filter. Transparent pixels are flattened onto white first.

use crate::types::Result;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType};
use lopdf::{Dictionary, Object, Stream};

/// Encoded image ready to become an XObject stream
#[derive(Debug, Clone)]
pub struct ImageXObject {
    pub width: u32,
    pub height: u32,
    /// "DeviceGray" or "DeviceRGB"
    pub color_space: &'static str,
    /// JPEG bytes
    pub data: Vec<u8>,
}

impl ImageXObject {
    /// Encode a decoded image at the given JPEG quality (1..=100)
    pub fn from_image(image: &DynamicImage, quality: u8) -> Result<Self> {
        let (width, height) = (image.width(), image.height());
        let (raw, color_space, color_type) = flatten(image);

        let mut data = Vec::new();
        JpegEncoder::new_with_quality(&mut data, quality).encode(
            &raw,
            width,
            height,
            color_type,
        )?;

        Ok(Self {
            width,
            height,
            color_space,
            data,
        })
    }

    /// Convert to lopdf Stream object
    pub fn to_pdf_stream(&self) -> Stream {
        let mut dict = Dictionary::new();
        dict.set("Type", Object::Name(b"XObject".to_vec()));
        dict.set("Subtype", Object::Name(b"Image".to_vec()));
        dict.set("Width", self.width as i64);
        dict.set("Height", self.height as i64);
        dict.set(
            "ColorSpace",
            Object::Name(self.color_space.as_bytes().to_vec()),
        );
        dict.set("BitsPerComponent", 8_i64);
        dict.set("Filter", Object::Name(b"DCTDecode".to_vec()));

        // Already compressed; flate on top only costs time
        Stream::new(dict, self.data.clone()).with_compression(false)
    }
}

/// Raw 8-bit samples with alpha blended onto white
fn flatten(image: &DynamicImage) -> (Vec<u8>, &'static str, ExtendedColorType) {
    let has_alpha = image.color().has_alpha();
    let is_gray = !image.color().has_color();

    match (is_gray, has_alpha) {
        (true, false) => (image.to_luma8().into_raw(), "DeviceGray", ExtendedColorType::L8),
        (true, true) => {
            let la = image.to_luma_alpha8();
            let gray = la
                .pixels()
                .map(|p| blend_on_white(p[0], p[1]))
                .collect();
            (gray, "DeviceGray", ExtendedColorType::L8)
        }
        (false, false) => (image.to_rgb8().into_raw(), "DeviceRGB", ExtendedColorType::Rgb8),
        (false, true) => {
            let rgba = image.to_rgba8();
            let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
            for p in rgba.pixels() {
                rgb.push(blend_on_white(p[0], p[3]));
                rgb.push(blend_on_white(p[1], p[3]));
                rgb.push(blend_on_white(p[2], p[3]));
            }
            (rgb, "DeviceRGB", ExtendedColorType::Rgb8)
        }
    }
}

fn blend_on_white(value: u8, alpha: u8) -> u8 {
    let a = alpha as f32 / 255.0;
    (value as f32 * a + 255.0 * (1.0 - a)).round() as u8
}
