use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    pub canonical_width: u32,
    pub canonical_height: u32,
    /// frames whose mean channel value falls below this are brightened
    pub low_light_threshold: f32,
    pub target_brightness: f32,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            canonical_width: 640,
            canonical_height: 480,
            low_light_threshold: 60.0,
            target_brightness: 120.0,
        }
    }
}

/// Equalizes luminance, resizes to the canonical resolution and lifts
/// underexposed frames.
pub fn normalize_frame(image: &DynamicImage, config: &PreprocessConfig) -> RgbImage {
    let equalized = equalize_luminance(&image.to_rgb8());

    let mut resized = imageops::resize(
        &equalized,
        config.canonical_width,
        config.canonical_height,
        FilterType::Triangle,
    );

    let mean = mean_brightness(&resized);
    if mean < config.low_light_threshold {
        let factor = config.target_brightness / (mean + 1e-6);
        debug!(mean, factor, "boosting low-light frame");
        scale_channels(&mut resized, factor);
    }

    resized
}

pub fn mean_brightness(image: &RgbImage) -> f32 {
    let raw = image.as_raw();
    if raw.is_empty() {
        return 0.0;
    }
    let sum: u64 = raw.iter().map(|&v| v as u64).sum();
    (sum as f64 / raw.len() as f64) as f32
}

// rgb -> yuv (bt.601), equalize y, back to rgb
fn equalize_luminance(rgb: &RgbImage) -> RgbImage {
    let (width, height) = rgb.dimensions();
    let mut luma = Vec::with_capacity((width * height) as usize);
    let mut chroma = Vec::with_capacity((width * height) as usize);

    for pixel in rgb.pixels() {
        let [r, g, b] = pixel.0.map(|c| c as f32);
        let y_ = 0.299 * r + 0.587 * g + 0.114 * b;
        let u = 0.492 * (b - y_);
        let v = 0.877 * (r - y_);
        luma.push(clamp_channel(y_));
        chroma.push((u, v));
    }

    let lut = equalization_lut(&luma);

    let mut out = RgbImage::new(width, height);
    for ((pixel, y_), (u, v)) in out.pixels_mut().zip(luma).zip(chroma) {
        let y_ = lut[y_ as usize] as f32;
        let r = y_ + 1.140 * v;
        let g = y_ - 0.395 * u - 0.581 * v;
        let b = y_ + 2.032 * u;
        *pixel = image::Rgb([clamp_channel(r), clamp_channel(g), clamp_channel(b)]);
    }
    out
}

// the darkest occupied level maps to 0 and the brightest to 255;
// a single-level image is left as it is
fn equalization_lut(luma: &[u8]) -> [u8; 256] {
    let mut histogram = [0u32; 256];
    for &v in luma {
        histogram[v as usize] += 1;
    }

    let mut lut = [0u8; 256];
    let total = luma.len() as u32;
    let Some(first) = histogram.iter().position(|&count| count > 0) else {
        return lut;
    };
    if histogram[first] == total {
        for (level, slot) in lut.iter_mut().enumerate() {
            *slot = level as u8;
        }
        return lut;
    }

    let scale = 255.0 / (total - histogram[first]) as f32;
    let mut cumulative = histogram[first];
    for level in first + 1..256 {
        cumulative += histogram[level];
        lut[level] = clamp_channel((cumulative - histogram[first]) as f32 * scale);
    }
    lut
}

fn scale_channels(image: &mut RgbImage, factor: f32) {
    for value in image.iter_mut() {
        *value = (*value as f32 * factor).clamp(0.0, 255.0) as u8;
    }
}

fn clamp_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
