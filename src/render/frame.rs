use anyhow::Context;

use crate::foundation::{
    core::Rgba8,
    error::{SublineError, SublineResult},
};

/// Owned RGBA8 pixel buffer for one output frame plus its presentation
/// timestamp.
///
/// Pixels are row-major premultiplied RGBA8, the same convention the
/// compositor rasterizes overlays in. For the fully opaque frames a video
/// decoder hands over, premultiplied and straight bytes are identical, so
/// buffers can be passed through without conversion. The frame is exclusively
/// owned by the caller for the duration of one compositing call; the
/// compositor mutates it in place and keeps nothing across calls.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderFrame {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes, `width * height * 4` long.
    pub data: Vec<u8>,
    /// Presentation timestamp in seconds.
    pub t_sec: f64,
}

impl RenderFrame {
    /// Fully transparent frame of the given size.
    pub fn new(width: u32, height: u32, t_sec: f64) -> SublineResult<Self> {
        let len = checked_len(width, height)?;
        check_time(t_sec)?;
        Ok(Self {
            width,
            height,
            data: vec![0; len],
            t_sec,
        })
    }

    /// Frame filled with a single color.
    pub fn solid(width: u32, height: u32, color: Rgba8, t_sec: f64) -> SublineResult<Self> {
        let mut frame = Self::new(width, height, t_sec)?;
        let px = premul(color.to_array());
        for chunk in frame.data.chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
        Ok(frame)
    }

    /// Wrap an existing RGBA8 buffer.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>, t_sec: f64) -> SublineResult<Self> {
        let len = checked_len(width, height)?;
        check_time(t_sec)?;
        if data.len() != len {
            return Err(SublineError::validation(format!(
                "frame buffer is {} bytes, expected {len} for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
            t_sec,
        })
    }

    /// Decode encoded image bytes (PNG, JPEG, ...) into a frame, converting
    /// to premultiplied RGBA8.
    pub fn decode_image(bytes: &[u8], t_sec: f64) -> SublineResult<Self> {
        check_time(t_sec)?;
        let dyn_img = image::load_from_memory(bytes)
            .context("decode image from memory")
            .map_err(SublineError::from)?;
        let rgba = dyn_img.to_rgba8();
        let (width, height) = rgba.dimensions();
        checked_len(width, height)?;

        let mut data = rgba.into_raw();
        for px in data.chunks_exact_mut(4) {
            let p = premul([px[0], px[1], px[2], px[3]]);
            px.copy_from_slice(&p);
        }
        Ok(Self {
            width,
            height,
            data,
            t_sec,
        })
    }

    /// Encode the frame as PNG bytes (straight alpha).
    pub fn encode_png(&self) -> SublineResult<Vec<u8>> {
        let mut straight = self.data.clone();
        for px in straight.chunks_exact_mut(4) {
            let p = unpremul([px[0], px[1], px[2], px[3]]);
            px.copy_from_slice(&p);
        }
        let img = image::RgbaImage::from_raw(self.width, self.height, straight)
            .ok_or_else(|| SublineError::validation("frame buffer length mismatch"))?;

        let mut out = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut std::io::Cursor::new(&mut out), image::ImageFormat::Png)
            .context("encode png")
            .map_err(SublineError::from)?;
        Ok(out)
    }

    /// Pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some([
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ])
    }
}

fn checked_len(width: u32, height: u32) -> SublineResult<usize> {
    if width == 0 || height == 0 {
        return Err(SublineError::validation("frame width/height must be > 0"));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| SublineError::validation("frame byte size overflow"))
}

fn check_time(t_sec: f64) -> SublineResult<()> {
    if !t_sec.is_finite() {
        return Err(SublineError::validation("frame timestamp must be finite"));
    }
    Ok(())
}

fn premul(rgba: [u8; 4]) -> [u8; 4] {
    let [r, g, b, a] = rgba;
    if a == 0 {
        return [0, 0, 0, 0];
    }
    let a16 = u16::from(a);
    let p = |c: u8| -> u8 { ((u16::from(c) * a16 + 127) / 255) as u8 };
    [p(r), p(g), p(b), a]
}

fn unpremul(rgba: [u8; 4]) -> [u8; 4] {
    let [r, g, b, a] = rgba;
    if a == 0 {
        return [0, 0, 0, 0];
    }
    let a16 = u32::from(a);
    let u = |c: u8| -> u8 { ((u32::from(c) * 255 + a16 / 2) / a16).min(255) as u8 };
    [u(r), u(g), u(b), a]
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
