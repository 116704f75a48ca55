use crate::VizError;

/// RGBA pixel data in row-major order, 4 bytes per pixel.
///
/// A new buffer is fully transparent, which is what a cleared canvas holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Allocate a transparent `width` x `height` buffer.
    pub fn new(width: u32, height: u32) -> Result<Self, VizError> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(4))
            .ok_or_else(|| {
                VizError::RenderFailure(format!("{width}x{height} surface is too large"))
            })?;

        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|e| {
            VizError::RenderFailure(format!("cannot allocate {width}x{height} pixels: {e}"))
        })?;
        data.resize(len, 0);

        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| (y as usize * self.width as usize + x as usize) * 4)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let i = self.offset(x, y)?;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Write one pixel. Out-of-range coordinates are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if let Some(i) = self.offset(x, y) {
            self.data[i..i + 4].copy_from_slice(&rgba);
        }
    }

    /// Composite `rgba` over the current pixel (source-over, straight alpha).
    pub fn blend_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let Some(i) = self.offset(x, y) else {
            return;
        };
        let src_a = f32::from(rgba[3]) / 255.0;
        let dst_a = f32::from(self.data[i + 3]) / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        if out_a <= 0.0 {
            return;
        }
        for c in 0..3 {
            let src = f32::from(rgba[c]) * src_a;
            let dst = f32::from(self.data[i + c]) * dst_a * (1.0 - src_a);
            self.data[i + c] = ((src + dst) / out_a).round() as u8;
        }
        self.data[i + 3] = (out_a * 255.0).round() as u8;
    }

    /// Number of pixels with non-zero alpha.
    pub fn painted_pixels(&self) -> usize {
        self.data.chunks_exact(4).filter(|px| px[3] != 0).count()
    }

    pub fn is_blank(&self) -> bool {
        self.painted_pixels() == 0
    }
}
