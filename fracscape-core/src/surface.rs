//! Drawing targets.

use crate::{PixelBuffer, VizError};

/// A drawing target with a fixed-size backing store.
pub trait DrawingSurface {
    /// Backing-store size in device pixels, as `(width, height)`.
    fn size(&self) -> (u32, u32);

    /// Erase everything currently drawn.
    fn clear(&mut self) -> Result<(), VizError>;

    /// Replace the entire surface contents with `pixels` in a single step,
    /// transparent pixels included.
    fn present(&mut self, pixels: &PixelBuffer) -> Result<(), VizError>;
}

/// Off-screen surface that keeps the last presented frame in memory.
#[derive(Clone, Debug, Default)]
pub struct MemorySurface {
    width: u32,
    height: u32,
    frame: Option<PixelBuffer>,
    presents: usize,
    clears: usize,
}

impl MemorySurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Change the backing-store size, dropping the current contents.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.frame = None;
    }

    /// The last presented frame, or `None` if the surface is clear.
    pub fn frame(&self) -> Option<&PixelBuffer> {
        self.frame.as_ref()
    }

    pub fn is_clear(&self) -> bool {
        self.frame.as_ref().map_or(true, PixelBuffer::is_blank)
    }

    pub fn present_count(&self) -> usize {
        self.presents
    }

    pub fn clear_count(&self) -> usize {
        self.clears
    }
}

impl DrawingSurface for MemorySurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self) -> Result<(), VizError> {
        self.frame = None;
        self.clears += 1;
        Ok(())
    }

    fn present(&mut self, pixels: &PixelBuffer) -> Result<(), VizError> {
        if (pixels.width(), pixels.height()) != self.size() {
            return Err(VizError::RenderFailure(format!(
                "frame is {}x{} but surface is {}x{}",
                pixels.width(),
                pixels.height(),
                self.width,
                self.height
            )));
        }
        self.frame = Some(pixels.clone());
        self.presents += 1;
        Ok(())
    }
}
