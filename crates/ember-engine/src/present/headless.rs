use anyhow::{ensure, Result};

use super::{FrameImage, PixelLayout, PresentSurface};

/// Surface without a display.
///
/// Keeps a copy of the most recently presented frame; used for `--headless-frames` runs and
/// tests. The drawable size is whatever was last set with [`HeadlessSurface::resize`].
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    size: (u32, u32),
    last_frame: Vec<u8>,
    last_layout: Option<PixelLayout>,
    presented: u64,
}

impl HeadlessSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            ..Self::default()
        }
    }

    /// Simulates a window resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    /// Number of completed `present` calls.
    pub fn presented(&self) -> u64 {
        self.presented
    }

    pub fn last_layout(&self) -> Option<PixelLayout> {
        self.last_layout
    }

    pub fn last_frame(&self) -> &[u8] {
        &self.last_frame
    }

    /// BGRA bytes of pixel (x, y) in the last frame.
    pub fn pixel_bytes(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let layout = self.last_layout?;
        if x >= layout.width || y >= layout.height {
            return None;
        }
        let bpp = layout.format.bytes_per_pixel();
        let start = y as usize * layout.row_stride + x as usize * bpp;
        let px = self.last_frame.get(start..start + bpp)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

impl PresentSurface for HeadlessSurface {
    fn drawable_size(&self) -> (u32, u32) {
        self.size
    }

    fn present(&mut self, image: &FrameImage<'_>) -> Result<()> {
        ensure!(
            image.bytes.len() >= image.layout.byte_len(),
            "frame has {} bytes, layout needs {}",
            image.bytes.len(),
            image.layout.byte_len()
        );

        self.last_frame.clear();
        self.last_frame.extend_from_slice(image.bytes);
        self.last_layout = Some(image.layout);
        self.presented += 1;

        log::trace!(
            "headless present #{} ({}x{})",
            self.presented,
            image.layout.width,
            image.layout.height
        );
        Ok(())
    }
}
