use std::borrow::Cow;

use anyhow::{Context, Result};

use crate::present::{FrameImage, PixelFormat, PixelLayout, PresentSurface, RowOrder};

use super::color::Color;

/// Owned grid of `width * height` pixels.
///
/// Invariant: `pixels.len() == width * height`.
///
/// Writes outside the grid are ignored so callers can plot without bounds checks.
#[derive(Debug, Default, Clone)]
pub struct Framebuffer {
    pixels: Vec<Color>,
    width: u32,
    height: u32,
}

impl Framebuffer {
    /// Allocates a zero-filled `width * height` buffer.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let mut fb = Self::empty();
        fb.resize(width, height)?;
        Ok(fb)
    }

    /// 0x0 buffer with no storage.
    pub const fn empty() -> Self {
        Self {
            pixels: Vec::new(),
            width: 0,
            height: 0,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Reallocates for a new drawable size.
    ///
    /// The previous storage is released before the new one is reserved, and the new
    /// buffer is zero-filled. Resizing to the current size keeps the contents.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        if self.size() == (width, height) {
            return Ok(());
        }

        let len = pixel_count(width, height)?;
        self.release();

        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .with_context(|| format!("failed to allocate {width}x{height} framebuffer"))?;
        pixels.resize(len, Color::default());

        self.pixels = pixels;
        self.width = width;
        self.height = height;

        log::debug!("framebuffer resized to {width}x{height}");
        Ok(())
    }

    /// Drops the pixel storage; the buffer becomes 0x0.
    pub fn release(&mut self) {
        self.pixels = Vec::new();
        self.width = 0;
        self.height = 0;
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = u32::try_from(x).ok()?;
        let y = u32::try_from(y).ok()?;
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Sets one pixel. Out-of-bounds coordinates are a no-op.
    #[inline]
    pub fn write_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Row-major pixels, top row first.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Pixel bytes in BGRA order.
    ///
    /// Borrowed on little-endian targets where the in-memory `u32` already matches the
    /// bitmap byte order; converted otherwise.
    pub fn as_bytes(&self) -> Cow<'_, [u8]> {
        if cfg!(target_endian = "little") {
            Cow::Borrowed(bytemuck::cast_slice(&self.pixels))
        } else {
            Cow::Owned(self.pixels.iter().flat_map(|c| c.to_bytes()).collect())
        }
    }

    pub fn layout(&self) -> PixelLayout {
        PixelLayout {
            width: self.width,
            height: self.height,
            row_stride: self.width as usize * PixelFormat::Bgra8.bytes_per_pixel(),
            orientation: RowOrder::TopDown,
            format: PixelFormat::Bgra8,
        }
    }

    /// Transfers the whole buffer to `surface`. Returns once the surface is done.
    pub fn present<S: PresentSurface + ?Sized>(&self, surface: &mut S) -> Result<()> {
        let bytes = self.as_bytes();
        surface.present(&FrameImage {
            bytes: &bytes,
            layout: self.layout(),
        })
    }
}

fn pixel_count(width: u32, height: u32) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .with_context(|| format!("framebuffer size {width}x{height} overflows"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_zeroed() {
        let fb = Framebuffer::new(4, 3).unwrap();
        assert_eq!((fb.width(), fb.height()), (4, 3));
        assert_eq!(fb.pixels().len(), 12);
        assert!(fb.pixels().iter().all(|&c| c == Color::default()));
    }

    #[test]
    fn write_then_read_back() {
        let mut fb = Framebuffer::new(8, 6).unwrap();
        let c = Color::rgb(1, 2, 3);
        fb.write_pixel(7, 5, c);
        assert_eq!(fb.pixel(7, 5), Some(c));
        assert_eq!(fb.pixels()[5 * 8 + 7], c);
    }

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut fb = Framebuffer::new(4, 4).unwrap();
        let before = fb.pixels().to_vec();

        for (x, y) in [(-1, 0), (0, -1), (4, 0), (0, 4), (i32::MIN, i32::MAX), (100, 100)] {
            fb.write_pixel(x, y, Color::WHITE);
            assert_eq!(fb.pixel(x, y), None);
        }
        assert_eq!(fb.pixels(), &before[..]);
    }

    #[test]
    fn fill_touches_every_cell() {
        let mut fb = Framebuffer::new(7, 5).unwrap();
        fb.fill(Color::GREEN);
        assert_eq!(fb.pixels().len(), 35);
        assert_eq!(fb.pixels().iter().filter(|&&c| c == Color::GREEN).count(), 35);
    }

    #[test]
    fn resize_reallocates_and_zero_fills() {
        let mut fb = Framebuffer::new(2, 2).unwrap();
        fb.fill(Color::WHITE);

        fb.resize(3, 5).unwrap();
        assert_eq!(fb.size(), (3, 5));
        assert_eq!(fb.pixels().len(), 15);
        assert!(fb.pixels().iter().all(|&c| c == Color::default()));
    }

    #[test]
    fn resize_to_same_size_keeps_contents() {
        let mut fb = Framebuffer::new(2, 2).unwrap();
        fb.fill(Color::BLUE);
        fb.resize(2, 2).unwrap();
        assert_eq!(fb.pixel(1, 1), Some(Color::BLUE));
    }

    #[test]
    fn zero_sized_buffer_is_allowed() {
        let mut fb = Framebuffer::new(0, 10).unwrap();
        assert!(fb.is_empty());
        fb.write_pixel(0, 0, Color::RED);
        fb.fill(Color::RED);
        assert_eq!(fb.pixel(0, 0), None);
    }

    #[test]
    fn release_drops_storage() {
        let mut fb = Framebuffer::new(16, 16).unwrap();
        fb.release();
        assert_eq!(fb.size(), (0, 0));
        assert!(fb.is_empty());
    }

    #[test]
    fn layout_describes_top_down_bgra_rows() {
        let fb = Framebuffer::new(10, 4).unwrap();
        let layout = fb.layout();
        assert_eq!(layout.row_stride, 40);
        assert_eq!(layout.orientation, RowOrder::TopDown);
        assert_eq!(layout.format, PixelFormat::Bgra8);
        assert_eq!(fb.as_bytes().len(), 160);
    }

    #[test]
    fn bytes_are_bgra() {
        let mut fb = Framebuffer::new(2, 1).unwrap();
        fb.write_pixel(0, 0, Color::RED);
        fb.write_pixel(1, 0, Color::BLUE);
        assert_eq!(&fb.as_bytes()[..], &[0, 0, 0xFF, 0, 0xFF, 0, 0, 0]);
    }
}
