/// Row order of a pixel buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RowOrder {
    /// First row in memory is the top of the image.
    TopDown,
    /// First row in memory is the bottom of the image.
    BottomUp,
}

/// Per-pixel byte layout.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PixelFormat {
    /// 4 bytes per pixel: blue, green, red, unused.
    Bgra8,
}

impl PixelFormat {
    #[inline]
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Bgra8 => 4,
        }
    }
}

/// Everything a surface needs to interpret raw pixel bytes.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PixelLayout {
    pub width: u32,
    pub height: u32,
    /// Bytes between the starts of two consecutive rows.
    pub row_stride: usize,
    pub orientation: RowOrder,
    pub format: PixelFormat,
}

impl PixelLayout {
    /// Total byte length implied by the layout.
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.row_stride * self.height as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Borrowed pixel bytes plus their layout.
#[derive(Debug, Copy, Clone)]
pub struct FrameImage<'a> {
    pub bytes: &'a [u8],
    pub layout: PixelLayout,
}
