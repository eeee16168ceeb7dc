// Screen buffer - the engine-owned pixel buffer the renderer reads from
//
// The engine writes one packed 24-bit RGB value per pixel, row-major.
// Dimensions are fixed at construction and never change afterwards. The
// renderer re-reads the current contents on every draw call and makes no
// assumption about double buffering.

/// Native engine screen width in pixels
pub const SCREEN_WIDTH: usize = 640;

/// Native engine screen height in pixels
pub const SCREEN_HEIGHT: usize = 400;

/// Pixel buffer of packed `0x00RRGGBB` values
pub struct ScreenBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl ScreenBuffer {
    /// Create a buffer at the native engine resolution, cleared to black
    pub fn new() -> Self {
        Self::with_size(SCREEN_WIDTH, SCREEN_HEIGHT)
    }

    /// Create a buffer with explicit dimensions, cleared to black
    pub fn with_size(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    /// Buffer width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Buffer height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Set a pixel to a packed `0x00RRGGBB` color
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        assert!(x < self.width, "X coordinate {} out of bounds", x);
        assert!(y < self.height, "Y coordinate {} out of bounds", y);

        self.pixels[y * self.width + x] = color;
    }

    /// Get a pixel's packed color
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> u32 {
        assert!(x < self.width, "X coordinate {} out of bounds", x);
        assert!(y < self.height, "Y coordinate {} out of bounds", y);

        self.pixels[y * self.width + x]
    }

    /// Fill the whole buffer with one color
    pub fn fill(&mut self, color: u32) {
        self.pixels.fill(color);
    }

    /// Raw pixel data, row-major
    pub fn as_slice(&self) -> &[u32] {
        &self.pixels
    }

    /// Mutable raw pixel data for the engine to write into
    pub fn as_mut_slice(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    /// Fill with an animated color-band test pattern
    ///
    /// Used by the demo binary in place of a real engine. `ticks` shifts
    /// the bands so the output visibly moves.
    pub fn test_pattern(&mut self, ticks: u32) {
        let shift = (ticks / 16) as usize;
        for y in 0..self.height {
            for x in 0..self.width {
                let band = ((x + shift) / 80 + y / 50) % 4;
                let color = match band {
                    0 => 0x00C81E1E, // red
                    1 => 0x001EC81E, // green
                    2 => 0x001E1EC8, // blue
                    _ => 0x00808080, // gray
                };
                self.pixels[y * self.width + x] = color;
            }
        }
    }
}

impl Default for ScreenBuffer {
    fn default() -> Self {
        Self::new()
    }
}
