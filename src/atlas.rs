// Tile atlas - the decorative tile sheet the renderer composites from
//
// The atlas is a PNG containing a grid of fixed-size tiles. It is decoded
// once at startup, kept in memory as packed RGB, and read-only afterwards.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

/// Tile width in atlas pixels
pub const TILE_WIDTH: u32 = 18;

/// Tile height in atlas pixels
pub const TILE_HEIGHT: u32 = 18;

/// Errors that can occur while loading a tile atlas
#[derive(Debug)]
pub enum AtlasError {
    /// I/O error opening or reading the file
    Io(io::Error),

    /// PNG decoding error
    Decode(png::DecodingError),

    /// Unsupported PNG color type (only RGB and RGBA are accepted)
    UnsupportedColor(png::ColorType),

    /// Unsupported PNG bit depth (only 8 bits per channel is accepted)
    UnsupportedDepth(png::BitDepth),

    /// Image too small to contain a single whole tile
    BadDimensions { width: u32, height: u32 },
}

impl std::fmt::Display for AtlasError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AtlasError::Io(e) => write!(f, "I/O error: {}", e),
            AtlasError::Decode(e) => write!(f, "PNG decoding error: {}", e),
            AtlasError::UnsupportedColor(c) => {
                write!(f, "unsupported atlas color type: {:?}", c)
            }
            AtlasError::UnsupportedDepth(d) => {
                write!(f, "unsupported atlas bit depth: {:?}", d)
            }
            AtlasError::BadDimensions { width, height } => write!(
                f,
                "atlas {}x{} is smaller than a single {}x{} tile",
                width, height, TILE_WIDTH, TILE_HEIGHT
            ),
        }
    }
}

impl std::error::Error for AtlasError {}

impl From<io::Error> for AtlasError {
    fn from(e: io::Error) -> Self {
        AtlasError::Io(e)
    }
}

impl From<png::DecodingError> for AtlasError {
    fn from(e: png::DecodingError) -> Self {
        AtlasError::Decode(e)
    }
}

/// Origin of one tile inside the atlas
///
/// Tile size is implicit: every tile is `TILE_WIDTH` x `TILE_HEIGHT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRect {
    /// X origin in atlas pixels
    pub x: u32,
    /// Y origin in atlas pixels
    pub y: u32,
}

/// Decoded tile atlas
pub struct TileAtlas {
    width: u32,
    height: u32,
    /// Packed RGB, 3 bytes per pixel, row-major
    rgb: Vec<u8>,
}

impl TileAtlas {
    /// Load and decode a PNG atlas from disk
    ///
    /// # Arguments
    /// * `path` - Path to the atlas PNG
    ///
    /// # Returns
    /// The decoded atlas, or an `AtlasError` if the file is missing,
    /// undecodable, or too small to hold one tile.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<TileAtlas, AtlasError> {
        let file = File::open(path)?;
        let decoder = png::Decoder::new(BufReader::new(file));
        let mut reader = decoder.read_info()?;

        let (color_type, bit_depth) = reader.output_color_type();
        if bit_depth != png::BitDepth::Eight {
            // Deep-color rows carry 2 bytes per channel and would break
            // the packed-RGB layout below
            return Err(AtlasError::UnsupportedDepth(bit_depth));
        }
        let (width, height) = {
            let info = reader.info();
            (info.width, info.height)
        };

        let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
        while let Some(row) = reader.next_row()? {
            match color_type {
                png::ColorType::Rgb => rgb.extend_from_slice(row.data()),
                png::ColorType::Rgba => {
                    // Drop the alpha channel; tiles composite opaque
                    for px in row.data().chunks_exact(4) {
                        rgb.extend_from_slice(&px[..3]);
                    }
                }
                other => return Err(AtlasError::UnsupportedColor(other)),
            }
        }

        Self::from_rgb(rgb, width, height)
    }

    /// Build an atlas from raw packed RGB data
    ///
    /// # Arguments
    /// * `rgb` - Packed RGB bytes, 3 per pixel, row-major (length must be
    ///   `width * height * 3`)
    /// * `width`, `height` - Image dimensions in pixels
    pub fn from_rgb(rgb: Vec<u8>, width: u32, height: u32) -> Result<TileAtlas, AtlasError> {
        assert_eq!(
            rgb.len(),
            width as usize * height as usize * 3,
            "RGB data length does not match dimensions"
        );

        if width < TILE_WIDTH || height < TILE_HEIGHT {
            return Err(AtlasError::BadDimensions { width, height });
        }

        Ok(TileAtlas { width, height, rgb })
    }

    /// Atlas width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Atlas height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of whole tile columns
    pub fn columns(&self) -> u32 {
        self.width / TILE_WIDTH
    }

    /// Number of whole tile rows
    pub fn rows(&self) -> u32 {
        self.height / TILE_HEIGHT
    }

    /// Read one pixel as an RGB triple
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8) {
        let i = (y as usize * self.width as usize + x as usize) * 3;
        (self.rgb[i], self.rgb[i + 1], self.rgb[i + 2])
    }

    /// Average color of one tile
    ///
    /// Channels are truncated to 8 bits per pixel, summed as integers, and
    /// integer-divided by the pixel count. A zero-area tile (impossible for
    /// the fixed tile size, but guarded anyway) averages to black.
    pub fn average_color(&self, rect: TileRect) -> (u8, u8, u8) {
        let mut sum_r: u32 = 0;
        let mut sum_g: u32 = 0;
        let mut sum_b: u32 = 0;

        for ty in rect.y..rect.y + TILE_HEIGHT {
            for tx in rect.x..rect.x + TILE_WIDTH {
                let (r, g, b) = self.pixel(tx, ty);
                sum_r += r as u32;
                sum_g += g as u32;
                sum_b += b as u32;
            }
        }

        let area = TILE_WIDTH * TILE_HEIGHT;
        if area == 0 {
            return (0, 0, 0);
        }

        ((sum_r / area) as u8, (sum_g / area) as u8, (sum_b / area) as u8)
    }
}
