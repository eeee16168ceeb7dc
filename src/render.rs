// Frame rendering - downsamples the screen buffer into blocks and
// composites one matched tile per block onto the RGBA frame
//
// The alternate direct mode copies the screen buffer pixel for pixel.

use crate::atlas::{TileAtlas, TILE_HEIGHT, TILE_WIDTH};
use crate::emoji::EmojiTable;
use crate::screen::ScreenBuffer;

/// Output grid scale: each block of roughly 1/scale source pixels per
/// axis collapses into one tile cell
pub const OUTPUT_SCALE: f32 = 0.333;

/// Downsampling geometry for one screen size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderGrid {
    /// Output cells per row
    pub out_w: usize,
    /// Output rows
    pub out_h: usize,
    /// Source pixels per block, horizontally
    pub block_w: usize,
    /// Source pixels per block, vertically
    pub block_h: usize,
}

impl RenderGrid {
    /// Compute the grid for a screen size
    ///
    /// `out = floor(dim * scale)`, `block = dim / out` with integer
    /// division. Returns None when either output dimension floors to zero,
    /// which would otherwise divide by zero downstream.
    pub fn new(width: usize, height: usize, scale: f32) -> Option<RenderGrid> {
        let out_w = (width as f32 * scale).floor() as usize;
        let out_h = (height as f32 * scale).floor() as usize;
        if out_w == 0 || out_h == 0 {
            return None;
        }

        Some(RenderGrid {
            out_w,
            out_h,
            block_w: width / out_w,
            block_h: height / out_h,
        })
    }

    /// Composited canvas width in pixels (emoji mode)
    pub fn canvas_width(&self) -> usize {
        self.out_w * TILE_WIDTH as usize
    }

    /// Composited canvas height in pixels (emoji mode)
    pub fn canvas_height(&self) -> usize {
        self.out_h * TILE_HEIGHT as usize
    }
}

/// Average color of one source block
///
/// Each channel is truncated to 8 bits on extraction, summed as an
/// integer, and integer-divided by the block area. A zero-area block
/// averages to black rather than dividing by zero.
pub fn average_block(
    screen: &ScreenBuffer,
    x0: usize,
    y0: usize,
    block_w: usize,
    block_h: usize,
) -> (u8, u8, u8) {
    let area = (block_w * block_h) as u32;
    if area == 0 {
        return (0, 0, 0);
    }

    let mut sum_r: u32 = 0;
    let mut sum_g: u32 = 0;
    let mut sum_b: u32 = 0;

    for y in y0..y0 + block_h {
        for x in x0..x0 + block_w {
            let color = screen.get_pixel(x, y);
            sum_r += (color >> 16) & 0xFF;
            sum_g += (color >> 8) & 0xFF;
            sum_b += color & 0xFF;
        }
    }

    ((sum_r / area) as u8, (sum_g / area) as u8, (sum_b / area) as u8)
}

/// Render one emoji-tile frame
///
/// Visits every output cell in row-major order, averages its source
/// block, resolves a tile through the table, and blits that tile's atlas
/// rectangle onto `frame` at the cell's position. `frame` is RGBA,
/// `grid.canvas_width() * grid.canvas_height() * 4` bytes.
pub fn render_emoji(
    screen: &ScreenBuffer,
    grid: RenderGrid,
    table: &EmojiTable,
    atlas: &TileAtlas,
    frame: &mut [u8],
) {
    let canvas_w = grid.canvas_width();
    assert!(
        frame.len() >= canvas_w * grid.canvas_height() * 4,
        "frame too small for the tile canvas"
    );

    for oy in 0..grid.out_h {
        for ox in 0..grid.out_w {
            let (r, g, b) =
                average_block(screen, ox * grid.block_w, oy * grid.block_h, grid.block_w, grid.block_h);
            let tile = table.lookup(r, g, b);

            let dst_x = ox * TILE_WIDTH as usize;
            let dst_y = oy * TILE_HEIGHT as usize;
            for ty in 0..TILE_HEIGHT {
                for tx in 0..TILE_WIDTH {
                    let (tr, tg, tb) = atlas.pixel(tile.rect.x + tx, tile.rect.y + ty);
                    let offset =
                        ((dst_y + ty as usize) * canvas_w + dst_x + tx as usize) * 4;
                    frame[offset] = tr;
                    frame[offset + 1] = tg;
                    frame[offset + 2] = tb;
                    frame[offset + 3] = 0xFF;
                }
            }
        }
    }
}

/// Render one direct frame: one opaque RGBA pixel per source pixel
pub fn render_direct(screen: &ScreenBuffer, frame: &mut [u8]) {
    assert!(
        frame.len() >= screen.as_slice().len() * 4,
        "frame too small for the screen buffer"
    );

    for (i, &color) in screen.as_slice().iter().enumerate() {
        let offset = i * 4;
        frame[offset] = ((color >> 16) & 0xFF) as u8;
        frame[offset + 1] = ((color >> 8) & 0xFF) as u8;
        frame[offset + 2] = (color & 0xFF) as u8;
        frame[offset + 3] = 0xFF;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::{SCREEN_HEIGHT, SCREEN_WIDTH};

    #[test]
    fn test_native_grid_geometry() {
        let grid = RenderGrid::new(SCREEN_WIDTH, SCREEN_HEIGHT, OUTPUT_SCALE).unwrap();
        assert_eq!(grid.out_w, 213); // floor(640 * 0.333)
        assert_eq!(grid.out_h, 133); // floor(400 * 0.333)
        assert_eq!(grid.block_w, 3); // 640 / 213
        assert_eq!(grid.block_h, 3); // 400 / 133
        assert_eq!(grid.canvas_width(), 213 * 18);
        assert_eq!(grid.canvas_height(), 133 * 18);
    }

    #[test]
    fn test_degenerate_grid_rejected() {
        assert_eq!(RenderGrid::new(2, 2, OUTPUT_SCALE), None);
        assert_eq!(RenderGrid::new(0, 400, OUTPUT_SCALE), None);
    }

    #[test]
    fn test_tiny_grid_covers_whole_screen() {
        // 4x4 at scale 0.333 collapses to a single 4x4 block
        let grid = RenderGrid::new(4, 4, OUTPUT_SCALE).unwrap();
        assert_eq!(grid.out_w, 1);
        assert_eq!(grid.out_h, 1);
        assert_eq!(grid.block_w, 4);
        assert_eq!(grid.block_h, 4);
    }

    #[test]
    fn test_average_block_uniform() {
        let mut screen = ScreenBuffer::with_size(4, 4);
        screen.fill(0x00FF0000);
        assert_eq!(average_block(&screen, 0, 0, 4, 4), (255, 0, 0));
    }

    #[test]
    fn test_average_block_mixed() {
        let mut screen = ScreenBuffer::with_size(2, 2);
        screen.set_pixel(0, 0, 0x00FF0000);
        screen.set_pixel(1, 0, 0x0000FF00);
        screen.set_pixel(0, 1, 0x000000FF);
        screen.set_pixel(1, 1, 0x00000000);
        // Each channel: 255 from one pixel, divided by 4 = 63
        assert_eq!(average_block(&screen, 0, 0, 2, 2), (63, 63, 63));
    }

    #[test]
    fn test_average_block_zero_area() {
        let screen = ScreenBuffer::with_size(2, 2);
        assert_eq!(average_block(&screen, 0, 0, 0, 0), (0, 0, 0));
    }

    #[test]
    fn test_render_direct_copies_pixels() {
        let mut screen = ScreenBuffer::with_size(2, 1);
        screen.set_pixel(0, 0, 0x00123456);
        screen.set_pixel(1, 0, 0x00ABCDEF);

        let mut frame = vec![0u8; 2 * 4];
        render_direct(&screen, &mut frame);
        assert_eq!(&frame[..4], &[0x12, 0x34, 0x56, 0xFF]);
        assert_eq!(&frame[4..], &[0xAB, 0xCD, 0xEF, 0xFF]);
    }
}
