// Common test utilities for pipeline integration tests
//
// Builds synthetic tile atlases in memory so the suite never depends on
// image files on disk.

#![allow(dead_code)]

use doomoji::atlas::{TileAtlas, TILE_HEIGHT, TILE_WIDTH};

/// Build an atlas of uniform-color tiles laid out `columns` per row
///
/// Leftover cells on the last row stay black and classify as gray.
pub fn atlas_of(colors: &[(u8, u8, u8)], columns: u32) -> TileAtlas {
    let rows = (colors.len() as u32).div_ceil(columns);
    let width = columns * TILE_WIDTH;
    let height = rows * TILE_HEIGHT;
    let mut rgb = vec![0u8; (width * height * 3) as usize];

    for (i, &(r, g, b)) in colors.iter().enumerate() {
        let col = i as u32 % columns;
        let row = i as u32 / columns;
        for y in row * TILE_HEIGHT..(row + 1) * TILE_HEIGHT {
            for x in col * TILE_WIDTH..(col + 1) * TILE_WIDTH {
                let j = ((y * width + x) * 3) as usize;
                rgb[j] = r;
                rgb[j + 1] = g;
                rgb[j + 2] = b;
            }
        }
    }
    TileAtlas::from_rgb(rgb, width, height).unwrap()
}

/// One uniform tile per category, so table builds always succeed
pub fn full_spectrum() -> Vec<(u8, u8, u8)> {
    vec![
        (200, 50, 50),   // red
        (50, 200, 200),  // not-red
        (50, 200, 50),   // green
        (200, 50, 200),  // not-green
        (50, 50, 200),   // blue
        (200, 200, 50),  // not-blue
        (128, 128, 128), // gray
    ]
}
