// Emoji table - maps averaged colors to approximately matching tiles
//
// Built once at startup by scanning the atlas, then read-only. Each of the
// seven categories owns a fixed-capacity bucket of tile descriptors kept
// sorted ascending by saturation.
//
// Three quirks of the construction and lookup are deliberate and must not
// be "fixed" into something smarter:
// - tiles whose saturation exactly matches an existing entry are discarded
//   (first writer wins per saturation value),
// - a bucket that accepts more than its capacity wraps and overwrites,
// - lookup is a floor search biased strictly downward, not nearest-match.

use crate::atlas::{TileAtlas, TileRect, TILE_HEIGHT, TILE_WIDTH};
use crate::color::{classify, Category};

/// Maximum accepted tiles per category
pub const BUCKET_CAPACITY: usize = 60;

/// Errors that can occur while building the emoji table
#[derive(Debug)]
pub enum TableError {
    /// The atlas contributed no tiles to a category. Lookup indexes the
    /// bucket unconditionally, so this must fail here, not at render time.
    EmptyBucket(Category),
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableError::EmptyBucket(category) => {
                write!(f, "atlas contributed no tiles to the {} bucket", category)
            }
        }
    }
}

impl std::error::Error for TableError {}

/// One accepted tile: where it lives in the atlas and its sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileDescriptor {
    /// Tile origin in the atlas
    pub rect: TileRect,
    /// Averaged-brightness sort/lookup key
    pub saturation: u8,
}

/// Fixed-capacity ring of tile descriptors for one category
struct Bucket {
    entries: Vec<TileDescriptor>,
    /// Next insert position, advances modulo capacity on every accept
    cursor: usize,
}

impl Bucket {
    fn new() -> Self {
        Self {
            entries: Vec::with_capacity(BUCKET_CAPACITY),
            cursor: 0,
        }
    }

    /// Ring insert with exact-saturation dedup
    ///
    /// Returns false if an entry with the same saturation already exists.
    fn insert(&mut self, descriptor: TileDescriptor) -> bool {
        if self
            .entries
            .iter()
            .any(|e| e.saturation == descriptor.saturation)
        {
            return false;
        }

        if self.entries.len() < BUCKET_CAPACITY {
            self.entries.push(descriptor);
        } else {
            self.entries[self.cursor] = descriptor;
        }
        self.cursor = (self.cursor + 1) % BUCKET_CAPACITY;
        true
    }

    fn sort(&mut self) {
        self.entries.sort_by_key(|e| e.saturation);
    }
}

/// Category-bucketed lookup table of tile descriptors
pub struct EmojiTable {
    buckets: [Bucket; 7],
}

impl EmojiTable {
    /// Build the table by scanning every whole tile of the atlas
    ///
    /// Tiles are visited row-major. Each is averaged, classified, and ring
    /// inserted into its category bucket; every bucket is re-sorted after
    /// each atlas row. The re-sort looks redundant but is load-bearing once
    /// a bucket wraps: it decides which entry the overwrite lands on.
    ///
    /// # Returns
    /// The table, fully sorted, or `TableError::EmptyBucket` if any
    /// category ended up with no tiles.
    pub fn build(atlas: &TileAtlas) -> Result<EmojiTable, TableError> {
        let mut table = EmojiTable {
            buckets: [
                Bucket::new(),
                Bucket::new(),
                Bucket::new(),
                Bucket::new(),
                Bucket::new(),
                Bucket::new(),
                Bucket::new(),
            ],
        };

        for row in 0..atlas.rows() {
            for col in 0..atlas.columns() {
                let rect = TileRect {
                    x: col * TILE_WIDTH,
                    y: row * TILE_HEIGHT,
                };
                let (r, g, b) = atlas.average_color(rect);
                let (category, saturation) = classify(r, g, b);
                table.buckets[category.index()].insert(TileDescriptor { rect, saturation });
            }
            for bucket in table.buckets.iter_mut() {
                bucket.sort();
            }
        }

        for category in Category::ALL {
            if table.buckets[category.index()].entries.is_empty() {
                return Err(TableError::EmptyBucket(category));
            }
        }

        Ok(table)
    }

    /// Find a tile approximating the given color
    ///
    /// Classifies the color, then scans its bucket from the top down for
    /// the first entry whose saturation is strictly below the target. Falls
    /// back to the bucket's dimmest entry when nothing is below.
    pub fn lookup(&self, r: u8, g: u8, b: u8) -> &TileDescriptor {
        let (category, saturation) = classify(r, g, b);
        let entries = &self.buckets[category.index()].entries;

        for entry in entries.iter().rev() {
            if entry.saturation < saturation {
                return entry;
            }
        }
        &entries[0]
    }

    /// Number of accepted tiles in a category's bucket
    pub fn bucket_len(&self, category: Category) -> usize {
        self.buckets[category.index()].entries.len()
    }

    /// Accepted descriptors for a category, sorted ascending by saturation
    pub fn bucket_entries(&self, category: Category) -> &[TileDescriptor] {
        &self.buckets[category.index()].entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::TileAtlas;

    /// Build an atlas of uniform-color tiles laid out `columns` per row
    fn atlas_of(colors: &[(u8, u8, u8)], columns: u32) -> TileAtlas {
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

    /// One uniform tile per category so builds succeed
    fn full_spectrum() -> Vec<(u8, u8, u8)> {
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

    #[test]
    fn test_build_assigns_each_category() {
        let atlas = atlas_of(&full_spectrum(), 7);
        let table = EmojiTable::build(&atlas).unwrap();
        for category in Category::ALL {
            assert_eq!(table.bucket_len(category), 1, "{}", category);
        }
    }

    #[test]
    fn test_empty_bucket_fails_build() {
        // All-red atlas: six categories never receive a tile
        let atlas = atlas_of(&[(200, 50, 50), (220, 60, 60)], 2);
        assert!(matches!(
            EmojiTable::build(&atlas),
            Err(TableError::EmptyBucket(_))
        ));
    }

    #[test]
    fn test_buckets_sorted_ascending() {
        let mut colors = full_spectrum();
        // Extra red tiles out of brightness order
        colors.push((240, 40, 40)); // saturation 106
        colors.push((60, 10, 10)); // saturation 26
        colors.push((120, 20, 20)); // saturation 53
        let atlas = atlas_of(&colors, 5);
        let table = EmojiTable::build(&atlas).unwrap();

        let reds = table.bucket_entries(Category::Red);
        assert_eq!(reds.len(), 4);
        for pair in reds.windows(2) {
            assert!(pair[0].saturation < pair[1].saturation);
        }
    }

    #[test]
    fn test_dedup_first_writer_wins() {
        let mut colors = full_spectrum();
        // Two distinct red tiles with identical average, hence identical
        // saturation: the second is discarded
        colors.push((200, 20, 20));
        colors.push((200, 20, 20));
        let atlas = atlas_of(&colors, 3);
        let table = EmojiTable::build(&atlas).unwrap();

        let reds = table.bucket_entries(Category::Red);
        let dups: Vec<_> = reds.iter().filter(|e| e.saturation == 80).collect();
        assert_eq!(dups.len(), 1);
        // First writer is the earlier tile in row-major order
        assert_eq!(
            dups[0].rect,
            TileRect {
                x: TILE_WIDTH,
                y: TILE_HEIGHT * 2
            }
        );
    }

    #[test]
    fn test_ring_overwrite_past_capacity() {
        // 61 red tiles with unique saturations on one atlas row: the 61st
        // wraps and clobbers the entry at index 0 (the first accepted tile,
        // since the sort only runs after the row completes)
        let mut colors: Vec<(u8, u8, u8)> = (0..61)
            .map(|i| {
                let r = (30 + i * 3) as u8;
                (r, r / 5, r / 5)
            })
            .collect();
        let mut rest = full_spectrum();
        rest.remove(0);
        colors.extend(rest); // second row fills the other categories
        let atlas = atlas_of(&colors, 61);
        let table = EmojiTable::build(&atlas).unwrap();

        let reds = table.bucket_entries(Category::Red);
        assert_eq!(reds.len(), BUCKET_CAPACITY);

        let first_sat = {
            let (_, s) = classify(30, 6, 6);
            s
        };
        assert!(reds.iter().all(|e| e.saturation != first_sat));
    }

    #[test]
    fn test_lookup_floor_bias() {
        let mut colors = full_spectrum();
        colors.push((60, 10, 10)); // red, saturation 26
        colors.push((120, 20, 20)); // red, saturation 53
        colors.push((240, 40, 40)); // red, saturation 106
        let atlas = atlas_of(&colors, 5);
        let table = EmojiTable::build(&atlas).unwrap();

        // Target saturation 86 sits between 53 and 106: floor picks 53
        let (category, saturation) = classify(200, 30, 28);
        assert_eq!(category, Category::Red);
        assert_eq!(saturation, 86);
        let hit = table.lookup(200, 30, 28);
        assert_eq!(hit.saturation, 53);
    }

    #[test]
    fn test_lookup_fallback_to_dimmest() {
        let mut colors = full_spectrum();
        colors.push((60, 10, 10)); // red, saturation 26
        colors.push((120, 20, 20)); // red, saturation 53
        let atlas = atlas_of(&colors, 5);
        let table = EmojiTable::build(&atlas).unwrap();

        // Target saturation 13 is below every red entry: index 0 wins
        let hit = table.lookup(30, 5, 5);
        assert_eq!(hit.saturation, 26);
    }

    #[test]
    fn test_lookup_equal_saturation_falls_back() {
        // "Strictly less" means an exact saturation match is not taken
        let mut colors = full_spectrum();
        colors.push((60, 10, 10)); // red, saturation 26
        let atlas = atlas_of(&colors, 4);
        let table = EmojiTable::build(&atlas).unwrap();

        let (_, saturation) = classify(60, 10, 10);
        assert_eq!(saturation, 26);
        let hit = table.lookup(60, 10, 10);
        assert_eq!(hit.saturation, 26); // via the index-0 fallback path
    }
}
