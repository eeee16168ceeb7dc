// Doomoji - emoji-tile display and input frontend
//
// Renders an external engine's fixed-size RGB pixel buffer as a mosaic
// of decorative tiles and feeds raw key events back to the engine as
// abstract key codes.

// Public modules
pub mod atlas;
pub mod color;
pub mod config;
pub mod emoji;
pub mod frontend;
pub mod input;
pub mod render;
pub mod screen;
pub mod screenshot;

// Re-export main types for convenience
pub use atlas::{AtlasError, TileAtlas, TileRect, TILE_HEIGHT, TILE_WIDTH};
pub use color::{classify, Category, COLOR_DIV, DOMINANCE_RATE, UNDER_RATE};
pub use config::{Config, RenderMode};
pub use emoji::{EmojiTable, TableError, TileDescriptor, BUCKET_CAPACITY};
pub use frontend::{Frontend, FrontendError};
pub use input::{translate_key, GameKey, InputQueue, KeyEvent, QUEUE_CAPACITY};
pub use render::{average_block, render_direct, render_emoji, RenderGrid, OUTPUT_SCALE};
pub use screen::{ScreenBuffer, SCREEN_HEIGHT, SCREEN_WIDTH};
pub use screenshot::{save_screenshot, ScreenshotError};
