// Frontend - window, surface, event drain, and the engine-facing API
//
// This module binds everything together: init() loads the atlas and
// builds the emoji table, then creates the window and pixel surface.
// draw_frame() reproduces the original frontend's frame tick: drain
// pending platform events into the input queue, render the current
// screen buffer contents, present once. The event loop is pumped
// synchronously so the whole tick stays on the caller's thread.

use crate::atlas::{AtlasError, TileAtlas};
use crate::config::{Config, RenderMode};
use crate::emoji::{EmojiTable, TableError};
use crate::input::{InputQueue, KeyEvent};
use crate::render::{self, RenderGrid, OUTPUT_SCALE};
use crate::screen::{ScreenBuffer, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::screenshot::{save_screenshot, ScreenshotError};
use pixels::{Pixels, SurfaceTexture};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::platform::pump_events::EventLoopExtPumpEvents;
use winit::window::{Window, WindowId};

/// Default window title
pub const WINDOW_TITLE: &str = "Doomoji";

/// Errors that can occur while creating or driving the frontend
#[derive(Debug)]
pub enum FrontendError {
    /// Atlas could not be loaded
    Atlas(AtlasError),

    /// Emoji table construction failed
    Table(TableError),

    /// Screen too small to downsample into at least one block
    DegenerateScreen { width: usize, height: usize },

    /// Event loop creation failed
    EventLoop(winit::error::EventLoopError),

    /// Window creation failed
    Window(winit::error::OsError),

    /// Pixel surface creation or present failed
    Pixels(pixels::Error),

    /// The platform never delivered a window to render into
    WindowUnavailable,
}

impl std::fmt::Display for FrontendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrontendError::Atlas(e) => write!(f, "atlas error: {}", e),
            FrontendError::Table(e) => write!(f, "emoji table error: {}", e),
            FrontendError::DegenerateScreen { width, height } => {
                write!(f, "screen {}x{} downsamples to an empty grid", width, height)
            }
            FrontendError::EventLoop(e) => write!(f, "event loop error: {}", e),
            FrontendError::Window(e) => write!(f, "window creation error: {}", e),
            FrontendError::Pixels(e) => write!(f, "pixel surface error: {}", e),
            FrontendError::WindowUnavailable => {
                write!(f, "no window available to render into")
            }
        }
    }
}

impl std::error::Error for FrontendError {}

impl From<AtlasError> for FrontendError {
    fn from(e: AtlasError) -> Self {
        FrontendError::Atlas(e)
    }
}

impl From<TableError> for FrontendError {
    fn from(e: TableError) -> Self {
        FrontendError::Table(e)
    }
}

impl From<winit::error::EventLoopError> for FrontendError {
    fn from(e: winit::error::EventLoopError) -> Self {
        FrontendError::EventLoop(e)
    }
}

impl From<pixels::Error> for FrontendError {
    fn from(e: pixels::Error) -> Self {
        FrontendError::Pixels(e)
    }
}

/// Presented canvas size in pixels for a render mode
pub fn canvas_size(mode: RenderMode, grid: RenderGrid, width: usize, height: usize) -> (u32, u32) {
    match mode {
        RenderMode::Emoji => (grid.canvas_width() as u32, grid.canvas_height() as u32),
        RenderMode::Direct => (width as u32, height as u32),
    }
}

/// The key that captures the next presented frame as a PNG
///
/// Deliberately outside the engine translation table, which must stay
/// fixed; the key still reaches the queue as a no-op byte.
pub fn is_screenshot_key(key: PhysicalKey) -> bool {
    matches!(key, PhysicalKey::Code(KeyCode::F12))
}

/// Application state driven by the pumped event loop
struct FrontendApp {
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
    init_error: Option<FrontendError>,
    input: InputQueue,
    quit: bool,
    screenshot_requested: bool,
    mode: RenderMode,
    grid: RenderGrid,
    atlas: TileAtlas,
    table: EmojiTable,
    canvas_width: u32,
    canvas_height: u32,
    window_width: u32,
    window_height: u32,
}

impl ApplicationHandler for FrontendApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(self.window_width, self.window_height))
            .with_resizable(false);

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.init_error = Some(FrontendError::Window(e));
                return;
            }
        };

        let window_size = window.inner_size();
        let surface_texture =
            SurfaceTexture::new(window_size.width, window_size.height, window.clone());

        match Pixels::new(self.canvas_width, self.canvas_height, surface_texture) {
            Ok(pixels) => {
                self.window = Some(window);
                self.pixels = Some(pixels);
            }
            Err(e) => {
                self.init_error = Some(FrontendError::Pixels(e));
            }
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.quit = true;
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state.is_pressed() && is_screenshot_key(event.physical_key) {
                    self.screenshot_requested = true;
                }
                // Repeats are forwarded too; the engine decides what a
                // held key means
                self.input.produce(event.state.is_pressed(), event.physical_key);
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {}
}

impl FrontendApp {
    /// Save the last composited frame as a timestamped PNG
    fn capture_screenshot(&self) -> Result<PathBuf, ScreenshotError> {
        let frame = match &self.pixels {
            Some(pixels) => pixels.frame(),
            None => return Err(ScreenshotError::Io(std::io::Error::other("no surface"))),
        };
        save_screenshot(frame, self.canvas_width, self.canvas_height)
    }
}

/// The display/input context handed to the engine
///
/// Lifecycle: `init()` once, then repeated `draw_frame()`/`get_key()`
/// calls, then `destroy()`. Everything runs on the calling thread.
pub struct Frontend {
    event_loop: EventLoop<()>,
    app: FrontendApp,
    start: Instant,
}

impl Frontend {
    /// Create the window and surface, load the atlas, build the table
    ///
    /// Any resource failure (missing atlas, undecodable image, empty
    /// category bucket, window creation) is returned to the caller;
    /// nothing here aborts the process.
    pub fn init(config: &Config) -> Result<Frontend, FrontendError> {
        let atlas = TileAtlas::load(&config.atlas.path)?;
        let table = EmojiTable::build(&atlas)?;

        let grid = RenderGrid::new(SCREEN_WIDTH, SCREEN_HEIGHT, OUTPUT_SCALE).ok_or(
            FrontendError::DegenerateScreen {
                width: SCREEN_WIDTH,
                height: SCREEN_HEIGHT,
            },
        )?;
        let (canvas_width, canvas_height) =
            canvas_size(config.video.mode, grid, SCREEN_WIDTH, SCREEN_HEIGHT);

        let scale = config.video.window_scale.clamp(1, 4);

        let mut event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = FrontendApp {
            window: None,
            pixels: None,
            init_error: None,
            input: InputQueue::new(),
            quit: false,
            screenshot_requested: false,
            mode: config.video.mode,
            grid,
            atlas,
            table,
            canvas_width,
            canvas_height,
            window_width: SCREEN_WIDTH as u32 * scale,
            window_height: SCREEN_HEIGHT as u32 * scale,
        };

        // One pump delivers the resumed event and creates the window
        let _ = event_loop.pump_app_events(Some(Duration::ZERO), &mut app);

        if let Some(e) = app.init_error.take() {
            return Err(e);
        }
        if app.pixels.is_none() {
            return Err(FrontendError::WindowUnavailable);
        }

        println!("Doomoji frontend ready");
        println!("  Engine resolution: {}x{}", SCREEN_WIDTH, SCREEN_HEIGHT);
        println!("  Canvas: {}x{}", canvas_width, canvas_height);
        println!(
            "  Tile grid: {}x{} ({}x{} px blocks)",
            app.grid.out_w, app.grid.out_h, app.grid.block_w, app.grid.block_h
        );

        Ok(Frontend {
            event_loop,
            app,
            start: Instant::now(),
        })
    }

    /// Run one frame tick: drain events, render, present
    ///
    /// The screen buffer's current contents are re-read in full; no
    /// assumption is made about stability across calls. Presentation is
    /// a single atomic render after every cell is composited.
    pub fn draw_frame(&mut self, screen: &ScreenBuffer) -> Result<(), FrontendError> {
        assert_eq!(
            (screen.width(), screen.height()),
            (SCREEN_WIDTH, SCREEN_HEIGHT),
            "screen buffer dimensions are fixed for the process lifetime"
        );

        let _ = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.app);

        if self.app.quit {
            return Ok(());
        }

        let pixels = self
            .app
            .pixels
            .as_mut()
            .ok_or(FrontendError::WindowUnavailable)?;
        let frame = pixels.frame_mut();

        match self.app.mode {
            RenderMode::Emoji => {
                render::render_emoji(screen, self.app.grid, &self.app.table, &self.app.atlas, frame)
            }
            RenderMode::Direct => render::render_direct(screen, frame),
        }

        pixels.render()?;

        if self.app.screenshot_requested {
            self.app.screenshot_requested = false;
            match self.app.capture_screenshot() {
                Ok(path) => println!("Screenshot saved to {}", path.display()),
                Err(e) => eprintln!("Screenshot failed: {}", e),
            }
        }

        Ok(())
    }

    /// Drain one pending key event, oldest observable first
    pub fn get_key(&mut self) -> Option<KeyEvent> {
        self.app.input.consume()
    }

    /// True once the user asked to close the window
    pub fn should_quit(&self) -> bool {
        self.app.quit
    }

    /// Block the calling thread for `ms` milliseconds
    pub fn sleep_ms(ms: u32) {
        std::thread::sleep(Duration::from_millis(ms as u64));
    }

    /// Monotonic milliseconds since `init()`
    pub fn get_ticks_ms(&self) -> u32 {
        self.start.elapsed().as_millis() as u32
    }

    /// Update the window title
    pub fn set_window_title(&self, title: &str) {
        if let Some(window) = &self.app.window {
            window.set_title(title);
        }
    }

    /// Save the last composited frame as a timestamped PNG
    ///
    /// Also available interactively: F12 captures after the next present.
    pub fn save_screenshot(&self) -> Result<PathBuf, ScreenshotError> {
        self.app.capture_screenshot()
    }

    /// Release the surface, window, atlas, and table
    ///
    /// The original frontend terminated the process here; this version
    /// returns control so the caller can unwind and exit.
    pub fn destroy(mut self) {
        self.app.pixels = None;
        self.app.window = None;
        println!("Frontend destroyed");
    }
}
