// Doomoji - Demo Entry Point
//
// Drives the frontend with an animated test pattern standing in for the
// external engine's pixel buffer.

use doomoji::config::{Config, CONFIG_FILE};
use doomoji::frontend::Frontend;
use doomoji::input::GameKey;
use doomoji::screen::ScreenBuffer;

fn main() {
    println!("Doomoji v0.1.0");
    println!("==============");
    println!();

    let config = Config::load_or_default(CONFIG_FILE);
    println!("Atlas: {}", config.atlas.path.display());
    println!("Mode: {:?}", config.video.mode);
    println!();

    let mut frontend = match Frontend::init(&config) {
        Ok(frontend) => frontend,
        Err(e) => {
            eprintln!("Couldn't start the frontend: {}", e);
            std::process::exit(1);
        }
    };

    let mut screen = ScreenBuffer::new();
    let frame_ms = config.frame_duration().as_millis() as u32;

    println!("Press Escape or close the window to exit, F12 for a screenshot.");

    'running: loop {
        let tick_start = frontend.get_ticks_ms();

        screen.test_pattern(tick_start);
        if let Err(e) = frontend.draw_frame(&screen) {
            eprintln!("Render error: {}", e);
            break;
        }
        if frontend.should_quit() {
            break;
        }

        while let Some(event) = frontend.get_key() {
            if event.pressed && event.key == GameKey::Escape.code() {
                break 'running;
            }
        }

        let elapsed = frontend.get_ticks_ms().saturating_sub(tick_start);
        if elapsed < frame_ms {
            Frontend::sleep_ms(frame_ms - elapsed);
        }
    }

    frontend.destroy();
    println!("Goodbye.");
}
