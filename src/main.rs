// Checks the physical input path on this machine.
//
//   screenbridge                      primary screen size + cursor position
//   screenbridge calc x y w h wx wy   screen point for an element rect
use screenbridge::config::load_or_default;
use screenbridge::executor::input::{EnigoBackend, InputBackend};
use screenbridge::geometry::coordinates;
use screenbridge::geometry::screen::{PrimaryMonitor, ScreenBoundsProvider};
use screenbridge::{ElementBounds, ScreenBridgeError, ScreenBridgeResult, WindowBounds};

fn main() {
    // Load .env file if present (ignore error if not found)
    let _ = dotenvy::dotenv();
    screenbridge::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = run(&args) {
        tracing::error!(error = %e, "screenbridge failed");
        std::process::exit(1);
    }
}

fn run(args: &[String]) -> ScreenBridgeResult<()> {
    let config = load_or_default().physical_input;

    match args.first().map(String::as_str) {
        Some("calc") => {
            let n = parse_numbers(&args[1..])?;
            let element = ElementBounds::new(n[0], n[1], n[2], n[3]);
            let window = WindowBounds::new(n[4].round() as i32, n[5].round() as i32);
            let point = coordinates::calculate(
                &element,
                &window,
                &config.offsets,
                config.validate_bounds,
                &PrimaryMonitor,
            )?;
            println!("{point}");
        }
        Some(other) => {
            return Err(ScreenBridgeError::Config(format!("unknown command '{other}'")));
        }
        None => {
            let screen = PrimaryMonitor.screen_bounds()?;
            let cursor = EnigoBackend::new()?.cursor_position()?;
            println!("screen {screen}");
            println!("cursor {cursor}");
            println!(
                "physical input {} for {:?}",
                if config.enabled { "enabled" } else { "disabled" },
                config.actions
            );
        }
    }
    Ok(())
}

fn parse_numbers(args: &[String]) -> ScreenBridgeResult<[f64; 6]> {
    if args.len() != 6 {
        return Err(ScreenBridgeError::Config(
            "calc expects: x y width height window_x window_y".into(),
        ));
    }
    let mut out = [0.0; 6];
    for (slot, raw) in out.iter_mut().zip(args) {
        *slot = raw
            .parse()
            .map_err(|e| ScreenBridgeError::Config(format!("'{raw}' is not a number: {e}")))?;
    }
    Ok(out)
}
