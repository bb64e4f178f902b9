use color_eyre::Result;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;
use virtual_inputs::codes::{AXIS_X, KEY_A, KEY_D, KEY_DOWN, KEY_LEFT, KEY_RIGHT, KEY_SPACE, KEY_UP};
use virtual_inputs::{
    AxisSource, DeviceRef, GamepadHub, InputsConfig, InputsError, InputsUnit, KeyboardDevice,
    MouseDevice, PovShortcuts, PovSource, VirtualEvent,
};

const PLAYER: &str = "player";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    setup()?;

    let config = InputsConfig::load_or_default()?;
    info!("Using config: {:?}", config);

    let mut unit = InputsUnit::new(config.engine.clone());

    // The feeds stay with the host; a windowing layer would push into them
    let keyboard = KeyboardDevice::new();
    let _keyboard_feed = keyboard.feed();
    let keyboard = unit.add_device(Box::new(keyboard));

    let mouse = MouseDevice::new();
    let _mouse_feed = mouse.feed();
    let mouse = unit.add_device(Box::new(mouse));

    match GamepadHub::create(config.unit.gamepad_deadzone) {
        Ok(hub) => {
            let hub = hub.initialize();
            for pad in hub.gamepads() {
                unit.add_device(Box::new(pad));
            }
        }
        Err(e) => warn!("Continuing without gamepads: {}", e),
    }

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<VirtualEvent>();
    define_player(&mut unit, keyboard, mouse, event_tx)?;

    if !unit.enable_virtual_controller(PLAYER, true) {
        warn!("Not every device of '{}' could be activated", PLAYER);
    }

    let mut tick = tokio::time::interval(Duration::from_millis(config.unit.tick_interval_ms));
    let mut stats = tokio::time::interval(Duration::from_secs(config.unit.stats_interval_secs));

    info!("Entering input loop");
    loop {
        tokio::select! {
            _ = tick.tick() => {
                unit.process();
                while let Ok(event) = event_rx.try_recv() {
                    let name = unit.virtual_name(event.id).unwrap_or("<unnamed>");
                    debug!("{} -> {:?} at {}", name, event.value, event.timestamp);
                }
            }
            _ = stats.tick() => {
                let stats = unit.stats();
                info!(
                    "Processed {} ticks, {} raw events, {} devices",
                    stats.ticks,
                    stats.raw_events,
                    unit.device_count()
                );
            }
            result = tokio::signal::ctrl_c() => {
                if let Err(e) = result {
                    error!("Failed to listen for shutdown signal: {}", e);
                }
                info!("Shutting down");
                break;
            }
        }
    }

    Ok(())
}

// Jump on space, A/D as an axis, mouse look and the arrows as a POV
fn define_player(
    unit: &mut InputsUnit,
    keyboard: DeviceRef,
    mouse: DeviceRef,
    events: mpsc::UnboundedSender<VirtualEvent>,
) -> Result<(), InputsError> {
    let jump = unit.register_virtual_id("Jump", None)?;
    let move_x = unit.register_virtual_id("MoveX", None)?;
    let look = unit.register_virtual_id("Look", None)?;
    let dpad = unit.register_virtual_id("Dpad", None)?;

    unit.create_virtual_controller(PLAYER)?;
    let Some((controller, shortcuts)) = unit.virtual_controller_with_shortcuts(PLAYER) else {
        return Ok(());
    };

    controller.add_virtual_key(jump, keyboard, KEY_SPACE, Some("JUMP"), shortcuts)?;
    controller.add_virtual_axis(
        move_x,
        keyboard,
        AxisSource::Keys {
            min: KEY_A,
            max: KEY_D,
        },
    );
    controller.add_virtual_axis(look, mouse, AxisSource::Axis(AXIS_X));
    controller.add_virtual_pov(
        dpad,
        keyboard,
        PovSource::Keys {
            up: KEY_UP,
            down: KEY_DOWN,
            left: KEY_LEFT,
            right: KEY_RIGHT,
        },
        Some(PovShortcuts::new("U", "D", "L", "R")),
        shortcuts,
    )?;
    controller.set_listener(Some(Box::new(events)));
    Ok(())
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    setup_logging_env();
    Ok(())
}

fn setup_logging_env() {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();
}
