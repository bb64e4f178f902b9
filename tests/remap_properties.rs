use tokio::sync::mpsc;
use virtual_inputs::codes::{
    AXIS_X, AXIS_Y, KEY_A, KEY_D, KEY_DOWN, KEY_LEFT, KEY_RIGHT, KEY_SPACE, KEY_UP,
    MOUSEKEY_LEFT,
};
use virtual_inputs::{
    AxisSource, DeviceRef, InputsUnit, KeyboardDevice, KeyboardFeed, MouseDevice, MouseFeed,
    PovPosition, PovShortcuts, PovSource, RawEvent, RegistryError, VirtualEvent, VirtualValue,
};

const PLAYER: &str = "player";

struct Rig {
    unit: InputsUnit,
    keyboard: DeviceRef,
    keys: KeyboardFeed,
    mouse: DeviceRef,
    pointer: MouseFeed,
}

fn rig() -> Rig {
    let mut unit = InputsUnit::default();

    let keyboard_device = KeyboardDevice::new();
    let keys = keyboard_device.feed();
    let keyboard = unit.add_device(Box::new(keyboard_device));

    let mouse_device = MouseDevice::new();
    let pointer = mouse_device.feed();
    let mouse = unit.add_device(Box::new(mouse_device));

    unit.create_virtual_controller(PLAYER).unwrap();
    Rig {
        unit,
        keyboard,
        keys,
        mouse,
        pointer,
    }
}

fn listen(unit: &mut InputsUnit) -> mpsc::UnboundedReceiver<VirtualEvent> {
    let (tx, rx) = mpsc::unbounded_channel::<VirtualEvent>();
    unit.virtual_controller_mut(PLAYER)
        .unwrap()
        .set_listener(Some(Box::new(tx)));
    rx
}

fn drain(rx: &mut mpsc::UnboundedReceiver<VirtualEvent>) -> Vec<VirtualEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[test]
fn enabling_activates_bound_devices() {
    let mut rig = rig();
    let jump = rig.unit.register_virtual_id("Jump", None).unwrap();
    let (controller, shortcuts) = rig.unit.virtual_controller_with_shortcuts(PLAYER).unwrap();
    controller
        .add_virtual_key(jump, rig.keyboard, KEY_SPACE, None, shortcuts)
        .unwrap();

    assert!(!rig.unit.devices().get(rig.keyboard).unwrap().is_active());
    assert!(rig.unit.enable_virtual_controller(PLAYER, true));
    assert!(rig.unit.devices().get(rig.keyboard).unwrap().is_active());
    // The mouse is not bound to anything
    assert!(!rig.unit.devices().get(rig.mouse).unwrap().is_active());

    rig.keys.push_key_at(KEY_SPACE, true, 100);
    rig.unit.process();
    let player = rig.unit.virtual_controller(PLAYER).unwrap();
    assert!(player.is_key_pressed(jump));
    assert!(player.was_key_pressed(jump));

    rig.unit.process();
    let player = rig.unit.virtual_controller(PLAYER).unwrap();
    assert!(player.is_key_pressed(jump));
    assert!(!player.was_key_toggled(jump));
}

#[test]
fn mouse_axis_returns_to_rest_without_motion() {
    let mut rig = rig();
    let look = rig.unit.register_virtual_id("Look", None).unwrap();
    rig.unit
        .virtual_controller_mut(PLAYER)
        .unwrap()
        .add_virtual_axis(look, rig.mouse, AxisSource::Axis(AXIS_X));
    assert!(rig.unit.enable_virtual_controller(PLAYER, true));

    rig.pointer.move_at(40, 0, 0, 10);
    rig.unit.process();
    let player = rig.unit.virtual_controller(PLAYER).unwrap();
    assert_eq!(player.axis_value(look), 40);
    assert!(player.was_axis_changed(look));

    rig.unit.process();
    let player = rig.unit.virtual_controller(PLAYER).unwrap();
    assert_eq!(player.axis_value(look), 0);
    assert!(!player.was_axis_changed(look));
}

#[test]
fn one_key_fans_out_to_key_axis_and_pov() {
    let mut rig = rig();
    let fire = rig.unit.register_virtual_id("Fire", None).unwrap();
    let move_x = rig.unit.register_virtual_id("MoveX", None).unwrap();
    let dpad = rig.unit.register_virtual_id("Dpad", None).unwrap();

    let keyboard = rig.keyboard;
    let (controller, shortcuts) = rig.unit.virtual_controller_with_shortcuts(PLAYER).unwrap();
    controller
        .add_virtual_key(fire, keyboard, KEY_A, None, shortcuts)
        .unwrap();
    controller.add_virtual_axis(move_x, keyboard, AxisSource::Keys { min: KEY_A, max: KEY_D });
    controller
        .add_virtual_pov(
            dpad,
            keyboard,
            PovSource::Keys {
                up: KEY_UP,
                down: KEY_DOWN,
                left: KEY_A,
                right: KEY_D,
            },
            None,
            shortcuts,
        )
        .unwrap();
    let mut rx = listen(&mut rig.unit);
    assert!(rig.unit.enable_virtual_controller(PLAYER, true));

    rig.keys.push_key_at(KEY_A, true, 7);
    rig.unit.process();

    let player = rig.unit.virtual_controller(PLAYER).unwrap();
    assert!(player.is_key_pressed(fire));
    assert_eq!(player.axis_value(move_x), -255);
    assert_eq!(player.pov_position(dpad), PovPosition::Left);

    let events = drain(&mut rx);
    assert_eq!(events.len(), 3);
    assert!(events.contains(&VirtualEvent {
        id: fire,
        value: VirtualValue::Key(true),
        timestamp: 7
    }));
    assert!(events.contains(&VirtualEvent {
        id: move_x,
        value: VirtualValue::Axis(-255),
        timestamp: 7
    }));
    assert!(events.contains(&VirtualEvent {
        id: dpad,
        value: VirtualValue::Pov(PovPosition::Left),
        timestamp: 7
    }));
}

#[test]
fn one_batch_feeds_every_controller() {
    let mut rig = rig();
    let jump = rig.unit.register_virtual_id("Jump", None).unwrap();
    rig.unit.create_virtual_controller("spectator").unwrap();

    let keyboard = rig.keyboard;
    for name in [PLAYER, "spectator"] {
        let (controller, shortcuts) = rig.unit.virtual_controller_with_shortcuts(name).unwrap();
        controller
            .add_virtual_key(jump, keyboard, KEY_SPACE, None, shortcuts)
            .unwrap();
        assert!(rig.unit.enable_virtual_controller(name, true));
    }

    rig.keys.push_key_at(KEY_SPACE, true, 9);
    rig.unit.process();

    assert!(rig.unit.virtual_controller(PLAYER).unwrap().was_key_pressed(jump));
    assert!(rig.unit.virtual_controller("spectator").unwrap().was_key_pressed(jump));
    assert_eq!(rig.unit.stats().raw_events, 1);

    // A disabled controller does not starve the others
    assert!(rig.unit.enable_virtual_controller(PLAYER, false));
    rig.keys.push_key_at(KEY_SPACE, false, 10);
    rig.unit.process();
    assert!(!rig.unit.virtual_controller(PLAYER).unwrap().was_key_released(jump));
    assert!(rig.unit.virtual_controller("spectator").unwrap().was_key_released(jump));
}

#[test]
fn four_key_pov_walks_through_diagonals() {
    let mut rig = rig();
    let dpad = rig.unit.register_virtual_id("Dpad", None).unwrap();
    let keyboard = rig.keyboard;
    let (controller, shortcuts) = rig.unit.virtual_controller_with_shortcuts(PLAYER).unwrap();
    controller
        .add_virtual_pov(
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
        )
        .unwrap();
    assert!(rig.unit.enable_virtual_controller(PLAYER, true));

    rig.keys.push_key_at(KEY_UP, true, 1);
    rig.keys.push_key_at(KEY_RIGHT, true, 2);
    rig.unit.process();
    let player = rig.unit.virtual_controller(PLAYER).unwrap();
    assert_eq!(player.pov_position(dpad), PovPosition::UpRight);
    assert_eq!(player.pov_previous_position(dpad), PovPosition::Up);
    assert_eq!(player.pov_position_from_shortcut(dpad, "UR"), PovPosition::UpRight);

    rig.keys.push_key_at(KEY_UP, false, 3);
    rig.unit.process();
    let player = rig.unit.virtual_controller(PLAYER).unwrap();
    assert_eq!(player.pov_position(dpad), PovPosition::Right);

    assert_eq!(rig.unit.virtual_id_from_shortcut("DL"), Some(dpad));
    assert_eq!(rig.unit.virtual_id_from_shortcut("R"), Some(dpad));
}

#[test]
fn disabled_controller_rests_and_resumes() {
    let mut rig = rig();
    let jump = rig.unit.register_virtual_id("Jump", None).unwrap();
    let look = rig.unit.register_virtual_id("Look", None).unwrap();
    let (mouse, keyboard) = (rig.mouse, rig.keyboard);
    let (controller, shortcuts) = rig.unit.virtual_controller_with_shortcuts(PLAYER).unwrap();
    controller
        .add_virtual_key(jump, keyboard, KEY_SPACE, None, shortcuts)
        .unwrap();
    controller.add_virtual_axis(look, mouse, AxisSource::Axis(AXIS_Y));
    let mut rx = listen(&mut rig.unit);
    assert!(rig.unit.enable_virtual_controller(PLAYER, true));

    rig.keys.push_key_at(KEY_SPACE, true, 1);
    rig.unit.process();
    assert!(rig.unit.virtual_controller(PLAYER).unwrap().is_key_pressed(jump));
    drain(&mut rx);

    assert!(rig.unit.enable_virtual_controller(PLAYER, false));
    let player = rig.unit.virtual_controller(PLAYER).unwrap();
    assert!(!player.is_enabled());
    assert!(!player.is_key_pressed(jump));

    // Devices stay active, the controller simply ignores them
    rig.keys.push_key_at(KEY_SPACE, false, 2);
    rig.pointer.move_at(0, 30, 0, 2);
    rig.unit.process();
    assert!(drain(&mut rx).is_empty());
    assert_eq!(rig.unit.virtual_controller(PLAYER).unwrap().axis_value(look), 0);

    assert!(rig.unit.enable_virtual_controller(PLAYER, true));
    rig.keys.push_key_at(KEY_SPACE, true, 3);
    rig.unit.process();
    let player = rig.unit.virtual_controller(PLAYER).unwrap();
    assert!(player.was_key_pressed(jump));
    assert_eq!(
        drain(&mut rx),
        vec![VirtualEvent {
            id: jump,
            value: VirtualValue::Key(true),
            timestamp: 3
        }]
    );
}

#[test]
fn pov_shortcut_collision_leaves_registry_untouched() {
    let mut rig = rig();
    let jump = rig.unit.register_virtual_id("Jump", None).unwrap();
    let dpad = rig.unit.register_virtual_id("Dpad", None).unwrap();
    rig.unit.register_shortcut("UR", jump).unwrap();

    let keyboard = rig.keyboard;
    let (controller, shortcuts) = rig.unit.virtual_controller_with_shortcuts(PLAYER).unwrap();
    let result = controller.add_virtual_pov(
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
    );

    assert!(matches!(
        result,
        Err(RegistryError::ShortcutTaken { owner, .. }) if owner == jump
    ));
    assert!(!rig.unit.virtual_controller(PLAYER).unwrap().is_pov(dpad));
    assert_eq!(rig.unit.virtual_id_from_shortcut("U"), None);
    assert_eq!(rig.unit.shortcut_from_virtual_id(jump), Some("UR"));
}

#[test]
fn virtual_ids_are_assigned_and_checked() {
    let mut unit = InputsUnit::default();
    assert_eq!(unit.register_virtual_id("Jump", None).unwrap(), 1);
    assert_eq!(unit.register_virtual_id("Fire", Some(10)).unwrap(), 10);
    assert_eq!(unit.register_virtual_id("Duck", None).unwrap(), 11);
    assert_eq!(unit.register_virtual_id("Jump", None).unwrap(), 1);
    assert!(matches!(
        unit.register_virtual_id("Jump", Some(20)),
        Err(RegistryError::NameTaken(_))
    ));
    assert!(matches!(
        unit.register_virtual_id("Crouch", Some(10)),
        Err(RegistryError::IdTaken { id: 10, .. })
    ));
    assert_eq!(unit.virtual_name(10), Some("Fire"));
    assert_eq!(unit.virtual_id("Duck"), Some(11));
}

#[test]
fn scan_reports_only_active_devices() {
    let mut rig = rig();
    // Nothing is bound, so nothing is active
    rig.pointer.button_at(MOUSEKEY_LEFT, true, 4);
    rig.keys.push_key_at(KEY_SPACE, true, 5);

    let (mut tx, mut rx) = mpsc::unbounded_channel::<RawEvent>();
    let count = rig.unit.scan(&mut tx);

    // Inactive keyboards and mice drop what they queued
    assert_eq!(count, 0);
    assert!(rx.try_recv().is_err());

    rig.unit.activate_device(rig.mouse, true);
    rig.pointer.button_at(MOUSEKEY_LEFT, true, 6);
    assert_eq!(rig.unit.scan(&mut tx), 1);
    assert_eq!(
        rx.try_recv().ok(),
        Some(RawEvent::key(rig.mouse, MOUSEKEY_LEFT, true, 6))
    );
}
