//! Ship AI integration test
//!
//! Headless App + SimulationPlugin: корабль против игрока.
//!
//! Проверяем:
//! - переходы FSM через ECS (PlayerRef, события)
//! - корабль без игрока живёт в Wander
//! - debug overlay / player movement

use bevy::prelude::*;
use setsail_simulation::*;

/// Лог переходов (пишется тестовой системой из ShipStateChanged)
#[derive(Resource, Default)]
struct Transitions(Vec<(ShipState, ShipState)>);

#[derive(Resource, Default)]
struct AttackCount(usize);

fn record_events(
    mut changes: EventReader<ShipStateChanged>,
    mut attacks: EventReader<ShipAttacking>,
    mut transitions: ResMut<Transitions>,
    mut count: ResMut<AttackCount>,
) {
    for event in changes.read() {
        transitions.0.push((event.from, event.to));
    }
    count.0 += attacks.read().count();
}

/// Helper: полный App симуляции + запись событий
fn create_ship_app(seed: u64) -> App {
    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin::default())
        .init_resource::<Transitions>()
        .init_resource::<AttackCount>()
        .add_systems(FixedUpdate, record_events.after(SimulationSet::Ai));
    app
}

/// Корабль в начале координат, нос на +Z
fn spawn_ship(app: &mut App, config: ShipAIConfig) -> Entity {
    let transform = Transform::IDENTITY.looking_to(Dir3::Z, Dir3::Y);
    app.world_mut().spawn(ship_bundle(transform, config)).id()
}

fn spawn_player(app: &mut App, position: Vec3) -> Entity {
    app.world_mut().spawn(player_bundle(position, 3.0)).id()
}

fn run(app: &mut App, updates: usize) {
    for _ in 0..updates {
        app.update();
    }
}

fn state(app: &App, ship: Entity) -> ShipState {
    app.world()
        .get::<ShipBrain>(ship)
        .expect("ship has a brain")
        .state()
}

fn move_player(app: &mut App, player: Entity, position: Vec3) {
    app.world_mut()
        .get_mut::<Transform>(player)
        .expect("player has a transform")
        .translation = position;
}

#[test]
fn test_ship_approaches_player_in_sight() {
    let mut app = create_ship_app(42);
    let ship = spawn_ship(&mut app, ShipAIConfig::default());
    let player = spawn_player(&mut app, Vec3::new(0.0, 0.0, 175.0));

    run(&mut app, 10);

    assert_eq!(state(&app, ship), ShipState::Approach);
    assert_eq!(app.world().get::<PlayerRef>(ship), Some(&PlayerRef(Some(player))));
}

#[test]
fn test_far_near_close_transitions() {
    let mut app = create_ship_app(7);
    let ship = spawn_ship(&mut app, ShipAIConfig::default());
    let player = spawn_player(&mut app, Vec3::new(0.0, 0.0, 300.0));

    run(&mut app, 5);
    assert_eq!(state(&app, ship), ShipState::Wander);

    move_player(&mut app, player, Vec3::new(0.0, 0.0, 175.0));
    run(&mut app, 3);
    assert_eq!(state(&app, ship), ShipState::Approach);

    move_player(&mut app, player, Vec3::new(0.0, 0.0, 50.0));
    run(&mut app, 3);
    assert_eq!(state(&app, ship), ShipState::Attack);

    let transitions = &app.world().resource::<Transitions>().0;
    assert_eq!(
        transitions,
        &vec![
            (ShipState::Wander, ShipState::Approach),
            (ShipState::Approach, ShipState::Attack),
        ]
    );
}

#[test]
fn test_bare_player_marker_is_hit_by_broadside_rays() {
    let mut app = create_ship_app(4);
    let config = ShipAIConfig {
        wander_jitter: 0.0,
        ..Default::default()
    };
    let ship = spawn_ship(&mut app, config);

    // Только marker: RayCollider приходит через required components
    app.world_mut()
        .spawn((Player, Transform::from_xyz(100.0, 0.5, 0.0)));

    run(&mut app, 10);

    assert_eq!(state(&app, ship), ShipState::Attack);
    assert!(app.world().resource::<AttackCount>().0 > 0);

    let overlay = app.world().get::<DebugOverlay>(ship).expect("ship has overlay");
    assert_eq!(overlay.label, "Attacking!");

    // Уже бортом: корабль не крутится
    let forward = app.world().get::<Transform>(ship).expect("ship").forward();
    assert!(forward.as_vec3().abs_diff_eq(Vec3::Z, 1e-4), "forward {:?}", forward);
}

#[test]
fn test_attack_turns_broadside_and_fires() {
    let mut app = create_ship_app(3);
    let config = ShipAIConfig {
        attack_turn_rate_deg: 90.0,
        ..Default::default()
    };
    let ship = spawn_ship(&mut app, config);
    spawn_player(&mut app, Vec3::new(100.0, 0.5, 0.0));

    // ≤ 180° при 90°/s: не больше 2 сек
    run(&mut app, 240);

    assert_eq!(state(&app, ship), ShipState::Attack);
    assert!(app.world().resource::<AttackCount>().0 > 0);

    let overlay = app.world().get::<DebugOverlay>(ship).expect("ship has overlay");
    assert_eq!(overlay.label, "Attacking!");
}

#[test]
fn test_ship_without_player_wanders() {
    let mut app = create_ship_app(11);
    let ship = spawn_ship(&mut app, ShipAIConfig::default());

    run(&mut app, 200);

    assert_eq!(state(&app, ship), ShipState::Wander);
    assert_eq!(app.world().get::<PlayerRef>(ship), Some(&PlayerRef(None)));

    let position = app.world().get::<Transform>(ship).expect("ship").translation;
    assert!(position.length() > 1.0, "ship should keep moving, at {:?}", position);
    assert!(app.world().resource::<Transitions>().0.is_empty());
}

#[test]
fn test_late_player_is_resolved() {
    let mut app = create_ship_app(12);
    let ship = spawn_ship(&mut app, ShipAIConfig::default());

    run(&mut app, 10);
    assert_eq!(state(&app, ship), ShipState::Wander);

    let player = spawn_player(&mut app, Vec3::new(0.0, 0.0, 175.0));
    run(&mut app, 3);

    assert_eq!(app.world().get::<PlayerRef>(ship), Some(&PlayerRef(Some(player))));
    assert_eq!(state(&app, ship), ShipState::Approach);
}

#[test]
fn test_despawned_player_sends_ship_back_to_wander() {
    let mut app = create_ship_app(13);
    let ship = spawn_ship(&mut app, ShipAIConfig::default());
    let player = spawn_player(&mut app, Vec3::new(0.0, 0.0, 50.0));

    run(&mut app, 3);
    assert_eq!(state(&app, ship), ShipState::Attack);

    app.world_mut().despawn(player);
    run(&mut app, 2);

    assert_eq!(state(&app, ship), ShipState::Wander);
    assert_eq!(app.world().get::<PlayerRef>(ship), Some(&PlayerRef(None)));
}

#[test]
fn test_manual_player_reference() {
    let mut app = create_ship_app(14);
    let config = ShipAIConfig {
        auto_resolve_player: false,
        ..Default::default()
    };
    let ship = spawn_ship(&mut app, config);
    let player = spawn_player(&mut app, Vec3::new(0.0, 0.0, 175.0));

    run(&mut app, 5);
    assert_eq!(app.world().get::<PlayerRef>(ship), Some(&PlayerRef(None)));
    assert_eq!(state(&app, ship), ShipState::Wander);

    app.world_mut().entity_mut(ship).insert(PlayerRef(Some(player)));
    run(&mut app, 2);
    assert_eq!(state(&app, ship), ShipState::Approach);
}

#[test]
fn test_debug_overlay_toggle() {
    let mut app = create_ship_app(15);
    let debug_ship = spawn_ship(&mut app, ShipAIConfig::default());
    let quiet_ship = spawn_ship(
        &mut app,
        ShipAIConfig {
            debug: false,
            ..Default::default()
        },
    );

    run(&mut app, 3);

    let overlay = app.world().get::<DebugOverlay>(debug_ship).expect("overlay");
    assert_eq!(overlay.label, "Wander");
    assert_eq!(overlay.rays.len(), 3);

    let overlay = app.world().get::<DebugOverlay>(quiet_ship).expect("overlay");
    assert!(overlay.label.is_empty());
    assert!(overlay.rays.is_empty());
}

#[test]
fn test_player_input_moves_player() {
    let mut app = create_ship_app(16);
    let player = spawn_player(&mut app, Vec3::ZERO);
    app.world_mut()
        .get_mut::<PlayerInput>(player)
        .expect("player input")
        .axis = Vec2::new(0.0, 1.0);

    // Первый update только инициализирует часы, дальше 60 тиков = 1 сек
    run(&mut app, 61);

    let position = app.world().get::<Transform>(player).expect("player").translation;
    assert!((position.z - 10.0).abs() < 0.2, "player at {:?}", position);
    assert_eq!(position.x, 0.0);
}
