use proptest::prelude::*;
use vxl_config::{PlayerParams, WorldDims};
use vxl_geom::{Vec3, Vec3i};
use vxl_map::{Block, VoxelMap};
use vxl_physics::{InputState, Landing, Player};

const DT: f32 = 1.0 / 60.0;
const FLOOR: i32 = 40;
// feet rest within one tick's fall of the floor
const REST_Z: f32 = 37.745;

fn flat() -> VoxelMap {
    let mut m = VoxelMap::new(WorldDims::new(64, 64, 64));
    m.fill_box(Vec3i::new(0, 0, FLOOR), Vec3i::new(63, 63, 63), Block::DEFAULT);
    m
}

/// Settles a freshly placed body onto the ground.
fn settle(map: &VoxelMap, params: &PlayerParams, p: &mut Player) {
    for _ in 0..600 {
        p.move_player(map, params, DT, 0.0);
        if !p.is_airborne() {
            return;
        }
    }
    panic!("body never landed at {:?}", p.pos());
}

proptest! {
    // A resting body with no input does not drift
    #[test]
    fn resting_body_is_idle(x in 2.0f32..62.0, y in 2.0f32..62.0) {
        let m = flat();
        let params = PlayerParams::default();
        let mut p = Player::new(Vec3::new(x, y, REST_Z));
        let out = p.move_player(&m, &params, DT, 1.0);
        prop_assert_eq!(out, Landing::None);
        prop_assert_eq!(p.pos(), Vec3::new(x, y, REST_Z));
        prop_assert_eq!(p.vel(), Vec3::ZERO);
    }

    // Walking on open ground never changes height
    #[test]
    fn walking_keeps_height(keys in 0u8..16, ticks in 1usize..60) {
        let m = flat();
        let params = PlayerParams::default();
        let mut p = Player::new(Vec3::new(32.0, 32.0, REST_Z));
        p.apply_input(&m, InputState(keys));
        for i in 0..ticks {
            p.move_player(&m, &params, DT, i as f32 * DT);
        }
        prop_assert_eq!(p.pos().z, REST_Z);
        prop_assert!(!p.is_airborne());
    }
}

#[test]
fn long_fall_deals_damage_once() {
    let m = flat();
    let params = PlayerParams::default();
    let mut p = Player::new(Vec3::new(20.5, 20.5, 5.0));
    p.set_velocity(Vec3::new(0.0, 0.0, 0.01)).unwrap();
    let mut hits = Vec::new();
    for i in 0..600 {
        match p.move_player(&m, &params, DT, i as f32 * DT) {
            Landing::None => {}
            other => hits.push(other),
        }
    }
    assert_eq!(hits.len(), 1, "{hits:?}");
    assert!(matches!(hits[0], Landing::Damage(d) if d > 0));
    assert!(!p.is_airborne());
    assert!(p.pos().z + 2.25 < FLOOR as f32);
}

#[test]
fn short_hop_is_harmless() {
    let m = flat();
    let params = PlayerParams::default();
    let mut p = Player::new(Vec3::new(20.5, 20.5, REST_Z));
    settle(&m, &params, &mut p);
    p.apply_input(&m, InputState::JUMP);
    assert!(p.intents().jump);
    let mut outcomes = Vec::new();
    for i in 0..120 {
        outcomes.push(p.move_player(&m, &params, DT, i as f32 * DT));
    }
    assert!(outcomes.iter().all(|o| !matches!(o, Landing::Damage(_))));
    assert!(!p.is_airborne());
}

#[test]
fn walks_up_a_staircase() {
    let mut m = flat();
    // three one-block steps rising along +x
    for (i, x) in (24..=26).enumerate() {
        let top = FLOOR - 1 - i as i32;
        m.fill_box(Vec3i::new(x, 0, top), Vec3i::new(63, 63, FLOOR - 1), Block::DEFAULT);
    }
    let params = PlayerParams::default();
    let mut p = Player::new(Vec3::new(20.5, 20.5, REST_Z));
    settle(&m, &params, &mut p);
    p.apply_input(&m, InputState::UP);
    for i in 0..600 {
        p.move_player(&m, &params, DT, i as f32 * DT);
    }
    assert!(p.pos().x > 27.0, "stuck at {:?}", p.pos());
    assert!(p.pos().z < REST_Z - 2.5);
}

#[test]
fn crouched_body_does_not_climb() {
    let mut m = flat();
    m.fill_box(Vec3i::new(24, 0, FLOOR - 1), Vec3i::new(63, 63, FLOOR - 1), Block::DEFAULT);
    let params = PlayerParams::default();
    // crouched hull is 0.9 shorter, so it rests 0.9 lower in z terms
    let mut p = Player::new(Vec3::new(20.5, 20.5, REST_Z + 0.9));
    p.apply_input(&m, InputState::UP | InputState::CROUCH);
    settle(&m, &params, &mut p);
    for i in 0..600 {
        p.move_player(&m, &params, DT, i as f32 * DT);
    }
    assert!(p.pos().x < 24.0);
    assert!(p.is_crouching());
}
