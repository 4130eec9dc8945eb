use proptest::prelude::*;
use vxl_config::{GrenadeParams, WorldDims};
use vxl_geom::{Vec3, Vec3i};
use vxl_map::{Block, VoxelMap};
use vxl_physics::{Bounce, Grenade};

fn rubble(cells: &[(i32, i32, i32)]) -> VoxelMap {
    let mut m = VoxelMap::new(WorldDims::new(32, 32, 32));
    m.fill_box(Vec3i::new(0, 0, 28), Vec3i::new(31, 31, 31), Block::DEFAULT);
    for &(x, y, z) in cells {
        m.set(x, y, z, Block::DEFAULT);
    }
    m
}

fn speed() -> impl Strategy<Value = f32> {
    -1.5f32..1.5
}

proptest! {
    // A bouncing grenade stays put for the tick and loses energy on every axis
    #[test]
    fn bounce_never_penetrates_and_damps(
        cells in prop::collection::vec((0i32..32, 0i32..32, 0i32..28), 0..150),
        px in 1.0f32..31.0, py in 1.0f32..31.0, pz in 1.0f32..27.0,
        vx in speed(), vy in speed(), vz in speed(),
    ) {
        let m = rubble(&cells);
        prop_assume!(!m.is_solid(px as i32, py as i32, pz as i32));
        let params = GrenadeParams::default();
        let dt = 1.0 / 60.0;
        let start = Grenade::new(Vec3::new(px, py, pz), Vec3::new(vx, vy, vz));
        let mut g = start;
        let b = g.step(&m, &params, dt);
        if b.bounced() {
            prop_assert_eq!(g.pos, start.pos);
            let pre = Vec3::new(vx, vy, vz + dt);
            let eps = 1e-6;
            prop_assert!(g.vel.x.abs() <= pre.x.abs() * 0.36 + eps);
            prop_assert!(g.vel.y.abs() <= pre.y.abs() * 0.36 + eps);
            prop_assert!(g.vel.z.abs() <= pre.z.abs() * 0.36 + eps);
        } else {
            prop_assert_eq!(b, Bounce::None);
            prop_assert!(!m.is_solid(
                g.pos.x.floor() as i32,
                g.pos.y.floor() as i32,
                g.pos.z.floor() as i32
            ));
        }
    }

    // Sound is played exactly when some component is above the threshold
    #[test]
    fn loud_iff_fast(vx in speed(), vy in speed(), vz in 0.0f32..1.5) {
        let m = rubble(&[]);
        let params = GrenadeParams::default();
        let dt = 1.0 / 60.0;
        let mut g = Grenade::new(Vec3::new(10.5, 10.5, 27.999), Vec3::new(vx, vy, vz));
        let b = g.step(&m, &params, dt);
        prop_assume!(b.bounced());
        let fast = vx.abs() > 0.1 || vy.abs() > 0.1 || (vz + dt).abs() > 0.1;
        prop_assert_eq!(b == Bounce::Loud, fast);
    }
}

#[test]
fn resting_grenade_settles() {
    let m = rubble(&[]);
    let params = GrenadeParams::default();
    let mut g = Grenade::new(Vec3::new(10.5, 10.5, 27.5), Vec3::new(0.0, 0.0, 0.4));
    let mut loud = 0;
    for _ in 0..600 {
        if g.step(&m, &params, 1.0 / 60.0) == Bounce::Loud {
            loud += 1;
        }
    }
    assert!(loud >= 1);
    assert!(g.pos.z < 28.0);
    assert!(g.vel.z.abs() < 0.1);
}
