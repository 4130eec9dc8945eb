use proptest::prelude::*;
use vxl_config::WorldDims;
use vxl_map::{Block, ClipPolicy, VoxelMap};

const DIMS: WorldDims = WorldDims::new(8, 8, 8);

fn arb_cells() -> impl Strategy<Value = Vec<(i32, i32, i32)>> {
    prop::collection::vec((0i32..8, 0i32..8, 0i32..8), 0..300)
}

fn build(cells: &[(i32, i32, i32)]) -> VoxelMap {
    let mut m = VoxelMap::new(DIMS);
    for &(x, y, z) in cells {
        m.set(x, y, z, Block::DEFAULT);
    }
    m
}

fn has_air_neighbor(m: &VoxelMap, x: i32, y: i32, z: i32) -> bool {
    [(-1, 0, 0), (1, 0, 0), (0, -1, 0), (0, 1, 0), (0, 0, -1), (0, 0, 1)]
        .iter()
        .any(|&(dx, dy, dz)| matches!(m.get_checked(x + dx, y + dy, z + dz), Some(b) if b.is_air()))
}

proptest! {
    // Surface cells are exactly the solid cells with an in-grid air neighbor
    #[test]
    fn surface_matches_neighbor_scan(cells in arb_cells()) {
        let m = build(&cells);
        for x in 0..8 { for y in 0..8 { for z in 0..8 {
            let expect = m.is_solid(x, y, z) && has_air_neighbor(&m, x, y, z);
            prop_assert_eq!(m.is_surface(x, y, z), expect, "cell ({}, {}, {})", x, y, z);
        }}}
    }

    // Every written cell reads back
    #[test]
    fn writes_read_back(cells in arb_cells()) {
        let m = build(&cells);
        for &(x, y, z) in &cells {
            prop_assert!(m.is_solid(x, y, z));
            prop_assert_eq!(m.get_checked(x, y, z), Some(Block::DEFAULT));
        }
    }

    // Wrapped lookups agree with the store inside the grid
    #[test]
    fn wrapped_agrees_in_range(cells in arb_cells(), x in 0i64..8, y in 0i64..8, z in 0i64..8) {
        let m = build(&cells);
        prop_assert_eq!(
            ClipPolicy::Wrapped.is_solid(&m, x, y, z),
            m.is_solid(x as i32, y as i32, z as i32)
        );
        prop_assert_eq!(
            ClipPolicy::Wrapped.is_solid(&m, x + 8 * 3, y - 8 * 5, z),
            m.is_solid(x as i32, y as i32, z as i32)
        );
    }
}

#[test]
fn all_air_grid_has_no_surface() {
    let m = VoxelMap::new(DIMS);
    for x in 0..8 {
        for y in 0..8 {
            for z in 0..8 {
                assert!(!m.is_surface(x, y, z));
            }
        }
    }
}
