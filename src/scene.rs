use fastnoise_lite::{FastNoiseLite, NoiseType};
use vxl_config::WorldDims;
use vxl_geom::{Vec3, Vec3i};
use vxl_map::{Block, VoxelMap};

const GRASS: u32 = 0x3C7A2E;
const DIRT: u32 = 0x674028;
const STONE: u32 = 0x7A7A7A;
const SAND: u32 = 0xC8B27A;

/// Gap left between a spawned body's feet and the ground; gravity closes it.
const SPAWN_GAP: f32 = 0.05;
/// Standing hull: body center to feet.
const FEET_BELOW_CENTER: f32 = 2.25;

/// Heightmap terrain. Row `z = 0` is the sky side; ground is solid from the
/// surface row down to the bottom of the grid.
pub fn build_terrain(dims: WorldDims, seed: i32) -> VoxelMap {
    let mut map = VoxelMap::new(dims);

    let mut noise = FastNoiseLite::with_seed(seed);
    noise.set_noise_type(Some(NoiseType::OpenSimplex2));
    noise.set_frequency(Some(0.02));

    let sz = dims.size_z as i32;
    // surface range: from about half depth down to just above the bottom slab
    let high = (sz as f32 * 0.5) as i32;
    let low = sz - 3;
    for x in 0..dims.size_x as i32 {
        for y in 0..dims.size_y as i32 {
            let h = noise.get_noise_2d(x as f32, y as f32);
            let surface = (((h + 1.0) * 0.5 * (low - high) as f32) as i32 + high).clamp(1, sz - 1);
            for z in surface..sz {
                let rgb = if z == surface {
                    if surface >= low - 1 { SAND } else { GRASS }
                } else if z < surface + 3 {
                    DIRT
                } else {
                    STONE
                };
                map.set(x, y, z, Block::solid(rgb));
            }
        }
    }

    log::info!(
        "built terrain {}x{}x{} seed={} solid={}",
        dims.size_x,
        dims.size_y,
        dims.size_z,
        seed,
        map.solid_count()
    );
    map
}

/// Flat ground with its surface at row `surface`.
pub fn build_flat(dims: WorldDims, surface: i32) -> VoxelMap {
    let mut map = VoxelMap::new(dims);
    map.fill_box(
        Vec3i::new(0, 0, surface),
        Vec3i::new(dims.size_x as i32 - 1, dims.size_y as i32 - 1, dims.size_z as i32 - 1),
        Block::DEFAULT,
    );
    map
}

/// Body-center position standing on the column at `(x, y)`, if it has ground.
pub fn spawn_point(map: &VoxelMap, x: i32, y: i32) -> Option<Vec3> {
    if !map.contains(x, y, 0) {
        return None;
    }
    let top = map.top_solid_z(x, y)?;
    Some(Vec3::new(
        x as f32 + 0.5,
        y as f32 + 0.5,
        top as f32 - FEET_BELOW_CENTER - SPAWN_GAP,
    ))
}
