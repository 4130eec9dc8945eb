use vxl_geom::Vec3;

use crate::VoxelMap;

/// How a consumer treats coordinates outside the grid.
///
/// The three tables differ; do not merge them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClipPolicy {
    /// Sight and ray queries: x/y wrap around, above the grid is open,
    /// at or below the floor plane is solid.
    Wrapped,
    /// Player hull: x/y outside the grid is a wall, above is open, the
    /// bottom slab merges into the one above it, below the floor is solid.
    PlayerBox,
    /// Grenades: x/y outside the grid is open so they fall off the edge,
    /// otherwise like [`ClipPolicy::PlayerBox`].
    GrenadeWorld,
}

impl ClipPolicy {
    pub fn is_solid(self, map: &VoxelMap, x: i64, y: i64, z: i64) -> bool {
        let dims = map.dims();
        let (sx, sy, sz) = (dims.size_x as i64, dims.size_y as i64, dims.size_z as i64);
        match self {
            ClipPolicy::Wrapped => {
                if z < 0 {
                    return false;
                }
                if z >= sz {
                    return true;
                }
                map.is_solid((x & (sx - 1)) as i32, (y & (sy - 1)) as i32, z as i32)
            }
            ClipPolicy::PlayerBox | ClipPolicy::GrenadeWorld => {
                if x < 0 || x >= sx || y < 0 || y >= sy {
                    return self == ClipPolicy::PlayerBox;
                }
                if z < 0 {
                    return false;
                }
                let z = if z == sz - 1 {
                    sz - 2
                } else if z >= sz {
                    return true;
                } else {
                    z
                };
                map.is_solid(x as i32, y as i32, z as i32)
            }
        }
    }

    /// Tests the cell containing a world-space point.
    #[inline]
    pub fn is_solid_at(self, map: &VoxelMap, p: Vec3) -> bool {
        self.is_solid(
            map,
            p.x.floor() as i64,
            p.y.floor() as i64,
            p.z.floor() as i64,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Block;
    use vxl_config::WorldDims;

    fn map() -> VoxelMap {
        let mut m = VoxelMap::new(WorldDims::new(16, 16, 8));
        m.set(0, 0, 3, Block::DEFAULT);
        m.set(5, 5, 6, Block::DEFAULT);
        m
    }

    #[test]
    fn wrapped_masks_horizontal_axes() {
        let m = map();
        assert!(ClipPolicy::Wrapped.is_solid(&m, 16, 0, 3));
        assert!(ClipPolicy::Wrapped.is_solid(&m, -16, 32, 3));
        assert!(ClipPolicy::Wrapped.is_solid(&m, 0, -16, 3));
        assert!(!ClipPolicy::Wrapped.is_solid(&m, 1, 0, 3));
    }

    #[test]
    fn wrapped_vertical_limits() {
        let m = map();
        assert!(!ClipPolicy::Wrapped.is_solid(&m, 0, 0, -1));
        assert!(ClipPolicy::Wrapped.is_solid(&m, 3, 3, 8));
        assert!(ClipPolicy::Wrapped.is_solid(&m, 3, 3, 100));
        // the bottom slab is not merged for sight
        assert!(!ClipPolicy::Wrapped.is_solid(&m, 5, 5, 7));
    }

    #[test]
    fn player_edges_are_walls() {
        let m = map();
        assert!(ClipPolicy::PlayerBox.is_solid(&m, -1, 3, 3));
        assert!(ClipPolicy::PlayerBox.is_solid(&m, 3, 16, 3));
        assert!(!ClipPolicy::PlayerBox.is_solid(&m, 3, 3, -5));
        assert!(ClipPolicy::PlayerBox.is_solid(&m, 3, 3, 8));
    }

    #[test]
    fn grenade_edges_are_open() {
        let m = map();
        assert!(!ClipPolicy::GrenadeWorld.is_solid(&m, -1, 3, 3));
        assert!(!ClipPolicy::GrenadeWorld.is_solid(&m, 3, 16, 3));
        assert!(!ClipPolicy::GrenadeWorld.is_solid(&m, 3, 3, -1));
        assert!(ClipPolicy::GrenadeWorld.is_solid(&m, 3, 3, 8));
    }

    #[test]
    fn bottom_slab_merges_upward() {
        let m = map();
        for policy in [ClipPolicy::PlayerBox, ClipPolicy::GrenadeWorld] {
            assert!(policy.is_solid(&m, 5, 5, 7), "{policy:?}");
            assert!(!policy.is_solid(&m, 4, 5, 7), "{policy:?}");
        }
    }

    #[test]
    fn point_lookup_floors_negative_coordinates() {
        let m = map();
        assert!(ClipPolicy::PlayerBox.is_solid_at(&m, Vec3::new(-0.1, 2.0, 2.0)));
        assert!(!ClipPolicy::GrenadeWorld.is_solid_at(&m, Vec3::new(-0.1, 2.0, 2.0)));
        assert!(ClipPolicy::PlayerBox.is_solid_at(&m, Vec3::new(0.9, 0.2, 3.5)));
    }
}
