/// One voxel: packed `0xAARRGGBB` where the high byte is the occupancy flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Block(pub u32);

impl Block {
    pub const OCCUPIED_MASK: u32 = 0xFF00_0000;
    pub const COLOR_MASK: u32 = 0x00FF_FFFF;
    /// Dirt brown, the color new solid cells get when none is given.
    pub const DEFAULT: Block = Block(0xFF67_4028);
    pub const AIR: Block = Block(Self::DEFAULT.0 & Self::COLOR_MASK);

    /// Solid block with the given `0xRRGGBB` color.
    #[inline]
    pub const fn solid(rgb: u32) -> Block {
        Block(Self::OCCUPIED_MASK | (rgb & Self::COLOR_MASK))
    }

    #[inline]
    pub const fn is_solid(self) -> bool {
        self.0 & Self::OCCUPIED_MASK != 0
    }

    #[inline]
    pub const fn is_air(self) -> bool {
        !self.is_solid()
    }

    #[inline]
    pub const fn rgb(self) -> u32 {
        self.0 & Self::COLOR_MASK
    }
}

impl Default for Block {
    fn default() -> Self {
        Block::AIR
    }
}
