//! Block identifiers and face directions.
//!
//! A voxel is a single byte. `0` is air; every other value is looked up in
//! the static registry (see [`crate::registry`]).

use bytemuck::{Pod, Zeroable};

/// An 8-bit block identifier, the content of one voxel.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Pod, Zeroable)]
pub struct BlockId(pub u8);

impl BlockId {
    /// Empty space.
    pub const AIR: Self = Self(0);
    /// Grass-topped dirt.
    pub const GRASS: Self = Self(1);
    /// Dirt.
    pub const DIRT: Self = Self(2);
    /// Stone.
    pub const STONE: Self = Self(3);
    /// Cobblestone.
    pub const COBBLESTONE: Self = Self(4);
    /// Wooden planks.
    pub const PLANKS: Self = Self(5);
    /// Tree trunk.
    pub const LOG: Self = Self(6);
    /// Leaves.
    pub const LEAVES: Self = Self(7);
    /// Sand.
    pub const SAND: Self = Self(8);
    /// Gravel.
    pub const GRAVEL: Self = Self(9);
    /// Still water.
    pub const WATER: Self = Self(10);
    /// Still lava.
    pub const LAVA: Self = Self(11);
    /// Unbreakable floor.
    pub const BEDROCK: Self = Self(12);
    /// Coal ore.
    pub const COAL_ORE: Self = Self(13);
    /// Iron ore.
    pub const IRON_ORE: Self = Self(14);
    /// Gold ore.
    pub const GOLD_ORE: Self = Self(15);
    /// Diamond ore.
    pub const DIAMOND_ORE: Self = Self(16);
    /// Glass.
    pub const GLASS: Self = Self(17);
    /// Snow block.
    pub const SNOW: Self = Self(18);
    /// Clay.
    pub const CLAY: Self = Self(19);
    /// Mossy cobblestone.
    pub const MOSSY_COBBLESTONE: Self = Self(20);
    /// Tall grass (cross-shaped).
    pub const TALL_GRASS: Self = Self(21);
    /// Red flower (cross-shaped).
    pub const FLOWER_RED: Self = Self(22);
    /// Yellow flower (cross-shaped).
    pub const FLOWER_YELLOW: Self = Self(23);
    /// Kelp (cross-shaped).
    pub const KELP: Self = Self(24);
    /// Cactus.
    pub const CACTUS: Self = Self(25);
    /// Lily pad.
    pub const LILY_PAD: Self = Self(26);
    /// Torch.
    pub const TORCH: Self = Self(27);
    /// Lantern.
    pub const LANTERN: Self = Self(28);
    /// Chest.
    pub const CHEST: Self = Self(29);
    /// Door.
    pub const DOOR: Self = Self(30);
    /// Fence.
    pub const FENCE: Self = Self(31);
    /// Ladder.
    pub const LADDER: Self = Self(32);
    /// Half-height slab.
    pub const SLAB: Self = Self(33);
    /// Stairs.
    pub const STAIRS: Self = Self(34);
    /// Sign.
    pub const SIGN: Self = Self(35);
    /// Trapdoor.
    pub const TRAPDOOR: Self = Self(36);
    /// Bed.
    pub const BED: Self = Self(37);
    /// Crafting table.
    pub const CRAFTING_TABLE: Self = Self(38);
    /// Furnace.
    pub const FURNACE: Self = Self(39);
    /// Glowstone.
    pub const GLOWSTONE: Self = Self(40);
    /// Sandstone.
    pub const SANDSTONE: Self = Self(41);
    /// Ice.
    pub const ICE: Self = Self(42);

    /// Stick (item).
    pub const STICK: Self = Self(100);
    /// Wooden pickaxe (item).
    pub const WOODEN_PICKAXE: Self = Self(101);
    /// Stone pickaxe (item).
    pub const STONE_PICKAXE: Self = Self(102);
    /// Iron pickaxe (item).
    pub const IRON_PICKAXE: Self = Self(103);
    /// Diamond pickaxe (item).
    pub const DIAMOND_PICKAXE: Self = Self(104);
    /// Wooden axe (item).
    pub const WOODEN_AXE: Self = Self(105);
    /// Stone axe (item).
    pub const STONE_AXE: Self = Self(106);
    /// Wooden shovel (item).
    pub const WOODEN_SHOVEL: Self = Self(107);
    /// Stone shovel (item).
    pub const STONE_SHOVEL: Self = Self(108);
    /// Wooden sword (item).
    pub const WOODEN_SWORD: Self = Self(109);
    /// Stone sword (item).
    pub const STONE_SWORD: Self = Self(110);
    /// Iron sword (item).
    pub const IRON_SWORD: Self = Self(111);
    /// Apple (food).
    pub const APPLE: Self = Self(112);
    /// Bread (food).
    pub const BREAD: Self = Self(113);
    /// Coal (item).
    pub const COAL: Self = Self(114);
    /// Iron ingot (item).
    pub const IRON_INGOT: Self = Self(115);

    /// Returns the raw byte.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Returns true for air.
    #[inline]
    #[must_use]
    pub const fn is_air(self) -> bool {
        self.0 == 0
    }
}

impl From<u8> for BlockId {
    #[inline]
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl From<BlockId> for u8 {
    #[inline]
    fn from(value: BlockId) -> Self {
        value.0
    }
}

/// One of the six axis-aligned faces of a voxel.
///
/// The discriminants are the face indices used by the texture atlas and the
/// brightness table: `[-X, +X, -Y, +Y, -Z, +Z] = [0..5]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Face {
    /// Facing -X.
    NegX = 0,
    /// Facing +X.
    PosX = 1,
    /// Facing -Y (bottom).
    NegY = 2,
    /// Facing +Y (top).
    PosY = 3,
    /// Facing -Z (back).
    NegZ = 4,
    /// Facing +Z (front).
    PosZ = 5,
}

impl Face {
    /// All faces in index order.
    pub const ALL: [Self; 6] = [
        Self::NegX,
        Self::PosX,
        Self::NegY,
        Self::PosY,
        Self::NegZ,
        Self::PosZ,
    ];

    /// Returns the face index (0-5).
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the face for an index, if in range.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::NegX),
            1 => Some(Self::PosX),
            2 => Some(Self::NegY),
            3 => Some(Self::PosY),
            4 => Some(Self::NegZ),
            5 => Some(Self::PosZ),
            _ => None,
        }
    }

    /// Integer offset to the neighbouring voxel this face looks at.
    #[inline]
    #[must_use]
    pub const fn offset(self) -> [i32; 3] {
        match self {
            Self::NegX => [-1, 0, 0],
            Self::PosX => [1, 0, 0],
            Self::NegY => [0, -1, 0],
            Self::PosY => [0, 1, 0],
            Self::NegZ => [0, 0, -1],
            Self::PosZ => [0, 0, 1],
        }
    }

    /// Outward unit normal.
    #[inline]
    #[must_use]
    pub const fn normal(self) -> [f32; 3] {
        match self {
            Self::NegX => [-1.0, 0.0, 0.0],
            Self::PosX => [1.0, 0.0, 0.0],
            Self::NegY => [0.0, -1.0, 0.0],
            Self::PosY => [0.0, 1.0, 0.0],
            Self::NegZ => [0.0, 0.0, -1.0],
            Self::PosZ => [0.0, 0.0, 1.0],
        }
    }

    /// Axis the face is perpendicular to (0 = X, 1 = Y, 2 = Z).
    #[inline]
    #[must_use]
    pub const fn axis(self) -> usize {
        self.index() / 2
    }

    /// True for the +X, +Y and +Z faces.
    #[inline]
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.index() % 2 == 1
    }

    /// The face pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::NegX => Self::PosX,
            Self::PosX => Self::NegX,
            Self::NegY => Self::PosY,
            Self::PosY => Self::NegY,
            Self::NegZ => Self::PosZ,
            Self::PosZ => Self::NegZ,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_indices_round_trip() {
        for (i, face) in Face::ALL.iter().enumerate() {
            assert_eq!(face.index(), i);
            assert_eq!(Face::from_index(i), Some(*face));
        }
        assert_eq!(Face::from_index(6), None);
    }

    #[test]
    fn test_face_offsets_match_normals() {
        for face in Face::ALL {
            let offset = face.offset();
            let normal = face.normal();
            for axis in 0..3 {
                assert_eq!(offset[axis] as f32, normal[axis]);
            }
            assert_eq!(face.opposite().opposite(), face);
            assert_eq!(face.opposite().axis(), face.axis());
            assert_ne!(face.opposite().is_positive(), face.is_positive());
        }
    }

    #[test]
    fn test_air() {
        assert!(BlockId::AIR.is_air());
        assert!(!BlockId::STONE.is_air());
        assert_eq!(BlockId::STONE.raw(), 3);
        assert_eq!(u8::from(BlockId::from(7)), 7);
    }
}
