//! # Block Registry
//!
//! Static descriptors for every block and item id.
//!
//! The registry is plain `static` data: it is built at compile time, never
//! mutated, and safe to read from any thread.
//!
//! ## Block Kinds
//!
//! Mesh dispatch is driven by [`BlockKind`] rather than loose flags:
//!
//! - `Regular`: one textured quad per visible cube face
//! - `Cross`: two crossed diagonal quads (plants)
//! - `Custom`: a fixed set of sub-boxes inside the unit cube
//! - `Item`: never placed in the world (tools, food)
//!
//! ## Texture Atlas
//!
//! The atlas is 256x256 pixels of 16x16 tiles. A [`TileCoord`] is a tile
//! index on that 16x16 grid, not a pixel position.

use crate::block::{BlockId, Face};

/// Tile position on the 16x16 atlas grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TileCoord {
    /// Column (0-15).
    pub u: u8,
    /// Row (0-15), counted from the top of the atlas image.
    pub v: u8,
}

impl TileCoord {
    /// Magenta checker shown for unknown ids.
    pub const MISSING: Self = Self::new(15, 15);

    /// Creates a tile coordinate.
    #[inline]
    #[must_use]
    pub const fn new(u: u8, v: u8) -> Self {
        Self { u, v }
    }
}

/// Per-face tiles in face-index order `[-X, +X, -Y, +Y, -Z, +Z]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceTiles(pub [TileCoord; 6]);

impl FaceTiles {
    /// Same tile on all six faces.
    #[must_use]
    pub const fn all(tile: TileCoord) -> Self {
        Self([tile; 6])
    }

    /// Logs, pillars: `end` on top and bottom, `side` around.
    #[must_use]
    pub const fn column(end: TileCoord, side: TileCoord) -> Self {
        Self([side, side, end, end, side, side])
    }

    /// Distinct top, side and bottom tiles.
    #[must_use]
    pub const fn top_side_bottom(top: TileCoord, side: TileCoord, bottom: TileCoord) -> Self {
        Self([side, side, bottom, top, side, side])
    }

    /// Replaces the tile on one face.
    #[must_use]
    pub const fn with_face(mut self, face: Face, tile: TileCoord) -> Self {
        self.0[face as usize] = tile;
        self
    }

    /// Tile for a face.
    #[inline]
    #[must_use]
    pub const fn get(&self, face: Face) -> TileCoord {
        self.0[face as usize]
    }
}

/// Sub-block geometries rendered as boxes inside the unit cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CustomShape {
    /// Slightly inset full-height column.
    Cactus,
    /// Flat pad resting on the water surface.
    LilyPad,
    /// Thin stick.
    Torch,
    /// Small hanging-style lamp.
    Lantern,
    /// Chest; pairs with a neighbouring chest into a double chest.
    Chest,
    /// Thin full-height panel.
    Door,
    /// Post with arms reaching toward connectable neighbours.
    Fence,
    /// Thin panel against the back of the cell.
    Ladder,
    /// Lower half of the cell.
    Slab,
    /// Lower half plus a raised back half.
    Stairs,
    /// Post with a board on top.
    Sign,
    /// Thin plate on the floor of the cell.
    Trapdoor,
    /// Low mattress.
    Bed,
}

/// How a block is turned into geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// Empty space; emits nothing.
    Air,
    /// Full cube with per-face tiles.
    Regular {
        /// Atlas tiles per face.
        tiles: FaceTiles,
    },
    /// Two crossed diagonal quads.
    Cross {
        /// Atlas tile used on both quads.
        tile: TileCoord,
    },
    /// Fixed set of sub-boxes.
    Custom {
        /// Geometry template.
        shape: CustomShape,
        /// Atlas tiles per face of every sub-box.
        tiles: FaceTiles,
    },
    /// Inventory-only entry; never meshed.
    Item {
        /// Icon tile.
        tile: TileCoord,
    },
}

/// Tool categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    /// Mines stone and ores.
    Pickaxe,
    /// Chops wood.
    Axe,
    /// Digs dirt, sand, gravel.
    Shovel,
    /// Melee weapon.
    Sword,
}

/// Tool statistics attached to tool items.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolData {
    /// Tool category.
    pub kind: ToolKind,
    /// Material tier (0 = wood, 1 = stone, 2 = iron, 3 = diamond).
    pub tier: u8,
    /// Mining speed multiplier against the preferred block class.
    pub speed: f32,
    /// Uses before breaking.
    pub durability: u16,
    /// Melee damage.
    pub damage: f32,
}

/// Nutrition attached to food items.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoodData {
    /// Hunger points restored.
    pub hunger: u8,
    /// Saturation restored.
    pub saturation: f32,
}

/// Everything the engine knows about one id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockDescriptor {
    /// The id this descriptor belongs to.
    pub id: BlockId,
    /// Display name.
    pub name: &'static str,
    /// Mining time factor; negative means unbreakable.
    pub hardness: f32,
    /// Neighbouring faces stay visible through this block.
    pub transparent: bool,
    /// Entities pass through.
    pub no_collision: bool,
    /// Liquid.
    pub fluid: bool,
    /// Emitted light level (0-15).
    pub light: u8,
    /// Geometry class and textures.
    pub kind: BlockKind,
    /// Tool class that mines this block fastest.
    pub preferred_tool: Option<ToolKind>,
    /// Present on tool items.
    pub tool: Option<ToolData>,
    /// Present on food items.
    pub food: Option<FoodData>,
}

impl BlockDescriptor {
    const fn base(id: u8, name: &'static str, hardness: f32, kind: BlockKind) -> Self {
        Self {
            id: BlockId(id),
            name,
            hardness,
            transparent: false,
            no_collision: false,
            fluid: false,
            light: 0,
            kind,
            preferred_tool: None,
            tool: None,
            food: None,
        }
    }

    /// Opaque full cube.
    const fn cube(id: u8, name: &'static str, hardness: f32, tiles: FaceTiles) -> Self {
        Self::base(id, name, hardness, BlockKind::Regular { tiles })
    }

    /// Cross-shaped plant: transparent, walk-through, instant break.
    const fn plant(id: u8, name: &'static str, tile: TileCoord) -> Self {
        let mut desc = Self::base(id, name, 0.0, BlockKind::Cross { tile });
        desc.transparent = true;
        desc.no_collision = true;
        desc
    }

    /// Custom sub-box geometry; always transparent so neighbours keep their faces.
    const fn shaped(
        id: u8,
        name: &'static str,
        hardness: f32,
        shape: CustomShape,
        tiles: FaceTiles,
    ) -> Self {
        let mut desc = Self::base(id, name, hardness, BlockKind::Custom { shape, tiles });
        desc.transparent = true;
        desc
    }

    const fn item(id: u8, name: &'static str, tile: TileCoord) -> Self {
        let mut desc = Self::base(id, name, 0.0, BlockKind::Item { tile });
        desc.transparent = true;
        desc.no_collision = true;
        desc
    }

    const fn see_through(mut self) -> Self {
        self.transparent = true;
        self
    }

    const fn passable(mut self) -> Self {
        self.no_collision = true;
        self
    }

    const fn liquid(mut self) -> Self {
        self.fluid = true;
        self.transparent = true;
        self.no_collision = true;
        self
    }

    const fn emits(mut self, light: u8) -> Self {
        self.light = light;
        self
    }

    const fn mined_with(mut self, kind: ToolKind) -> Self {
        self.preferred_tool = Some(kind);
        self
    }

    const fn with_tool(mut self, kind: ToolKind, tier: u8, speed: f32, durability: u16, damage: f32) -> Self {
        self.tool = Some(ToolData { kind, tier, speed, durability, damage });
        self
    }

    const fn with_food(mut self, hunger: u8, saturation: f32) -> Self {
        self.food = Some(FoodData { hunger, saturation });
        self
    }

    /// True for cross-shaped plants.
    #[inline]
    #[must_use]
    pub const fn is_cross(&self) -> bool {
        matches!(self.kind, BlockKind::Cross { .. })
    }

    /// True for sub-box geometry.
    #[inline]
    #[must_use]
    pub const fn is_custom_mesh(&self) -> bool {
        matches!(self.kind, BlockKind::Custom { .. })
    }

    /// True for full cubes.
    #[inline]
    #[must_use]
    pub const fn is_regular(&self) -> bool {
        matches!(self.kind, BlockKind::Regular { .. })
    }

    /// Atlas tile for a face.
    #[must_use]
    pub const fn tile(&self, face: Face) -> TileCoord {
        match self.kind {
            BlockKind::Regular { tiles } | BlockKind::Custom { tiles, .. } => tiles.get(face),
            BlockKind::Cross { tile } | BlockKind::Item { tile } => tile,
            BlockKind::Air => TileCoord::MISSING,
        }
    }
}

const fn t(u: u8, v: u8) -> TileCoord {
    TileCoord::new(u, v)
}

const PLANK_TILE: TileCoord = t(4, 0);

/// First id of the item range.
pub const FIRST_ITEM_ID: u8 = 100;

static BLOCKS: [BlockDescriptor; 43] = [
    BlockDescriptor::base(0, "Air", 0.0, BlockKind::Air).see_through().passable(),
    BlockDescriptor::cube(1, "Grass", 0.6, FaceTiles::top_side_bottom(t(0, 0), t(3, 0), t(2, 0)))
        .mined_with(ToolKind::Shovel),
    BlockDescriptor::cube(2, "Dirt", 0.5, FaceTiles::all(t(2, 0))).mined_with(ToolKind::Shovel),
    BlockDescriptor::cube(3, "Stone", 1.5, FaceTiles::all(t(1, 0))).mined_with(ToolKind::Pickaxe),
    BlockDescriptor::cube(4, "Cobblestone", 2.0, FaceTiles::all(t(0, 1))).mined_with(ToolKind::Pickaxe),
    BlockDescriptor::cube(5, "Planks", 2.0, FaceTiles::all(PLANK_TILE)).mined_with(ToolKind::Axe),
    BlockDescriptor::cube(6, "Log", 2.0, FaceTiles::column(t(5, 1), t(4, 1))).mined_with(ToolKind::Axe),
    BlockDescriptor::cube(7, "Leaves", 0.2, FaceTiles::all(t(4, 3))).see_through(),
    BlockDescriptor::cube(8, "Sand", 0.5, FaceTiles::all(t(2, 1))).mined_with(ToolKind::Shovel),
    BlockDescriptor::cube(9, "Gravel", 0.6, FaceTiles::all(t(3, 1))).mined_with(ToolKind::Shovel),
    BlockDescriptor::cube(10, "Water", 100.0, FaceTiles::all(t(13, 12))).liquid(),
    BlockDescriptor::cube(11, "Lava", 100.0, FaceTiles::all(t(13, 14))).liquid().emits(15),
    BlockDescriptor::cube(12, "Bedrock", -1.0, FaceTiles::all(t(1, 1))),
    BlockDescriptor::cube(13, "Coal Ore", 3.0, FaceTiles::all(t(2, 2))).mined_with(ToolKind::Pickaxe),
    BlockDescriptor::cube(14, "Iron Ore", 3.0, FaceTiles::all(t(1, 2))).mined_with(ToolKind::Pickaxe),
    BlockDescriptor::cube(15, "Gold Ore", 3.0, FaceTiles::all(t(0, 2))).mined_with(ToolKind::Pickaxe),
    BlockDescriptor::cube(16, "Diamond Ore", 3.0, FaceTiles::all(t(2, 3))).mined_with(ToolKind::Pickaxe),
    BlockDescriptor::cube(17, "Glass", 0.3, FaceTiles::all(t(1, 3))).see_through(),
    BlockDescriptor::cube(18, "Snow", 0.2, FaceTiles::all(t(2, 4))).mined_with(ToolKind::Shovel),
    BlockDescriptor::cube(19, "Clay", 0.6, FaceTiles::all(t(8, 4))).mined_with(ToolKind::Shovel),
    BlockDescriptor::cube(20, "Mossy Cobblestone", 2.0, FaceTiles::all(t(4, 2)))
        .mined_with(ToolKind::Pickaxe),
    BlockDescriptor::plant(21, "Tall Grass", t(7, 2)),
    BlockDescriptor::plant(22, "Red Flower", t(12, 0)),
    BlockDescriptor::plant(23, "Yellow Flower", t(13, 0)),
    BlockDescriptor::plant(24, "Kelp", t(8, 3)),
    BlockDescriptor::shaped(25, "Cactus", 0.4, CustomShape::Cactus, FaceTiles::top_side_bottom(t(5, 4), t(6, 4), t(7, 4))),
    BlockDescriptor::shaped(26, "Lily Pad", 0.0, CustomShape::LilyPad, FaceTiles::all(t(12, 4))),
    BlockDescriptor::shaped(27, "Torch", 0.0, CustomShape::Torch, FaceTiles::all(t(0, 5)))
        .passable()
        .emits(14),
    BlockDescriptor::shaped(28, "Lantern", 0.5, CustomShape::Lantern, FaceTiles::all(t(1, 5))).emits(15),
    BlockDescriptor::shaped(
        29,
        "Chest",
        2.5,
        CustomShape::Chest,
        FaceTiles::top_side_bottom(t(9, 1), t(10, 1), t(9, 1)).with_face(Face::PosZ, t(11, 1)),
    )
    .mined_with(ToolKind::Axe),
    BlockDescriptor::shaped(30, "Door", 3.0, CustomShape::Door, FaceTiles::all(t(1, 6))).mined_with(ToolKind::Axe),
    BlockDescriptor::shaped(31, "Fence", 2.0, CustomShape::Fence, FaceTiles::all(PLANK_TILE)).mined_with(ToolKind::Axe),
    BlockDescriptor::shaped(32, "Ladder", 0.4, CustomShape::Ladder, FaceTiles::all(t(3, 5))).mined_with(ToolKind::Axe),
    BlockDescriptor::shaped(33, "Slab", 2.0, CustomShape::Slab, FaceTiles::top_side_bottom(t(6, 0), t(5, 0), t(6, 0)))
        .mined_with(ToolKind::Pickaxe),
    BlockDescriptor::shaped(34, "Stairs", 2.0, CustomShape::Stairs, FaceTiles::all(PLANK_TILE)).mined_with(ToolKind::Axe),
    BlockDescriptor::shaped(35, "Sign", 1.0, CustomShape::Sign, FaceTiles::all(PLANK_TILE))
        .passable()
        .mined_with(ToolKind::Axe),
    BlockDescriptor::shaped(36, "Trapdoor", 3.0, CustomShape::Trapdoor, FaceTiles::all(t(4, 5))).mined_with(ToolKind::Axe),
    BlockDescriptor::shaped(37, "Bed", 0.2, CustomShape::Bed, FaceTiles::top_side_bottom(t(6, 8), t(5, 9), PLANK_TILE)),
    BlockDescriptor::cube(
        38,
        "Crafting Table",
        2.5,
        FaceTiles::top_side_bottom(t(11, 2), t(11, 3), PLANK_TILE),
    )
    .mined_with(ToolKind::Axe),
    BlockDescriptor::cube(
        39,
        "Furnace",
        3.5,
        FaceTiles::top_side_bottom(t(14, 3), t(13, 2), t(14, 3)).with_face(Face::PosZ, t(12, 2)),
    )
    .mined_with(ToolKind::Pickaxe),
    BlockDescriptor::cube(40, "Glowstone", 0.3, FaceTiles::all(t(9, 6))).emits(15),
    BlockDescriptor::cube(41, "Sandstone", 0.8, FaceTiles::top_side_bottom(t(0, 11), t(0, 12), t(0, 13)))
        .mined_with(ToolKind::Pickaxe),
    BlockDescriptor::cube(42, "Ice", 0.5, FaceTiles::all(t(3, 4)))
        .see_through()
        .mined_with(ToolKind::Pickaxe),
];

static ITEMS: [BlockDescriptor; 16] = [
    BlockDescriptor::item(100, "Stick", t(5, 3)),
    BlockDescriptor::item(101, "Wooden Pickaxe", t(0, 14)).with_tool(ToolKind::Pickaxe, 0, 2.0, 59, 2.0),
    BlockDescriptor::item(102, "Stone Pickaxe", t(1, 14)).with_tool(ToolKind::Pickaxe, 1, 4.0, 131, 3.0),
    BlockDescriptor::item(103, "Iron Pickaxe", t(2, 14)).with_tool(ToolKind::Pickaxe, 2, 6.0, 250, 4.0),
    BlockDescriptor::item(104, "Diamond Pickaxe", t(3, 14)).with_tool(ToolKind::Pickaxe, 3, 8.0, 1561, 5.0),
    BlockDescriptor::item(105, "Wooden Axe", t(0, 15)).with_tool(ToolKind::Axe, 0, 2.0, 59, 3.0),
    BlockDescriptor::item(106, "Stone Axe", t(1, 15)).with_tool(ToolKind::Axe, 1, 4.0, 131, 4.0),
    BlockDescriptor::item(107, "Wooden Shovel", t(4, 14)).with_tool(ToolKind::Shovel, 0, 2.0, 59, 1.5),
    BlockDescriptor::item(108, "Stone Shovel", t(5, 14)).with_tool(ToolKind::Shovel, 1, 4.0, 131, 2.5),
    BlockDescriptor::item(109, "Wooden Sword", t(6, 14)).with_tool(ToolKind::Sword, 0, 1.5, 59, 4.0),
    BlockDescriptor::item(110, "Stone Sword", t(7, 14)).with_tool(ToolKind::Sword, 1, 1.5, 131, 5.0),
    BlockDescriptor::item(111, "Iron Sword", t(8, 14)).with_tool(ToolKind::Sword, 2, 1.5, 250, 6.0),
    BlockDescriptor::item(112, "Apple", t(10, 0)).with_food(4, 2.4),
    BlockDescriptor::item(113, "Bread", t(9, 2)).with_food(5, 6.0),
    BlockDescriptor::item(114, "Coal", t(7, 0)),
    BlockDescriptor::item(115, "Iron Ingot", t(7, 1)),
];

/// Looks up the descriptor for an id; `None` for unassigned ids.
#[inline]
#[must_use]
pub fn descriptor(id: BlockId) -> Option<&'static BlockDescriptor> {
    let raw = id.raw();
    if (raw as usize) < BLOCKS.len() {
        Some(&BLOCKS[raw as usize])
    } else if raw >= FIRST_ITEM_ID {
        ITEMS.get((raw - FIRST_ITEM_ID) as usize)
    } else {
        None
    }
}

/// Air and blocks flagged transparent. Unknown ids are opaque.
#[inline]
#[must_use]
pub fn is_transparent(id: BlockId) -> bool {
    id.is_air() || descriptor(id).is_some_and(|d| d.transparent)
}

/// Blocks entities walk through.
#[inline]
#[must_use]
pub fn is_no_collision(id: BlockId) -> bool {
    descriptor(id).is_some_and(|d| d.no_collision)
}

/// Liquids.
#[inline]
#[must_use]
pub fn is_fluid(id: BlockId) -> bool {
    descriptor(id).is_some_and(|d| d.fluid)
}

/// Atlas tile for one face; [`TileCoord::MISSING`] for air and unknown ids.
#[inline]
#[must_use]
pub fn texture_coords(id: BlockId, face: Face) -> TileCoord {
    descriptor(id).map_or(TileCoord::MISSING, |d| d.tile(face))
}

/// Hardness; `0.0` for unknown ids.
#[must_use]
pub fn hardness(id: BlockId) -> f32 {
    descriptor(id).map_or(0.0, |d| d.hardness)
}

/// Tool statistics, if `id` is a tool item.
#[must_use]
pub fn tool_data(id: BlockId) -> Option<ToolData> {
    descriptor(id).and_then(|d| d.tool)
}

/// Nutrition, if `id` is a food item.
#[must_use]
pub fn food_data(id: BlockId) -> Option<FoodData> {
    descriptor(id).and_then(|d| d.food)
}

/// Emitted light level.
#[must_use]
pub fn light_emission(id: BlockId) -> u8 {
    descriptor(id).map_or(0, |d| d.light)
}

/// Every registered block and item, blocks first.
pub fn all() -> impl Iterator<Item = &'static BlockDescriptor> {
    BLOCKS.iter().chain(ITEMS.iter())
}

impl BlockId {
    /// Registry descriptor for this id.
    #[inline]
    #[must_use]
    pub fn descriptor(self) -> Option<&'static BlockDescriptor> {
        descriptor(self)
    }

    /// See [`is_transparent`].
    #[inline]
    #[must_use]
    pub fn is_transparent(self) -> bool {
        is_transparent(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_match_table_positions() {
        for (i, desc) in BLOCKS.iter().enumerate() {
            assert_eq!(desc.id.raw() as usize, i, "{} is out of place", desc.name);
        }
        for (i, desc) in ITEMS.iter().enumerate() {
            assert_eq!(desc.id.raw(), FIRST_ITEM_ID + i as u8, "{} is out of place", desc.name);
        }
    }

    #[test]
    fn test_names_unique() {
        let names: HashSet<_> = all().map(|d| d.name).collect();
        assert_eq!(names.len(), BLOCKS.len() + ITEMS.len());
    }

    #[test]
    fn test_transparency() {
        assert!(is_transparent(BlockId::AIR));
        assert!(is_transparent(BlockId::WATER));
        assert!(is_transparent(BlockId::GLASS));
        assert!(is_transparent(BlockId::LEAVES));
        assert!(is_transparent(BlockId::TORCH));
        assert!(is_transparent(BlockId::TALL_GRASS));
        assert!(!is_transparent(BlockId::STONE));
        assert!(!is_transparent(BlockId::LAVA) || is_fluid(BlockId::LAVA));
        // Unassigned ids render as opaque cubes.
        assert!(!is_transparent(BlockId(77)));
    }

    #[test]
    fn test_shape_classes() {
        assert!(BlockId::TALL_GRASS.descriptor().is_some_and(BlockDescriptor::is_cross));
        assert!(BlockId::KELP.descriptor().is_some_and(BlockDescriptor::is_cross));
        assert!(BlockId::CHEST.descriptor().is_some_and(BlockDescriptor::is_custom_mesh));
        assert!(BlockId::STONE.descriptor().is_some_and(BlockDescriptor::is_regular));
        assert!(BlockId::WATER.descriptor().is_some_and(BlockDescriptor::is_regular));
        // Every non-regular placeable block must be transparent, or it would
        // hide its neighbours' faces while drawing less than a full cube.
        for desc in BLOCKS.iter().filter(|d| d.is_cross() || d.is_custom_mesh()) {
            assert!(desc.transparent, "{} must be transparent", desc.name);
        }
    }

    #[test]
    fn test_texture_lookup() {
        assert_eq!(texture_coords(BlockId::GRASS, Face::PosY), TileCoord::new(0, 0));
        assert_eq!(texture_coords(BlockId::GRASS, Face::NegY), TileCoord::new(2, 0));
        assert_eq!(texture_coords(BlockId::GRASS, Face::PosX), TileCoord::new(3, 0));
        assert_eq!(texture_coords(BlockId::CHEST, Face::PosZ), TileCoord::new(11, 1));
        assert_eq!(texture_coords(BlockId::AIR, Face::PosY), TileCoord::MISSING);
        assert_eq!(texture_coords(BlockId(90), Face::PosY), TileCoord::MISSING);
        for desc in all() {
            for face in Face::ALL {
                let tile = desc.tile(face);
                assert!(tile.u < 16 && tile.v < 16);
            }
        }
    }

    #[test]
    fn test_tools_and_food() {
        let pick = tool_data(BlockId::DIAMOND_PICKAXE).expect("diamond pickaxe is a tool");
        assert_eq!(pick.kind, ToolKind::Pickaxe);
        assert_eq!(pick.tier, 3);
        assert!(tool_data(BlockId::STONE).is_none());
        assert_eq!(food_data(BlockId::BREAD).map(|f| f.hunger), Some(5));
        assert!(food_data(BlockId::STICK).is_none());
        assert!(hardness(BlockId::BEDROCK) < 0.0);
        assert_eq!(light_emission(BlockId::TORCH), 14);
        assert!(is_no_collision(BlockId::WATER));
        assert!(!is_no_collision(BlockId::STONE));
    }
}
