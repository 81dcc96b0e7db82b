//! Sprite loading with placeholder fallback.
//!
//! Decoding image files is the host's job: an `AssetSource` hands back raw
//! RGBA pixels for a path. `AssetCache` slices unit sprite sheets into
//! animation frames, derives the opaque-pixel masks used by arrow collision,
//! and caches the result per archetype. A failed load is logged once and
//! replaced by a solid-colour placeholder that stays cached, so the path is
//! never retried.

use std::collections::{HashMap, HashSet};

use evowar_core::constants::*;
use evowar_core::enums::{Archetype, CombatState, Faction, ProjectileKind};
use evowar_core::error::AssetError;
use evowar_core::mask::Mask;
use evowar_core::types::Color;
use evowar_unit_ai::profiles::get_profile;

/// Rows of a unit sprite sheet, top to bottom.
const SHEET_ROWS: [CombatState; 4] = [
    CombatState::Idle,
    CombatState::Run,
    CombatState::Attack,
    CombatState::Die,
];

/// Decoded RGBA8 image, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl Image {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, AssetError> {
        if rgba.len() != (width * height * 4) as usize {
            return Err(AssetError::Malformed(format!(
                "{width}x{height} image with {} bytes",
                rgba.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    pub fn solid(width: u32, height: u32, color: Color) -> Self {
        let px = [color.r, color.g, color.b, color.a];
        Self {
            width,
            height,
            rgba: px.repeat((width * height) as usize),
        }
    }

    fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let i = ((y * self.width + x) * 4) as usize;
        &self.rgba[i..i + 4]
    }

    /// Sub-image, or `None` if the region is not fully inside.
    pub fn crop(&self, x: u32, y: u32, width: u32, height: u32) -> Option<Image> {
        if x + width > self.width || y + height > self.height {
            return None;
        }
        let mut rgba = Vec::with_capacity((width * height * 4) as usize);
        for row in y..y + height {
            let start = ((row * self.width + x) * 4) as usize;
            rgba.extend_from_slice(&self.rgba[start..start + (width * 4) as usize]);
        }
        Some(Image {
            width,
            height,
            rgba,
        })
    }

    /// Nearest-neighbour resize.
    pub fn scaled(&self, width: u32, height: u32) -> Image {
        if width == self.width && height == self.height {
            return self.clone();
        }
        let mut rgba = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            let sy = (y as u64 * self.height as u64 / height.max(1) as u64) as u32;
            for x in 0..width {
                let sx = (x as u64 * self.width as u64 / width.max(1) as u64) as u32;
                rgba.extend_from_slice(self.pixel(sx, sy));
            }
        }
        Image {
            width,
            height,
            rgba,
        }
    }

    pub fn flipped_horizontal(&self) -> Image {
        let mut rgba = Vec::with_capacity(self.rgba.len());
        for y in 0..self.height {
            for x in (0..self.width).rev() {
                rgba.extend_from_slice(self.pixel(x, y));
            }
        }
        Image {
            width: self.width,
            height: self.height,
            rgba,
        }
    }

    pub fn mask(&self) -> Mask {
        let alpha: Vec<u8> = self.rgba.chunks_exact(4).map(|px| px[3]).collect();
        Mask::from_alpha(self.width, self.height, &alpha)
            .unwrap_or_else(|| Mask::empty(self.width, self.height))
    }
}

/// Pixel source for a sprite.
#[derive(Debug, Clone, PartialEq)]
pub enum Sprite {
    Image(Image),
    /// Placeholder filled with a single colour.
    Solid {
        color: Color,
        width: u32,
        height: u32,
    },
}

impl Sprite {
    pub fn size(&self) -> (u32, u32) {
        match self {
            Sprite::Image(img) => (img.width, img.height),
            Sprite::Solid { width, height, .. } => (*width, *height),
        }
    }
}

/// One drawable frame with its collision silhouettes.
#[derive(Debug, Clone)]
pub struct Frame {
    pub sprite: Sprite,
    pub mask: Mask,
    /// Silhouette of the mirrored frame, for units facing left.
    pub mask_flipped: Mask,
}

impl Frame {
    fn from_image(image: Image) -> Self {
        let mask = image.mask();
        let mask_flipped = mask.flipped_horizontal();
        Self {
            sprite: Sprite::Image(image),
            mask,
            mask_flipped,
        }
    }

    fn solid(color: Color, width: u32, height: u32) -> Self {
        Self {
            sprite: Sprite::Solid {
                color,
                width,
                height,
            },
            mask: Mask::filled(width, height),
            mask_flipped: Mask::filled(width, height),
        }
    }
}

/// Animation frames for one archetype.
#[derive(Debug, Clone)]
pub struct UnitSprites {
    rows: HashMap<CombatState, Vec<Frame>>,
    placeholder: bool,
}

impl UnitSprites {
    /// Slice a sheet of 192x192 frames: rows idle, run, attack, die with up
    /// to 14 frames each, every frame scaled to `display_size`. "hurt" reuses
    /// the first death frame.
    pub fn from_sheet(sheet: &Image, display_size: u32) -> Self {
        let size = SPRITE_FRAME_SIZE;
        let mut rows = HashMap::new();
        for (row, state) in SHEET_ROWS.iter().enumerate() {
            let frames: Vec<Frame> = (0..FRAMES_PER_STATE)
                .filter_map(|i| sheet.crop(i * size, row as u32 * size, size, size))
                .map(|frame| Frame::from_image(frame.scaled(display_size, display_size)))
                .collect();
            let frames = if frames.is_empty() {
                vec![Frame::solid(Color::rgb(0, 0, 0), display_size, display_size)]
            } else {
                frames
            };
            rows.insert(*state, frames);
        }
        let hurt = rows[&CombatState::Die][0].clone();
        rows.insert(CombatState::Hurt, vec![hurt]);
        Self {
            rows,
            placeholder: false,
        }
    }

    /// One opaque frame of the archetype's colour for every state.
    pub fn placeholder(color: Color, size: u32) -> Self {
        let frame = Frame::solid(color, size, size);
        let rows = SHEET_ROWS
            .iter()
            .chain(std::iter::once(&CombatState::Hurt))
            .map(|&state| (state, vec![frame.clone()]))
            .collect();
        Self {
            rows,
            placeholder: true,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    /// Frame to show for a state. Indices past the row end hold the last frame.
    pub fn frame(&self, state: CombatState, index: u32) -> &Frame {
        // Every state has a non-empty row by construction.
        let row = &self.rows[&state];
        &row[(index as usize).min(row.len() - 1)]
    }

    pub fn frame_count(&self, state: CombatState) -> usize {
        self.rows.get(&state).map_or(0, Vec::len)
    }
}

/// Single-image assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageAsset {
    Arrow,
    MagicBall,
    Seed,
    PlayerBase,
    PlayerBaseDestroyed,
    EnemyBase,
}

impl ImageAsset {
    pub fn path(self) -> &'static str {
        match self {
            ImageAsset::Arrow => "images/arrow.png",
            ImageAsset::MagicBall => "images/magicball.png",
            ImageAsset::Seed => "images/seed.png",
            ImageAsset::PlayerBase => "buildings/player/player_base.png",
            ImageAsset::PlayerBaseDestroyed => "buildings/player/player_base_destroyed.png",
            ImageAsset::EnemyBase => "buildings/enemy/enemy_base.png",
        }
    }

    /// Display size; loaded images are resized to it.
    pub fn size(self) -> (u32, u32) {
        match self {
            ImageAsset::Arrow => (ARROW_WIDTH, ARROW_HEIGHT),
            ImageAsset::MagicBall => (MAGIC_BALL_SIZE, MAGIC_BALL_SIZE),
            ImageAsset::Seed => (SEED_DROP_SIZE, SEED_DROP_SIZE),
            ImageAsset::PlayerBase | ImageAsset::PlayerBaseDestroyed | ImageAsset::EnemyBase => {
                (BUILDING_WIDTH as u32, BUILDING_HEIGHT as u32)
            }
        }
    }

    /// The player's base art faces right, so it is mirrored.
    fn mirrored(self) -> bool {
        matches!(
            self,
            ImageAsset::PlayerBase | ImageAsset::PlayerBaseDestroyed
        )
    }

    fn placeholder_color(self) -> Color {
        match self {
            ImageAsset::Arrow => Color::rgb(255, 255, 255),
            ImageAsset::MagicBall => Color::rgb(128, 0, 128),
            ImageAsset::Seed => Color::rgb(249, 249, 242),
            ImageAsset::PlayerBase | ImageAsset::PlayerBaseDestroyed => Color::rgb(0, 0, 255),
            ImageAsset::EnemyBase => Color::rgb(255, 0, 0),
        }
    }

    pub fn for_projectile(kind: ProjectileKind) -> Self {
        match kind {
            ProjectileKind::Arrow => ImageAsset::Arrow,
            ProjectileKind::MagicBall => ImageAsset::MagicBall,
        }
    }
}

/// Host-provided loader returning decoded pixels for a relative path.
pub trait AssetSource {
    fn load(&mut self, path: &str) -> Result<Image, AssetError>;
}

/// Source with no files; everything falls back to placeholders.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAssetSource;

impl AssetSource for NullAssetSource {
    fn load(&mut self, path: &str) -> Result<Image, AssetError> {
        Err(AssetError::Missing(path.to_string()))
    }
}

/// Source backed by images registered in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryAssetSource {
    images: HashMap<String, Image>,
    loads: usize,
}

impl MemoryAssetSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, image: Image) {
        self.images.insert(path.into(), image);
    }

    /// Number of load attempts so far.
    pub fn loads(&self) -> usize {
        self.loads
    }
}

impl AssetSource for MemoryAssetSource {
    fn load(&mut self, path: &str) -> Result<Image, AssetError> {
        self.loads += 1;
        self.images
            .get(path)
            .cloned()
            .ok_or_else(|| AssetError::Missing(path.to_string()))
    }
}

/// Path of an archetype's sprite sheet.
pub fn sprite_sheet_path(archetype: Archetype) -> String {
    let folder = match archetype.faction() {
        Faction::Player => "Player",
        Faction::Bandits => "Bandits",
        Faction::Undead => "Undead",
        Faction::Zombies => "Zombies",
    };
    format!("sprites/{folder}/{}.png", archetype.name())
}

/// Lazily loaded sprites and masks.
pub struct AssetCache {
    source: Box<dyn AssetSource>,
    units: HashMap<Archetype, UnitSprites>,
    images: HashMap<ImageAsset, Frame>,
    missing: HashSet<String>,
}

impl Default for AssetCache {
    fn default() -> Self {
        Self::new(Box::new(NullAssetSource))
    }
}

impl AssetCache {
    pub fn new(source: Box<dyn AssetSource>) -> Self {
        Self {
            source,
            units: HashMap::new(),
            images: HashMap::new(),
            missing: HashSet::new(),
        }
    }

    /// Paths that failed to load.
    pub fn missing(&self) -> &HashSet<String> {
        &self.missing
    }

    pub fn unit(&mut self, archetype: Archetype) -> &UnitSprites {
        self.ensure_unit(archetype);
        &self.units[&archetype]
    }

    pub fn image(&mut self, asset: ImageAsset) -> &Frame {
        self.ensure_image(asset);
        &self.images[&asset]
    }

    /// Silhouettes for the arrow-versus-unit pixel test: the target's current
    /// frame (mirrored when `flipped`) and the unrotated arrow.
    pub fn arrow_hit_masks(
        &mut self,
        archetype: Archetype,
        state: CombatState,
        frame: u32,
        flipped: bool,
    ) -> (&Mask, &Mask) {
        self.ensure_unit(archetype);
        self.ensure_image(ImageAsset::Arrow);
        let target = self.units[&archetype].frame(state, frame);
        let target_mask = if flipped {
            &target.mask_flipped
        } else {
            &target.mask
        };
        (target_mask, &self.images[&ImageAsset::Arrow].mask)
    }

    fn ensure_unit(&mut self, archetype: Archetype) {
        if self.units.contains_key(&archetype) {
            return;
        }
        let path = sprite_sheet_path(archetype);
        let profile = get_profile(archetype);
        let size = profile.body.frame_size;
        let sprites = match self.source.load(&path) {
            Ok(sheet) => UnitSprites::from_sheet(&sheet, size),
            Err(err) => {
                log::warn!("failed to load sprite sheet {path}: {err}; using placeholder");
                self.missing.insert(path);
                UnitSprites::placeholder(profile.placeholder_color, size)
            }
        };
        self.units.insert(archetype, sprites);
    }

    fn ensure_image(&mut self, asset: ImageAsset) {
        if self.images.contains_key(&asset) {
            return;
        }
        let path = asset.path();
        let (width, height) = asset.size();
        let frame = match self.source.load(path) {
            Ok(image) => {
                let image = image.scaled(width, height);
                let image = if asset.mirrored() {
                    image.flipped_horizontal()
                } else {
                    image
                };
                Frame::from_image(image)
            }
            Err(err) => {
                log::warn!("failed to load image {path}: {err}; using placeholder");
                self.missing.insert(path.to_string());
                Frame::solid(asset.placeholder_color(), width, height)
            }
        };
        self.images.insert(asset, frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(frames: u32, rows: u32) -> Image {
        let w = frames * SPRITE_FRAME_SIZE;
        let h = rows * SPRITE_FRAME_SIZE;
        // Left half of every frame opaque, right half transparent.
        let mut rgba = Vec::with_capacity((w * h * 4) as usize);
        for _y in 0..h {
            for x in 0..w {
                let a = if x % SPRITE_FRAME_SIZE < SPRITE_FRAME_SIZE / 2 { 255 } else { 0 };
                rgba.extend_from_slice(&[10, 20, 30, a]);
            }
        }
        Image::new(w, h, rgba).unwrap()
    }

    #[test]
    fn test_sheet_slicing() {
        let sprites = UnitSprites::from_sheet(&sheet(14, 4), SPRITE_FRAME_SIZE);
        assert!(!sprites.is_placeholder());
        assert_eq!(sprites.frame_count(CombatState::Attack), 14);
        assert_eq!(sprites.frame_count(CombatState::Hurt), 1);
        let frame = sprites.frame(CombatState::Run, 3);
        assert!(frame.mask.get(10, 10));
        assert!(!frame.mask.get(150, 10));
        assert!(frame.mask_flipped.get(150, 10));
    }

    #[test]
    fn test_short_sheet_clamps_frames() {
        let sprites = UnitSprites::from_sheet(&sheet(6, 4), SPRITE_FRAME_SIZE);
        assert_eq!(sprites.frame_count(CombatState::Die), 6);
        // Past the end holds the last frame.
        let _ = sprites.frame(CombatState::Die, 13);
    }

    #[test]
    fn test_missing_rows_get_blank_frame() {
        let sprites = UnitSprites::from_sheet(&sheet(14, 2), SPRITE_FRAME_SIZE);
        assert_eq!(sprites.frame_count(CombatState::Die), 1);
        assert_eq!(sprites.frame(CombatState::Die, 0).mask.count(), 192 * 192);
    }

    #[test]
    fn test_boss_frames_scaled_up() {
        let mut source = MemoryAssetSource::new();
        source.insert(sprite_sheet_path(Archetype::BanditKing), sheet(14, 4));
        let mut cache = AssetCache::new(Box::new(source));
        let frame = cache.unit(Archetype::BanditKing).frame(CombatState::Attack, 7);
        assert_eq!(frame.sprite.size(), (288, 288));
        // Left half opaque survives the resize.
        assert!(frame.mask.get(140, 10));
        assert!(!frame.mask.get(150, 10));

        let placeholder = AssetCache::default()
            .unit(Archetype::BanditKing)
            .frame(CombatState::Idle, 0)
            .sprite
            .size();
        assert_eq!(placeholder, (288, 288));
    }

    #[test]
    fn test_missing_sheet_uses_cached_placeholder() {
        let mut cache = AssetCache::default();
        let sprites = cache.unit(Archetype::UndeadMage);
        assert!(sprites.is_placeholder());
        match &sprites.frame(CombatState::Idle, 0).sprite {
            Sprite::Solid { color, .. } => assert_eq!(*color, Color::rgb(128, 0, 128)),
            other => panic!("expected placeholder, got {other:?}"),
        }
        assert!(cache
            .missing()
            .contains(&sprite_sheet_path(Archetype::UndeadMage)));
    }

    #[test]
    fn test_load_attempted_once_per_archetype() {
        struct Counting(usize);
        impl AssetSource for Counting {
            fn load(&mut self, path: &str) -> Result<Image, AssetError> {
                self.0 += 1;
                Err(AssetError::Missing(path.into()))
            }
        }
        let mut cache = AssetCache::new(Box::new(Counting(0)));
        for _ in 0..5 {
            cache.unit(Archetype::Tank);
            cache.image(ImageAsset::Arrow);
        }
        assert_eq!(cache.missing().len(), 2);
    }

    #[test]
    fn test_loaded_image_is_resized() {
        let mut source = MemoryAssetSource::new();
        source.insert(
            ImageAsset::Arrow.path(),
            Image::solid(64, 32, Color::rgb(1, 2, 3)),
        );
        let mut cache = AssetCache::new(Box::new(source));
        let frame = cache.image(ImageAsset::Arrow);
        assert_eq!(frame.sprite.size(), (32, 16));
        assert_eq!(frame.mask.count(), 32 * 16);
    }

    #[test]
    fn test_malformed_image_rejected() {
        assert!(matches!(
            Image::new(2, 2, vec![0; 3]),
            Err(AssetError::Malformed(_))
        ));
    }
}
