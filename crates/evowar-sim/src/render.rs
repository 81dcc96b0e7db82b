//! Per-entity drawing through a host-provided surface.

use hecs::World;

use evowar_core::components::*;
use evowar_core::constants::*;
use evowar_core::enums::{BuildingKind, Side};
use evowar_core::types::{Color, Position, Rect};
use evowar_unit_ai::profiles::get_profile;

use crate::assets::{AssetCache, ImageAsset, Sprite};
use crate::components::Projectile;
use crate::lane;

const BAR_BACKGROUND: Color = Color::rgb(100, 100, 100);
const PLAYER_BAR: Color = Color::rgb(0, 255, 0);
const ENEMY_BAR: Color = Color::rgb(255, 0, 0);
const TEXT_COLOR: Color = Color::rgb(255, 255, 255);

/// How a sprite is placed on the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlitOptions {
    pub flip_x: bool,
    /// Counter-clockwise rotation; the rotated bounding box is placed at the
    /// given top-left corner.
    pub angle_deg: f64,
    pub alpha: u8,
}

impl Default for BlitOptions {
    fn default() -> Self {
        Self {
            flip_x: false,
            angle_deg: 0.0,
            alpha: 255,
        }
    }
}

/// Drawing target supplied by the presentation layer.
pub trait Surface {
    fn blit(&mut self, sprite: &Sprite, x: f64, y: f64, options: BlitOptions);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    /// Draw `text` horizontally centred on `center_x`, top edge at `y`.
    fn text(&mut self, text: &str, center_x: f64, y: f64, color: Color);
}

/// A recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Blit {
        sprite_size: (u32, u32),
        x: f64,
        y: f64,
        options: BlitOptions,
    },
    FillRect {
        rect: Rect,
        color: Color,
    },
    Text {
        text: String,
        center_x: f64,
        y: f64,
    },
}

/// Surface that records calls instead of drawing them. Used headless.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

impl Surface for RecordingSurface {
    fn blit(&mut self, sprite: &Sprite, x: f64, y: f64, options: BlitOptions) {
        self.calls.push(DrawCall::Blit {
            sprite_size: sprite.size(),
            x,
            y,
            options,
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.calls.push(DrawCall::FillRect { rect, color });
    }

    fn text(&mut self, text: &str, center_x: f64, y: f64, _color: Color) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            center_x,
            y,
        });
    }
}

fn bar_color(side: Side) -> Color {
    match side {
        Side::Player => PLAYER_BAR,
        Side::Enemy => ENEMY_BAR,
    }
}

fn health_bar(surface: &mut dyn Surface, x: f64, y: f64, w: f64, h: f64, health: &Health, side: Side) {
    let ratio = if health.max > 0.0 {
        (health.current / health.max).clamp(0.0, 1.0)
    } else {
        0.0
    };
    surface.fill_rect(Rect::new(x, y, w, h), BAR_BACKGROUND);
    surface.fill_rect(Rect::new(x, y, w * ratio, h), bar_color(side));
}

/// Draw a unit: its current frame, a health bar above it and "hp/max".
///
/// Units facing left are mirrored unless they are walking back to regroup.
pub fn draw_unit(
    surface: &mut dyn Surface,
    assets: &mut AssetCache,
    unit: &Unit,
    pos: &Position,
    health: &Health,
    anim: &Animation,
    retreating: bool,
) {
    let frame = assets.unit(unit.archetype).frame(anim.state, anim.frame);
    let options = BlitOptions {
        flip_x: unit.side == Side::Enemy && !retreating,
        ..BlitOptions::default()
    };
    surface.blit(&frame.sprite, pos.x, pos.y, options);

    let body = get_profile(unit.archetype).body;
    let size = body.frame_size as f64;
    let bar_x = pos.x + ((size - body.bar_width) / 2.0).floor();
    let bar_y = pos.y - body.bar_lift;
    health_bar(
        surface,
        bar_x,
        bar_y,
        body.bar_width,
        body.bar_height,
        health,
        unit.side,
    );
    let label = format!("{}/{:.1}", health.current as i64, health.max);
    surface.text(
        &label,
        bar_x + body.bar_width / 2.0,
        bar_y - 20.0,
        TEXT_COLOR,
    );
}

/// Draw a base or tower and, except for player towers, its health bar.
pub fn draw_building(
    surface: &mut dyn Surface,
    assets: &mut AssetCache,
    building: &Building,
    pos: &Position,
    health: &Health,
) {
    let asset = match (building.side, building.destroyed) {
        (Side::Player, false) => ImageAsset::PlayerBase,
        (Side::Player, true) => ImageAsset::PlayerBaseDestroyed,
        (Side::Enemy, _) => ImageAsset::EnemyBase,
    };
    let sprite = &assets.image(asset).sprite;
    surface.blit(sprite, pos.x, pos.y, BlitOptions::default());

    if building.side == Side::Player && building.kind == BuildingKind::Tower {
        return;
    }
    let bar_x = pos.x + ((BUILDING_WIDTH - BUILDING_HEALTH_BAR_WIDTH) / 2.0).floor();
    health_bar(
        surface,
        bar_x,
        pos.y - 22.0,
        BUILDING_HEALTH_BAR_WIDTH,
        BUILDING_HEALTH_BAR_HEIGHT,
        health,
        building.side,
    );
}

/// Draw an active projectile, rotated to its heading.
pub fn draw_projectile(
    surface: &mut dyn Surface,
    assets: &mut AssetCache,
    projectile: &Projectile,
    pos: &Position,
) {
    if !projectile.active {
        return;
    }
    let asset = ImageAsset::for_projectile(projectile.kind);
    let (w, h) = asset.size();
    let sprite = &assets.image(asset).sprite;
    let options = BlitOptions {
        angle_deg: projectile.angle_deg,
        ..BlitOptions::default()
    };
    surface.blit(
        sprite,
        pos.x - w as f64 / 2.0,
        pos.y - h as f64 / 2.0,
        options,
    );
}

pub fn draw_seed_drop(
    surface: &mut dyn Surface,
    assets: &mut AssetCache,
    drop: &SeedDrop,
    pos: &Position,
) {
    let sprite = &assets.image(ImageAsset::Seed).sprite;
    let options = BlitOptions {
        alpha: drop.alpha,
        ..BlitOptions::default()
    };
    surface.blit(sprite, pos.x, pos.y, options);
}

/// Draw every entity of `world`: in-lane units, buildings, seed drops, then
/// projectiles on top.
pub fn draw_world(
    world: &World,
    units: impl IntoIterator<Item = hecs::Entity>,
    assets: &mut AssetCache,
    surface: &mut dyn Surface,
) {
    for entity in units {
        let Ok(mut query) =
            world.query_one::<(&Unit, &Position, &Health, &Animation, &Retreat)>(entity)
        else {
            continue;
        };
        let Some((unit, pos, health, anim, retreat)) = query.get() else {
            continue;
        };
        if lane::in_lane(pos.x) {
            draw_unit(surface, assets, unit, pos, health, anim, retreat.active);
        }
    }
    for (_, (building, pos, health)) in world.query::<(&Building, &Position, &Health)>().iter() {
        draw_building(surface, assets, building, pos, health);
    }
    for (_, (drop, pos)) in world.query::<(&SeedDrop, &Position)>().iter() {
        draw_seed_drop(surface, assets, drop, pos);
    }
    for (_, (projectile, pos)) in world.query::<(&Projectile, &Position)>().iter() {
        draw_projectile(surface, assets, projectile, pos);
    }
}
