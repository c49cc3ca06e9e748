//! Entity prototypes
//!
//! Textures are loaded once per scene and owned here. Spawned instances copy the
//! handle but never release it; `Templates::release` does that exactly once.

use std::path::Path;

use glam::Vec2;

use super::rect::Body;
use super::state::{
    Enemy, EnemyProjectile, Explosion, Item, ItemKind, Player, PlayerProjectile, ShieldOverlay,
};
use crate::consts::*;
use crate::platform::{Renderer, TextureId};

/// Where a sprite comes from and how it is sized
struct SpriteSpec {
    path: &'static str,
    /// Drawn size = texture size * scale
    scale: f32,
    /// Size used when the texture cannot be loaded
    fallback: Vec2,
}

const PLAYER_SPRITE: SpriteSpec = SpriteSpec {
    path: "image/SpaceShip.png",
    scale: 0.2,
    fallback: Vec2::new(64.0, 64.0),
};
const PLAYER_PROJECTILE_SPRITE: SpriteSpec = SpriteSpec {
    path: "image/laser-1.png",
    scale: 0.25,
    fallback: Vec2::new(12.0, 32.0),
};
const ENEMY_SPRITES: [SpriteSpec; 2] = [
    SpriteSpec {
        path: "image/insect-1.png",
        scale: 0.25,
        fallback: Vec2::new(56.0, 56.0),
    },
    SpriteSpec {
        path: "image/insect-2.png",
        scale: 0.25,
        fallback: Vec2::new(64.0, 56.0),
    },
];
const ENEMY_PROJECTILE_SPRITE: SpriteSpec = SpriteSpec {
    path: "image/bullet-1.png",
    scale: 0.25,
    fallback: Vec2::new(16.0, 16.0),
};
const EXPLOSION_SHEET: &str = "effect/explosion.png";
const EXPLOSION_FALLBACK_FRAME: Vec2 = Vec2::new(64.0, 64.0);
const EXPLOSION_FALLBACK_FRAMES: u32 = 8;
const ITEM_SPRITES: [(ItemKind, SpriteSpec); 3] = [
    (
        ItemKind::Life,
        SpriteSpec {
            path: "image/bonus_life.png",
            scale: 0.25,
            fallback: Vec2::new(32.0, 32.0),
        },
    ),
    (
        ItemKind::Shield,
        SpriteSpec {
            path: "image/bonus_shield.png",
            scale: 0.25,
            fallback: Vec2::new(32.0, 32.0),
        },
    ),
    (
        ItemKind::Time,
        SpriteSpec {
            path: "image/bonus_time.png",
            scale: 0.25,
            fallback: Vec2::new(32.0, 32.0),
        },
    ),
];
const SHIELD_SPRITE: SpriteSpec = SpriteSpec {
    path: "image/shield.png",
    scale: 0.25,
    fallback: Vec2::new(96.0, 96.0),
};
const HEALTH_ICON: SpriteSpec = SpriteSpec {
    path: "image/Health UI Black.png",
    scale: 1.0,
    fallback: Vec2::new(32.0, 32.0),
};
const SHIELD_ICON: SpriteSpec = SpriteSpec {
    path: "image/shield_icon.png",
    scale: 1.0,
    fallback: Vec2::new(32.0, 32.0),
};

/// HUD icon with its drawn size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Icon {
    pub sprite: Option<TextureId>,
    pub size: Vec2,
}

/// Every prototype the main scene stamps instances from
#[derive(Debug, Clone)]
pub struct Templates {
    pub player: Player,
    pub player_projectile: PlayerProjectile,
    /// Spawner picks uniformly among these
    pub enemies: Vec<Enemy>,
    pub enemy_projectile: EnemyProjectile,
    pub explosion: Explosion,
    /// Item drops pick uniformly among these
    pub items: Vec<Item>,
    pub shield: ShieldOverlay,
    pub health_icon: Icon,
    pub shield_icon: Icon,
}

impl Templates {
    /// Prototypes with fallback sizes and no textures
    pub fn unloaded() -> Self {
        Self {
            player: Player::new(PLAYER_SPRITE.fallback),
            player_projectile: player_projectile(PLAYER_PROJECTILE_SPRITE.fallback, None),
            enemies: ENEMY_SPRITES.iter().map(|s| enemy(s.fallback, None)).collect(),
            enemy_projectile: enemy_projectile(ENEMY_PROJECTILE_SPRITE.fallback, None),
            explosion: explosion(EXPLOSION_FALLBACK_FRAME, EXPLOSION_FALLBACK_FRAMES, None),
            items: ITEM_SPRITES
                .iter()
                .map(|(kind, s)| item(*kind, s.fallback, None))
                .collect(),
            shield: ShieldOverlay {
                size: SHIELD_SPRITE.fallback,
                sprite: None,
            },
            health_icon: Icon {
                sprite: None,
                size: HEALTH_ICON.fallback,
            },
            shield_icon: Icon {
                sprite: None,
                size: SHIELD_ICON.fallback,
            },
        }
    }

    /// Load every texture under `assets`. Failures are logged and leave that
    /// prototype without a sprite at its fallback size.
    pub fn load(renderer: &mut dyn Renderer, assets: &Path) -> Self {
        let (sprite, size) = load_sprite(renderer, assets, &PLAYER_SPRITE);
        let mut player = Player::new(size);
        player.sprite = sprite;

        let (sprite, size) = load_sprite(renderer, assets, &PLAYER_PROJECTILE_SPRITE);
        let player_projectile = player_projectile(size, sprite);

        let enemies = ENEMY_SPRITES
            .iter()
            .map(|spec| {
                let (sprite, size) = load_sprite(renderer, assets, spec);
                enemy(size, sprite)
            })
            .collect();

        let (sprite, size) = load_sprite(renderer, assets, &ENEMY_PROJECTILE_SPRITE);
        let enemy_projectile = enemy_projectile(size, sprite);

        // Explosion sheet: square frames laid out horizontally
        let explosion = match load_texture(renderer, assets, EXPLOSION_SHEET) {
            Some((id, sheet)) if sheet.y > 0.0 => {
                let frames = ((sheet.x / sheet.y).floor() as u32).max(1);
                explosion(Vec2::splat(sheet.y), frames, Some(id))
            }
            _ => explosion(EXPLOSION_FALLBACK_FRAME, EXPLOSION_FALLBACK_FRAMES, None),
        };

        let items = ITEM_SPRITES
            .iter()
            .map(|(kind, spec)| {
                let (sprite, size) = load_sprite(renderer, assets, spec);
                item(*kind, size, sprite)
            })
            .collect();

        let (sprite, size) = load_sprite(renderer, assets, &SHIELD_SPRITE);
        let shield = ShieldOverlay { size, sprite };

        let (sprite, size) = load_sprite(renderer, assets, &HEALTH_ICON);
        let health_icon = Icon { sprite, size };
        let (sprite, size) = load_sprite(renderer, assets, &SHIELD_ICON);
        let shield_icon = Icon { sprite, size };

        Self {
            player,
            player_projectile,
            enemies,
            enemy_projectile,
            explosion,
            items,
            shield,
            health_icon,
            shield_icon,
        }
    }

    /// Every texture handle owned by the prototypes
    fn textures(&self) -> Vec<TextureId> {
        let mut ids = vec![
            self.player.sprite,
            self.player_projectile.sprite,
            self.enemy_projectile.sprite,
            self.explosion.sprite,
            self.shield.sprite,
            self.health_icon.sprite,
            self.shield_icon.sprite,
        ];
        ids.extend(self.enemies.iter().map(|e| e.sprite));
        ids.extend(self.items.iter().map(|i| i.sprite));
        ids.into_iter().flatten().collect()
    }

    /// Destroy all textures. Safe to call twice; the second call is a no-op.
    pub fn release(&mut self, renderer: &mut dyn Renderer) {
        for id in self.textures() {
            renderer.destroy_texture(id);
        }
        self.player.sprite = None;
        self.player_projectile.sprite = None;
        self.enemy_projectile.sprite = None;
        self.explosion.sprite = None;
        self.shield.sprite = None;
        self.health_icon.sprite = None;
        self.shield_icon.sprite = None;
        self.enemies.iter_mut().for_each(|e| e.sprite = None);
        self.items.iter_mut().for_each(|i| i.sprite = None);
    }
}

fn load_texture(renderer: &mut dyn Renderer, assets: &Path, rel: &str) -> Option<(TextureId, Vec2)> {
    let path = assets.join(rel);
    match renderer.load_texture(&path) {
        Ok(id) => match renderer.texture_size(id) {
            Some(size) => Some((id, size)),
            None => {
                log::error!("Failed to get texture size for {}", path.display());
                renderer.destroy_texture(id);
                None
            }
        },
        Err(e) => {
            log::error!("{e}");
            None
        }
    }
}

fn load_sprite(renderer: &mut dyn Renderer, assets: &Path, spec: &SpriteSpec) -> (Option<TextureId>, Vec2) {
    match load_texture(renderer, assets, spec.path) {
        Some((id, size)) => (Some(id), (size * spec.scale).floor()),
        None => {
            log::warn!("{} unavailable, using {:?}", spec.path, spec.fallback);
            (None, spec.fallback)
        }
    }
}

fn player_projectile(size: Vec2, sprite: Option<TextureId>) -> PlayerProjectile {
    PlayerProjectile {
        body: Body::new(size),
        sprite,
        speed: PLAYER_PROJECTILE_SPEED,
        damage: PLAYER_PROJECTILE_DAMAGE,
    }
}

fn enemy(size: Vec2, sprite: Option<TextureId>) -> Enemy {
    Enemy {
        body: Body::new(size),
        sprite,
        speed: ENEMY_SPEED,
        health: ENEMY_HEALTH,
        fire_cooldown_ns: ENEMY_COOLDOWN_NS,
        last_shot_ns: None,
    }
}

fn enemy_projectile(size: Vec2, sprite: Option<TextureId>) -> EnemyProjectile {
    EnemyProjectile {
        body: Body::new(size),
        sprite,
        speed: ENEMY_PROJECTILE_SPEED,
        damage: ENEMY_PROJECTILE_DAMAGE,
        direction: Vec2::Y,
    }
}

fn explosion(frame: Vec2, total_frames: u32, sprite: Option<TextureId>) -> Explosion {
    Explosion {
        body: Body::new(frame),
        sprite,
        started_at: 0.0,
        fps: EXPLOSION_FPS,
        total_frames,
    }
}

fn item(kind: ItemKind, size: Vec2, sprite: Option<TextureId>) -> Item {
    Item {
        body: Body::new(size),
        sprite,
        speed: ITEM_SPEED,
        direction: Vec2::Y,
        bounces: ITEM_BOUNCES,
        kind,
    }
}
