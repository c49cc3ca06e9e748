//! Collision detection and response
//!
//! Everything is axis-aligned rectangle overlap plus simple axis reflection.

use glam::Vec2;

use super::pool::{Handle, Pool};
use super::rect::Rect;
use super::state::{Enemy, Item, ItemKind, Player};

/// Unit vector from `from` toward `to`, fixed at the moment of firing.
/// Coincident points aim straight down.
pub fn aim_direction(from: Vec2, to: Vec2) -> Vec2 {
    let delta = to - from;
    let len = delta.length();
    if len > 0.0 { delta / len } else { Vec2::Y }
}

/// First enemy (in pool order) overlapping `rect`
pub fn first_enemy_hit(rect: &Rect, enemies: &Pool<Enemy>) -> Option<Handle> {
    enemies.find(|e| e.body.rect().intersects(rect))
}

/// Entirely above the playfield by more than `margin`
pub fn beyond_top(rect: &Rect, margin: f32) -> bool {
    rect.bottom() < -margin
}

/// Entirely below the playfield by more than `margin`
pub fn beyond_bottom(rect: &Rect, playfield: Vec2, margin: f32) -> bool {
    rect.y > playfield.y + margin
}

/// Entirely outside the playfield on any side by more than `margin`
pub fn beyond_any_side(rect: &Rect, playfield: Vec2, margin: f32) -> bool {
    rect.right() < -margin
        || rect.x > playfield.x + margin
        || beyond_top(rect, margin)
        || beyond_bottom(rect, playfield, margin)
}

/// Reflect an item heading out through a playfield edge while it still has
/// bounces left. Returns the number of reflections applied.
pub fn bounce_off_edges(item: &mut Item, playfield: Vec2) -> u32 {
    let rect = item.body.rect();
    let mut reflected = 0;

    let out_x = (rect.x < 0.0 && item.direction.x < 0.0)
        || (rect.right() > playfield.x && item.direction.x > 0.0);
    if out_x && item.bounces > 0 {
        item.direction.x = -item.direction.x;
        item.bounces -= 1;
        reflected += 1;
    }

    let out_y = (rect.y < 0.0 && item.direction.y < 0.0)
        || (rect.bottom() > playfield.y && item.direction.y > 0.0);
    if out_y && item.bounces > 0 {
        item.direction.y = -item.direction.y;
        item.bounces -= 1;
        reflected += 1;
    }

    reflected
}

/// Apply an item's pickup effect to the player
pub fn apply_item(player: &mut Player, kind: ItemKind) {
    match kind {
        ItemKind::Life => player.heal(1),
        ItemKind::Shield => player.shield.add_charge(),
        ItemKind::Time => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rect::Body;

    fn item_at(pos: Vec2, direction: Vec2, bounces: u32) -> Item {
        Item {
            body: Body {
                pos,
                size: Vec2::splat(10.0),
            },
            sprite: None,
            speed: 100.0,
            direction,
            bounces,
            kind: ItemKind::Life,
        }
    }

    #[test]
    fn test_aim_straight_down_is_exact() {
        let dir = aim_direction(Vec2::new(50.0, 50.0), Vec2::new(50.0, 150.0));
        assert_eq!(dir, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_aim_is_unit_length() {
        let dir = aim_direction(Vec2::new(0.0, 0.0), Vec2::new(30.0, 40.0));
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!((dir.x - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_aim_coincident_points() {
        assert_eq!(aim_direction(Vec2::ONE, Vec2::ONE), Vec2::Y);
    }

    #[test]
    fn test_culling_margins() {
        let field = Vec2::new(600.0, 800.0);
        assert!(!beyond_top(&Rect::new(0.0, -40.0, 10.0, 10.0), 32.0));
        assert!(beyond_top(&Rect::new(0.0, -43.0, 10.0, 10.0), 32.0));
        assert!(!beyond_bottom(&Rect::new(0.0, 832.0, 10.0, 10.0), field, 32.0));
        assert!(beyond_bottom(&Rect::new(0.0, 833.0, 10.0, 10.0), field, 32.0));
        assert!(beyond_any_side(&Rect::new(-43.0, 0.0, 10.0, 10.0), field, 32.0));
        assert!(beyond_any_side(&Rect::new(633.0, 0.0, 10.0, 10.0), field, 32.0));
        assert!(!beyond_any_side(&Rect::new(300.0, 400.0, 10.0, 10.0), field, 32.0));
    }

    #[test]
    fn test_bounce_consumes_budget() {
        let field = Vec2::new(600.0, 800.0);
        let mut item = item_at(Vec2::new(-1.0, 100.0), Vec2::new(-1.0, 0.0), 1);
        assert_eq!(bounce_off_edges(&mut item, field), 1);
        assert_eq!(item.direction.x, 1.0);
        assert_eq!(item.bounces, 0);

        // Budget spent: no more reflection
        item.direction.x = -1.0;
        assert_eq!(bounce_off_edges(&mut item, field), 0);
        assert_eq!(item.direction.x, -1.0);
    }

    #[test]
    fn test_no_double_reflection_while_returning() {
        let field = Vec2::new(600.0, 800.0);
        // Still outside but already heading back in
        let mut item = item_at(Vec2::new(-1.0, 100.0), Vec2::new(1.0, 0.0), 3);
        assert_eq!(bounce_off_edges(&mut item, field), 0);
        assert_eq!(item.bounces, 3);
    }

    #[test]
    fn test_corner_reflects_both_axes() {
        let field = Vec2::new(600.0, 800.0);
        let mut item = item_at(Vec2::new(595.0, 795.0), Vec2::new(0.6, 0.8), 3);
        assert_eq!(bounce_off_edges(&mut item, field), 2);
        assert_eq!(item.direction, Vec2::new(-0.6, -0.8));
        assert_eq!(item.bounces, 1);
    }

    #[test]
    fn test_time_item_has_no_effect() {
        let mut player = Player::new(Vec2::splat(10.0));
        player.health = 1;
        let before = player.clone();
        apply_item(&mut player, ItemKind::Time);
        assert_eq!(player, before);

        apply_item(&mut player, ItemKind::Life);
        assert_eq!(player.health, 2);
        apply_item(&mut player, ItemKind::Shield);
        assert_eq!(player.shield.charges, 1);
    }
}
