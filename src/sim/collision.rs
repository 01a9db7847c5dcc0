//! Player-vs-obstacle collision detection
//!
//! Plain AABB overlap: any nonzero shared area ends the run, touching edges
//! do not. Only the first hit matters, so the scan stops there.

use super::hitbox::Hitbox;
use super::spawner::Obstacle;

/// Result of a collision scan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Id of the obstacle that was hit
    pub obstacle_id: u32,
    /// Shared area with the player hitbox
    pub overlap_area: f32,
}

/// First obstacle whose hitbox overlaps the player, if any
pub fn first_collision(player: &Hitbox, obstacles: &[Obstacle]) -> Option<CollisionResult> {
    obstacles.iter().find_map(|obstacle| {
        let hitbox = obstacle.hitbox();
        player.overlaps(&hitbox).then(|| CollisionResult {
            obstacle_id: obstacle.id,
            overlap_area: player.intersection_area(&hitbox),
        })
    })
}
