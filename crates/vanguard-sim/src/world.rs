//! The simulated world: the player plus one pool per entity family.

use vanguard_core::components::Entity;
use vanguard_core::types::Star;

use crate::pool::EntityPool;

pub struct World {
    /// The one player ship. Reset in place, never pooled.
    pub player: Entity,
    pub hostiles: EntityPool<Entity>,
    pub projectiles: EntityPool<Entity>,
    pub particles: EntityPool<Entity>,
    pub pickups: EntityPool<Entity>,
    pub stars: Vec<Star>,
}

impl World {
    /// Hostiles currently alive, capital ship included.
    pub fn live_hostiles(&self) -> usize {
        self.hostiles.active_count()
    }

    pub fn capital(&self) -> Option<(usize, &Entity)> {
        self.hostiles.iter_active().find(|(_, e)| e.kind.is_capital())
    }
}
