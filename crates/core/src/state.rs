use std::collections::HashMap;

use slotmap::SlotMap;

use crate::types::*;

#[derive(Clone, Debug)]
pub struct Actor {
    pub id: EntityId,
    pub pos: Pos,
    pub hp: i32,
    pub is_player: bool,
}

impl Actor {
    /// Display glyph: the player shows its current hit points, enemies a
    /// fixed marker.
    pub fn glyph(&self) -> char {
        if self.is_player {
            char::from_digit(self.hp.clamp(0, 9) as u32, 10).unwrap_or('@')
        } else {
            'e'
        }
    }
}

#[derive(Clone)]
pub struct Map {
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<TileKind>,
}

impl Map {
    pub fn new(width: usize, height: usize, fill: TileKind) -> Self {
        Self { width, height, tiles: vec![fill; width * height] }
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// Out-of-bounds positions read as Wall so callers get one rejection path.
    pub fn tile_at(&self, pos: Pos) -> TileKind {
        if !self.in_bounds(pos) {
            return TileKind::Wall;
        }
        self.tiles[self.index(pos)]
    }

    pub fn set_tile(&mut self, pos: Pos, tile: TileKind) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.tiles[idx] = tile;
    }

    pub fn open_tile_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_walkable()).count()
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}

/// O(1) lookup from grid position to the actor standing there.
///
/// The resolver must clear an actor's old key before inserting its new one on
/// every successful move; `insert` asserts that precondition in debug builds.
#[derive(Clone, Debug, Default)]
pub struct OccupancyIndex {
    by_pos: HashMap<Pos, EntityId>,
}

impl OccupancyIndex {
    pub fn occupant(&self, pos: Pos) -> Option<EntityId> {
        self.by_pos.get(&pos).copied()
    }

    pub fn insert(&mut self, pos: Pos, id: EntityId) {
        let previous = self.by_pos.insert(pos, id);
        debug_assert!(previous.is_none(), "occupancy key written without clearing {pos:?}");
    }

    pub fn clear(&mut self, pos: Pos) -> Option<EntityId> {
        self.by_pos.remove(&pos)
    }

    pub fn len(&self) -> usize {
        self.by_pos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_pos.is_empty()
    }
}

/// All mutable state of one level. Built at game start and on every level
/// transition, and fully replaced by the next transition or restart.
pub struct GameState {
    pub map: Map,
    pub actors: SlotMap<EntityId, Actor>,
    /// Spawn-ordered registry; slot 0 is always the player. A dead actor is
    /// removed from the slotmap and its roster key left dangling, which is
    /// the tombstone: slots are never reused within a level.
    pub roster: Vec<EntityId>,
    pub player_id: EntityId,
    pub occupancy: OccupancyIndex,
    pub level: u8,
    pub target_actors: usize,
    pub living_enemies: usize,
}

impl GameState {
    pub fn player(&self) -> &Actor {
        &self.actors[self.player_id]
    }

    /// Live actors in roster order, the player first.
    pub fn live_actors(&self) -> impl Iterator<Item = &Actor> + '_ {
        self.roster.iter().filter_map(|id| self.actors.get(*id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_reads_as_wall() {
        let map = Map::new(5, 4, TileKind::Floor);
        assert_eq!(map.tile_at(Pos { y: -1, x: 0 }), TileKind::Wall);
        assert_eq!(map.tile_at(Pos { y: 0, x: 5 }), TileKind::Wall);
        assert_eq!(map.tile_at(Pos { y: 4, x: 0 }), TileKind::Wall);
        assert_eq!(map.tile_at(Pos { y: 2, x: 3 }), TileKind::Floor);
    }

    #[test]
    fn set_tile_outside_bounds_is_ignored() {
        let mut map = Map::new(3, 3, TileKind::Floor);
        map.set_tile(Pos { y: 7, x: 7 }, TileKind::Wall);
        assert_eq!(map.open_tile_count(), 9);
    }

    #[test]
    fn occupancy_clear_then_insert_round_trips() {
        let mut actors: SlotMap<EntityId, Actor> = SlotMap::with_key();
        let id = actors.insert(Actor {
            id: EntityId::default(),
            pos: Pos { y: 1, x: 1 },
            hp: 1,
            is_player: false,
        });

        let mut occupancy = OccupancyIndex::default();
        occupancy.insert(Pos { y: 1, x: 1 }, id);
        assert_eq!(occupancy.occupant(Pos { y: 1, x: 1 }), Some(id));

        assert_eq!(occupancy.clear(Pos { y: 1, x: 1 }), Some(id));
        occupancy.insert(Pos { y: 1, x: 2 }, id);
        assert_eq!(occupancy.occupant(Pos { y: 1, x: 1 }), None);
        assert_eq!(occupancy.occupant(Pos { y: 1, x: 2 }), Some(id));
        assert_eq!(occupancy.len(), 1);
    }
}
