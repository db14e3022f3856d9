//! Movement and combat resolution for a single attempted move.
//!
//! The one rule engine both the player's input and every enemy action go
//! through. An attempt resolves into exactly one of: a geometry rejection,
//! an attack on the occupant of the destination, or a step onto a free tile
//! (with the player's healing-tile pickup folded into the step).

use super::*;

impl Game {
    pub(crate) fn attempt_move(&mut self, actor_id: EntityId, direction: Direction) -> MoveOutcome {
        let Some(actor) = self.state.actors.get(actor_id) else {
            return MoveOutcome::Blocked;
        };
        let from = actor.pos;
        let dest = from.step(direction);

        if !self.state.map.tile_at(dest).is_walkable() {
            return MoveOutcome::Blocked;
        }

        if let Some(victim_id) = self.state.occupancy.occupant(dest) {
            return self.resolve_attack(actor_id, victim_id);
        }

        let mover_is_player = self.state.actors[actor_id].is_player;
        self.state.occupancy.clear(from);
        self.state.actors[actor_id].pos = dest;
        self.state.occupancy.insert(dest, actor_id);

        if mover_is_player && self.state.map.tile_at(dest) == TileKind::HealingFloor {
            // Single use: the tile is consumed even when the player is
            // already at the cap.
            self.state.map.set_tile(dest, TileKind::Floor);
            let player = &mut self.state.actors[actor_id];
            if player.hp < PLAYER_MAX_HP {
                player.hp += 1;
                let hp = player.hp;
                self.log.push(LogEvent::PlayerHealed { hp });
                return MoveOutcome::MovedAndHealed;
            }
        }

        MoveOutcome::Moved
    }

    /// Attacking and moving are mutually exclusive: the attacker never enters
    /// the vacated tile within the same action.
    fn resolve_attack(&mut self, attacker_id: EntityId, victim_id: EntityId) -> MoveOutcome {
        let attacker_is_player = self.state.actors[attacker_id].is_player;
        let victim_is_player = self.state.actors[victim_id].is_player;

        // Enemies never fight each other.
        if !attacker_is_player && !victim_is_player {
            return MoveOutcome::Blocked;
        }

        let victim = &mut self.state.actors[victim_id];
        victim.hp -= 1;

        if victim.hp < 1 {
            let pos = victim.pos;
            self.state.occupancy.clear(pos);
            self.state.actors.remove(victim_id);

            if victim_is_player {
                self.log.push(LogEvent::PlayerSlain);
                self.finished = Some(RunOutcome::Defeat);
            } else {
                self.log.push(LogEvent::EnemySlain { enemy: victim_id });
                self.state.living_enemies -= 1;
                if self.state.living_enemies == 0 {
                    self.on_enemies_cleared();
                }
            }
        }

        MoveOutcome::Attacked
    }
}
