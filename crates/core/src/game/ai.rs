//! Per-enemy decision making: chase when near, wander when far.
//!
//! The two branches are deliberately asymmetric, matching the observed
//! behavior this engine reimplements: a wandering enemy retries random
//! directions until one lands (now bounded), while a chasing enemy gets a
//! single attempt and loses its turn to a wall.

use rand_chacha::rand_core::RngCore;

use super::*;

/// Wander retries before an enclosed enemy gives up its turn.
const MAX_WANDER_ATTEMPTS: usize = 32;

impl Game {
    /// One action per living enemy, in roster order. Roster slot 0 is the
    /// player; dead slots dangle into the slotmap and are skipped. Stops as
    /// soon as the run finishes (the player was slain).
    pub(super) fn enemies_act(&mut self) {
        let enemy_ids: Vec<EntityId> = self.state.roster.iter().skip(1).copied().collect();
        for enemy_id in enemy_ids {
            if self.finished.is_some() {
                break;
            }
            if self.state.actors.get(enemy_id).is_none() {
                continue;
            }
            self.enemy_act(enemy_id);
        }
    }

    fn enemy_act(&mut self, enemy_id: EntityId) {
        let player_pos = self.state.actors[self.state.player_id].pos;
        let enemy_pos = self.state.actors[enemy_id].pos;
        let dx = player_pos.x - enemy_pos.x;
        let dy = player_pos.y - enemy_pos.y;

        if dx.abs() + dy.abs() > CHASE_RANGE {
            self.wander(enemy_id);
        } else {
            // One attempt only; a blocked chase step is a lost turn.
            self.attempt_move(enemy_id, chase_direction(dx, dy));
        }
    }

    fn wander(&mut self, enemy_id: EntityId) {
        for _ in 0..MAX_WANDER_ATTEMPTS {
            let direction = Direction::ALL[(self.rng.next_u64() % 4) as usize];
            if self.attempt_move(enemy_id, direction).acted() {
                return;
            }
        }
        // Boxed in on all four sides; the turn is skipped.
    }
}

/// Step along the axis with the larger absolute delta, toward the player.
/// Ties go to the vertical axis.
fn chase_direction(dx: i32, dy: i32) -> Direction {
    if dx.abs() > dy.abs() {
        if dx < 0 { Direction::Left } else { Direction::Right }
    } else if dy < 0 {
        Direction::Up
    } else {
        Direction::Down
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[test]
    fn chase_prefers_the_axis_with_larger_delta() {
        assert_eq!(chase_direction(-3, 1), Direction::Left);
        assert_eq!(chase_direction(4, -2), Direction::Right);
        assert_eq!(chase_direction(1, -2), Direction::Up);
        assert_eq!(chase_direction(-1, 3), Direction::Down);
        // Ties resolve vertically.
        assert_eq!(chase_direction(2, 2), Direction::Down);
        assert_eq!(chase_direction(2, -2), Direction::Up);
    }

    #[test]
    fn nearby_enemy_steps_toward_the_player() {
        let mut game = arena_game(Pos { y: 5, x: 5 }, 3);
        let enemy = add_enemy(&mut game, Pos { y: 5, x: 8 }, 1);

        game.enemies_act();

        assert_eq!(game.state().actors[enemy].pos, Pos { y: 5, x: 7 });
    }

    #[test]
    fn adjacent_enemy_attacks_instead_of_moving() {
        let mut game = arena_game(Pos { y: 5, x: 5 }, 3);
        let enemy = add_enemy(&mut game, Pos { y: 5, x: 6 }, 1);

        game.enemies_act();

        assert_eq!(game.state().player().hp, 2);
        assert_eq!(game.state().actors[enemy].pos, Pos { y: 5, x: 6 });
    }

    #[test]
    fn chasing_enemy_blocked_by_wall_loses_its_turn() {
        let mut game = arena_game(Pos { y: 5, x: 5 }, 3);
        let enemy = add_enemy(&mut game, Pos { y: 5, x: 8 }, 1);
        set_tile(&mut game, Pos { y: 5, x: 7 }, TileKind::Wall);

        game.enemies_act();

        assert_eq!(game.state().actors[enemy].pos, Pos { y: 5, x: 8 });
    }

    #[test]
    fn distant_enemy_wanders_one_step() {
        let mut game = arena_game(Pos { y: 0, x: 0 }, 3);
        let enemy = add_enemy(&mut game, Pos { y: 9, x: 14 }, 1);

        game.enemies_act();

        let pos = game.state().actors[enemy].pos;
        let distance = (pos.y - 9).abs() + (pos.x - 14).abs();
        assert_eq!(distance, 1, "wander should land exactly one step away, got {pos:?}");
    }

    #[test]
    fn fully_enclosed_enemy_skips_its_turn() {
        let mut game = arena_game(Pos { y: 0, x: 0 }, 3);
        let enemy = add_enemy(&mut game, Pos { y: 8, x: 12 }, 1);
        for direction in Direction::ALL {
            set_tile(&mut game, Pos { y: 8, x: 12 }.step(direction), TileKind::Wall);
        }

        game.enemies_act();

        assert_eq!(game.state().actors[enemy].pos, Pos { y: 8, x: 12 });
    }

    #[test]
    fn enemy_phase_stops_once_the_player_is_slain() {
        let mut game = arena_game(Pos { y: 5, x: 5 }, 1);
        add_enemy(&mut game, Pos { y: 5, x: 6 }, 1);
        let bystander = add_enemy(&mut game, Pos { y: 5, x: 3 }, 1);

        game.enemies_act();

        assert_eq!(game.outcome(), Some(RunOutcome::Defeat));
        // The second enemy never got to act.
        assert_eq!(game.state().actors[bystander].pos, Pos { y: 5, x: 3 });
    }
}
