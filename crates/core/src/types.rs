use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct EntityId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn step(self, direction: Direction) -> Pos {
        let (dy, dx) = direction.delta();
        Pos { y: self.y + dy, x: self.x + dx }
    }
}

/// The four cardinal moves an input event can propose. Serialized because
/// accepted moves are the journal's input payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::Left, Direction::Right, Direction::Up, Direction::Down];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TileKind {
    Wall,
    Floor,
    HealingFloor,
}

impl TileKind {
    pub fn is_walkable(self) -> bool {
        self != TileKind::Wall
    }
}

/// How a single attempted move resolved.
///
/// `Blocked` covers both geometry rejections (bounds, walls) and the
/// enemies-never-fight-each-other rule; neither consumes the actor's turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Blocked,
    Attacked,
    Moved,
    MovedAndHealed,
}

impl MoveOutcome {
    /// Whether the attempt counted as an action for the turn loop.
    pub fn acted(self) -> bool {
        self != MoveOutcome::Blocked
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Victory,
    Defeat,
}

/// What one call to [`crate::Game::player_turn`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnReport {
    pub player_action: MoveOutcome,
    pub outcome: Option<RunOutcome>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogEvent {
    LevelStarted { level: u8 },
    LevelCleared { level: u8 },
    EnemySlain { enemy: EntityId },
    PlayerHealed { hp: i32 },
    PlayerSlain,
}
