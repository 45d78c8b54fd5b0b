/// Game entity types and the session that owns them.
///
/// Only accessors live here; every state change is in `compute`.

use std::collections::VecDeque;
use std::rc::Rc;

use crate::mask::{Mask, Rect};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

// ── Shapes ────────────────────────────────────────────────────────────────────

/// Position rectangle plus the collision mask sampled from the entity's
/// sprite when it was created.  The mask is shared between clones.
#[derive(Clone, Debug)]
pub struct Body {
    pub rect: Rect,
    pub mask: Rc<Mask>,
}

impl Body {
    pub fn pos(&self) -> (i32, i32) {
        (self.rect.x, self.rect.y)
    }
}

// ── Bird, floor & pipes ───────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Bird {
    pub body: Body,
    /// Vertical speed; positive is downward.
    pub speed: i32,
    /// Upward speed a jump sets.
    pub init_speed: i32,
    pub acceleration: i32,
}

#[derive(Clone, Debug)]
pub struct Floor {
    pub body: Body,
    pub speed: i32,
    pub start_x: i32,
    /// Distance scrolled before the floor snaps back to `start_x`.
    pub span: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipeOrientation {
    /// Rises from the bottom of the screen.
    Upright,
    /// Hangs from the top of the screen.
    Inverted,
}

#[derive(Clone, Debug)]
pub struct Pipe {
    pub body: Body,
    pub speed: i32,
    pub orientation: PipeOrientation,
}

/// Two pipes sharing one x-offset, always added and removed together.
#[derive(Clone, Debug)]
pub struct PipePair {
    pub bottom: Pipe,
    pub top: Pipe,
}

impl PipePair {
    pub fn x(&self) -> i32 {
        self.bottom.body.rect.x
    }

    pub fn width(&self) -> i32 {
        self.bottom.body.rect.w
    }
}

// ── Uniform view of live entities ─────────────────────────────────────────────

/// One live entity, borrowed from a [`Session`].
#[derive(Clone, Copy, Debug)]
pub enum Entity<'a> {
    Bird(&'a Bird),
    Floor(&'a Floor),
    Pipe(&'a Pipe),
}

impl<'a> Entity<'a> {
    pub fn body(&self) -> &'a Body {
        match *self {
            Entity::Bird(bird) => &bird.body,
            Entity::Floor(floor) => &floor.body,
            Entity::Pipe(pipe) => &pipe.body,
        }
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// One play-through.  Cloneable so pure update functions can return a new
/// copy without mutating the original.
#[derive(Clone, Debug)]
pub struct Session {
    pub bird: Bird,
    pub floor: Floor,
    /// Active pipe pairs, oldest (leftmost) first.
    pub pipes: VecDeque<PipePair>,
    pub score: u32,
    pub status: GameStatus,
    pub frame: u64,
}

impl Session {
    /// Every live entity in drawing order: pipes, floor, then the bird.
    pub fn entities(&self) -> impl Iterator<Item = Entity<'_>> {
        self.pipes
            .iter()
            .flat_map(|pair| [Entity::Pipe(&pair.bottom), Entity::Pipe(&pair.top)])
            .chain(std::iter::once(Entity::Floor(&self.floor)))
            .chain(std::iter::once(Entity::Bird(&self.bird)))
    }

    pub fn score_text(&self) -> String {
        self.score.to_string()
    }
}
