/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `Session` (and, where needed, an RNG handle) and returns a brand-new
/// `Session`.  Side effects are limited to the injected RNG and logging.

use std::collections::VecDeque;
use std::rc::Rc;

use log::{debug, info};
use rand::Rng;

use crate::assets::Assets;
use crate::config::Config;
use crate::entities::{
    Bird, Body, Entity, Floor, GameStatus, Pipe, PipeOrientation, PipePair, Session,
};
use crate::mask::{overlaps, Mask, Rect};

/// Label drawn over the frozen playfield once the bird has crashed.
pub const GAME_OVER_LABEL: &str = "GAME OVER";

/// What the bird crashed into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Obstacle {
    Floor,
    Pipe,
}

// ── Constructors ─────────────────────────────────────────────────────────────

pub fn new_bird(config: &Config, assets: &Assets) -> Bird {
    let mask = Mask::from_sprite(&assets.bird, config.bird_width, config.bird_height);
    Bird {
        body: Body {
            rect: Rect::new(
                config.screen_width / 2,
                config.screen_height / 2,
                config.bird_width,
                config.bird_height,
            ),
            mask: Rc::new(mask),
        },
        speed: config.bird_speed,
        init_speed: config.bird_speed,
        acceleration: config.bird_acceleration,
    }
}

pub fn new_floor(config: &Config, assets: &Assets, start_x: i32) -> Floor {
    let mask = Mask::from_sprite(&assets.floor, config.floor_width, config.floor_height);
    Floor {
        body: Body {
            rect: Rect::new(
                start_x,
                config.screen_height - config.floor_height,
                config.floor_width,
                config.floor_height,
            ),
            mask: Rc::new(mask),
        },
        speed: config.floor_speed,
        start_x,
        span: config.screen_width,
    }
}

/// One pipe of `height` pixels at horizontal offset `x`.  Upright pipes
/// stand on the bottom edge of the screen, inverted ones hang from the top.
pub fn new_pipe(
    config: &Config,
    assets: &Assets,
    x: i32,
    height: i32,
    orientation: PipeOrientation,
) -> Pipe {
    let mask = Mask::from_sprite(&assets.pipe, config.pipe_width, height);
    let (y, mask) = match orientation {
        PipeOrientation::Upright => (config.screen_height - height, mask),
        PipeOrientation::Inverted => (0, mask.flipped_vertically()),
    };
    Pipe {
        body: Body {
            rect: Rect::new(x, y, config.pipe_width, height),
            mask: Rc::new(mask),
        },
        speed: config.pipe_speed,
        orientation,
    }
}

/// Draw the bottom pipe's height uniformly from the inclusive
/// `[pipe_height_min, pipe_height_max]` range; the top pipe fills the rest
/// of the screen above the gap.
pub fn generate_pipe_pair(
    config: &Config,
    assets: &Assets,
    x: i32,
    rng: &mut impl Rng,
) -> PipePair {
    let size = rng.gen_range(config.pipe_height_min..=config.pipe_height_max);
    PipePair {
        bottom: new_pipe(config, assets, x, size, PipeOrientation::Upright),
        top: new_pipe(
            config,
            assets,
            x,
            config.screen_height - config.pipe_gap - size,
            PipeOrientation::Inverted,
        ),
    }
}

/// The two pairs every session starts with, one and two screens to the right.
fn initial_pipes(config: &Config, assets: &Assets, rng: &mut impl Rng) -> VecDeque<PipePair> {
    VecDeque::from([
        generate_pipe_pair(config, assets, config.screen_width, rng),
        generate_pipe_pair(config, assets, 2 * config.screen_width, rng),
    ])
}

/// Build the state for a brand-new game.
pub fn init_session(config: &Config, assets: &Assets, rng: &mut impl Rng) -> Session {
    Session {
        bird: new_bird(config, assets),
        floor: new_floor(config, assets, 0),
        pipes: initial_pipes(config, assets, rng),
        score: 0,
        status: GameStatus::Playing,
        frame: 0,
    }
}

/// Fresh bird, pipes and score; the floor keeps scrolling from where it is.
pub fn restart(
    state: &Session,
    config: &Config,
    assets: &Assets,
    rng: &mut impl Rng,
) -> Session {
    info!("new session after final score {}", state.score);
    Session {
        bird: new_bird(config, assets),
        pipes: initial_pipes(config, assets, rng),
        score: 0,
        status: GameStatus::Playing,
        frame: 0,
        ..state.clone()
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Set the bird's speed to `-init_speed`, whatever it was before.
pub fn jump(state: &Session) -> Session {
    let bird = Bird {
        speed: -state.bird.init_speed,
        ..state.bird.clone()
    };
    Session {
        bird,
        ..state.clone()
    }
}

/// Handle one press of the jump key: restarts a finished game first, then
/// jumps.
pub fn press_jump(
    state: &Session,
    config: &Config,
    assets: &Assets,
    rng: &mut impl Rng,
) -> Session {
    match state.status {
        GameStatus::Playing => jump(state),
        GameStatus::GameOver => jump(&restart(state, config, assets, rng)),
    }
}

// ── Per-entity motion ───────────────────────────────────────────────────────

/// Accelerate, then move by the new speed.
pub fn advance_bird(bird: &Bird) -> Bird {
    let speed = bird.speed + bird.acceleration;
    let mut body = bird.body.clone();
    body.rect.y += speed;
    Bird {
        body,
        speed,
        ..bird.clone()
    }
}

/// Scroll left, snapping back to `start_x` once a full span has passed.
pub fn advance_floor(floor: &Floor) -> Floor {
    let mut body = floor.body.clone();
    body.rect.x -= floor.speed;
    if body.rect.x <= floor.start_x - floor.span {
        body.rect.x = floor.start_x;
    }
    Floor {
        body,
        ..floor.clone()
    }
}

pub fn advance_pipe(pipe: &Pipe) -> Pipe {
    let mut body = pipe.body.clone();
    body.rect.x -= pipe.speed;
    Pipe {
        body,
        ..pipe.clone()
    }
}

fn advance_pair(pair: &PipePair) -> PipePair {
    PipePair {
        bottom: advance_pipe(&pair.bottom),
        top: advance_pipe(&pair.top),
    }
}

// ── Collision ────────────────────────────────────────────────────────────────

/// True once the pair's trailing edge has passed the left edge of the screen.
pub fn is_pipe_out(pair: &PipePair) -> bool {
    pair.x() + pair.width() < 0
}

fn body_overlap(a: &Body, b: &Body) -> bool {
    overlaps(&a.mask, a.pos(), &b.mask, b.pos())
}

/// The first obstacle the bird's mask touches, if any.
pub fn detect_collision(state: &Session) -> Option<Obstacle> {
    let bird = &state.bird.body;
    state.entities().find_map(|entity| {
        let obstacle = match entity {
            Entity::Bird(_) => return None,
            Entity::Floor(_) => Obstacle::Floor,
            Entity::Pipe(_) => Obstacle::Pipe,
        };
        body_overlap(bird, entity.body()).then_some(obstacle)
    })
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one frame.  A finished game is returned
/// unchanged.
pub fn tick(state: &Session, config: &Config, assets: &Assets, rng: &mut impl Rng) -> Session {
    if state.status == GameStatus::GameOver {
        return state.clone();
    }
    let frame = state.frame + 1;

    // ── 1. Recycle the oldest pair once it has left the screen ───────────────
    let mut pipes = state.pipes.clone();
    let mut score = state.score;
    if pipes.front().map_or(false, is_pipe_out) {
        pipes.pop_front();
        pipes.push_back(generate_pipe_pair(
            config,
            assets,
            config.screen_width + config.pipe_width,
            rng,
        ));
        score += 1;
        debug!("frame {frame}: pipe pair recycled, score {score}");
    }

    // ── 2. Move everything ───────────────────────────────────────────────────
    let next = Session {
        bird: advance_bird(&state.bird),
        floor: advance_floor(&state.floor),
        pipes: pipes.iter().map(advance_pair).collect(),
        score,
        status: GameStatus::Playing,
        frame,
    };

    // ── 3. Collisions end the run ────────────────────────────────────────────
    match detect_collision(&next) {
        Some(obstacle) => {
            info!(
                "frame {frame}: bird hit the {} at y={}, final score {score}",
                match obstacle {
                    Obstacle::Floor => "floor",
                    Obstacle::Pipe => "pipe",
                },
                next.bird.body.rect.y
            );
            Session {
                status: GameStatus::GameOver,
                ..next
            }
        }
        None => next,
    }
}
