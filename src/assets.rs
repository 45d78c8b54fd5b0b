/// Text-art sprites: the visual assets collision masks are derived from.
///
/// A sprite is a block of text; any non-space character is an opaque
/// pixel.  The built-in art is used unless the configuration names a file.

use std::io;
use std::path::Path;

use log::warn;

use crate::config::Config;

// ── Built-in art ──────────────────────────────────────────────────────────────

const BIRD_ART: &[&str] = &[
    "   ####",
    " ######o#",
    "#########>",
    " #######",
    "   ###",
];

const PIPE_ART: &[&str] = &[
    "##########",
    "##########",
    " ######## ",
    " ######## ",
    " ######## ",
    " ######## ",
    " ######## ",
    " ######## ",
    " ######## ",
    " ######## ",
    " ######## ",
    " ######## ",
];

const FLOOR_ART: &[&str] = &[
    "==========",
    "##########",
    "##########",
    "##########",
];

// ── Sprite ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sprite {
    rows: Vec<Vec<char>>,
}

impl Sprite {
    pub fn from_text(text: &str) -> Self {
        Sprite {
            rows: text.lines().map(|line| line.chars().collect()).collect(),
        }
    }

    pub fn from_lines(lines: &[&str]) -> Self {
        Sprite::from_text(&lines.join("\n"))
    }

    pub fn from_file(path: &Path) -> io::Result<Self> {
        Ok(Sprite::from_text(&std::fs::read_to_string(path)?))
    }

    /// Stand-in for an asset that could not be loaded.
    pub fn missing() -> Self {
        Sprite { rows: Vec::new() }
    }

    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0
    }

    pub fn has_opaque_pixels(&self) -> bool {
        self.rows.iter().flatten().any(|c| !c.is_whitespace())
    }

    pub fn is_opaque(&self, col: usize, row: usize) -> bool {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map_or(false, |c| !c.is_whitespace())
    }
}

// ── Asset bundle ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Assets {
    pub bird: Sprite,
    pub pipe: Sprite,
    pub floor: Sprite,
}

impl Assets {
    pub fn builtin() -> Self {
        Assets {
            bird: Sprite::from_lines(BIRD_ART),
            pipe: Sprite::from_lines(PIPE_ART),
            floor: Sprite::from_lines(FLOOR_ART),
        }
    }

    /// Load every sprite the configuration names, falling back to the
    /// built-in art for the ones it leaves unset.
    pub fn load(config: &Config) -> Self {
        let builtin = Assets::builtin();
        Assets {
            bird: load_sprite(config.bird_sprite.as_deref(), builtin.bird),
            pipe: load_sprite(config.pipe_sprite.as_deref(), builtin.pipe),
            floor: load_sprite(config.floor_sprite.as_deref(), builtin.floor),
        }
    }
}

fn load_sprite(path: Option<&Path>, builtin: Sprite) -> Sprite {
    let Some(path) = path else {
        return builtin;
    };
    match Sprite::from_file(path) {
        Ok(sprite) => {
            if !sprite.has_opaque_pixels() {
                warn!("sprite {} has no opaque pixels", path.display());
            }
            sprite
        }
        Err(e) => {
            warn!("could not load sprite {}: {e}; it will not collide", path.display());
            Sprite::missing()
        }
    }
}
