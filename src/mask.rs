/// Collision shapes: axis-aligned rectangles and per-pixel opacity masks.
///
/// A mask is sampled once from an entity's sprite when the entity is
/// created.  Overlap tests reject on bounding boxes first and only then AND
/// the two bitmaps over the intersecting region.

use crate::assets::Sprite;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Intersection of two rectangles, `None` when they do not overlap.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= x || bottom <= y {
            None
        } else {
            Some(Rect::new(x, y, right - x, bottom - y))
        }
    }
}

/// Opacity bitmap, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    width: i32,
    height: i32,
    bits: Vec<bool>,
}

impl Mask {
    /// Zero-size mask, used for shapes whose asset is missing.
    pub fn empty() -> Self {
        Mask {
            width: 0,
            height: 0,
            bits: Vec::new(),
        }
    }

    /// Nearest-neighbour scale of `sprite` to `width` × `height` pixels.
    /// Any non-space character is opaque.
    pub fn from_sprite(sprite: &Sprite, width: i32, height: i32) -> Self {
        if sprite.is_empty() || width <= 0 || height <= 0 {
            return Mask::empty();
        }
        let (cols, rows) = (sprite.width() as i64, sprite.height() as i64);
        let mut bits = Vec::with_capacity((width * height) as usize);
        for py in 0..height as i64 {
            let row = (py * rows / height as i64) as usize;
            for px in 0..width as i64 {
                let col = (px * cols / width as i64) as usize;
                bits.push(sprite.is_opaque(col, row));
            }
        }
        Mask {
            width,
            height,
            bits,
        }
    }

    pub fn flipped_vertically(&self) -> Self {
        let w = self.width as usize;
        let bits = self
            .bits
            .chunks(w.max(1))
            .rev()
            .flatten()
            .copied()
            .collect();
        Mask {
            width: self.width,
            height: self.height,
            bits,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Opacity at mask-local coordinates; outside the bitmap is transparent.
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return false;
        }
        self.bits[(y * self.width + x) as usize]
    }
}

/// True when any opaque pixel of `a` (placed at `a_pos`) covers an opaque
/// pixel of `b` (placed at `b_pos`).
pub fn overlaps(a: &Mask, a_pos: (i32, i32), b: &Mask, b_pos: (i32, i32)) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    let ra = Rect::new(a_pos.0, a_pos.1, a.width, a.height);
    let rb = Rect::new(b_pos.0, b_pos.1, b.width, b.height);
    let Some(area) = ra.intersection(&rb) else {
        return false;
    };

    for y in area.y..area.bottom() {
        for x in area.x..area.right() {
            if a.get(x - ra.x, y - ra.y) && b.get(x - rb.x, y - rb.y) {
                return true;
            }
        }
    }
    false
}
