use flappy_bird::assets::Sprite;
use flappy_bird::mask::*;

fn mask(lines: &[&str], width: i32, height: i32) -> Mask {
    Mask::from_sprite(&Sprite::from_lines(lines), width, height)
}

fn solid(width: i32, height: i32) -> Mask {
    mask(&["#"], width, height)
}

fn count_opaque(m: &Mask) -> usize {
    (0..m.height())
        .flat_map(|y| (0..m.width()).map(move |x| (x, y)))
        .filter(|&(x, y)| m.get(x, y))
        .count()
}

// ── Rect ──────────────────────────────────────────────────────────────────────

#[test]
fn rect_intersection() {
    let a = Rect::new(0, 0, 10, 10);
    let b = Rect::new(5, 6, 10, 10);
    assert_eq!(a.intersection(&b), Some(Rect::new(5, 6, 5, 4)));
    assert_eq!(b.intersection(&a), Some(Rect::new(5, 6, 5, 4)));
}

#[test]
fn touching_rects_do_not_intersect() {
    let a = Rect::new(0, 0, 10, 10);
    assert_eq!(a.intersection(&Rect::new(10, 0, 5, 5)), None);
    assert_eq!(a.intersection(&Rect::new(0, 10, 5, 5)), None);
    assert_eq!(a.intersection(&Rect::new(-5, -5, 5, 5)), None);
}

// ── Mask construction ─────────────────────────────────────────────────────────

#[test]
fn sprite_scales_nearest_neighbour() {
    let m = mask(&["# "], 4, 2);
    assert_eq!(m.width(), 4);
    assert_eq!(m.height(), 2);
    assert!(m.get(0, 0) && m.get(1, 0) && m.get(0, 1) && m.get(1, 1));
    assert!(!m.get(2, 0) && !m.get(3, 1));
    assert_eq!(count_opaque(&m), 4);
}

#[test]
fn ragged_rows_are_transparent_past_their_end() {
    let m = mask(&["##", "#"], 2, 2);
    assert!(m.get(1, 0));
    assert!(!m.get(1, 1));
}

#[test]
fn flip_swaps_rows() {
    let m = mask(&["#", " "], 1, 2);
    assert!(m.get(0, 0));
    assert!(!m.get(0, 1));

    let flipped = m.flipped_vertically();
    assert!(!flipped.get(0, 0));
    assert!(flipped.get(0, 1));
}

#[test]
fn empty_sprite_gives_empty_mask() {
    let m = Mask::from_sprite(&Sprite::missing(), 30, 30);
    assert!(m.is_empty());
    assert_eq!(m, Mask::empty());
    assert!(mask(&["#"], 0, 5).is_empty());
}

#[test]
fn get_outside_is_transparent() {
    let m = solid(3, 3);
    assert!(m.get(2, 2));
    assert!(!m.get(-1, 0));
    assert!(!m.get(3, 0));
    assert!(!m.get(0, 3));
}

// ── overlaps ──────────────────────────────────────────────────────────────────

#[test]
fn solid_masks_overlap() {
    let a = solid(10, 10);
    let b = solid(4, 4);
    assert!(overlaps(&a, (0, 0), &b, (8, 8)));
    assert!(overlaps(&b, (8, 8), &a, (0, 0)));
}

#[test]
fn adjacent_masks_do_not_overlap() {
    let a = solid(10, 10);
    let b = solid(4, 4);
    assert!(!overlaps(&a, (0, 0), &b, (10, 0)));
    assert!(!overlaps(&a, (0, 0), &b, (0, -4)));
}

#[test]
fn overlap_is_pixel_exact() {
    let a = mask(&["# ", "  "], 2, 2);
    let b = mask(&["  ", " #"], 2, 2);
    // Bounding boxes coincide but the opaque pixels do not.
    assert!(!overlaps(&a, (0, 0), &b, (0, 0)));
    // Shift `a` so its only pixel lands on `b`'s only pixel.
    assert!(overlaps(&a, (1, 1), &b, (0, 0)));
}

#[test]
fn empty_mask_never_overlaps() {
    let solid = solid(50, 50);
    assert!(!overlaps(&Mask::empty(), (10, 10), &solid, (0, 0)));
    assert!(!overlaps(&solid, (0, 0), &Mask::empty(), (10, 10)));
}
