//! Static cube geometry.
//!
//! Plain data: 24 vertices (4 per face) as three separate tightly packed
//! streams plus a 36-entry index list. The UV table maps each face onto a
//! cell of a 3x3 texture atlas.

/// Per-vertex positions, 4 per face, unit half-extent.
#[rustfmt::skip]
pub const POSITIONS: [f32; 72] = [
    // Front
    -1.0,  1.0,  1.0,
    -1.0, -1.0,  1.0,
     1.0,  1.0,  1.0,
     1.0, -1.0,  1.0,
    // Back
     1.0,  1.0, -1.0,
     1.0, -1.0, -1.0,
    -1.0,  1.0, -1.0,
    -1.0, -1.0, -1.0,
    // Top
    -1.0,  1.0, -1.0,
    -1.0,  1.0,  1.0,
     1.0,  1.0, -1.0,
     1.0,  1.0,  1.0,
    // Bottom
    -1.0, -1.0,  1.0,
    -1.0, -1.0, -1.0,
     1.0, -1.0,  1.0,
     1.0, -1.0, -1.0,
    // Left
    -1.0,  1.0, -1.0,
    -1.0, -1.0, -1.0,
    -1.0,  1.0,  1.0,
    -1.0, -1.0,  1.0,
    // Right
     1.0,  1.0,  1.0,
     1.0, -1.0,  1.0,
     1.0,  1.0, -1.0,
     1.0, -1.0, -1.0,
];

/// Per-vertex face normals, matching the position table order.
#[rustfmt::skip]
pub const NORMALS: [f32; 72] = [
    // Front
     0.0,  0.0,  1.0,
     0.0,  0.0,  1.0,
     0.0,  0.0,  1.0,
     0.0,  0.0,  1.0,
    // Back
     0.0,  0.0, -1.0,
     0.0,  0.0, -1.0,
     0.0,  0.0, -1.0,
     0.0,  0.0, -1.0,
    // Top
     0.0,  1.0,  0.0,
     0.0,  1.0,  0.0,
     0.0,  1.0,  0.0,
     0.0,  1.0,  0.0,
    // Bottom
     0.0, -1.0,  0.0,
     0.0, -1.0,  0.0,
     0.0, -1.0,  0.0,
     0.0, -1.0,  0.0,
    // Left
    -1.0,  0.0,  0.0,
    -1.0,  0.0,  0.0,
    -1.0,  0.0,  0.0,
    -1.0,  0.0,  0.0,
    // Right
     1.0,  0.0,  0.0,
     1.0,  0.0,  0.0,
     1.0,  0.0,  0.0,
     1.0,  0.0,  0.0,
];

const THIRD: f32 = 1.0 / 3.0;
const TWO_THIRDS: f32 = 2.0 / 3.0;

/// Per-vertex UVs into the 3x3 atlas cells.
#[rustfmt::skip]
pub const UVS: [f32; 48] = [
    // Front
    0.0, 0.0,
    0.0, THIRD,
    THIRD, 0.0,
    THIRD, THIRD,
    // Back
    TWO_THIRDS, THIRD,
    TWO_THIRDS, TWO_THIRDS,
    1.0, THIRD,
    1.0, TWO_THIRDS,
    // Top
    THIRD, 0.0,
    THIRD, THIRD,
    TWO_THIRDS, 0.0,
    TWO_THIRDS, THIRD,
    // Bottom
    THIRD, THIRD,
    THIRD, TWO_THIRDS,
    TWO_THIRDS, THIRD,
    TWO_THIRDS, TWO_THIRDS,
    // Left
    TWO_THIRDS, 0.0,
    TWO_THIRDS, THIRD,
    1.0, 0.0,
    1.0, THIRD,
    // Right
    0.0, THIRD,
    0.0, TWO_THIRDS,
    THIRD, THIRD,
    THIRD, TWO_THIRDS,
];

/// Two CCW triangles per face.
#[rustfmt::skip]
pub const INDICES: [u16; 36] = [
     0,  1,  2,
     1,  3,  2,
     4,  5,  6,
     5,  7,  6,
     8,  9, 10,
     9, 11, 10,
    12, 13, 14,
    13, 15, 14,
    16, 17, 18,
    17, 19, 18,
    20, 21, 22,
    21, 23, 22,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_lengths_agree() {
        assert_eq!(POSITIONS.len() / 3, 24);
        assert_eq!(NORMALS.len() / 3, 24);
        assert_eq!(UVS.len() / 2, 24);
        assert_eq!(INDICES.len(), 36);
    }

    #[test]
    fn indices_stay_in_range() {
        assert!(INDICES.iter().all(|&i| (i as usize) < POSITIONS.len() / 3));
    }

    #[test]
    fn uvs_stay_in_the_unit_square() {
        assert!(UVS.iter().all(|&c| (0.0..=1.0).contains(&c)));
    }
}
