pub const STAR_COUNT: usize = 100_000;

/// Half-extent of the cube the stars are scattered in.
pub const STAR_FIELD_RADIUS: f32 = 200.0;

/// Stellar colour palette, blue-white through orange.
pub const STAR_PALETTE: [[u8; 3]; 7] = [
    [175, 201, 255],
    [199, 216, 255],
    [255, 244, 243],
    [255, 229, 207],
    [255, 217, 178],
    [255, 199, 142],
    [255, 166, 81],
];
