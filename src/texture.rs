use miniquad::{Context, FilterMode, Texture, TextureFormat, TextureParams, TextureWrap};

/// A single opaque white pixel, for drawing sprites with only their vertex colors.
pub fn white_rgba8() -> [u8; 4] {
    [0xFF; 4]
}

/// Generate a square checkerboard of `size` x `size` pixels, alternating between colors `a` and
/// `b` every `cell` pixels.
pub fn checkerboard_rgba8(size: usize, cell: usize, a: [u8; 4], b: [u8; 4]) -> Vec<u8> {
    let cell = cell.max(1);

    (0..size * size).flat_map(|i| {
        let (x, y) = (i % size, i / size);
        if (x / cell + y / cell) % 2 == 0 { a } else { b }
    }).collect()
}

/// Upload the white pixel as a texture.
pub fn white(ctx: &mut Context) -> Texture {
    Texture::from_rgba8(ctx, 1, 1, &white_rgba8())
}

/// Upload a checkerboard as a texture with nearest filtering, so the cells stay crisp.
pub fn checkerboard(ctx: &mut Context, size: u16, cell: usize, a: [u8; 4], b: [u8; 4]) -> Texture {
    let pixels = checkerboard_rgba8(size as usize, cell, a, b);

    Texture::from_data_and_format(
        ctx,
        &pixels,
        TextureParams {
            width: size as u32,
            height: size as u32,
            format: TextureFormat::RGBA8,
            wrap: TextureWrap::Clamp,
            filter: FilterMode::Nearest,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: [u8; 4] = [0, 0, 0, 0xFF];
    const WHITE: [u8; 4] = [0xFF; 4];

    fn pixel(data: &[u8], size: usize, x: usize, y: usize) -> [u8; 4] {
        let idx = 4 * (y * size + x);
        [data[idx], data[idx + 1], data[idx + 2], data[idx + 3]]
    }

    #[test]
    fn checkerboard_alternates_cells() {
        let data = checkerboard_rgba8(8, 2, BLACK, WHITE);
        assert_eq!(data.len(), 8 * 8 * 4);

        assert_eq!(pixel(&data, 8, 0, 0), BLACK);
        assert_eq!(pixel(&data, 8, 1, 1), BLACK);
        assert_eq!(pixel(&data, 8, 2, 0), WHITE);
        assert_eq!(pixel(&data, 8, 0, 2), WHITE);
        assert_eq!(pixel(&data, 8, 2, 2), BLACK);
    }

    #[test]
    fn zero_cell_is_treated_as_one() {
        let data = checkerboard_rgba8(2, 0, BLACK, WHITE);
        assert_eq!(pixel(&data, 2, 0, 0), BLACK);
        assert_eq!(pixel(&data, 2, 1, 0), WHITE);
    }
}
