/// Packed black, used for points that never escape
pub const BLACK: u32 = 0x000000;

/// Convert HSB (hue, saturation, brightness) to linear RGB channels in [0, 1]
///
/// Hue wraps, so only its fractional part matters. Uses the six-sector
/// formulation with explicit p/q/t terms so results match classic HSB
/// converters channel for channel.
pub fn hsb_to_rgb(hue: f32, saturation: f32, brightness: f32) -> [f32; 3] {
    if saturation == 0.0 {
        return [brightness; 3];
    }

    let h = (hue - hue.floor()) * 6.0;
    let f = h - h.floor();
    let p = brightness * (1.0 - saturation);
    let q = brightness * (1.0 - saturation * f);
    let t = brightness * (1.0 - saturation * (1.0 - f));

    match h as i32 {
        0 => [brightness, t, p],
        1 => [q, brightness, p],
        2 => [p, brightness, t],
        3 => [p, q, brightness],
        4 => [t, p, brightness],
        _ => [brightness, p, q],
    }
}

/// Pack RGB channels in [0, 1] into `0x00RRGGBB`, rounding half up
pub fn pack_rgb(rgb: [f32; 3]) -> u32 {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0 + 0.5) as u32;
    (channel(rgb[0]) << 16) | (channel(rgb[1]) << 8) | channel(rgb[2])
}

/// Split `0x00RRGGBB` into its byte channels
pub fn unpack_rgb(packed: u32) -> [u8; 3] {
    [(packed >> 16) as u8, (packed >> 8) as u8, packed as u8]
}

/// HSB straight to a packed value
pub fn hsb_to_packed(hue: f32, saturation: f32, brightness: f32) -> u32 {
    pack_rgb(hsb_to_rgb(hue, saturation, brightness))
}
