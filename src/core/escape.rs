/// Squared escape radius; an iterate escapes once |z|^2 exceeds it
pub const ESCAPE_RADIUS_SQ: f32 = 4.0;

/// Outcome of iterating one point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EscapeResult {
    /// Stayed within the escape radius for the whole budget
    Bounded,
    /// Left the escape radius after this many steps (1-based)
    Escaped(u32),
}

impl EscapeResult {
    pub fn is_bounded(&self) -> bool {
        matches!(self, EscapeResult::Bounded)
    }

    /// Step at which the point escaped, if it did
    pub fn escape_iteration(&self) -> Option<u32> {
        match self {
            EscapeResult::Bounded => None,
            EscapeResult::Escaped(k) => Some(*k),
        }
    }
}

/// Iterate z <- z^2 + c for the point c = cx + cy*i.
///
/// The iterate starts at c itself rather than at the origin. The divergence
/// test runs after every update and is strict: |z|^2 == 4 is still bounded.
pub fn evaluate(cx: f32, cy: f32, max_iterations: u32) -> EscapeResult {
    let (mut x, mut y) = (cx, cy);

    for step in 1..=max_iterations {
        let nx = x * x - y * y + cx;
        let ny = 2.0 * x * y + cy;
        x = nx;
        y = ny;

        if x * x + y * y > ESCAPE_RADIUS_SQ {
            return EscapeResult::Escaped(step);
        }
    }

    EscapeResult::Bounded
}
