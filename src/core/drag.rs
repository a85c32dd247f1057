/// Turns pointer press/move/release on the image into pan deltas.
///
/// Positions are taken relative to the image's top-left corner and converted
/// to a centered cartesian frame (y up). Deltas in that frame add directly
/// onto the viewport pan, which makes the picture follow the pointer.
#[derive(Debug, Clone, Copy)]
pub struct DragTracker {
    half_width: i32,
    half_height: i32,
    last: Option<(i32, i32)>,
}

impl DragTracker {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            half_width: (width / 2) as i32,
            half_height: (height / 2) as i32,
            last: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.last.is_some()
    }

    /// Start a gesture at the given image position
    pub fn press(&mut self, x: f32, y: f32) {
        self.last = Some(self.to_cartesian(x, y));
    }

    /// Pointer moved; returns the pan delta since the previous position.
    ///
    /// Returns None when no gesture is active or the pointer did not cross a
    /// whole pixel.
    pub fn move_to(&mut self, x: f32, y: f32) -> Option<(i32, i32)> {
        let (last_x, last_y) = self.last?;
        let (cx, cy) = self.to_cartesian(x, y);
        self.last = Some((cx, cy));

        let delta = (cx - last_x, cy - last_y);
        (delta != (0, 0)).then_some(delta)
    }

    /// End the gesture
    pub fn release(&mut self) {
        self.last = None;
    }

    fn to_cartesian(&self, x: f32, y: f32) -> (i32, i32) {
        (
            x.floor() as i32 - self.half_width,
            self.half_height - y.floor() as i32,
        )
    }
}
