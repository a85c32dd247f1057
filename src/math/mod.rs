mod color;

pub use color::{hsb_to_packed, hsb_to_rgb, pack_rgb, unpack_rgb, BLACK};
