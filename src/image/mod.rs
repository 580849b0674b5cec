pub mod io;
pub mod rgba;

pub use self::io::{decode_bytes, decode_image, encode_image, ImageFormat};
pub use self::rgba::{clamp_coord, clamp_u8, luma_f64, PixelBuffer};
