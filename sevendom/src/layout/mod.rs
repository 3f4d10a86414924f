mod flex;
mod rect;

pub use flex::{estimate_size, intrinsic_height, layout, LayoutResult};
pub use rect::Rect;
