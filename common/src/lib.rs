pub mod block;
pub mod constants;
pub mod mem;
pub mod misc;

pub use block::Block;
