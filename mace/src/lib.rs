pub mod io;
pub mod mace;
pub mod mace_state;
pub mod sched;

pub use io::MMIOHandler;
pub use mace::{Mace, MaceConfig};
pub use mace_state::MaceState;
