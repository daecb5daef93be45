pub mod fs;
pub mod mem;
pub mod traits;

pub use fs::*;
pub use mem::*;
pub use traits::*;
