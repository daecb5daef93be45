pub mod build;
pub mod normalize;
pub mod pipeline;
pub mod relations;
pub mod report;
pub mod sequence;
pub mod validate;
pub mod writer;

pub use build::*;
pub use normalize::*;
pub use pipeline::*;
pub use report::*;
pub use sequence::*;
pub use validate::*;
pub use writer::*;
