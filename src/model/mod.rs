pub mod common;
pub mod formula;
pub mod legacy;
pub mod manifest;
pub mod material;
pub mod product;
pub mod relations;
pub mod slice;
pub mod vocab;

pub use common::*;
pub use formula::*;
pub use legacy::*;
pub use manifest::*;
pub use material::*;
pub use product::*;
pub use relations::*;
pub use slice::*;
pub use vocab::*;
