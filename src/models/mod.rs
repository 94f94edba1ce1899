pub mod filters;
pub mod navigation;
pub mod tab;

pub use filters::*;
pub use navigation::*;
pub use tab::*;
