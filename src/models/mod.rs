pub mod product;
pub mod view;
pub mod report;

pub use product::*;
pub use view::*;
pub use report::*;
