pub mod addressing;
pub mod constraint;
pub mod error;
pub mod explosion;
pub mod mate;
pub mod pattern;

pub use addressing::*;
pub use constraint::*;
pub use error::LayoutError;
pub use explosion::*;
pub use mate::*;
pub use pattern::*;
