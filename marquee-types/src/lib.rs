pub mod enums;
pub mod models;
pub mod requests;

pub use enums::*;
pub use models::*;
pub use requests::*;
