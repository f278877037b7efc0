pub mod error;
pub mod output;
pub mod types;

pub use error::{PatchError, PatchResult};
pub use types::*;
