pub mod contracts;
pub mod env;
pub mod error;
pub mod loader;
pub mod logging;

pub use error::SakeyError;
pub use loader::{OUTPUT_FILE_NAME, SUCCESS_MESSAGE, stage};
