pub mod error;
pub mod handler;
pub mod labels;
pub mod notification;
pub mod recognition;
pub mod settings;
pub mod store;

pub use error::{BoxError, Error};
pub use handler::{Handler, Mode};
pub use settings::Settings;
