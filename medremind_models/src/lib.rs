pub mod reminder;
pub mod session;
pub mod settings;

pub use chrono;
pub use chrono_tz;
