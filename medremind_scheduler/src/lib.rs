mod observer;
mod tracker;
mod watcher;

pub use observer::{StatusEvent, StatusObserver};
pub use tracker::StatusTracker;
pub use watcher::{MIN_INTERVAL, StatusWatcher};
