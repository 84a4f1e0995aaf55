pub mod clipboard;
pub mod location;
pub mod logging;
