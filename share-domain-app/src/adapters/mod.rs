//! Host adapters for frontends without a native clipboard or toast API.

mod headless;

pub use headless::HeadlessClipboard;
