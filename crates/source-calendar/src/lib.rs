//! Economic calendar indicator sources.
//!
//! Two ways to get calendar releases into the analyzer: a commercial
//! calendar API authenticated with an API key, and local JSON feed
//! files using the same row shape. Both normalize provider rows into
//! domain observations, dropping rows for other regions or dates.

pub mod client;
pub mod error;
pub mod feed;
pub mod records;

pub use client::CalendarClient;
pub use error::CalendarError;
pub use feed::JsonFeedSource;
pub use records::RawCalendarEvent;
