//! View-layer building blocks for listing pages.

mod context;
mod controller;

pub use context::{AppContext, AppEvent, Subscription};
pub use controller::{ListView, LoadState};

/// Page size used by library-style listing pages.
pub const LIBRARY_PAGE_SIZE: usize = 8;
/// Page size used by the explore page.
pub const EXPLORE_PAGE_SIZE: usize = 12;
