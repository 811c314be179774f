pub mod controller;
pub mod transitions;

pub use controller::{is_stale, FeedController, FetchOutcome, InitOutcome};
pub use transitions::{plan, FetchMode, FilterAction, Transition};

/// A snapshot older than this triggers an automatic background refresh.
pub const STALENESS_WINDOW_MINUTES: i64 = 30;
