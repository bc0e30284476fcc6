/// Placeholder shown wherever the server omitted a nested field.
pub const NOT_AVAILABLE: &str = "N/A";

/// Server-side page size for the submissions queue.
pub const SUBMISSIONS_PAGE_SIZE: u32 = 10;

/// Server-side page size for the per-user recordings list.
pub const RECORDINGS_PAGE_SIZE: u32 = 5;

/// Inclusive grade range accepted by the draft store.
pub const GRADE_MIN: u8 = 0;
pub const GRADE_MAX: u8 = 100;

/// Query-string parameter carrying the LTI launch token.
pub const LAUNCH_TOKEN_PARAM: &str = "ltik";
