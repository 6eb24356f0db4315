/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

/// Default number of items returned by the "recent" endpoints
pub const DEFAULT_RECENT_LIMIT: i64 = 5;

// =============================================================================
// MODERATION CONSTANTS
// =============================================================================

/// Reviewer recorded when an approve/reject request names nobody
pub const DEFAULT_REVIEWER: &str = "admin";

/// Maximum number of row errors echoed back from an approval
pub const MAX_REPORTED_ROW_ERRORS: usize = 10;
