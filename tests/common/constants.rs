//! Shared constants for e2e tests

pub const TEST_USER: &str = "ayla";
pub const TEST_PASS: &str = "test-password-123";

pub const REQUEST_TIMEOUT_SECS: u64 = 10;

// Fixture catalog shape, see fixtures.rs
pub const TRACK_COUNT: usize = 5;
pub const COLLECTION_COUNT: usize = 20;
pub const REGION_COUNT: usize = 3;
pub const POST_COUNT: usize = 9;

pub const FEATURED_POST_COUNT: usize = 2;
pub const HERITAGE_POST_COUNT: usize = 4;

pub const TRACK_1_ID: &str = "t1";
pub const MISSING_ID: &str = "does-not-exist";
