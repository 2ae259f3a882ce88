//! Integration test harness.
//!
//! Each module exercises the HTTP API end to end through the router,
//! backed by the in-memory stores.

mod helpers;

mod auth_test;
mod recipe_test;
mod share_test;
