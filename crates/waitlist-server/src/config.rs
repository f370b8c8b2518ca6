/// Re-export `Config` from `waitlist-core` for use within this crate.
///
/// Environment-variable parsing lives in `waitlist-core` so integration
/// tests can build a `Config` without depending on the binary.
pub use waitlist_core::config::Config;
