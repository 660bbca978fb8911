pub mod notification;
pub mod outreach;

// Re-exports for convenience
pub use notification::Composer;
