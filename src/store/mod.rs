mod seen_set;

pub use seen_set::{JsonSeenStore, SeenSet, SeenStore};

#[cfg(test)]
pub use seen_set::StoreError;
