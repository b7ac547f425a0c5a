pub mod lifecycle;
pub mod use_cases;

#[cfg(test)]
mod test_support;

pub use lifecycle::{AccountLifecycle, LifecycleConfig};
pub use use_cases::*;
