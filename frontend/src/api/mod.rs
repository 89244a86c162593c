mod auth;
pub mod client;
pub mod documents;
mod hr;
pub mod questionnaires;
pub mod records;
pub mod schedules;
pub mod types;

pub use client::*;
pub use records::*;
pub use types::*;

#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod test_support;
