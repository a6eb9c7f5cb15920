#![doc = "Test helpers shared by the Perigon crates."]

mod api;
pub use api::*;
