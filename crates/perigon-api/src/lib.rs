#![doc = "Bindings for the Perigon news and content search API."]
#![allow(missing_docs)]

pub mod apis;
pub mod models;
