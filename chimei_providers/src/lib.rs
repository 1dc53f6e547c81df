#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! [`AddressDataGateway`](chimei_core::AddressDataGateway) implementations.
//!
//! Both read the layout published by the japanese-addresses dataset:
//! `{base}.json` for the prefecture/city index and
//! `{base}/{prefecture}/{city}.json` for the towns of one city.

mod file;
mod http;

pub use file::FileGateway;
pub use http::{HttpGateway, HttpGatewayConfig};
