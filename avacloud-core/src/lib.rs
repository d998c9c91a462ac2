#![doc = "avacloud-core: core logic library for the AVACloud client."]

//! This crate contains the transport-agnostic parts of the AVACloud client:
//! OAuth2 token acquisition, the project/invoice data model, the position
//! counter and the example conversion workflows.
//!
//! # Usage
//! The CLI crate supplies a concrete [`contract::ConversionApi`]; tests use the
//! generated mocks (`MockConversionApi`, `MockTokenTransport`).

pub mod config;
pub mod contract;
pub mod error;
pub mod model;
pub mod positions;
pub mod session;
pub mod token;
pub mod workflow;
