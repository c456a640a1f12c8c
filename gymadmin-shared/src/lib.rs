#![cfg_attr(not(test), forbid(unsafe_code))]

//! Wire models for the gym administration console.
//!
//! Everything the backend sends or receives goes through the types in
//! [`models`]; the console never inspects raw JSON outside this crate.

pub mod models;
