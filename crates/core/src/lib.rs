//! # Shopdesk Core
//!
//! Domain types and scheduling rules for the service-shop backend.
//!
//! - [`availability`] turns a day's appointments into bookable half-hour slots
//!   and decides whether a proposed booking may proceed.
//! - [`store`] is the contract the record store has to fulfil.
//! - [`booking`] wires the two together as request/response operations.

pub mod availability;
pub mod booking;
pub mod errors;
pub mod models;
pub mod store;
