//! Application layer: the settlement engine and the service that feeds it.
//!
//! `SettlementEngine` holds the greedy, intermediary-aware settlement loop and
//! is purely synchronous. `SettlementService` pairs it with a `NetworkStore`
//! so the binary can settle whatever network a store provides.

pub mod engine;
pub mod service;
