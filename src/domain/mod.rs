//! Settlement domain: banks, their payment modes, debts and the resulting plan.

pub mod balance;
pub mod modes;
pub mod network;
pub mod ports;
pub mod transfer;
