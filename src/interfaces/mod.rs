//! Adapters between the outside world's text formats and the domain.

pub mod csv;
