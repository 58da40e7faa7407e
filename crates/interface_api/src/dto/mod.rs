//! Request and response bodies

pub mod cars;
