//! Request / response types of the HTTP API.

pub mod convert;
