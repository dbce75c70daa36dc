pub mod config;
pub mod domain;
pub mod srs;
pub mod validation;
