//! Data Transfer Objects for REST response serialization.

pub mod player_dto;

pub use player_dto::*;
