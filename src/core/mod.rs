// Core modules implementing the board model, wire codec, and native solver boundary.
pub mod binding;
pub mod board;
pub mod codec;
pub mod error;
pub mod native;
pub mod platform;
pub mod text;
