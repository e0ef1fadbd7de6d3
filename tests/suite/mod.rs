//! Integration test modules

mod generator;
mod playback;
mod session;
