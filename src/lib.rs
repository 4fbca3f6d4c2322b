//! Season-long cycling prediction game.
//!
//! Participants pick one rider per race. This crate decides who picks first in
//! each race, fills in picks for anyone who missed the deadline, and turns race
//! results and a star-rating table into points and a season ranking.

pub mod config;
pub mod order;
pub mod output;
pub mod scoring;
pub mod season;
pub mod stderr_buffer;
