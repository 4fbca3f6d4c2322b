pub mod allocator;

pub use allocator::{allocate, build_round_order, choose_balanced_starter, rotate, Allocation};
