// src/alloc/mod.rs

//! Time allocation.
//!
//! [`allocator::TimeAllocator`] turns an ordered task list plus a
//! [`allocator::ScheduleWindow`] into concrete start/end instants;
//! [`outcome`] holds what it returns.

pub mod allocator;
pub mod outcome;

pub use allocator::{ScheduleWindow, TimeAllocator};
pub use outcome::{AllocationOutcome, AllocationStatus, ScheduledAllocation};
