//! Integration test suite for the Ladder leaderboard.
//!
//! Exercises the ranking engine from the outside: rank-density properties
//! under random populations and mutation batches, fixed scenarios, and
//! consistency of snapshots read while a writer ticks concurrently.

pub mod helpers;
