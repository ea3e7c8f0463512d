//! The algorithmic core: balance calculation and settlement planning.
//!
//! Both entry points are pure, synchronous functions over plain data.
//! They allocate their own local state, touch no globals, and may be
//! called concurrently without coordination. Every call is a full
//! recomputation from the snapshot; cost is linear in the number of
//! expenses, shares, and payments.

pub mod balance;
pub mod settlement;
