//! Foundational value types: members, currencies, expenses, payments,
//! and the group snapshot the engine consumes.

pub mod currency;
pub mod expense;
pub mod group;
pub mod member;
pub mod payment;
