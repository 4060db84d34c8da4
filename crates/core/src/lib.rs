//! Domain logic for the character caption bot.
//!
//! Everything in this crate is transport- and database-agnostic: the caption
//! parser is pure, and the reconciliation, lookup and admin registration
//! engines talk to persistence through the [`store::CharacterStore`] trait.

pub mod admin;
pub mod caption;
pub mod character;
pub mod error;
pub mod memory;
pub mod reconcile;
pub mod store;
pub mod types;
