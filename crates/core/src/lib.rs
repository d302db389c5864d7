//! Domain types, errors, and pure validation rules shared by the `db` and
//! `api` crates. Nothing in here touches the database or the network.

pub mod enrollment;
pub mod error;
pub mod naming;
pub mod types;
