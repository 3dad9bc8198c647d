//! Chat bot adapters.
//!
//! These turn bot host events into rolls and rolls into the host's response
//! payloads. Connecting to the hosts and delivering the payloads is left to
//! the embedding bot runtime. Bot rolls are not rate limited.

pub mod discord;
pub mod telegram;
