//! Flood Relay Engine
//!
//! This crate layers a flooding relay on top of the LoRa6100 driver. Every
//! packet heard on the air with hop budget left is rebroadcast once with its
//! TTL decremented, after a random jitter delay that desynchronizes the
//! retransmissions of neighboring nodes that heard the same flood.
//!
//! The transceiver is a shared half-duplex transport, so all transmissions
//! are serialized through a single paced sender: exactly one thread reads the
//! port and exactly one thread writes it, and consecutive writes are spaced
//! by a fixed settle interval.
//!
//! This is deliberately not a mesh routing protocol: there is no addressing,
//! no duplicate suppression, and no loop prevention beyond the TTL decrement.
//! Delivery and ordering are best-effort.

mod engine;
mod error;

pub use engine::*;
pub use error::*;
