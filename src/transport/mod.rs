//! Transport layer: the event channel to the chat server.
//!
//! Connect/reconnect mechanics and framing live in the websocket
//! adapter; everything above it talks through [`contracts::ClientSocket`]
//! and [`session::TransportSession`].

pub mod contracts;
pub mod session;
pub mod websocket;
