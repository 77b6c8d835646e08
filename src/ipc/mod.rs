//! IPC listener that accepts placement commands over a Unix socket.
//!
//! Key-binding daemons, scripts and menus connect to the socket and send
//! newline-delimited JSON commands.

pub mod listener;
