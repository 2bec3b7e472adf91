//! Inbound adapters that translate external requests into domain port calls,
//! keeping framework details at the edge.

pub mod http;
