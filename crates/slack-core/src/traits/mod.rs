//! Collaborator traits (ports)

mod ports;

pub use ports::{CacheStore, SlackApi};
