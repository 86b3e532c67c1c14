//! Embedded word lists
//!
//! Word lists compiled into the binary at build time.

include!(concat!(env!("OUT_DIR"), "/duel_words.rs"));
