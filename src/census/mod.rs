//! Census Reporter API access.
//!
//! [`CensusApi`] is the seam every parser queries through; the production
//! implementation is [`HttpCensusClient`]. Tests substitute an in-memory
//! fake.

mod client;

pub use client::{parse_count, CensusApi, HttpCensusClient, Place, TableData, TableRow};
