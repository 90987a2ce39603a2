//! Domain types shared by the URL assembler, the request decoder and the
//! web front end.

pub mod params;
pub mod query;
pub mod search;
pub mod types;
