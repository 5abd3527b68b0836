//! Build an iTunes-compatible podcast RSS feed from a JSON episode list.
//!
//! A run is a straight line: resolve the channel metadata ([`channel`]),
//! map the episodes onto feed items ([`feed::build`]), then write the XML
//! document ([`feed::write_to_file`]). Every failure is returned as an error
//! and ends the run.

pub mod channel;
pub mod config;
pub mod feed;
pub mod util;
