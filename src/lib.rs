//! Iterative DNS resolution.
//!
//! This crate resolves domain names the hard way: instead of asking a
//! recursive resolver, it starts at the root servers and follows the
//! delegations down to a server that is authoritative for the name,
//! exactly like a recursive resolver would.
//!
//! The central type is the [`Walker`]. It is created from a
//! [`Transport`] used to send queries, normally a [`UdpTransport`], and a
//! [`WalkConf`]:
//!
//! ```no_run
//! use domain::base::{Name, Rtype};
//! use domain_walk::{UdpTransport, WalkConf, Walker};
//!
//! # async fn run() -> Result<(), domain_walk::Error> {
//! let walker = Walker::new(UdpTransport::new(), WalkConf::new());
//! let qname = Name::vec_from_str("example.com").unwrap();
//! let answer = walker.resolve(&qname, Rtype::A).await?;
//! for addr in answer.addrs() {
//!     println!("{} has address {}", answer.owner(), addr);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! A walk proceeds as follows. The query is sent to the servers of the
//! current server set one after another until one of them responds at
//! all. That response is then looked at:
//!
//! * If its answer section contains records of the requested type, the
//!   walk is done.
//! * If it contains a CNAME instead, the walk starts over at the root for
//!   the alias target. At most [`WalkConf::max_alias_chain`] aliases are
//!   followed.
//! * If the additional section contains addresses, they become the next
//!   server set.
//! * If the authority section names nameservers, their addresses are
//!   found by walks of their own (see [`nameserver`]) and become the next
//!   server set.
//!
//! Anything else ends the walk with an [`Error`].
//!
//! The [`race()`] function finally runs walks for A and AAAA records
//! concurrently and reports whichever succeeds first.
//!
//! There is no caching whatsoever: every walk starts from scratch.

#![warn(rust_2018_idioms)]

pub mod conf;
pub mod error;
pub mod logging;
pub mod nameserver;
pub mod race;
pub mod response;
pub mod root;
pub mod transport;
pub mod walk;

pub use self::conf::WalkConf;
pub use self::error::{Error, TransportError};
pub use self::race::{race, race_types, RaceOutcome};
pub use self::response::{RecordData, RecordSet, Response};
pub use self::root::ROOT_HINTS;
pub use self::transport::{Transport, UdpTransport};
pub use self::walk::Walker;
