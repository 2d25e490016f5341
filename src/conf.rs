//! Walk configuration.
//!
//! A [`WalkConf`] collects the knobs that shape a walk: the per-query
//! timeout, how many aliases may be followed, how deeply nameserver
//! lookups may nest, and where a walk starts.

use std::cmp;
use std::net::IpAddr;
use std::time::Duration;

use crate::root::ROOT_HINTS;

//------------ Configuration Constants ---------------------------------------

/// Configuration limits for the per-query timeout.
const TIMEOUT: DefMinMax<Duration> = DefMinMax::new(
    Duration::from_secs(3),
    Duration::from_millis(1),
    Duration::from_secs(60),
);

/// Configuration limits for the length of an alias chain.
const MAX_ALIAS_CHAIN: DefMinMax<usize> = DefMinMax::new(10, 0, 100);

/// Configuration limits for the nesting of nameserver address lookups.
const MAX_NS_DEPTH: DefMinMax<usize> = DefMinMax::new(8, 0, 64);

/// The default port of the servers we talk to.
const DEF_PORT: u16 = 53;

//------------ WalkConf ------------------------------------------------------

/// Configuration for a walk.
#[derive(Clone, Debug)]
pub struct WalkConf {
    /// Maximum time to wait for a single server to answer.
    timeout: Duration,

    /// Maximum number of alias redirections a walk follows.
    max_alias_chain: usize,

    /// Maximum nesting depth of nameserver address lookups.
    max_ns_depth: usize,

    /// UDP port of all servers.
    port: u16,

    /// The server set every walk and every alias redirection starts with.
    root_hints: Vec<IpAddr>,
}

impl WalkConf {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Default::default()
    }

    /// Returns the per-query timeout.
    ///
    /// This bounds each individual query only. A walk across many
    /// delegations can take a multiple of it.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Sets the per-query timeout.
    ///
    /// If this value is too small or too large, it will be capped.
    pub fn set_timeout(&mut self, value: Duration) {
        self.timeout = TIMEOUT.limit(value)
    }

    /// Returns the maximum number of alias redirections.
    pub fn max_alias_chain(&self) -> usize {
        self.max_alias_chain
    }

    /// Sets the maximum number of alias redirections.
    ///
    /// If this value is too large, it will be capped.
    pub fn set_max_alias_chain(&mut self, value: usize) {
        self.max_alias_chain = MAX_ALIAS_CHAIN.limit(value)
    }

    /// Returns the maximum nesting depth of nameserver address lookups.
    ///
    /// A walk started to find the address of a nameserver runs one level
    /// deeper than the walk that needed it. The outermost walk has depth
    /// zero.
    pub fn max_ns_depth(&self) -> usize {
        self.max_ns_depth
    }

    /// Sets the maximum nesting depth of nameserver address lookups.
    ///
    /// If this value is too large, it will be capped.
    pub fn set_max_ns_depth(&mut self, value: usize) {
        self.max_ns_depth = MAX_NS_DEPTH.limit(value)
    }

    /// Returns the server port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Sets the server port.
    pub fn set_port(&mut self, value: u16) {
        self.port = value
    }

    /// Returns the root hints.
    pub fn root_hints(&self) -> &[IpAddr] {
        &self.root_hints
    }

    /// Replaces the root hints.
    pub fn set_root_hints(&mut self, value: impl Into<Vec<IpAddr>>) {
        self.root_hints = value.into()
    }
}

impl Default for WalkConf {
    fn default() -> Self {
        Self {
            timeout: TIMEOUT.default(),
            max_alias_chain: MAX_ALIAS_CHAIN.default(),
            max_ns_depth: MAX_NS_DEPTH.default(),
            port: DEF_PORT,
            root_hints: ROOT_HINTS.to_vec(),
        }
    }
}

//------------ DefMinMax -----------------------------------------------------

/// The default, minimum, and maximum values for a config variable.
#[derive(Clone, Copy)]
struct DefMinMax<T> {
    /// The default value.
    def: T,

    /// The minimum value.
    min: T,

    /// The maximum value.
    max: T,
}

impl<T> DefMinMax<T> {
    /// Creates a new value.
    const fn new(def: T, min: T, max: T) -> Self {
        Self { def, min, max }
    }

    /// Returns the default value.
    fn default(self) -> T {
        self.def
    }

    /// Trims the given value to fit into the minimum/maximum range.
    fn limit(self, value: T) -> T
    where
        T: Ord,
    {
        cmp::max(self.min, cmp::min(self.max, value))
    }
}

//============ Testing =======================================================
