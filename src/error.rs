//! Error types.

use std::error;
use std::fmt;
use std::io;
use std::net::IpAddr;
use std::sync::Arc;

use domain::base::Rtype;

//------------ TransportError ------------------------------------------------

/// Error type for a single query sent to a single server.
#[derive(Clone, Debug)]
pub enum TransportError {
    /// Binding a UDP socket gave an error.
    Bind(Arc<io::Error>),

    /// The query could not be composed.
    Build,

    /// Sending over a UDP socket gave an error.
    Send(Arc<io::Error>),

    /// Sending over a UDP socket gave a partial result.
    ShortSend,

    /// Receiving from a UDP socket gave an error.
    Receive(Arc<io::Error>),

    /// The reply could not be parsed as a DNS message.
    Parse,

    /// Timeout waiting for a reply.
    Timeout,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Bind(err) => {
                write!(f, "error binding UDP socket: {err}")
            }
            TransportError::Build => write!(f, "cannot compose query"),
            TransportError::Send(err) => {
                write!(f, "error sending to UDP socket: {err}")
            }
            TransportError::ShortSend => {
                write!(f, "partial send to UDP socket")
            }
            TransportError::Receive(err) => {
                write!(f, "error receiving from UDP socket: {err}")
            }
            TransportError::Parse => write!(f, "malformed reply"),
            TransportError::Timeout => {
                write!(f, "timeout waiting for response")
            }
        }
    }
}

impl error::Error for TransportError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            TransportError::Bind(e) => Some(e),
            TransportError::Build => None,
            TransportError::Send(e) => Some(e),
            TransportError::ShortSend => None,
            TransportError::Receive(e) => Some(e),
            TransportError::Parse => None,
            TransportError::Timeout => None,
        }
    }
}

//------------ Error ---------------------------------------------------------

/// A failed walk.
///
/// Only [`Error::TransportFailure`] is ever recovered from: the walk moves
/// on to the next server. Every other variant ends the walk it occurred
/// in.
#[derive(Clone, Debug)]
pub enum Error {
    /// A single server could not be queried.
    TransportFailure {
        /// The server that failed.
        server: IpAddr,

        /// What went wrong.
        source: TransportError,
    },

    /// None of the servers in the current server set answered.
    ///
    /// Carries the failure of the last server tried, if there was one.
    NoResponse(Option<Box<Error>>),

    /// Too many alias redirections.
    AliasChainTooLong,

    /// A server answered but offered neither an answer nor a delegation
    /// that could be followed.
    NoUsableAnswerOrDelegation,

    /// Nameserver address lookups nested too deeply.
    DelegationTooDeep,

    /// Both walks of a race failed.
    RaceFailure(Vec<(Rtype, Error)>),

    /// The name to resolve is not a valid domain name.
    InvalidName(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::TransportFailure { server, source } => {
                write!(f, "Query to {server} failed: {source}")
            }
            Error::NoResponse(None) => {
                write!(f, "No response from any server")
            }
            Error::NoResponse(Some(last)) => {
                write!(f, "No response from any server ({last})")
            }
            Error::AliasChainTooLong => write!(f, "CNAME chain too long"),
            Error::NoUsableAnswerOrDelegation => {
                write!(f, "No usable answer or delegation found")
            }
            Error::DelegationTooDeep => {
                write!(f, "Nameserver lookups nested too deeply")
            }
            Error::RaceFailure(errors) => {
                write!(f, "Lookup failed")?;
                for (rtype, err) in errors {
                    write!(f, "; {rtype}: {err}")?;
                }
                Ok(())
            }
            Error::InvalidName(name) => {
                write!(f, "Not a domain name: {name}")
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::TransportFailure { source, .. } => Some(source),
            Error::NoResponse(last) => {
                last.as_deref().map(|e| e as &(dyn error::Error + 'static))
            }
            _ => None,
        }
    }
}

//============ Testing =======================================================
