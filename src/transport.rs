//! Sending queries.
//!
//! A walk talks to servers through the [`Transport`] trait: one query to
//! one server, answered by either a [`Response`] or a [`TransportError`].
//! [`UdpTransport`] is the implementation for the real network.

use std::boxed::Box;
use std::future::Future;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use domain::base::{Message, MessageBuilder, Name, Rtype};
use tokio::net::UdpSocket;
use tokio::time::{timeout_at, Duration, Instant};
use tracing::{trace, warn};

use crate::error::TransportError;
use crate::response::Response;

/// Size of the receive buffer.
///
/// We don’t send EDNS, so servers shouldn’t send more than 512 octets.
/// Some do anyway.
const RECV_SIZE: usize = 4096;

//------------ Transport -----------------------------------------------------

/// Sends a single query to a single server.
pub trait Transport {
    /// Asks `server` for the records of type `qtype` at `qname`.
    ///
    /// The query must not ask for recursion. If no reply arrives within
    /// `timeout`, the query fails.
    fn send_query<'a>(
        &'a self,
        qname: &'a Name<Vec<u8>>,
        qtype: Rtype,
        server: SocketAddr,
        timeout: Duration,
    ) -> Pin<
        Box<dyn Future<Output = Result<Response, TransportError>> + Send + 'a>,
    >;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send_query<'a>(
        &'a self,
        qname: &'a Name<Vec<u8>>,
        qtype: Rtype,
        server: SocketAddr,
        timeout: Duration,
    ) -> Pin<
        Box<dyn Future<Output = Result<Response, TransportError>> + Send + 'a>,
    > {
        (**self).send_query(qname, qtype, server, timeout)
    }
}

//------------ UdpTransport --------------------------------------------------

/// A transport sending each query from a fresh UDP socket.
#[derive(Clone, Debug, Default)]
pub struct UdpTransport(());

impl UdpTransport {
    /// Creates a new UDP transport.
    pub fn new() -> Self {
        Default::default()
    }

    async fn query_impl(
        &self,
        qname: &Name<Vec<u8>>,
        qtype: Rtype,
        server: SocketAddr,
        timeout: Duration,
    ) -> Result<Response, TransportError> {
        let mut msg = MessageBuilder::new_vec();
        msg.header_mut().set_rd(false);
        msg.header_mut().set_random_id();
        let id = msg.header().id();
        let mut msg = msg.question();
        msg.push((qname.clone(), qtype))
            .map_err(|_| TransportError::Build)?;
        let dgram = msg.finish();

        let local: SocketAddr = if server.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };
        let sock = UdpSocket::bind(local)
            .await
            .map_err(|e| TransportError::Bind(Arc::new(e)))?;
        sock.connect(server)
            .await
            .map_err(|e| TransportError::Send(Arc::new(e)))?;

        trace!(%qname, %qtype, %server, "sending query");
        let sent = sock
            .send(&dgram)
            .await
            .map_err(|e| TransportError::Send(Arc::new(e)))?;
        if sent != dgram.len() {
            return Err(TransportError::ShortSend);
        }

        let deadline = Instant::now() + timeout;
        loop {
            let mut buf = vec![0; RECV_SIZE];
            let len = timeout_at(deadline, sock.recv(&mut buf))
                .await
                .map_err(|_| TransportError::Timeout)?
                .map_err(|e| TransportError::Receive(Arc::new(e)))?;
            buf.truncate(len);

            // Garbage and stray replies are skipped. The deadline still
            // applies to the next attempt.
            let answer = match Message::from_octets(Bytes::from(buf)) {
                Ok(answer) => answer,
                Err(_) => {
                    warn!(%server, "dropping short datagram");
                    continue;
                }
            };
            if !answer.header().qr() || answer.header().id() != id {
                trace!(%server, "dropping reply with wrong id");
                continue;
            }
            return Response::from_message(&answer)
                .map_err(|_| TransportError::Parse);
        }
    }
}

impl Transport for UdpTransport {
    fn send_query<'a>(
        &'a self,
        qname: &'a Name<Vec<u8>>,
        qtype: Rtype,
        server: SocketAddr,
        timeout: Duration,
    ) -> Pin<
        Box<dyn Future<Output = Result<Response, TransportError>> + Send + 'a>,
    > {
        Box::pin(self.query_impl(qname, qtype, server, timeout))
    }
}

//============ Testing =======================================================
