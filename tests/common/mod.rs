//! A scripted transport for driving walks without a network.

#![allow(dead_code)]

use std::boxed::Box;
use std::collections::HashMap;
use std::future::Future;
use std::net::{IpAddr, SocketAddr};
use std::pin::Pin;
use std::sync::Mutex;
use std::time::Duration;

use domain::base::{Name, Rtype, Ttl};
use domain_walk::{
    RecordData, RecordSet, Response, Transport, TransportError, WalkConf,
};

//------------ MockTransport -------------------------------------------------

/// A transport answering from a script.
///
/// Replies are looked up by server, query name and type first, then by
/// server alone. A query with no scripted reply fails right away with a
/// timeout error, as if the server had never answered.
#[derive(Debug, Default)]
pub struct MockTransport {
    exact: HashMap<(IpAddr, Name<Vec<u8>>, Rtype), Reply>,
    fallback: HashMap<IpAddr, Reply>,
    log: Mutex<Vec<Query>>,
}

#[derive(Clone, Debug)]
struct Reply {
    response: Response,
    delay: Duration,
}

/// A query as it was seen by the transport.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Query {
    pub server: IpAddr,
    pub qname: Name<Vec<u8>>,
    pub qtype: Rtype,
}

impl MockTransport {
    pub fn new() -> Self {
        Default::default()
    }

    /// Scripts the response of `server` for the given question.
    pub fn on(
        mut self,
        server: IpAddr,
        qname: &str,
        qtype: Rtype,
        response: Response,
    ) -> Self {
        self.exact.insert(
            (server, name(qname), qtype),
            Reply {
                response,
                delay: Duration::ZERO,
            },
        );
        self
    }

    /// Scripts a response that only arrives after `delay`.
    pub fn on_delayed(
        mut self,
        server: IpAddr,
        qname: &str,
        qtype: Rtype,
        response: Response,
        delay: Duration,
    ) -> Self {
        self.exact
            .insert((server, name(qname), qtype), Reply { response, delay });
        self
    }

    /// Scripts the response of `server` to any other question.
    pub fn on_any(mut self, server: IpAddr, response: Response) -> Self {
        self.fallback.insert(
            server,
            Reply {
                response,
                delay: Duration::ZERO,
            },
        );
        self
    }

    /// Returns all queries sent so far.
    pub fn queries(&self) -> Vec<Query> {
        self.log.lock().unwrap().clone()
    }

    /// Returns the servers queried so far, in order.
    pub fn servers(&self) -> Vec<IpAddr> {
        self.queries().into_iter().map(|q| q.server).collect()
    }
}

impl Transport for MockTransport {
    fn send_query<'a>(
        &'a self,
        qname: &'a Name<Vec<u8>>,
        qtype: Rtype,
        server: SocketAddr,
        _timeout: Duration,
    ) -> Pin<
        Box<dyn Future<Output = Result<Response, TransportError>> + Send + 'a>,
    > {
        let server = server.ip();
        self.log.lock().unwrap().push(Query {
            server,
            qname: qname.clone(),
            qtype,
        });
        let reply = self
            .exact
            .get(&(server, qname.clone(), qtype))
            .or_else(|| self.fallback.get(&server))
            .cloned();
        Box::pin(async move {
            let reply = reply.ok_or(TransportError::Timeout)?;
            if !reply.delay.is_zero() {
                tokio::time::sleep(reply.delay).await;
            }
            Ok(reply.response)
        })
    }
}

//------------ Helper Functions ----------------------------------------------

pub const ROOT: IpAddr = IpAddr::V4(std::net::Ipv4Addr::new(198, 51, 100, 1));

pub fn name(s: &str) -> Name<Vec<u8>> {
    Name::vec_from_str(s).unwrap()
}

pub fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}

/// A configuration starting at [`ROOT`] only.
pub fn conf() -> WalkConf {
    let mut conf = WalkConf::new();
    conf.set_root_hints([ROOT]);
    conf
}

pub fn addr_set(owner: &str, addrs: &[&str]) -> RecordSet {
    let addrs: Vec<IpAddr> = addrs.iter().map(|s| ip(s)).collect();
    let rtype = if addrs.first().map_or(true, IpAddr::is_ipv4) {
        Rtype::A
    } else {
        Rtype::AAAA
    };
    let ttl = Ttl::from_secs(300);
    let mut set = RecordSet::new(name(owner), rtype, ttl);
    for addr in addrs {
        let data = match addr {
            IpAddr::V4(addr) => RecordData::from(addr),
            IpAddr::V6(addr) => RecordData::from(addr),
        };
        set.push(ttl, data);
    }
    set
}

pub fn ns_set(zone: &str, nameservers: &[&str]) -> RecordSet {
    RecordSet::from_parts(
        name(zone),
        Rtype::NS,
        Ttl::from_secs(172800),
        nameservers
            .iter()
            .map(|ns| RecordData::Ns(name(ns)))
            .collect(),
    )
}

pub fn cname_set(owner: &str, target: &str) -> RecordSet {
    RecordSet::from_parts(
        name(owner),
        Rtype::CNAME,
        Ttl::from_secs(300),
        vec![RecordData::Cname(name(target))],
    )
}

/// A response with just an answer.
pub fn answer(set: RecordSet) -> Response {
    Response::new().with_answer(set)
}

/// A referral to `zone` with glue for each of the nameservers.
pub fn referral(zone: &str, glue: &[(&str, &str)]) -> Response {
    let names: Vec<&str> = glue.iter().map(|(ns, _)| *ns).collect();
    let mut response = Response::new().with_authority(ns_set(zone, &names));
    for (ns, addr) in glue {
        response = response.with_additional(addr_set(ns, &[*addr]));
    }
    response
}

/// A referral to `zone` without any glue.
pub fn bare_referral(zone: &str, nameservers: &[&str]) -> Response {
    Response::new().with_authority(ns_set(zone, nameservers))
}
