//! Walking the delegation hierarchy.
//!
//! A walk resolves a single name and record type by starting at the root
//! servers and following referrals until some server answers with records
//! of the requested type. Along the way it follows CNAME aliases, starting
//! over at the root for each new name, and finds the addresses of
//! nameservers that were referred to without glue by walking for those
//! names in turn.
//!
//! The walk is driven by a [`Walker`]. It owns the transport used to send
//! queries and the configuration, and can be cheaply cloned so that
//! several walks can run concurrently.

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use domain::base::{Name, Rtype};
use futures_util::future::BoxFuture;
use tracing::debug;

use crate::conf::WalkConf;
use crate::error::Error;
use crate::nameserver;
use crate::response::{RecordSet, Response};
use crate::transport::Transport;

//------------ Walker --------------------------------------------------------

/// Resolves names by walking down from the root.
pub struct Walker<T> {
    /// Reference to the shared parts.
    inner: Arc<InnerWalker<T>>,
}

/// The parts shared between all clones of a walker.
struct InnerWalker<T> {
    /// The transport for sending queries.
    transport: T,

    /// The walk configuration.
    conf: WalkConf,
}

impl<T> Walker<T> {
    /// Creates a new walker from a transport and a configuration.
    pub fn new(transport: T, conf: WalkConf) -> Self {
        Walker {
            inner: Arc::new(InnerWalker { transport, conf }),
        }
    }

    /// Returns the configuration.
    pub fn conf(&self) -> &WalkConf {
        &self.inner.conf
    }

    /// Returns the transport.
    pub fn transport(&self) -> &T {
        &self.inner.transport
    }
}

impl<T> Walker<T>
where
    T: Transport + Send + Sync + 'static,
{
    /// Resolves `qname` for records of type `qtype`.
    ///
    /// Returns the first record set of the requested type found in the
    /// answer section of some server’s response. That record set may be
    /// owned by a different name if aliases were followed.
    pub async fn resolve(
        &self,
        qname: &Name<Vec<u8>>,
        qtype: Rtype,
    ) -> Result<RecordSet, Error> {
        self.walk(qname.clone(), qtype, 0).await
    }

    /// Starts a walk at the given nesting depth.
    ///
    /// Walks for the addresses of nameservers run one level deeper than
    /// the walk that needs them. The future is boxed since it may contain
    /// itself.
    pub(crate) fn walk(
        &self,
        qname: Name<Vec<u8>>,
        qtype: Rtype,
        depth: usize,
    ) -> BoxFuture<'_, Result<RecordSet, Error>> {
        Box::pin(self.walk_impl(qname, qtype, depth))
    }

    async fn walk_impl(
        &self,
        mut qname: Name<Vec<u8>>,
        qtype: Rtype,
        depth: usize,
    ) -> Result<RecordSet, Error> {
        let conf = self.conf();
        if depth > conf.max_ns_depth() {
            return Err(Error::DelegationTooDeep);
        }

        let mut servers = conf.root_hints().to_vec();
        let mut aliases = 0;
        loop {
            let response = self.probe(&qname, qtype, &servers).await?;
            match Step::classify(response, qtype) {
                Step::Answer(answer) => {
                    debug!(%qname, %qtype, depth, "answer found");
                    return Ok(answer);
                }
                Step::Alias(target) => {
                    aliases += 1;
                    if aliases > conf.max_alias_chain() {
                        return Err(Error::AliasChainTooLong);
                    }
                    debug!(%qname, %target, aliases, "following alias");
                    qname = target;
                    servers = conf.root_hints().to_vec();
                }
                Step::Referral(glue) => {
                    debug!(%qname, servers = ?glue, "following referral");
                    servers = glue;
                }
                Step::Delegation(names) => {
                    debug!(
                        %qname, nameservers = names.len(), depth,
                        "resolving nameservers without glue"
                    );
                    let mut addrs = nameserver::resolve_names(
                        self,
                        &names,
                        Rtype::A,
                        depth,
                    )
                    .await;
                    addrs.extend(
                        nameserver::resolve_names(
                            self,
                            &names,
                            Rtype::AAAA,
                            depth,
                        )
                        .await,
                    );
                    if addrs.is_empty() {
                        return Err(Error::NoUsableAnswerOrDelegation);
                    }
                    servers = addrs;
                }
                Step::DeadEnd => {
                    return Err(Error::NoUsableAnswerOrDelegation);
                }
            }
        }
    }

    /// Queries the servers in order until one of them answers.
    ///
    /// A server that fails is not tried again.
    async fn probe(
        &self,
        qname: &Name<Vec<u8>>,
        qtype: Rtype,
        servers: &[IpAddr],
    ) -> Result<Response, Error> {
        let conf = self.conf();
        let mut last = None;
        for &server in servers {
            let addr = SocketAddr::new(server, conf.port());
            match self
                .transport()
                .send_query(qname, qtype, addr, conf.timeout())
                .await
            {
                Ok(response) => return Ok(response),
                Err(source) => {
                    let err = Error::TransportFailure { server, source };
                    debug!("{err}");
                    last = Some(Box::new(err));
                }
            }
        }
        Err(Error::NoResponse(last))
    }
}

impl<T> Clone for Walker<T> {
    fn clone(&self) -> Self {
        Walker {
            inner: self.inner.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Walker<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Walker")
            .field("transport", &self.inner.transport)
            .field("conf", &self.inner.conf)
            .finish()
    }
}

//------------ Step ----------------------------------------------------------

/// What a response tells a walk to do next.
#[derive(Clone, Debug, Eq, PartialEq)]
enum Step {
    /// We are done.
    Answer(RecordSet),

    /// Start over at the root for a new name.
    Alias(Name<Vec<u8>>),

    /// Descend to the servers whose addresses we already know.
    Referral(Vec<IpAddr>),

    /// Descend to the servers whose addresses we need to look up first.
    Delegation(Vec<Name<Vec<u8>>>),

    /// Nowhere left to go.
    DeadEnd,
}

impl Step {
    /// Classifies a response.
    ///
    /// An answer of the requested type beats an alias, an alias beats
    /// glue, and glue beats nameserver names.
    fn classify(mut response: Response, qtype: Rtype) -> Self {
        if let Some(answer) = response.take_answer(qtype) {
            return Step::Answer(answer);
        }
        if let Some(target) = response.alias_target() {
            return Step::Alias(target.clone());
        }
        let glue = response.glue();
        if !glue.is_empty() {
            return Step::Referral(glue);
        }
        let names = response.nameservers();
        if !names.is_empty() {
            return Step::Delegation(names);
        }
        Step::DeadEnd
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::response::RecordData;
    use domain::base::Ttl;
    use std::net::Ipv4Addr;

    fn name(s: &str) -> Name<Vec<u8>> {
        Name::vec_from_str(s).unwrap()
    }

    fn set(owner: &str, rtype: Rtype, data: Vec<RecordData>) -> RecordSet {
        RecordSet::from_parts(name(owner), rtype, Ttl::from_secs(300), data)
    }

    fn a(addr: [u8; 4]) -> RecordData {
        RecordData::A(Ipv4Addr::from(addr))
    }

    #[test]
    fn answer_beats_alias() {
        let answer = set("example.com.", Rtype::A, vec![a([192, 0, 2, 1])]);
        let response = Response::new()
            .with_answer(set(
                "www.example.com.",
                Rtype::CNAME,
                vec![RecordData::Cname(name("example.com."))],
            ))
            .with_answer(answer.clone());
        assert_eq!(Step::classify(response, Rtype::A), Step::Answer(answer));
    }

    #[test]
    fn first_matching_answer_wins() {
        let first = set("example.com.", Rtype::A, vec![a([192, 0, 2, 1])]);
        let response = Response::new()
            .with_answer(first.clone())
            .with_answer(set("example.com.", Rtype::A, vec![a([192, 0, 2, 2])]));
        assert_eq!(Step::classify(response, Rtype::A), Step::Answer(first));
    }

    #[test]
    fn alias_without_answer() {
        let response = Response::new().with_answer(set(
            "www.example.com.",
            Rtype::CNAME,
            vec![RecordData::Cname(name("example.net."))],
        ));
        assert_eq!(
            Step::classify(response, Rtype::AAAA),
            Step::Alias(name("example.net."))
        );
    }

    #[test]
    fn glue_beats_nameservers() {
        let response = Response::new()
            .with_authority(set(
                "com.",
                Rtype::NS,
                vec![RecordData::Ns(name("a.gtld-servers.net."))],
            ))
            .with_additional(set(
                "a.gtld-servers.net.",
                Rtype::A,
                vec![a([192, 5, 6, 30])],
            ));
        assert_eq!(
            Step::classify(response, Rtype::A),
            Step::Referral(vec![IpAddr::from([192, 5, 6, 30])])
        );
    }

    #[test]
    fn nameservers_without_glue() {
        let response = Response::new().with_authority(set(
            "example.com.",
            Rtype::NS,
            vec![
                RecordData::Ns(name("ns1.example.net.")),
                RecordData::Ns(name("ns2.example.net.")),
            ],
        ));
        assert_eq!(
            Step::classify(response, Rtype::A),
            Step::Delegation(vec![
                name("ns1.example.net."),
                name("ns2.example.net.")
            ])
        );
    }

    #[test]
    fn empty_response_is_dead_end() {
        let response = Response::new().with_authority(set(
            "com.",
            Rtype::SOA,
            vec![RecordData::Other],
        ));
        assert_eq!(Step::classify(response, Rtype::A), Step::DeadEnd);
    }
}
