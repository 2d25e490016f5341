//! Responses as seen by a walk.
//!
//! A walk only ever looks at whole record sets: all the records of one
//! section that share owner and type. A [`Response`] is therefore a
//! reduced view of a DNS message with its three record sections grouped
//! into [`RecordSet`]s and the record data of the few types the walk
//! understands decoded into [`RecordData`].

use std::cmp;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use bytes::Bytes;
use domain::base::message::RecordSection;
use domain::base::wire::ParseError;
use domain::base::{Message, Name, Rtype, ToName, Ttl};
use domain::rdata::{Aaaa, Cname, Ns, A};

//------------ RecordData ----------------------------------------------------

/// The data of a single record.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RecordData {
    /// An IPv4 host address.
    A(Ipv4Addr),

    /// An IPv6 host address.
    Aaaa(Ipv6Addr),

    /// The name of an authoritative name server.
    Ns(Name<Vec<u8>>),

    /// The canonical name for an alias.
    Cname(Name<Vec<u8>>),

    /// Data of a type the walk doesn’t look into.
    Other,
}

impl RecordData {
    /// Returns the address if this is address data.
    pub fn addr(&self) -> Option<IpAddr> {
        match self {
            RecordData::A(addr) => Some((*addr).into()),
            RecordData::Aaaa(addr) => Some((*addr).into()),
            _ => None,
        }
    }

    /// Returns the target name if this is NS or CNAME data.
    pub fn target(&self) -> Option<&Name<Vec<u8>>> {
        match self {
            RecordData::Ns(name) | RecordData::Cname(name) => Some(name),
            _ => None,
        }
    }
}

impl From<Ipv4Addr> for RecordData {
    fn from(addr: Ipv4Addr) -> Self {
        RecordData::A(addr)
    }
}

impl From<Ipv6Addr> for RecordData {
    fn from(addr: Ipv6Addr) -> Self {
        RecordData::Aaaa(addr)
    }
}

//------------ RecordSet -----------------------------------------------------

/// All records of a section with the same owner and type.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordSet {
    owner: Name<Vec<u8>>,
    rtype: Rtype,
    ttl: Ttl,
    data: Vec<RecordData>,
}

impl RecordSet {
    /// Creates a new, empty record set.
    pub fn new(owner: Name<Vec<u8>>, rtype: Rtype, ttl: Ttl) -> Self {
        RecordSet {
            owner,
            rtype,
            ttl,
            data: Vec::new(),
        }
    }

    /// Creates a record set from its parts.
    pub fn from_parts(
        owner: Name<Vec<u8>>,
        rtype: Rtype,
        ttl: Ttl,
        data: Vec<RecordData>,
    ) -> Self {
        RecordSet {
            owner,
            rtype,
            ttl,
            data,
        }
    }

    /// Adds the data of another record.
    ///
    /// The TTL of the set becomes the smaller of the two.
    pub fn push(&mut self, ttl: Ttl, data: RecordData) {
        self.ttl = cmp::min(self.ttl, ttl);
        self.data.push(data)
    }

    pub fn owner(&self) -> &Name<Vec<u8>> {
        &self.owner
    }

    pub fn rtype(&self) -> Rtype {
        self.rtype
    }

    pub fn ttl(&self) -> Ttl {
        self.ttl
    }

    pub fn data(&self) -> &[RecordData] {
        &self.data
    }

    /// Returns an iterator over the addresses in the set.
    pub fn addrs(&self) -> impl Iterator<Item = IpAddr> + '_ {
        self.data.iter().filter_map(RecordData::addr)
    }

    /// Returns an iterator over the NS or CNAME targets in the set.
    pub fn targets(&self) -> impl Iterator<Item = &Name<Vec<u8>>> + '_ {
        self.data.iter().filter_map(RecordData::target)
    }

    /// Returns whether the set holds host addresses.
    pub fn is_address(&self) -> bool {
        self.rtype == Rtype::A || self.rtype == Rtype::AAAA
    }
}

//------------ Response ------------------------------------------------------

/// The record sections of a response.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Response {
    answer: Vec<RecordSet>,
    authority: Vec<RecordSet>,
    additional: Vec<RecordSet>,
}

impl Response {
    /// Creates a new response without any records.
    pub fn new() -> Self {
        Default::default()
    }

    /// Creates a response from a parsed message.
    ///
    /// Records are grouped into sets per section in the order in which a
    /// set’s first record appears. OPT records are dropped.
    pub fn from_message(msg: &Message<Bytes>) -> Result<Self, ParseError> {
        Ok(Response {
            answer: collect_sets(msg.answer()?)?,
            authority: collect_sets(msg.authority()?)?,
            additional: collect_sets(msg.additional()?)?,
        })
    }

    /// Adds a record set to the answer section.
    pub fn with_answer(mut self, set: RecordSet) -> Self {
        self.answer.push(set);
        self
    }

    /// Adds a record set to the authority section.
    pub fn with_authority(mut self, set: RecordSet) -> Self {
        self.authority.push(set);
        self
    }

    /// Adds a record set to the additional section.
    pub fn with_additional(mut self, set: RecordSet) -> Self {
        self.additional.push(set);
        self
    }

    pub fn answer(&self) -> &[RecordSet] {
        &self.answer
    }

    pub fn authority(&self) -> &[RecordSet] {
        &self.authority
    }

    pub fn additional(&self) -> &[RecordSet] {
        &self.additional
    }

    /// Takes the first answer set of the given type out of the response.
    pub fn take_answer(&mut self, rtype: Rtype) -> Option<RecordSet> {
        let idx = self.answer.iter().position(|set| set.rtype == rtype)?;
        Some(self.answer.swap_remove(idx))
    }

    /// Returns the alias target from the answer section.
    ///
    /// If there is more than one CNAME set, the last one wins. Of its
    /// records only the first is used.
    pub fn alias_target(&self) -> Option<&Name<Vec<u8>>> {
        self.answer
            .iter()
            .filter(|set| set.rtype == Rtype::CNAME)
            .last()
            .and_then(|set| set.targets().next())
    }

    /// Returns all addresses from the additional section.
    ///
    /// Address records of both families are included regardless of their
    /// owner.
    pub fn glue(&self) -> Vec<IpAddr> {
        self.additional
            .iter()
            .filter(|set| set.is_address())
            .flat_map(RecordSet::addrs)
            .collect()
    }

    /// Returns the names of all name servers in the authority section.
    pub fn nameservers(&self) -> Vec<Name<Vec<u8>>> {
        self.authority
            .iter()
            .filter(|set| set.rtype == Rtype::NS)
            .flat_map(RecordSet::targets)
            .cloned()
            .collect()
    }
}

//------------ Helper Functions ----------------------------------------------

/// Groups the records of a section into record sets.
fn collect_sets(
    section: RecordSection<'_, Bytes>,
) -> Result<Vec<RecordSet>, ParseError> {
    let mut sets: Vec<RecordSet> = Vec::new();
    for record in section {
        let record = record?;
        let rtype = record.rtype();
        if rtype == Rtype::OPT {
            continue;
        }
        let data = if rtype == Rtype::A {
            record
                .to_record::<A>()?
                .map(|record| RecordData::A(record.data().addr()))
        } else if rtype == Rtype::AAAA {
            record
                .to_record::<Aaaa>()?
                .map(|record| RecordData::Aaaa(record.data().addr()))
        } else if rtype == Rtype::NS {
            record
                .to_record::<Ns<_>>()?
                .map(|record| RecordData::Ns(record.data().nsdname().to_vec()))
        } else if rtype == Rtype::CNAME {
            record
                .to_record::<Cname<_>>()?
                .map(|record| RecordData::Cname(record.data().cname().to_vec()))
        } else {
            None
        };
        let data = data.unwrap_or(RecordData::Other);
        let owner = record.owner().to_vec();
        let ttl = record.ttl();

        match sets
            .iter_mut()
            .find(|set| set.rtype == rtype && set.owner == owner)
        {
            Some(set) => set.push(ttl, data),
            None => sets.push(RecordSet::from_parts(
                owner,
                rtype,
                ttl,
                vec![data],
            )),
        }
    }
    Ok(sets)
}

//============ Testing =======================================================
