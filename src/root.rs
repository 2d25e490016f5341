//! The root hints.
//!
//! The addresses of the thirteen root name servers as published by IANA at
//! <https://www.iana.org/domains/root/servers>. Every walk starts here.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

//------------ ROOT_HINTS ----------------------------------------------------

/// The addresses of the root servers, IPv4 first, then IPv6.
///
/// Within each family the servers are listed in letter order, `a` through
/// `m`.
pub const ROOT_HINTS: [IpAddr; 26] = [
    IpAddr::V4(Ipv4Addr::new(198, 41, 0, 4)),     // a
    IpAddr::V4(Ipv4Addr::new(199, 9, 14, 201)),   // b
    IpAddr::V4(Ipv4Addr::new(192, 33, 4, 12)),    // c
    IpAddr::V4(Ipv4Addr::new(199, 7, 91, 13)),    // d
    IpAddr::V4(Ipv4Addr::new(192, 203, 230, 10)), // e
    IpAddr::V4(Ipv4Addr::new(192, 5, 5, 241)),    // f
    IpAddr::V4(Ipv4Addr::new(192, 112, 36, 4)),   // g
    IpAddr::V4(Ipv4Addr::new(198, 97, 190, 53)),  // h
    IpAddr::V4(Ipv4Addr::new(192, 36, 148, 17)),  // i
    IpAddr::V4(Ipv4Addr::new(192, 58, 128, 30)),  // j
    IpAddr::V4(Ipv4Addr::new(193, 0, 14, 129)),   // k
    IpAddr::V4(Ipv4Addr::new(199, 7, 83, 42)),    // l
    IpAddr::V4(Ipv4Addr::new(202, 12, 27, 33)),   // m
    IpAddr::V6(Ipv6Addr::new(0x2001, 0x503, 0xba3e, 0, 0, 0, 2, 0x30)),
    IpAddr::V6(Ipv6Addr::new(0x2001, 0x500, 0x200, 0, 0, 0, 0, 0xb)),
    IpAddr::V6(Ipv6Addr::new(0x2001, 0x500, 0x2, 0, 0, 0, 0, 0xc)),
    IpAddr::V6(Ipv6Addr::new(0x2001, 0x500, 0x2d, 0, 0, 0, 0, 0xd)),
    IpAddr::V6(Ipv6Addr::new(0x2001, 0x500, 0xa8, 0, 0, 0, 0, 0xe)),
    IpAddr::V6(Ipv6Addr::new(0x2001, 0x500, 0x2f, 0, 0, 0, 0, 0xf)),
    IpAddr::V6(Ipv6Addr::new(0x2001, 0x500, 0x12, 0, 0, 0, 0, 0xd0d)),
    IpAddr::V6(Ipv6Addr::new(0x2001, 0x500, 0x1, 0, 0, 0, 0, 0x53)),
    IpAddr::V6(Ipv6Addr::new(0x2001, 0x7fe, 0, 0, 0, 0, 0, 0x53)),
    IpAddr::V6(Ipv6Addr::new(0x2001, 0x503, 0xc27, 0, 0, 0, 2, 0x30)),
    IpAddr::V6(Ipv6Addr::new(0x2001, 0x7fd, 0, 0, 0, 0, 0, 0x1)),
    IpAddr::V6(Ipv6Addr::new(0x2001, 0x500, 0x9f, 0, 0, 0, 0, 0x42)),
    IpAddr::V6(Ipv6Addr::new(0x2001, 0xdc3, 0, 0, 0, 0, 0, 0x35)),
];

//============ Testing =======================================================
