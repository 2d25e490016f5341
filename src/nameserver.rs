//! Looking up the addresses of nameservers.
//!
//! When a referral names nameservers but doesn’t include their addresses,
//! the walk has to find those addresses itself. It does so by walking for
//! each nameserver name in turn.

use std::net::IpAddr;

use domain::base::{Name, Rtype};
use tracing::debug;

use crate::transport::Transport;
use crate::walk::Walker;

/// Resolves the addresses of nameservers.
///
/// Each name in `names` is resolved for records of type `qtype` by a walk
/// one level deeper than `depth`. The addresses of all successful walks
/// are returned in the order of `names`. Failed walks are skipped, so the
/// result may well be empty.
pub async fn resolve_names<T>(
    walker: &Walker<T>,
    names: &[Name<Vec<u8>>],
    qtype: Rtype,
    depth: usize,
) -> Vec<IpAddr>
where
    T: Transport + Send + Sync + 'static,
{
    let mut addrs = Vec::new();
    for name in names {
        match walker.walk(name.clone(), qtype, depth + 1).await {
            Ok(answer) => addrs.extend(answer.addrs()),
            Err(err) => {
                debug!(%name, %qtype, "skipping nameserver: {err}");
            }
        }
    }
    addrs
}
