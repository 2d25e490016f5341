//! Racing walks for several record types.
//!
//! To find out quickly whether a name has any address at all, a walk for
//! A records and a walk for AAAA records are started side by side. The
//! first to succeed decides the outcome. Only if all of them fail is the
//! race lost.

use std::time::Duration;

use domain::base::{Name, Rtype};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::debug;

use crate::error::Error;
use crate::response::RecordSet;
use crate::transport::Transport;
use crate::walk::Walker;

//------------ RaceOutcome ---------------------------------------------------

/// The walk that won a race.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RaceOutcome {
    /// The record type the winner walked for.
    pub rtype: Rtype,

    /// The record set the winner found.
    pub answer: RecordSet,

    /// How long the winner took, measured from its own start.
    pub elapsed: Duration,
}

//------------ race ----------------------------------------------------------

/// Races a walk for A records against one for AAAA records.
pub async fn race<T>(
    walker: &Walker<T>,
    qname: &Name<Vec<u8>>,
) -> Result<RaceOutcome, Error>
where
    T: Transport + Send + Sync + 'static,
{
    race_types(walker, qname, [Rtype::A, Rtype::AAAA]).await
}

/// Races walks for the given record types.
///
/// Each walk runs in its own task. The first successful walk is returned;
/// the others are left to run to completion and their results are
/// dropped. If every walk fails, the errors are returned in the order the
/// walks finished in.
pub async fn race_types<T>(
    walker: &Walker<T>,
    qname: &Name<Vec<u8>>,
    qtypes: impl IntoIterator<Item = Rtype>,
) -> Result<RaceOutcome, Error>
where
    T: Transport + Send + Sync + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel();
    for qtype in qtypes {
        let walker = walker.clone();
        let qname = qname.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let start = Instant::now();
            let res = walker.resolve(&qname, qtype).await;
            let res = res.map(|answer| RaceOutcome {
                rtype: qtype,
                answer,
                elapsed: start.elapsed(),
            });
            // Once there is a winner, nobody is listening anymore.
            let _ = tx.send((qtype, res));
        });
    }
    drop(tx);

    let mut errors = Vec::new();
    while let Some((qtype, res)) = rx.recv().await {
        match res {
            Ok(outcome) => {
                debug!(%qname, %qtype, elapsed = ?outcome.elapsed, "won race");
                return Ok(outcome);
            }
            Err(err) => {
                debug!(%qname, %qtype, "lost race: {err}");
                errors.push((qtype, err));
            }
        }
    }
    Err(Error::RaceFailure(errors))
}
