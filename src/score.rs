//! Security score computation.
//!
//! DMARC carries the most weight since it is the only protocol that tells
//! receivers what to do with failing mail.

use crate::models::Status;

const DMARC_WEIGHT: u8 = 40;
const SPF_WEIGHT: u8 = 30;
const DKIM_WEIGHT: u8 = 30;

fn contribution(status: Status, weight: u8) -> u8 {
    match status {
        Status::Ok => weight,
        Status::Warning => weight / 2,
        Status::Error => 0,
    }
}

/// Maps the three protocol statuses to a score in `0..=100`.
pub fn security_score(dmarc: Status, spf: Status, dkim: Status) -> u8 {
    contribution(dmarc, DMARC_WEIGHT) + contribution(spf, SPF_WEIGHT) + contribution(dkim, DKIM_WEIGHT)
}
