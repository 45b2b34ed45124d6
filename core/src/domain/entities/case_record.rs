//! Blotter case snapshot used by the notification subsystem.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Lifecycle status of a blotter case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseStatus {
    Pending,
    UnderInvestigation,
    ForHearing,
    Resolved,
    Closed,
    Dismissed,
}

impl CaseStatus {
    /// Database/display representation
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStatus::Pending => "Pending",
            CaseStatus::UnderInvestigation => "Under Investigation",
            CaseStatus::ForHearing => "For Hearing",
            CaseStatus::Resolved => "Resolved",
            CaseStatus::Closed => "Closed",
            CaseStatus::Dismissed => "Dismissed",
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(CaseStatus::Pending),
            "Under Investigation" => Ok(CaseStatus::UnderInvestigation),
            "For Hearing" => Ok(CaseStatus::ForHearing),
            "Resolved" => Ok(CaseStatus::Resolved),
            "Closed" => Ok(CaseStatus::Closed),
            "Dismissed" => Ok(CaseStatus::Dismissed),
            other => Err(format!("unknown case status: {}", other)),
        }
    }
}

/// Point-in-time snapshot of a blotter case.
///
/// Always read fresh from the case repository at resolve time, never cached,
/// so a just-changed officer assignment is reflected immediately in the next
/// fan-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRecord {
    /// Case row id
    pub id: i64,

    /// Human-facing case number (e.g. "BLT-2025-0042")
    pub case_number: String,

    /// Person who filed the report
    pub complainant_id: Uuid,

    /// Person the report was filed against, if identified
    pub respondent_id: Option<Uuid>,

    /// Assigned investigating officers. Assignment is capped at two,
    /// enforced upstream of this subsystem.
    pub assigned_officer_ids: Vec<Uuid>,

    /// Current lifecycle status
    pub status: CaseStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            CaseStatus::Pending,
            CaseStatus::UnderInvestigation,
            CaseStatus::ForHearing,
            CaseStatus::Resolved,
            CaseStatus::Closed,
            CaseStatus::Dismissed,
        ] {
            assert_eq!(status.as_str().parse::<CaseStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_status_parse_rejects_unknown() {
        assert!("Archived".parse::<CaseStatus>().is_err());
    }
}
