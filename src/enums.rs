//! Closed domain enums of the CommonMessages catalog and their wire
//! mappings.
//!
//! Each enum travels as a fixed-width unsigned field whose width is a
//! property of the grammar site, not of the value. The mappings are
//! total in both directions: unknown wire values decode to a named
//! default instead of failing, because charging sessions must tolerate
//! forward-compatible peers that emit newer codes.

use core::fmt;

/// ResponseCode (6 bits on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseCode {
    #[default]
    Ok,
    OkCertificateExpiresSoon,
    OkNewSessionEstablished,
    OkOldSessionJoined,
    Failed,
}

impl ResponseCode {
    /// Wire width in bits.
    pub const WIDTH: u32 = 6;

    pub fn to_wire(self) -> u32 {
        match self {
            Self::Ok => 0,
            Self::OkCertificateExpiresSoon => 1,
            Self::OkNewSessionEstablished => 2,
            Self::OkOldSessionJoined => 3,
            Self::Failed => 32,
        }
    }

    /// Unknown codes map to [`ResponseCode::Ok`].
    pub fn from_wire(code: u32) -> Self {
        match code {
            0 => Self::Ok,
            1 => Self::OkCertificateExpiresSoon,
            2 => Self::OkNewSessionEstablished,
            3 => Self::OkOldSessionJoined,
            32 => Self::Failed,
            _ => Self::Ok,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::OkCertificateExpiresSoon => "OK_CertificateExpiresSoon",
            Self::OkNewSessionEstablished => "OK_NewSessionEstablished",
            Self::OkOldSessionJoined => "OK_OldSessionJoined",
            Self::Failed => "FAILED",
        }
    }
}

/// EVSEProcessing (2 bits on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvseProcessing {
    Finished,
    #[default]
    Ongoing,
    OngoingWaitingForCustomerInteraction,
}

impl EvseProcessing {
    pub const WIDTH: u32 = 2;

    pub fn to_wire(self) -> u32 {
        match self {
            Self::Finished => 0,
            Self::Ongoing => 1,
            Self::OngoingWaitingForCustomerInteraction => 2,
        }
    }

    /// Unknown codes map to [`EvseProcessing::Ongoing`].
    pub fn from_wire(code: u32) -> Self {
        match code {
            0 => Self::Finished,
            1 => Self::Ongoing,
            2 => Self::OngoingWaitingForCustomerInteraction,
            _ => Self::Ongoing,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Finished => "Finished",
            Self::Ongoing => "Ongoing",
            Self::OngoingWaitingForCustomerInteraction => {
                "Ongoing_WaitingForCustomerInteraction"
            }
        }
    }
}

/// EVProcessing (2 bits on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvProcessing {
    Finished,
    #[default]
    Ongoing,
}

impl EvProcessing {
    pub const WIDTH: u32 = 2;

    pub fn to_wire(self) -> u32 {
        match self {
            Self::Finished => 0,
            Self::Ongoing => 1,
        }
    }

    /// Unknown codes map to [`EvProcessing::Ongoing`].
    pub fn from_wire(code: u32) -> Self {
        match code {
            0 => Self::Finished,
            _ => Self::Ongoing,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Finished => "Finished",
            Self::Ongoing => "Ongoing",
        }
    }
}

/// ChargingSession (2 bits on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChargingSession {
    Pause,
    #[default]
    Terminate,
    ServiceRenegotiation,
}

impl ChargingSession {
    pub const WIDTH: u32 = 2;

    pub fn to_wire(self) -> u32 {
        match self {
            Self::Pause => 0,
            Self::Terminate => 1,
            Self::ServiceRenegotiation => 2,
        }
    }

    /// Unknown codes map to [`ChargingSession::Terminate`].
    pub fn from_wire(code: u32) -> Self {
        match code {
            0 => Self::Pause,
            1 => Self::Terminate,
            2 => Self::ServiceRenegotiation,
            _ => Self::Terminate,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pause => "Pause",
            Self::Terminate => "Terminate",
            Self::ServiceRenegotiation => "ServiceRenegotiation",
        }
    }
}

/// WPT AlignmentStatus (2 bits on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignmentStatus {
    Aligned,
    #[default]
    NotAligned,
    InProgress,
}

impl AlignmentStatus {
    pub const WIDTH: u32 = 2;

    pub fn to_wire(self) -> u32 {
        match self {
            Self::Aligned => 0,
            Self::NotAligned => 1,
            Self::InProgress => 2,
        }
    }

    /// Unknown codes map to [`AlignmentStatus::NotAligned`].
    pub fn from_wire(code: u32) -> Self {
        match code {
            0 => Self::Aligned,
            1 => Self::NotAligned,
            2 => Self::InProgress,
            _ => Self::NotAligned,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aligned => "Aligned",
            Self::NotAligned => "NotAligned",
            Self::InProgress => "InProgress",
        }
    }
}

/// WPT PositioningStatus (2 bits on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PositioningStatus {
    Complete,
    #[default]
    InProgress,
    Failed,
}

impl PositioningStatus {
    pub const WIDTH: u32 = 2;

    pub fn to_wire(self) -> u32 {
        match self {
            Self::Complete => 0,
            Self::InProgress => 1,
            Self::Failed => 2,
        }
    }

    /// Unknown codes map to [`PositioningStatus::InProgress`].
    pub fn from_wire(code: u32) -> Self {
        match code {
            0 => Self::Complete,
            1 => Self::InProgress,
            2 => Self::Failed,
            _ => Self::InProgress,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Complete => "Complete",
            Self::InProgress => "InProgress",
            Self::Failed => "Failed",
        }
    }
}

macro_rules! display_via_as_str {
    ($($ty:ty),+ $(,)?) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })+
    };
}

display_via_as_str!(
    ResponseCode,
    EvseProcessing,
    EvProcessing,
    ChargingSession,
    AlignmentStatus,
    PositioningStatus,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_code_wire_values() {
        assert_eq!(ResponseCode::Ok.to_wire(), 0);
        assert_eq!(ResponseCode::OkCertificateExpiresSoon.to_wire(), 1);
        assert_eq!(ResponseCode::OkNewSessionEstablished.to_wire(), 2);
        assert_eq!(ResponseCode::OkOldSessionJoined.to_wire(), 3);
        assert_eq!(ResponseCode::Failed.to_wire(), 32);
    }

    #[test]
    fn response_code_round_trip() {
        for rc in [
            ResponseCode::Ok,
            ResponseCode::OkCertificateExpiresSoon,
            ResponseCode::OkNewSessionEstablished,
            ResponseCode::OkOldSessionJoined,
            ResponseCode::Failed,
        ] {
            assert_eq!(ResponseCode::from_wire(rc.to_wire()), rc);
            assert!(rc.to_wire() < (1 << ResponseCode::WIDTH));
        }
    }

    #[test]
    fn response_code_unknown_maps_to_ok() {
        assert_eq!(ResponseCode::from_wire(4), ResponseCode::Ok);
        assert_eq!(ResponseCode::from_wire(31), ResponseCode::Ok);
        assert_eq!(ResponseCode::from_wire(63), ResponseCode::Ok);
    }

    #[test]
    fn evse_processing_round_trip() {
        for p in [
            EvseProcessing::Finished,
            EvseProcessing::Ongoing,
            EvseProcessing::OngoingWaitingForCustomerInteraction,
        ] {
            assert_eq!(EvseProcessing::from_wire(p.to_wire()), p);
            assert!(p.to_wire() < (1 << EvseProcessing::WIDTH));
        }
        assert_eq!(EvseProcessing::from_wire(3), EvseProcessing::Ongoing);
    }

    #[test]
    fn ev_processing_round_trip() {
        assert_eq!(EvProcessing::from_wire(0), EvProcessing::Finished);
        assert_eq!(EvProcessing::from_wire(1), EvProcessing::Ongoing);
        assert_eq!(EvProcessing::from_wire(3), EvProcessing::Ongoing);
    }

    #[test]
    fn charging_session_round_trip() {
        for cs in [
            ChargingSession::Pause,
            ChargingSession::Terminate,
            ChargingSession::ServiceRenegotiation,
        ] {
            assert_eq!(ChargingSession::from_wire(cs.to_wire()), cs);
        }
        assert_eq!(ChargingSession::from_wire(3), ChargingSession::Terminate);
    }

    #[test]
    fn wpt_status_round_trips() {
        for s in [
            AlignmentStatus::Aligned,
            AlignmentStatus::NotAligned,
            AlignmentStatus::InProgress,
        ] {
            assert_eq!(AlignmentStatus::from_wire(s.to_wire()), s);
        }
        assert_eq!(AlignmentStatus::from_wire(3), AlignmentStatus::NotAligned);

        for s in [
            PositioningStatus::Complete,
            PositioningStatus::InProgress,
            PositioningStatus::Failed,
        ] {
            assert_eq!(PositioningStatus::from_wire(s.to_wire()), s);
        }
        assert_eq!(
            PositioningStatus::from_wire(3),
            PositioningStatus::InProgress
        );
    }

    #[test]
    fn defaults_match_tolerant_decoding() {
        assert_eq!(ResponseCode::default(), ResponseCode::Ok);
        assert_eq!(EvseProcessing::default(), EvseProcessing::Ongoing);
        assert_eq!(EvProcessing::default(), EvProcessing::Ongoing);
        assert_eq!(ChargingSession::default(), ChargingSession::Terminate);
        assert_eq!(AlignmentStatus::default(), AlignmentStatus::NotAligned);
        assert_eq!(PositioningStatus::default(), PositioningStatus::InProgress);
    }

    #[test]
    fn display_uses_domain_strings() {
        assert_eq!(ResponseCode::Failed.to_string(), "FAILED");
        assert_eq!(
            EvseProcessing::OngoingWaitingForCustomerInteraction.to_string(),
            "Ongoing_WaitingForCustomerInteraction"
        );
        assert_eq!(ChargingSession::Pause.to_string(), "Pause");
    }
}
