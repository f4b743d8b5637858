//! v2gexi – schema-informed EXI codec for the ISO 15118-20
//! CommonMessages catalog.
//!
//! Serialisiert die getypten V2G-Nachrichten in den bit-gepackten
//! EXI-Strom, den die Ladecontroller erwarten, und zurueck. Der Strom
//! ist bit-exakt: ein einziges falsches Bit macht ihn fuer jeden
//! konformen Peer unlesbar.
//!
//! # Beispiel
//!
//! ```
//! use v2gexi::{decode, encode, Message, MessageHeader, SessionSetupReq};
//!
//! let msg = Message::SessionSetupReq(SessionSetupReq {
//!     header: MessageHeader::new(vec![0x0A, 0x1B, 0x2C, 0x3D], 1_672_531_200),
//!     evccid: vec![0x0A, 0x1B, 0x2C, 0x3D, 0x4E, 0x5F],
//! });
//!
//! let bytes = encode(&msg).unwrap();
//! assert_eq!(bytes[0], 0x80); // EXI simple header
//!
//! let decoded = decode(&bytes).unwrap();
//! assert_eq!(decoded, msg);
//! ```

pub mod acdp;
pub mod authorization;
pub mod binary;
pub mod bitstream;
pub mod certificates;
pub mod common;
pub mod control_loop;
pub mod dispatcher;
pub mod enums;
pub mod error;
pub mod header;
pub mod limits;
pub mod metering;
pub mod power_delivery;
pub mod schedule;
pub mod service;
pub mod session;
pub mod string;
pub mod vehicle;
pub mod wpt;

pub use error::{Error, Result};

// Public API: stream primitives
pub use bitstream::{BitReader, BitWriter};

// Public API: dispatch entry points
pub use dispatcher::{decode, decode_with_limits, encode, Message, EXI_SIMPLE_HEADER};

// Public API: configuration
pub use limits::DecodeLimits;

// Public API: shared types
pub use common::{
    CertificateChain, EvPowerProfile, EvPowerProfileEntry, EvseStatus, Parameter, ParameterSet,
    ParameterValue, RationalNumber, SelectedService, Service,
};
pub use enums::{
    AlignmentStatus, ChargingSession, EvProcessing, EvseProcessing, PositioningStatus,
    ResponseCode,
};
pub use header::MessageHeader;

// Public API: message bodies
pub use acdp::{DcAcdpBptReq, DcAcdpBptRes, DcAcdpReq, DcAcdpRes};
pub use authorization::{
    AuthorizationReq, AuthorizationRes, AuthorizationSetupReq, AuthorizationSetupRes,
    PncReqAuthorizationMode, PncSetupResAuthorizationMode, ReqAuthorizationMode,
    SetupResAuthorizationMode,
};
pub use certificates::{CertificateInstallationReq, CertificateInstallationRes};
pub use control_loop::{ClReqControlMode, ClResControlMode};
pub use metering::{MeteringConfirmationReq, MeteringConfirmationRes};
pub use power_delivery::{PowerDeliveryReq, PowerDeliveryRes};
pub use schedule::{ScheduleExchangeReq, ScheduleExchangeRes};
pub use service::{
    ServiceDetailReq, ServiceDetailRes, ServiceDiscoveryReq, ServiceDiscoveryRes,
    ServiceSelectionReq, ServiceSelectionRes,
};
pub use session::{SessionSetupReq, SessionSetupRes, SessionStopReq, SessionStopRes};
pub use vehicle::{
    VehicleCheckInReq, VehicleCheckInRes, VehicleCheckOutReq, VehicleCheckOutRes,
};
pub use wpt::{
    WptAlignmentCheckReq, WptAlignmentCheckRes, WptChargeLoopReq, WptChargeLoopRes,
    WptFinePositioningReq, WptFinePositioningRes,
};
