//! Top-level dispatch between message values and EXI streams.
//!
//! Stream layout per message:
//!
//! ```text
//! byte 0      0x80 — EXI simple header
//! bits 8..13  6-bit event code (see the table below)
//! bits 14..   message body, bit-packed MSB-first
//! ```
//!
//! The event-code table is the V2G_CI_CommonMessages document grammar
//! of ISO 15118-20; the gaps (6, 9-15, 18-20, 23-26, 39-48) are taken
//! by types this catalog does not carry and are rejected on decode.

use log::{debug, trace};

use crate::acdp::*;
use crate::authorization::*;
use crate::bitstream::{BitReader, BitWriter};
use crate::certificates::*;
use crate::control_loop::*;
use crate::limits::DecodeLimits;
use crate::metering::*;
use crate::power_delivery::*;
use crate::schedule::*;
use crate::service::*;
use crate::session::*;
use crate::vehicle::*;
use crate::wpt::*;
use crate::{Error, Result};

/// The EXI simple header octet opening every stream.
pub const EXI_SIMPLE_HEADER: u32 = 0x80;

/// Bit width of the top-level event code.
const EVENT_CODE_WIDTH: u32 = 6;

/// Working buffer for one encoded message; ample for every message in
/// the catalog. Larger payloads fail with `Overflow`.
const ENCODE_BUFFER_SIZE: usize = 4096;

/// Deprecated alias still emitted by older peers for
/// VehicleCheckOutRes; the encoder only ever writes 52.
const EVENT_VEHICLE_CHECK_OUT_RES_LEGACY: u32 = 45;

/// A CommonMessages value tagged with its variant.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Message {
    AuthorizationReq(AuthorizationReq),
    AuthorizationRes(AuthorizationRes),
    AuthorizationSetupReq(AuthorizationSetupReq),
    AuthorizationSetupRes(AuthorizationSetupRes),
    ClReqControlMode(ClReqControlMode),
    ClResControlMode(ClResControlMode),
    CertificateInstallationReq(CertificateInstallationReq),
    CertificateInstallationRes(CertificateInstallationRes),
    MeteringConfirmationReq(MeteringConfirmationReq),
    MeteringConfirmationRes(MeteringConfirmationRes),
    PowerDeliveryReq(PowerDeliveryReq),
    PowerDeliveryRes(PowerDeliveryRes),
    ScheduleExchangeReq(ScheduleExchangeReq),
    ScheduleExchangeRes(ScheduleExchangeRes),
    ServiceDetailReq(ServiceDetailReq),
    ServiceDetailRes(ServiceDetailRes),
    ServiceDiscoveryReq(ServiceDiscoveryReq),
    ServiceDiscoveryRes(ServiceDiscoveryRes),
    ServiceSelectionReq(ServiceSelectionReq),
    ServiceSelectionRes(ServiceSelectionRes),
    SessionSetupReq(SessionSetupReq),
    SessionSetupRes(SessionSetupRes),
    SessionStopReq(SessionStopReq),
    SessionStopRes(SessionStopRes),
    VehicleCheckInReq(VehicleCheckInReq),
    VehicleCheckInRes(VehicleCheckInRes),
    VehicleCheckOutReq(VehicleCheckOutReq),
    VehicleCheckOutRes(VehicleCheckOutRes),
    WptAlignmentCheckReq(WptAlignmentCheckReq),
    WptAlignmentCheckRes(WptAlignmentCheckRes),
    WptFinePositioningReq(WptFinePositioningReq),
    WptFinePositioningRes(WptFinePositioningRes),
    WptChargeLoopReq(WptChargeLoopReq),
    WptChargeLoopRes(WptChargeLoopRes),
    DcAcdpReq(DcAcdpReq),
    DcAcdpRes(DcAcdpRes),
    DcAcdpBptReq(DcAcdpBptReq),
    DcAcdpBptRes(DcAcdpBptRes),
}

impl Message {
    /// The 6-bit top-level event code of this variant.
    pub fn event_code(&self) -> u32 {
        match self {
            Self::AuthorizationReq(_) => 0,
            Self::AuthorizationRes(_) => 1,
            Self::AuthorizationSetupReq(_) => 2,
            Self::AuthorizationSetupRes(_) => 3,
            Self::ClReqControlMode(_) => 4,
            Self::ClResControlMode(_) => 5,
            Self::CertificateInstallationReq(_) => 7,
            Self::CertificateInstallationRes(_) => 8,
            Self::MeteringConfirmationReq(_) => 16,
            Self::MeteringConfirmationRes(_) => 17,
            Self::PowerDeliveryReq(_) => 21,
            Self::PowerDeliveryRes(_) => 22,
            Self::ScheduleExchangeReq(_) => 27,
            Self::ScheduleExchangeRes(_) => 28,
            Self::ServiceDetailReq(_) => 29,
            Self::ServiceDetailRes(_) => 30,
            Self::ServiceDiscoveryReq(_) => 31,
            Self::ServiceDiscoveryRes(_) => 32,
            Self::ServiceSelectionReq(_) => 33,
            Self::ServiceSelectionRes(_) => 34,
            Self::SessionSetupReq(_) => 35,
            Self::SessionSetupRes(_) => 36,
            Self::SessionStopReq(_) => 37,
            Self::SessionStopRes(_) => 38,
            Self::VehicleCheckInReq(_) => 49,
            Self::VehicleCheckInRes(_) => 50,
            Self::VehicleCheckOutReq(_) => 51,
            Self::VehicleCheckOutRes(_) => 52,
            Self::WptAlignmentCheckReq(_) => 53,
            Self::WptAlignmentCheckRes(_) => 54,
            Self::WptFinePositioningReq(_) => 55,
            Self::WptFinePositioningRes(_) => 56,
            Self::WptChargeLoopReq(_) => 57,
            Self::WptChargeLoopRes(_) => 58,
            Self::DcAcdpReq(_) => 59,
            Self::DcAcdpRes(_) => 60,
            Self::DcAcdpBptReq(_) => 61,
            Self::DcAcdpBptRes(_) => 62,
        }
    }

    /// The variant name as it appears in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AuthorizationReq(_) => "AuthorizationReq",
            Self::AuthorizationRes(_) => "AuthorizationRes",
            Self::AuthorizationSetupReq(_) => "AuthorizationSetupReq",
            Self::AuthorizationSetupRes(_) => "AuthorizationSetupRes",
            Self::ClReqControlMode(_) => "CLReqControlMode",
            Self::ClResControlMode(_) => "CLResControlMode",
            Self::CertificateInstallationReq(_) => "CertificateInstallationReq",
            Self::CertificateInstallationRes(_) => "CertificateInstallationRes",
            Self::MeteringConfirmationReq(_) => "MeteringConfirmationReq",
            Self::MeteringConfirmationRes(_) => "MeteringConfirmationRes",
            Self::PowerDeliveryReq(_) => "PowerDeliveryReq",
            Self::PowerDeliveryRes(_) => "PowerDeliveryRes",
            Self::ScheduleExchangeReq(_) => "ScheduleExchangeReq",
            Self::ScheduleExchangeRes(_) => "ScheduleExchangeRes",
            Self::ServiceDetailReq(_) => "ServiceDetailReq",
            Self::ServiceDetailRes(_) => "ServiceDetailRes",
            Self::ServiceDiscoveryReq(_) => "ServiceDiscoveryReq",
            Self::ServiceDiscoveryRes(_) => "ServiceDiscoveryRes",
            Self::ServiceSelectionReq(_) => "ServiceSelectionReq",
            Self::ServiceSelectionRes(_) => "ServiceSelectionRes",
            Self::SessionSetupReq(_) => "SessionSetupReq",
            Self::SessionSetupRes(_) => "SessionSetupRes",
            Self::SessionStopReq(_) => "SessionStopReq",
            Self::SessionStopRes(_) => "SessionStopRes",
            Self::VehicleCheckInReq(_) => "VehicleCheckInReq",
            Self::VehicleCheckInRes(_) => "VehicleCheckInRes",
            Self::VehicleCheckOutReq(_) => "VehicleCheckOutReq",
            Self::VehicleCheckOutRes(_) => "VehicleCheckOutRes",
            Self::WptAlignmentCheckReq(_) => "WPT_AlignmentCheckReq",
            Self::WptAlignmentCheckRes(_) => "WPT_AlignmentCheckRes",
            Self::WptFinePositioningReq(_) => "WPT_FinePositioningReq",
            Self::WptFinePositioningRes(_) => "WPT_FinePositioningRes",
            Self::WptChargeLoopReq(_) => "WPT_ChargeLoopReq",
            Self::WptChargeLoopRes(_) => "WPT_ChargeLoopRes",
            Self::DcAcdpReq(_) => "DC_ACDPReq",
            Self::DcAcdpRes(_) => "DC_ACDPRes",
            Self::DcAcdpBptReq(_) => "DC_ACDP_BPTReq",
            Self::DcAcdpBptRes(_) => "DC_ACDP_BPTRes",
        }
    }
}

fn encode_body(w: &mut BitWriter<'_>, msg: &Message) -> Result<()> {
    match msg {
        Message::AuthorizationReq(v) => encode_authorization_req(w, v),
        Message::AuthorizationRes(v) => encode_authorization_res(w, v),
        Message::AuthorizationSetupReq(v) => encode_authorization_setup_req(w, v),
        Message::AuthorizationSetupRes(v) => encode_authorization_setup_res(w, v),
        Message::ClReqControlMode(v) => encode_cl_req_control_mode(w, v),
        Message::ClResControlMode(v) => encode_cl_res_control_mode(w, v),
        Message::CertificateInstallationReq(v) => encode_certificate_installation_req(w, v),
        Message::CertificateInstallationRes(v) => encode_certificate_installation_res(w, v),
        Message::MeteringConfirmationReq(v) => encode_metering_confirmation_req(w, v),
        Message::MeteringConfirmationRes(v) => encode_metering_confirmation_res(w, v),
        Message::PowerDeliveryReq(v) => encode_power_delivery_req(w, v),
        Message::PowerDeliveryRes(v) => encode_power_delivery_res(w, v),
        Message::ScheduleExchangeReq(v) => encode_schedule_exchange_req(w, v),
        Message::ScheduleExchangeRes(v) => encode_schedule_exchange_res(w, v),
        Message::ServiceDetailReq(v) => encode_service_detail_req(w, v),
        Message::ServiceDetailRes(v) => encode_service_detail_res(w, v),
        Message::ServiceDiscoveryReq(v) => encode_service_discovery_req(w, v),
        Message::ServiceDiscoveryRes(v) => encode_service_discovery_res(w, v),
        Message::ServiceSelectionReq(v) => encode_service_selection_req(w, v),
        Message::ServiceSelectionRes(v) => encode_service_selection_res(w, v),
        Message::SessionSetupReq(v) => encode_session_setup_req(w, v),
        Message::SessionSetupRes(v) => encode_session_setup_res(w, v),
        Message::SessionStopReq(v) => encode_session_stop_req(w, v),
        Message::SessionStopRes(v) => encode_session_stop_res(w, v),
        Message::VehicleCheckInReq(v) => encode_vehicle_check_in_req(w, v),
        Message::VehicleCheckInRes(v) => encode_vehicle_check_in_res(w, v),
        Message::VehicleCheckOutReq(v) => encode_vehicle_check_out_req(w, v),
        Message::VehicleCheckOutRes(v) => encode_vehicle_check_out_res(w, v),
        Message::WptAlignmentCheckReq(v) => encode_wpt_alignment_check_req(w, v),
        Message::WptAlignmentCheckRes(v) => encode_wpt_alignment_check_res(w, v),
        Message::WptFinePositioningReq(v) => encode_wpt_fine_positioning_req(w, v),
        Message::WptFinePositioningRes(v) => encode_wpt_fine_positioning_res(w, v),
        Message::WptChargeLoopReq(v) => encode_wpt_charge_loop_req(w, v),
        Message::WptChargeLoopRes(v) => encode_wpt_charge_loop_res(w, v),
        Message::DcAcdpReq(v) => encode_dc_acdp_req(w, v),
        Message::DcAcdpRes(v) => encode_dc_acdp_res(w, v),
        Message::DcAcdpBptReq(v) => encode_dc_acdp_bpt_req(w, v),
        Message::DcAcdpBptRes(v) => encode_dc_acdp_bpt_res(w, v),
    }
}

/// Encodes a message to its EXI stream.
///
/// Writes the simple header and the variant's event code, then the
/// body, and returns the used prefix of the working buffer.
pub fn encode(msg: &Message) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; ENCODE_BUFFER_SIZE];
    let mut w = BitWriter::new(&mut buf, 0);

    let run = |w: &mut BitWriter<'_>| -> Result<()> {
        w.write_bits(8, EXI_SIMPLE_HEADER)?;
        w.write_bits(EVENT_CODE_WIDTH, msg.event_code())?;
        encode_body(w, msg)
    };
    run(&mut w).map_err(|e| Error::EncodeFailure {
        message: msg.name(),
        source: Box::new(e),
    })?;

    let len = w.len();
    trace!("encoded {} ({len} bytes)", msg.name());
    buf.truncate(len);
    Ok(buf)
}

/// Decodes an EXI stream into the message it carries, using default
/// [`DecodeLimits`].
pub fn decode(data: &[u8]) -> Result<Message> {
    decode_with_limits(data, &DecodeLimits::default())
}

/// Decodes an EXI stream with caller-supplied allocation bounds.
///
/// Fails with [`Error::InvalidInput`] when the first byte is not 0x80
/// and with [`Error::UnsupportedMessage`] for reserved event codes.
pub fn decode_with_limits(data: &[u8], limits: &DecodeLimits) -> Result<Message> {
    let mut r = BitReader::new(data, 0);

    let header_byte = r.read_bits(8)?;
    if header_byte != EXI_SIMPLE_HEADER {
        return Err(Error::invalid_input("EXI simple header byte is not 0x80"));
    }

    let event_code = r.read_bits(EVENT_CODE_WIDTH)?;
    trace!("dispatching event code {event_code}");

    let wrap = |message: &'static str, result: Result<Message>| -> Result<Message> {
        result.map_err(|e| Error::DecodeFailure {
            message,
            source: Box::new(e),
        })
    };

    match event_code {
        0 => wrap(
            "AuthorizationReq",
            decode_authorization_req(&mut r, limits).map(Message::AuthorizationReq),
        ),
        1 => wrap(
            "AuthorizationRes",
            decode_authorization_res(&mut r, limits).map(Message::AuthorizationRes),
        ),
        2 => wrap(
            "AuthorizationSetupReq",
            decode_authorization_setup_req(&mut r, limits).map(Message::AuthorizationSetupReq),
        ),
        3 => wrap(
            "AuthorizationSetupRes",
            decode_authorization_setup_res(&mut r, limits).map(Message::AuthorizationSetupRes),
        ),
        4 => wrap(
            "CLReqControlMode",
            decode_cl_req_control_mode(&mut r, limits).map(Message::ClReqControlMode),
        ),
        5 => wrap(
            "CLResControlMode",
            decode_cl_res_control_mode(&mut r, limits).map(Message::ClResControlMode),
        ),
        7 => wrap(
            "CertificateInstallationReq",
            decode_certificate_installation_req(&mut r, limits)
                .map(Message::CertificateInstallationReq),
        ),
        8 => wrap(
            "CertificateInstallationRes",
            decode_certificate_installation_res(&mut r, limits)
                .map(Message::CertificateInstallationRes),
        ),
        16 => wrap(
            "MeteringConfirmationReq",
            decode_metering_confirmation_req(&mut r, limits).map(Message::MeteringConfirmationReq),
        ),
        17 => wrap(
            "MeteringConfirmationRes",
            decode_metering_confirmation_res(&mut r, limits).map(Message::MeteringConfirmationRes),
        ),
        21 => wrap(
            "PowerDeliveryReq",
            decode_power_delivery_req(&mut r, limits).map(Message::PowerDeliveryReq),
        ),
        22 => wrap(
            "PowerDeliveryRes",
            decode_power_delivery_res(&mut r, limits).map(Message::PowerDeliveryRes),
        ),
        27 => wrap(
            "ScheduleExchangeReq",
            decode_schedule_exchange_req(&mut r, limits).map(Message::ScheduleExchangeReq),
        ),
        28 => wrap(
            "ScheduleExchangeRes",
            decode_schedule_exchange_res(&mut r, limits).map(Message::ScheduleExchangeRes),
        ),
        29 => wrap(
            "ServiceDetailReq",
            decode_service_detail_req(&mut r, limits).map(Message::ServiceDetailReq),
        ),
        30 => wrap(
            "ServiceDetailRes",
            decode_service_detail_res(&mut r, limits).map(Message::ServiceDetailRes),
        ),
        31 => wrap(
            "ServiceDiscoveryReq",
            decode_service_discovery_req(&mut r, limits).map(Message::ServiceDiscoveryReq),
        ),
        32 => wrap(
            "ServiceDiscoveryRes",
            decode_service_discovery_res(&mut r, limits).map(Message::ServiceDiscoveryRes),
        ),
        33 => wrap(
            "ServiceSelectionReq",
            decode_service_selection_req(&mut r, limits).map(Message::ServiceSelectionReq),
        ),
        34 => wrap(
            "ServiceSelectionRes",
            decode_service_selection_res(&mut r, limits).map(Message::ServiceSelectionRes),
        ),
        35 => wrap(
            "SessionSetupReq",
            decode_session_setup_req(&mut r, limits).map(Message::SessionSetupReq),
        ),
        36 => wrap(
            "SessionSetupRes",
            decode_session_setup_res(&mut r, limits).map(Message::SessionSetupRes),
        ),
        37 => wrap(
            "SessionStopReq",
            decode_session_stop_req(&mut r, limits).map(Message::SessionStopReq),
        ),
        38 => wrap(
            "SessionStopRes",
            decode_session_stop_res(&mut r, limits).map(Message::SessionStopRes),
        ),
        49 => wrap(
            "VehicleCheckInReq",
            decode_vehicle_check_in_req(&mut r, limits).map(Message::VehicleCheckInReq),
        ),
        50 => wrap(
            "VehicleCheckInRes",
            decode_vehicle_check_in_res(&mut r, limits).map(Message::VehicleCheckInRes),
        ),
        51 => wrap(
            "VehicleCheckOutReq",
            decode_vehicle_check_out_req(&mut r, limits).map(Message::VehicleCheckOutReq),
        ),
        // 45 is the deprecated alias for VehicleCheckOutRes.
        52 | EVENT_VEHICLE_CHECK_OUT_RES_LEGACY => wrap(
            "VehicleCheckOutRes",
            decode_vehicle_check_out_res(&mut r, limits).map(Message::VehicleCheckOutRes),
        ),
        53 => wrap(
            "WPT_AlignmentCheckReq",
            decode_wpt_alignment_check_req(&mut r, limits).map(Message::WptAlignmentCheckReq),
        ),
        54 => wrap(
            "WPT_AlignmentCheckRes",
            decode_wpt_alignment_check_res(&mut r, limits).map(Message::WptAlignmentCheckRes),
        ),
        55 => wrap(
            "WPT_FinePositioningReq",
            decode_wpt_fine_positioning_req(&mut r, limits).map(Message::WptFinePositioningReq),
        ),
        56 => wrap(
            "WPT_FinePositioningRes",
            decode_wpt_fine_positioning_res(&mut r, limits).map(Message::WptFinePositioningRes),
        ),
        57 => wrap(
            "WPT_ChargeLoopReq",
            decode_wpt_charge_loop_req(&mut r, limits).map(Message::WptChargeLoopReq),
        ),
        58 => wrap(
            "WPT_ChargeLoopRes",
            decode_wpt_charge_loop_res(&mut r, limits).map(Message::WptChargeLoopRes),
        ),
        59 => wrap(
            "DC_ACDPReq",
            decode_dc_acdp_req(&mut r, limits).map(Message::DcAcdpReq),
        ),
        60 => wrap(
            "DC_ACDPRes",
            decode_dc_acdp_res(&mut r, limits).map(Message::DcAcdpRes),
        ),
        61 => wrap(
            "DC_ACDP_BPTReq",
            decode_dc_acdp_bpt_req(&mut r, limits).map(Message::DcAcdpBptReq),
        ),
        62 => wrap(
            "DC_ACDP_BPTRes",
            decode_dc_acdp_bpt_res(&mut r, limits).map(Message::DcAcdpBptRes),
        ),
        code => {
            debug!("rejecting reserved event code {code}");
            Err(Error::UnsupportedMessage(code))
        }
    }
}
