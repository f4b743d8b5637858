//! DC ACDP messages (automated connection device, pantograph), plain
//! and bidirectional-power-transfer variants.
//!
//! The EVTargetEnergyRequest field opens with a single START bit and
//! runs straight into the RationalNumber body; the message END bit
//! doubles as the field terminator at this site.

use crate::bitstream::{BitReader, BitWriter};
use crate::common::{
    decode_rational_number, encode_rational_number, read_ev_processing, read_evse_processing,
    read_response_code, write_ev_processing, write_evse_processing, write_response_code,
    RationalNumber,
};
use crate::enums::{EvProcessing, EvseProcessing, ResponseCode};
use crate::header::{self, MessageHeader};
use crate::limits::DecodeLimits;
use crate::Result;

/// EV → EVSE: ACDP charge loop tick with the energy request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DcAcdpReq {
    pub header: MessageHeader,
    pub ev_processing: EvProcessing,
    pub ev_target_energy_request: RationalNumber,
}

/// EVSE → EV: ACDP charge loop answer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DcAcdpRes {
    pub header: MessageHeader,
    pub response_code: ResponseCode,
    pub evse_processing: EvseProcessing,
}

/// EV → EVSE: BPT variant of [`DcAcdpReq`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DcAcdpBptReq {
    pub header: MessageHeader,
    pub ev_processing: EvProcessing,
    pub ev_target_energy_request: RationalNumber,
}

/// EVSE → EV: BPT variant of [`DcAcdpRes`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DcAcdpBptRes {
    pub header: MessageHeader,
    pub response_code: ResponseCode,
    pub evse_processing: EvseProcessing,
}

fn encode_acdp_req_body(
    w: &mut BitWriter<'_>,
    header: &MessageHeader,
    ev_processing: EvProcessing,
    energy_request: &RationalNumber,
) -> Result<()> {
    w.write_bits(1, 0)?;
    header::encode(w, header)?;

    write_ev_processing(w, ev_processing)?;

    w.write_bits(1, 0)?;
    encode_rational_number(w, energy_request)?;

    w.write_bits(1, 0)
}

fn decode_acdp_req_body(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<(MessageHeader, EvProcessing, RationalNumber)> {
    r.read_bits(1)?;
    let header = header::decode(r, limits)?;

    let ev_processing = read_ev_processing(r)?;

    r.read_bits(1)?;
    let energy_request = decode_rational_number(r)?;

    r.read_bits(1)?;

    Ok((header, ev_processing, energy_request))
}

fn encode_acdp_res_body(
    w: &mut BitWriter<'_>,
    header: &MessageHeader,
    response_code: ResponseCode,
    evse_processing: EvseProcessing,
) -> Result<()> {
    w.write_bits(1, 0)?;
    header::encode(w, header)?;
    write_response_code(w, response_code)?;
    write_evse_processing(w, evse_processing)?;
    w.write_bits(1, 0)
}

fn decode_acdp_res_body(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<(MessageHeader, ResponseCode, EvseProcessing)> {
    r.read_bits(1)?;
    let header = header::decode(r, limits)?;
    let response_code = read_response_code(r)?;
    let evse_processing = read_evse_processing(r)?;
    r.read_bits(1)?;
    Ok((header, response_code, evse_processing))
}

pub(crate) fn encode_dc_acdp_req(w: &mut BitWriter<'_>, v: &DcAcdpReq) -> Result<()> {
    encode_acdp_req_body(w, &v.header, v.ev_processing, &v.ev_target_energy_request)
}

pub(crate) fn decode_dc_acdp_req(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<DcAcdpReq> {
    let (header, ev_processing, ev_target_energy_request) = decode_acdp_req_body(r, limits)?;
    Ok(DcAcdpReq {
        header,
        ev_processing,
        ev_target_energy_request,
    })
}

pub(crate) fn encode_dc_acdp_res(w: &mut BitWriter<'_>, v: &DcAcdpRes) -> Result<()> {
    encode_acdp_res_body(w, &v.header, v.response_code, v.evse_processing)
}

pub(crate) fn decode_dc_acdp_res(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<DcAcdpRes> {
    let (header, response_code, evse_processing) = decode_acdp_res_body(r, limits)?;
    Ok(DcAcdpRes {
        header,
        response_code,
        evse_processing,
    })
}

pub(crate) fn encode_dc_acdp_bpt_req(w: &mut BitWriter<'_>, v: &DcAcdpBptReq) -> Result<()> {
    encode_acdp_req_body(w, &v.header, v.ev_processing, &v.ev_target_energy_request)
}

pub(crate) fn decode_dc_acdp_bpt_req(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<DcAcdpBptReq> {
    let (header, ev_processing, ev_target_energy_request) = decode_acdp_req_body(r, limits)?;
    Ok(DcAcdpBptReq {
        header,
        ev_processing,
        ev_target_energy_request,
    })
}

pub(crate) fn encode_dc_acdp_bpt_res(w: &mut BitWriter<'_>, v: &DcAcdpBptRes) -> Result<()> {
    encode_acdp_res_body(w, &v.header, v.response_code, v.evse_processing)
}

pub(crate) fn decode_dc_acdp_bpt_res(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<DcAcdpBptRes> {
    let (header, response_code, evse_processing) = decode_acdp_res_body(r, limits)?;
    Ok(DcAcdpBptRes {
        header,
        response_code,
        evse_processing,
    })
}
