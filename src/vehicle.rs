//! Vehicle check-in/check-out messages (automated parking flows).
//!
//! All status fields at these sites are plain strings. Note the
//! asymmetry preserved from the schema grammar: VehicleCheckInResult is
//! written bare behind its presence bit, without field brackets.

use crate::bitstream::{BitReader, BitWriter};
use crate::common::{read_response_code, write_response_code};
use crate::enums::ResponseCode;
use crate::header::{self, MessageHeader};
use crate::limits::DecodeLimits;
use crate::{string, Result};

/// EV → EVSE: announces arrival at the parking position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VehicleCheckInReq {
    pub header: MessageHeader,
    pub ev_check_in_status: String,
    pub parking_method: Option<String>,
}

/// EVSE → EV: check-in verdict.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VehicleCheckInRes {
    pub header: MessageHeader,
    pub response_code: ResponseCode,
    pub vehicle_check_in_result: Option<String>,
}

/// EV → EVSE: announces departure.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VehicleCheckOutReq {
    pub header: MessageHeader,
    pub ev_check_out_status: String,
    pub check_out_time: u64,
}

/// EVSE → EV: check-out verdict.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VehicleCheckOutRes {
    pub header: MessageHeader,
    pub response_code: ResponseCode,
    pub evse_check_out_status: String,
}

pub(crate) fn encode_vehicle_check_in_req(
    w: &mut BitWriter<'_>,
    v: &VehicleCheckInReq,
) -> Result<()> {
    w.write_bits(1, 0)?;
    header::encode(w, &v.header)?;

    w.write_bits(1, 0)?;
    string::encode(w, &v.ev_check_in_status)?;
    w.write_bits(1, 0)?;

    match &v.parking_method {
        Some(method) => {
            w.write_bits(1, 1)?;
            w.write_bits(1, 0)?;
            string::encode(w, method)?;
            w.write_bits(1, 0)?;
        }
        None => w.write_bits(1, 0)?,
    }

    w.write_bits(1, 0)
}

pub(crate) fn decode_vehicle_check_in_req(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<VehicleCheckInReq> {
    r.read_bits(1)?;
    let header = header::decode(r, limits)?;

    r.read_bits(1)?;
    let ev_check_in_status = string::decode(r, limits.max_field_len)?;
    r.read_bits(1)?;

    let parking_method = if r.read_bits(1)? == 1 {
        r.read_bits(1)?;
        let method = string::decode(r, limits.max_field_len)?;
        r.read_bits(1)?;
        Some(method)
    } else {
        None
    };

    r.read_bits(1)?;

    Ok(VehicleCheckInReq {
        header,
        ev_check_in_status,
        parking_method,
    })
}

pub(crate) fn encode_vehicle_check_in_res(
    w: &mut BitWriter<'_>,
    v: &VehicleCheckInRes,
) -> Result<()> {
    w.write_bits(1, 0)?;
    header::encode(w, &v.header)?;

    write_response_code(w, v.response_code)?;

    match &v.vehicle_check_in_result {
        Some(result) => {
            w.write_bits(1, 1)?;
            string::encode(w, result)?;
        }
        None => w.write_bits(1, 0)?,
    }

    w.write_bits(1, 0)
}

pub(crate) fn decode_vehicle_check_in_res(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<VehicleCheckInRes> {
    r.read_bits(1)?;
    let header = header::decode(r, limits)?;

    let response_code = read_response_code(r)?;

    let vehicle_check_in_result = if r.read_bits(1)? == 1 {
        Some(string::decode(r, limits.max_field_len)?)
    } else {
        None
    };

    r.read_bits(1)?;

    Ok(VehicleCheckInRes {
        header,
        response_code,
        vehicle_check_in_result,
    })
}

pub(crate) fn encode_vehicle_check_out_req(
    w: &mut BitWriter<'_>,
    v: &VehicleCheckOutReq,
) -> Result<()> {
    w.write_bits(1, 0)?;
    header::encode(w, &v.header)?;

    w.write_bits(1, 0)?;
    string::encode(w, &v.ev_check_out_status)?;
    w.write_bits(1, 0)?;

    w.write_bits(1, 0)?;
    w.write_bits(1, 0)?;
    w.write_unsigned_var(v.check_out_time)?;
    w.write_bits(1, 0)?;

    w.write_bits(1, 0)
}

pub(crate) fn decode_vehicle_check_out_req(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<VehicleCheckOutReq> {
    r.read_bits(1)?;
    let header = header::decode(r, limits)?;

    r.read_bits(1)?;
    let ev_check_out_status = string::decode(r, limits.max_field_len)?;
    r.read_bits(1)?;

    r.read_bits(1)?;
    r.read_bits(1)?;
    let check_out_time = r.read_unsigned_var()?;
    r.read_bits(1)?;

    r.read_bits(1)?;

    Ok(VehicleCheckOutReq {
        header,
        ev_check_out_status,
        check_out_time,
    })
}

pub(crate) fn encode_vehicle_check_out_res(
    w: &mut BitWriter<'_>,
    v: &VehicleCheckOutRes,
) -> Result<()> {
    w.write_bits(1, 0)?;
    header::encode(w, &v.header)?;

    write_response_code(w, v.response_code)?;

    w.write_bits(1, 0)?;
    string::encode(w, &v.evse_check_out_status)?;
    w.write_bits(1, 0)?;

    w.write_bits(1, 0)
}

pub(crate) fn decode_vehicle_check_out_res(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<VehicleCheckOutRes> {
    r.read_bits(1)?;
    let header = header::decode(r, limits)?;

    let response_code = read_response_code(r)?;

    r.read_bits(1)?;
    let evse_check_out_status = string::decode(r, limits.max_field_len)?;
    r.read_bits(1)?;

    r.read_bits(1)?;

    Ok(VehicleCheckOutRes {
        header,
        response_code,
        evse_check_out_status,
    })
}
