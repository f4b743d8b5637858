//! Metering confirmation messages. The request body is header-only;
//! SignedMeteringData is carried by the XMLDSig layer, which this
//! catalog does not transport.

use crate::bitstream::{BitReader, BitWriter};
use crate::common::{read_response_code, write_response_code};
use crate::enums::ResponseCode;
use crate::header::{self, MessageHeader};
use crate::limits::DecodeLimits;
use crate::Result;

/// EV → EVSE: confirms the meter reading.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MeteringConfirmationReq {
    pub header: MessageHeader,
}

/// EVSE → EV: acknowledges the confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MeteringConfirmationRes {
    pub header: MessageHeader,
    pub response_code: ResponseCode,
}

pub(crate) fn encode_metering_confirmation_req(
    w: &mut BitWriter<'_>,
    v: &MeteringConfirmationReq,
) -> Result<()> {
    w.write_bits(1, 0)?;
    header::encode(w, &v.header)?;
    w.write_bits(1, 0)
}

pub(crate) fn decode_metering_confirmation_req(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<MeteringConfirmationReq> {
    r.read_bits(1)?;
    let header = header::decode(r, limits)?;
    r.read_bits(1)?;
    Ok(MeteringConfirmationReq { header })
}

pub(crate) fn encode_metering_confirmation_res(
    w: &mut BitWriter<'_>,
    v: &MeteringConfirmationRes,
) -> Result<()> {
    w.write_bits(1, 0)?;
    header::encode(w, &v.header)?;
    write_response_code(w, v.response_code)?;
    w.write_bits(1, 0)
}

pub(crate) fn decode_metering_confirmation_res(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<MeteringConfirmationRes> {
    r.read_bits(1)?;
    let header = header::decode(r, limits)?;
    let response_code = read_response_code(r)?;
    r.read_bits(1)?;
    Ok(MeteringConfirmationRes {
        header,
        response_code,
    })
}
