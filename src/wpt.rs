//! Wireless power transfer messages: alignment check, fine positioning
//! and the WPT charge loop.
//!
//! The three alignment offsets are independently optional; each is
//! announced by its own presence bit (1 = present) followed by the
//! RationalNumber body, then the message END bit closes the body.

use crate::bitstream::{BitReader, BitWriter};
use crate::common::{
    decode_rational_number, encode_rational_number, read_ev_processing, read_evse_processing,
    read_response_code, write_ev_processing, write_evse_processing, write_response_code,
    RationalNumber,
};
use crate::enums::{AlignmentStatus, EvProcessing, EvseProcessing, PositioningStatus, ResponseCode};
use crate::header::{self, MessageHeader};
use crate::limits::DecodeLimits;
use crate::Result;

/// EV → EVSE: asks for an alignment measurement. Header-only body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WptAlignmentCheckReq {
    pub header: MessageHeader,
}

/// EVSE → EV: alignment verdict with optional offset vector.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WptAlignmentCheckRes {
    pub header: MessageHeader,
    pub response_code: ResponseCode,
    pub alignment_status: AlignmentStatus,
    pub alignment_offset_x: Option<RationalNumber>,
    pub alignment_offset_y: Option<RationalNumber>,
    pub alignment_offset_z: Option<RationalNumber>,
}

/// EV → EVSE: asks for positioning guidance. Header-only body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WptFinePositioningReq {
    pub header: MessageHeader,
}

/// EVSE → EV: positioning state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WptFinePositioningRes {
    pub header: MessageHeader,
    pub response_code: ResponseCode,
    pub positioning_status: PositioningStatus,
}

/// EV → EVSE: wireless charge loop tick.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WptChargeLoopReq {
    pub header: MessageHeader,
    pub ev_processing: EvProcessing,
}

/// EVSE → EV: wireless charge loop answer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WptChargeLoopRes {
    pub header: MessageHeader,
    pub response_code: ResponseCode,
    pub evse_processing: EvseProcessing,
}

pub(crate) fn encode_wpt_alignment_check_req(
    w: &mut BitWriter<'_>,
    v: &WptAlignmentCheckReq,
) -> Result<()> {
    w.write_bits(1, 0)?;
    header::encode(w, &v.header)?;
    w.write_bits(1, 0)
}

pub(crate) fn decode_wpt_alignment_check_req(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<WptAlignmentCheckReq> {
    r.read_bits(1)?;
    let header = header::decode(r, limits)?;
    r.read_bits(1)?;
    Ok(WptAlignmentCheckReq { header })
}

fn write_optional_offset(w: &mut BitWriter<'_>, offset: &Option<RationalNumber>) -> Result<()> {
    match offset {
        Some(value) => {
            w.write_bits(1, 1)?;
            encode_rational_number(w, value)
        }
        None => w.write_bits(1, 0),
    }
}

fn read_optional_offset(r: &mut BitReader<'_>) -> Result<Option<RationalNumber>> {
    if r.read_bits(1)? == 1 {
        Ok(Some(decode_rational_number(r)?))
    } else {
        Ok(None)
    }
}

pub(crate) fn encode_wpt_alignment_check_res(
    w: &mut BitWriter<'_>,
    v: &WptAlignmentCheckRes,
) -> Result<()> {
    w.write_bits(1, 0)?;
    header::encode(w, &v.header)?;

    write_response_code(w, v.response_code)?;

    w.write_bits(1, 0)?;
    w.write_bits(1, 0)?;
    w.write_bits(AlignmentStatus::WIDTH, v.alignment_status.to_wire())?;
    w.write_bits(1, 0)?;

    write_optional_offset(w, &v.alignment_offset_x)?;
    write_optional_offset(w, &v.alignment_offset_y)?;
    write_optional_offset(w, &v.alignment_offset_z)?;

    w.write_bits(1, 0)
}

pub(crate) fn decode_wpt_alignment_check_res(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<WptAlignmentCheckRes> {
    r.read_bits(1)?;
    let header = header::decode(r, limits)?;

    let response_code = read_response_code(r)?;

    r.read_bits(1)?;
    r.read_bits(1)?;
    let alignment_status = AlignmentStatus::from_wire(r.read_bits(AlignmentStatus::WIDTH)?);
    r.read_bits(1)?;

    let alignment_offset_x = read_optional_offset(r)?;
    let alignment_offset_y = read_optional_offset(r)?;
    let alignment_offset_z = read_optional_offset(r)?;

    r.read_bits(1)?;

    Ok(WptAlignmentCheckRes {
        header,
        response_code,
        alignment_status,
        alignment_offset_x,
        alignment_offset_y,
        alignment_offset_z,
    })
}

pub(crate) fn encode_wpt_fine_positioning_req(
    w: &mut BitWriter<'_>,
    v: &WptFinePositioningReq,
) -> Result<()> {
    w.write_bits(1, 0)?;
    header::encode(w, &v.header)?;
    w.write_bits(1, 0)
}

pub(crate) fn decode_wpt_fine_positioning_req(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<WptFinePositioningReq> {
    r.read_bits(1)?;
    let header = header::decode(r, limits)?;
    r.read_bits(1)?;
    Ok(WptFinePositioningReq { header })
}

pub(crate) fn encode_wpt_fine_positioning_res(
    w: &mut BitWriter<'_>,
    v: &WptFinePositioningRes,
) -> Result<()> {
    w.write_bits(1, 0)?;
    header::encode(w, &v.header)?;

    write_response_code(w, v.response_code)?;

    w.write_bits(1, 0)?;
    w.write_bits(1, 0)?;
    w.write_bits(PositioningStatus::WIDTH, v.positioning_status.to_wire())?;
    w.write_bits(1, 0)?;

    w.write_bits(1, 0)
}

pub(crate) fn decode_wpt_fine_positioning_res(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<WptFinePositioningRes> {
    r.read_bits(1)?;
    let header = header::decode(r, limits)?;

    let response_code = read_response_code(r)?;

    r.read_bits(1)?;
    r.read_bits(1)?;
    let positioning_status = PositioningStatus::from_wire(r.read_bits(PositioningStatus::WIDTH)?);
    r.read_bits(1)?;

    r.read_bits(1)?;

    Ok(WptFinePositioningRes {
        header,
        response_code,
        positioning_status,
    })
}

pub(crate) fn encode_wpt_charge_loop_req(
    w: &mut BitWriter<'_>,
    v: &WptChargeLoopReq,
) -> Result<()> {
    w.write_bits(1, 0)?;
    header::encode(w, &v.header)?;
    write_ev_processing(w, v.ev_processing)?;
    w.write_bits(1, 0)
}

pub(crate) fn decode_wpt_charge_loop_req(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<WptChargeLoopReq> {
    r.read_bits(1)?;
    let header = header::decode(r, limits)?;
    let ev_processing = read_ev_processing(r)?;
    r.read_bits(1)?;
    Ok(WptChargeLoopReq {
        header,
        ev_processing,
    })
}

pub(crate) fn encode_wpt_charge_loop_res(
    w: &mut BitWriter<'_>,
    v: &WptChargeLoopRes,
) -> Result<()> {
    w.write_bits(1, 0)?;
    header::encode(w, &v.header)?;
    write_response_code(w, v.response_code)?;
    write_evse_processing(w, v.evse_processing)?;
    w.write_bits(1, 0)
}

pub(crate) fn decode_wpt_charge_loop_res(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<WptChargeLoopRes> {
    r.read_bits(1)?;
    let header = header::decode(r, limits)?;
    let response_code = read_response_code(r)?;
    let evse_processing = read_evse_processing(r)?;
    r.read_bits(1)?;
    Ok(WptChargeLoopRes {
        header,
        response_code,
        evse_processing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_header() -> MessageHeader {
        MessageHeader::new(vec![0x0A, 0x1B, 0x2C, 0x3D], 1_672_531_200)
    }

    fn codec<T>(
        encode: impl FnOnce(&mut BitWriter<'_>) -> Result<()>,
        decode: impl FnOnce(&mut BitReader<'_>, &DecodeLimits) -> Result<T>,
    ) -> T {
        let mut buf = [0u8; 256];
        let mut w = BitWriter::new(&mut buf, 0);
        encode(&mut w).unwrap();
        let len = w.len();
        let mut r = BitReader::new(&buf[..len], 0);
        let out = decode(&mut r, &DecodeLimits::default()).unwrap();
        assert_eq!(r.len(), len);
        out
    }

    #[test]
    fn alignment_check_req_round_trip() {
        let v = WptAlignmentCheckReq {
            header: test_header(),
        };
        let decoded = codec(
            |w| encode_wpt_alignment_check_req(w, &v),
            decode_wpt_alignment_check_req,
        );
        assert_eq!(decoded, v);
    }

    #[test]
    fn alignment_check_res_every_offset_combination() {
        let offset = |e, v| Some(RationalNumber::new(e, v));
        for mask in 0u8..8 {
            let v = WptAlignmentCheckRes {
                header: test_header(),
                response_code: ResponseCode::Ok,
                alignment_status: AlignmentStatus::InProgress,
                alignment_offset_x: if mask & 1 != 0 { offset(-2, 150) } else { None },
                alignment_offset_y: if mask & 2 != 0 { offset(-2, -80) } else { None },
                alignment_offset_z: if mask & 4 != 0 { offset(0, 3) } else { None },
            };
            let decoded = codec(
                |w| encode_wpt_alignment_check_res(w, &v),
                decode_wpt_alignment_check_res,
            );
            assert_eq!(decoded, v, "offset mask {mask}");
        }
    }

    #[test]
    fn fine_positioning_round_trips() {
        let req = WptFinePositioningReq {
            header: test_header(),
        };
        let decoded = codec(
            |w| encode_wpt_fine_positioning_req(w, &req),
            decode_wpt_fine_positioning_req,
        );
        assert_eq!(decoded, req);

        let res = WptFinePositioningRes {
            header: test_header(),
            response_code: ResponseCode::Ok,
            positioning_status: PositioningStatus::Failed,
        };
        let decoded = codec(
            |w| encode_wpt_fine_positioning_res(w, &res),
            decode_wpt_fine_positioning_res,
        );
        assert_eq!(decoded, res);
    }

    #[test]
    fn charge_loop_round_trips() {
        let req = WptChargeLoopReq {
            header: test_header(),
            ev_processing: EvProcessing::Finished,
        };
        let decoded = codec(
            |w| encode_wpt_charge_loop_req(w, &req),
            decode_wpt_charge_loop_req,
        );
        assert_eq!(decoded, req);

        let res = WptChargeLoopRes {
            header: test_header(),
            response_code: ResponseCode::Ok,
            evse_processing: EvseProcessing::Ongoing,
        };
        let decoded = codec(
            |w| encode_wpt_charge_loop_res(w, &res),
            decode_wpt_charge_loop_res,
        );
        assert_eq!(decoded, res);
    }
}
