//! Schedule exchange messages.

use crate::bitstream::{BitReader, BitWriter};
use crate::common::{
    read_evse_processing, read_response_code, read_uint16, write_evse_processing,
    write_response_code, write_uint16,
};
use crate::enums::{EvseProcessing, ResponseCode};
use crate::header::{self, MessageHeader};
use crate::limits::DecodeLimits;
use crate::Result;

/// EV → EVSE: opens schedule negotiation with the supported resolution.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScheduleExchangeReq {
    pub header: MessageHeader,
    pub maximum_supporting_points: u16,
}

/// EVSE → EV: negotiation state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScheduleExchangeRes {
    pub header: MessageHeader,
    pub response_code: ResponseCode,
    pub evse_processing: EvseProcessing,
}

pub(crate) fn encode_schedule_exchange_req(
    w: &mut BitWriter<'_>,
    v: &ScheduleExchangeReq,
) -> Result<()> {
    w.write_bits(1, 0)?;
    header::encode(w, &v.header)?;

    w.write_bits(1, 0)?;
    w.write_bits(1, 0)?;
    write_uint16(w, v.maximum_supporting_points)?;
    w.write_bits(1, 0)?;

    w.write_bits(1, 0)
}

pub(crate) fn decode_schedule_exchange_req(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<ScheduleExchangeReq> {
    r.read_bits(1)?;
    let header = header::decode(r, limits)?;

    r.read_bits(1)?;
    r.read_bits(1)?;
    let maximum_supporting_points = read_uint16(r)?;
    r.read_bits(1)?;

    r.read_bits(1)?;

    Ok(ScheduleExchangeReq {
        header,
        maximum_supporting_points,
    })
}

pub(crate) fn encode_schedule_exchange_res(
    w: &mut BitWriter<'_>,
    v: &ScheduleExchangeRes,
) -> Result<()> {
    w.write_bits(1, 0)?;
    header::encode(w, &v.header)?;
    write_response_code(w, v.response_code)?;
    write_evse_processing(w, v.evse_processing)?;
    w.write_bits(1, 0)
}

pub(crate) fn decode_schedule_exchange_res(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<ScheduleExchangeRes> {
    r.read_bits(1)?;
    let header = header::decode(r, limits)?;
    let response_code = read_response_code(r)?;
    let evse_processing = read_evse_processing(r)?;
    r.read_bits(1)?;
    Ok(ScheduleExchangeRes {
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

    #[test]
    fn req_round_trip() {
        let v = ScheduleExchangeReq {
            header: test_header(),
            maximum_supporting_points: 1024,
        };
        let mut buf = [0u8; 64];
        let mut w = BitWriter::new(&mut buf, 0);
        encode_schedule_exchange_req(&mut w, &v).unwrap();
        let len = w.len();
        let mut r = BitReader::new(&buf[..len], 0);
        let decoded = decode_schedule_exchange_req(&mut r, &DecodeLimits::default()).unwrap();
        assert_eq!(decoded, v);
        assert_eq!(r.len(), len);
    }

    #[test]
    fn res_round_trip() {
        let v = ScheduleExchangeRes {
            header: test_header(),
            response_code: ResponseCode::Ok,
            evse_processing: EvseProcessing::Finished,
        };
        let mut buf = [0u8; 64];
        let mut w = BitWriter::new(&mut buf, 0);
        encode_schedule_exchange_res(&mut w, &v).unwrap();
        let len = w.len();
        let mut r = BitReader::new(&buf[..len], 0);
        let decoded = decode_schedule_exchange_res(&mut r, &DecodeLimits::default()).unwrap();
        assert_eq!(decoded, v);
    }
}
