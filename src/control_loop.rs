//! Control-loop mode messages: header-only bodies in both directions.

use crate::bitstream::{BitReader, BitWriter};
use crate::header::{self, MessageHeader};
use crate::limits::DecodeLimits;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClReqControlMode {
    pub header: MessageHeader,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClResControlMode {
    pub header: MessageHeader,
}

pub(crate) fn encode_cl_req_control_mode(
    w: &mut BitWriter<'_>,
    v: &ClReqControlMode,
) -> Result<()> {
    w.write_bits(1, 0)?;
    header::encode(w, &v.header)?;
    w.write_bits(1, 0)
}

pub(crate) fn decode_cl_req_control_mode(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<ClReqControlMode> {
    r.read_bits(1)?;
    let header = header::decode(r, limits)?;
    r.read_bits(1)?;
    Ok(ClReqControlMode { header })
}

pub(crate) fn encode_cl_res_control_mode(
    w: &mut BitWriter<'_>,
    v: &ClResControlMode,
) -> Result<()> {
    w.write_bits(1, 0)?;
    header::encode(w, &v.header)?;
    w.write_bits(1, 0)
}

pub(crate) fn decode_cl_res_control_mode(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<ClResControlMode> {
    r.read_bits(1)?;
    let header = header::decode(r, limits)?;
    r.read_bits(1)?;
    Ok(ClResControlMode { header })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        let header = MessageHeader::new(vec![1, 2, 3, 4, 5, 6, 7, 8], u64::MAX);

        let req = ClReqControlMode {
            header: header.clone(),
        };
        let mut buf = [0u8; 64];
        let mut w = BitWriter::new(&mut buf, 0);
        encode_cl_req_control_mode(&mut w, &req).unwrap();
        let len = w.len();
        let mut r = BitReader::new(&buf[..len], 0);
        assert_eq!(
            decode_cl_req_control_mode(&mut r, &DecodeLimits::default()).unwrap(),
            req
        );

        let res = ClResControlMode { header };
        let mut buf = [0u8; 64];
        let mut w = BitWriter::new(&mut buf, 0);
        encode_cl_res_control_mode(&mut w, &res).unwrap();
        let len = w.len();
        let mut r = BitReader::new(&buf[..len], 0);
        assert_eq!(
            decode_cl_res_control_mode(&mut r, &DecodeLimits::default()).unwrap(),
            res
        );
    }
}
