//! Session establishment and teardown messages.
//!
//! SessionSetupReq/Res open a charging session (grammar states 404-408),
//! SessionStopReq/Res close or pause it (460-465). EVCCID and EVSEID
//! are schema-typed strings (+2 length prefix); the two optional
//! termination strings of SessionStopReq sit behind a two-stage 2-bit
//! choice.

use crate::bitstream::{BitReader, BitWriter};
use crate::common::{read_response_code, write_response_code};
use crate::enums::{ChargingSession, ResponseCode};
use crate::header::{self, MessageHeader};
use crate::limits::DecodeLimits;
use crate::{string, Result};

/// EV → EVSE: identifies the vehicle controller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionSetupReq {
    pub header: MessageHeader,
    /// EVCC identifier octets (typically the MAC address).
    pub evccid: Vec<u8>,
}

/// EVSE → EV: confirms the session and names the charging station.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionSetupRes {
    pub header: MessageHeader,
    pub response_code: ResponseCode,
    /// EVSE identifier octets.
    pub evse_id: Vec<u8>,
}

/// EV → EVSE: pause or terminate the session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionStopReq {
    pub header: MessageHeader,
    pub charging_session: ChargingSession,
    pub ev_termination_code: Option<String>,
    pub ev_termination_explanation: Option<String>,
}

/// EVSE → EV: acknowledges the stop.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionStopRes {
    pub header: MessageHeader,
    pub response_code: ResponseCode,
}

pub(crate) fn encode_session_setup_req(
    w: &mut BitWriter<'_>,
    v: &SessionSetupReq,
) -> Result<()> {
    w.write_bits(1, 0)?;
    header::encode(w, &v.header)?;

    // EVCCID: schema-typed string
    w.write_bits(1, 0)?;
    w.write_bits(1, 0)?;
    string::encode_schema(w, &v.evccid)?;
    w.write_bits(1, 0)?;

    w.write_bits(1, 0)
}

pub(crate) fn decode_session_setup_req(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<SessionSetupReq> {
    r.read_bits(1)?;
    let header = header::decode(r, limits)?;

    r.read_bits(1)?;
    r.read_bits(1)?;
    let evccid = string::decode_schema(r, limits.max_field_len)?;
    r.read_bits(1)?;

    r.read_bits(1)?;

    Ok(SessionSetupReq { header, evccid })
}

pub(crate) fn encode_session_setup_res(
    w: &mut BitWriter<'_>,
    v: &SessionSetupRes,
) -> Result<()> {
    w.write_bits(1, 0)?;
    header::encode(w, &v.header)?;

    write_response_code(w, v.response_code)?;

    // EVSEID: schema-typed string
    w.write_bits(1, 0)?;
    w.write_bits(1, 0)?;
    string::encode_schema(w, &v.evse_id)?;
    w.write_bits(1, 0)?;

    w.write_bits(1, 0)
}

pub(crate) fn decode_session_setup_res(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<SessionSetupRes> {
    r.read_bits(1)?;
    let header = header::decode(r, limits)?;

    let response_code = read_response_code(r)?;

    r.read_bits(1)?;
    r.read_bits(1)?;
    let evse_id = string::decode_schema(r, limits.max_field_len)?;
    r.read_bits(1)?;

    r.read_bits(1)?;

    Ok(SessionSetupRes {
        header,
        response_code,
        evse_id,
    })
}

pub(crate) fn encode_session_stop_req(
    w: &mut BitWriter<'_>,
    v: &SessionStopReq,
) -> Result<()> {
    w.write_bits(1, 0)?;
    header::encode(w, &v.header)?;

    // ChargingSession enum field
    w.write_bits(1, 0)?;
    w.write_bits(1, 0)?;
    w.write_bits(ChargingSession::WIDTH, v.charging_session.to_wire())?;
    w.write_bits(1, 0)?;

    // Two-stage choice over the optional termination strings:
    // 0 = EVTerminationCode (explanation may follow), 1 = explanation
    // only, 2 = neither.
    match (&v.ev_termination_code, &v.ev_termination_explanation) {
        (Some(code), explanation) => {
            w.write_bits(2, 0)?;
            w.write_bits(1, 0)?;
            string::encode_schema(w, code.as_bytes())?;
            w.write_bits(1, 0)?;

            match explanation {
                Some(explanation) => {
                    w.write_bits(2, 0)?;
                    w.write_bits(1, 0)?;
                    string::encode_schema(w, explanation.as_bytes())?;
                    w.write_bits(1, 0)?;
                    w.write_bits(1, 0)
                }
                None => w.write_bits(2, 1),
            }
        }
        (None, Some(explanation)) => {
            w.write_bits(2, 1)?;
            w.write_bits(1, 0)?;
            string::encode_schema(w, explanation.as_bytes())?;
            w.write_bits(1, 0)?;
            w.write_bits(1, 0)
        }
        (None, None) => w.write_bits(2, 2),
    }
}

pub(crate) fn decode_session_stop_req(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<SessionStopReq> {
    r.read_bits(1)?;
    let header = header::decode(r, limits)?;

    r.read_bits(1)?;
    r.read_bits(1)?;
    let charging_session = ChargingSession::from_wire(r.read_bits(ChargingSession::WIDTH)?);
    r.read_bits(1)?;

    let mut ev_termination_code = None;
    let mut ev_termination_explanation = None;

    match r.read_bits(2)? {
        0 => {
            r.read_bits(1)?;
            ev_termination_code = Some(string::decode_schema_text(r, limits.max_field_len)?);
            r.read_bits(1)?;

            if r.read_bits(2)? == 0 {
                r.read_bits(1)?;
                ev_termination_explanation =
                    Some(string::decode_schema_text(r, limits.max_field_len)?);
                r.read_bits(1)?;
                r.read_bits(1)?;
            }
        }
        1 => {
            r.read_bits(1)?;
            ev_termination_explanation =
                Some(string::decode_schema_text(r, limits.max_field_len)?);
            r.read_bits(1)?;
            r.read_bits(1)?;
        }
        _ => {}
    }

    Ok(SessionStopReq {
        header,
        charging_session,
        ev_termination_code,
        ev_termination_explanation,
    })
}

pub(crate) fn encode_session_stop_res(
    w: &mut BitWriter<'_>,
    v: &SessionStopRes,
) -> Result<()> {
    w.write_bits(1, 0)?;
    header::encode(w, &v.header)?;
    write_response_code(w, v.response_code)?;
    w.write_bits(1, 0)
}

pub(crate) fn decode_session_stop_res(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<SessionStopRes> {
    r.read_bits(1)?;
    let header = header::decode(r, limits)?;
    let response_code = read_response_code(r)?;
    r.read_bits(1)?;
    Ok(SessionStopRes {
        header,
        response_code,
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
    fn session_setup_req_round_trip() {
        let v = SessionSetupReq {
            header: test_header(),
            evccid: vec![0x0A, 0x1B, 0x2C, 0x3D, 0x4E, 0x5F],
        };
        let decoded = codec(
            |w| encode_session_setup_req(w, &v),
            decode_session_setup_req,
        );
        assert_eq!(decoded, v);
    }

    #[test]
    fn session_setup_res_round_trip() {
        let v = SessionSetupRes {
            header: test_header(),
            response_code: ResponseCode::OkNewSessionEstablished,
            evse_id: b"DE*ABC*E123".to_vec(),
        };
        let decoded = codec(
            |w| encode_session_setup_res(w, &v),
            decode_session_setup_res,
        );
        assert_eq!(decoded, v);
    }

    #[test]
    fn session_stop_req_all_choice_branches() {
        let base = SessionStopReq {
            header: test_header(),
            charging_session: ChargingSession::Terminate,
            ev_termination_code: None,
            ev_termination_explanation: None,
        };
        let variants = [
            base.clone(),
            SessionStopReq {
                ev_termination_code: Some("E_FAULT".into()),
                ..base.clone()
            },
            SessionStopReq {
                ev_termination_explanation: Some("user pressed stop".into()),
                ..base.clone()
            },
            SessionStopReq {
                ev_termination_code: Some("E_FAULT".into()),
                ev_termination_explanation: Some("isolation failure".into()),
                ..base.clone()
            },
        ];
        for v in variants {
            let decoded = codec(
                |w| encode_session_stop_req(w, &v),
                decode_session_stop_req,
            );
            assert_eq!(decoded, v);
        }
    }

    #[test]
    fn session_stop_req_pause() {
        let v = SessionStopReq {
            header: test_header(),
            charging_session: ChargingSession::Pause,
            ev_termination_code: None,
            ev_termination_explanation: None,
        };
        let decoded = codec(
            |w| encode_session_stop_req(w, &v),
            decode_session_stop_req,
        );
        assert_eq!(decoded.charging_session, ChargingSession::Pause);
    }

    #[test]
    fn session_stop_res_round_trip() {
        let v = SessionStopRes {
            header: test_header(),
            response_code: ResponseCode::Failed,
        };
        let decoded = codec(
            |w| encode_session_stop_res(w, &v),
            decode_session_stop_res,
        );
        assert_eq!(decoded, v);
    }
}
