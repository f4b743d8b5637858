//! Power delivery messages.
//!
//! PowerDeliveryReq carries the EV's charge progress plus two
//! independent optionals behind a 3-bit selector (0=both, 1=profile
//! only, 2=channel only, 3=neither); the message END bit follows the
//! selector branch in every case.

use crate::bitstream::{BitReader, BitWriter};
use crate::common::{
    decode_ev_power_profile, encode_ev_power_profile, read_ev_processing, read_response_code,
    read_uint16, write_ev_processing, write_response_code, write_uint16, EvPowerProfile,
    EvseStatus,
};
use crate::enums::{EvProcessing, ResponseCode};
use crate::header::{self, MessageHeader};
use crate::limits::DecodeLimits;
use crate::{string, Result};

/// EV → EVSE: start, renegotiate or stop power transfer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PowerDeliveryReq {
    pub header: MessageHeader,
    pub ev_processing: EvProcessing,
    pub charge_progress: String,
    pub ev_power_profile: Option<EvPowerProfile>,
    pub bpt_channel_selection: Option<String>,
}

/// EVSE → EV: acknowledges, optionally carrying a notification block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PowerDeliveryRes {
    pub header: MessageHeader,
    pub response_code: ResponseCode,
    pub evse_status: Option<EvseStatus>,
}

pub(crate) fn encode_power_delivery_req(
    w: &mut BitWriter<'_>,
    v: &PowerDeliveryReq,
) -> Result<()> {
    w.write_bits(1, 0)?;
    header::encode(w, &v.header)?;

    write_ev_processing(w, v.ev_processing)?;

    // ChargeProgress: plain string
    w.write_bits(1, 0)?;
    string::encode(w, &v.charge_progress)?;
    w.write_bits(1, 0)?;

    match (&v.ev_power_profile, &v.bpt_channel_selection) {
        (Some(profile), Some(channel)) => {
            w.write_bits(3, 0)?;
            w.write_bits(1, 0)?;
            encode_ev_power_profile(w, profile)?;
            w.write_bits(1, 0)?;
            w.write_bits(1, 0)?;
            string::encode(w, channel)?;
            w.write_bits(1, 0)?;
        }
        (Some(profile), None) => {
            w.write_bits(3, 1)?;
            w.write_bits(1, 0)?;
            encode_ev_power_profile(w, profile)?;
            w.write_bits(1, 0)?;
        }
        (None, Some(channel)) => {
            w.write_bits(3, 2)?;
            w.write_bits(1, 0)?;
            string::encode(w, channel)?;
            w.write_bits(1, 0)?;
        }
        (None, None) => w.write_bits(3, 3)?,
    }

    w.write_bits(1, 0)
}

pub(crate) fn decode_power_delivery_req(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<PowerDeliveryReq> {
    r.read_bits(1)?;
    let header = header::decode(r, limits)?;

    let ev_processing = read_ev_processing(r)?;

    r.read_bits(1)?;
    let charge_progress = string::decode(r, limits.max_field_len)?;
    r.read_bits(1)?;

    let mut ev_power_profile = None;
    let mut bpt_channel_selection = None;

    match r.read_bits(3)? {
        0 => {
            r.read_bits(1)?;
            ev_power_profile = Some(decode_ev_power_profile(r, limits)?);
            r.read_bits(1)?;
            r.read_bits(1)?;
            bpt_channel_selection = Some(string::decode(r, limits.max_field_len)?);
            r.read_bits(1)?;
        }
        1 => {
            r.read_bits(1)?;
            ev_power_profile = Some(decode_ev_power_profile(r, limits)?);
            r.read_bits(1)?;
        }
        2 => {
            r.read_bits(1)?;
            bpt_channel_selection = Some(string::decode(r, limits.max_field_len)?);
            r.read_bits(1)?;
        }
        _ => {}
    }

    r.read_bits(1)?;

    Ok(PowerDeliveryReq {
        header,
        ev_processing,
        charge_progress,
        ev_power_profile,
        bpt_channel_selection,
    })
}

pub(crate) fn encode_power_delivery_res(
    w: &mut BitWriter<'_>,
    v: &PowerDeliveryRes,
) -> Result<()> {
    w.write_bits(1, 0)?;
    header::encode(w, &v.header)?;

    write_response_code(w, v.response_code)?;

    match &v.evse_status {
        Some(status) => {
            w.write_bits(1, 1)?;
            w.write_bits(1, 0)?;
            write_uint16(w, status.notification_max_delay)?;
            string::encode(w, &status.evse_notification)?;
            w.write_bits(1, 0)?;
        }
        None => w.write_bits(1, 0)?,
    }

    w.write_bits(1, 0)
}

pub(crate) fn decode_power_delivery_res(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<PowerDeliveryRes> {
    r.read_bits(1)?;
    let header = header::decode(r, limits)?;

    let response_code = read_response_code(r)?;

    let evse_status = if r.read_bits(1)? == 1 {
        r.read_bits(1)?;
        let notification_max_delay = read_uint16(r)?;
        let evse_notification = string::decode(r, limits.max_field_len)?;
        r.read_bits(1)?;
        Some(EvseStatus {
            notification_max_delay,
            evse_notification,
        })
    } else {
        None
    };

    r.read_bits(1)?;

    Ok(PowerDeliveryRes {
        header,
        response_code,
        evse_status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{EvPowerProfileEntry, RationalNumber};

    fn test_header() -> MessageHeader {
        MessageHeader::new(vec![0x0A, 0x1B, 0x2C, 0x3D], 1_672_531_200)
    }

    fn profile() -> EvPowerProfile {
        EvPowerProfile {
            time_anchor: 1_672_531_300,
            entries: vec![EvPowerProfileEntry {
                duration: 3600,
                power: RationalNumber::new(3, 11),
            }],
        }
    }

    fn codec<T>(
        encode: impl FnOnce(&mut BitWriter<'_>) -> Result<()>,
        decode: impl FnOnce(&mut BitReader<'_>, &DecodeLimits) -> Result<T>,
    ) -> T {
        let mut buf = [0u8; 512];
        let mut w = BitWriter::new(&mut buf, 0);
        encode(&mut w).unwrap();
        let len = w.len();
        let mut r = BitReader::new(&buf[..len], 0);
        let out = decode(&mut r, &DecodeLimits::default()).unwrap();
        assert_eq!(r.len(), len);
        out
    }

    #[test]
    fn req_all_selector_branches() {
        let base = PowerDeliveryReq {
            header: test_header(),
            ev_processing: EvProcessing::Ongoing,
            charge_progress: "Start".into(),
            ev_power_profile: None,
            bpt_channel_selection: None,
        };
        let variants = [
            base.clone(),
            PowerDeliveryReq {
                ev_power_profile: Some(profile()),
                ..base.clone()
            },
            PowerDeliveryReq {
                bpt_channel_selection: Some("Charge".into()),
                ..base.clone()
            },
            PowerDeliveryReq {
                ev_power_profile: Some(profile()),
                bpt_channel_selection: Some("Discharge".into()),
                ..base.clone()
            },
        ];
        for v in variants {
            let decoded = codec(
                |w| encode_power_delivery_req(w, &v),
                decode_power_delivery_req,
            );
            assert_eq!(decoded, v);
        }
    }

    #[test]
    fn res_with_status() {
        let v = PowerDeliveryRes {
            header: test_header(),
            response_code: ResponseCode::Ok,
            evse_status: Some(EvseStatus {
                notification_max_delay: 30,
                evse_notification: "StopCharging".into(),
            }),
        };
        let decoded = codec(
            |w| encode_power_delivery_res(w, &v),
            decode_power_delivery_res,
        );
        assert_eq!(decoded, v);
    }

    #[test]
    fn res_without_status() {
        let v = PowerDeliveryRes {
            header: test_header(),
            response_code: ResponseCode::Failed,
            evse_status: None,
        };
        let decoded = codec(
            |w| encode_power_delivery_res(w, &v),
            decode_power_delivery_res,
        );
        assert_eq!(decoded, v);
    }
}
