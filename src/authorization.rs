//! Authorization negotiation messages.
//!
//! AuthorizationSetupReq/Res agree on the authorization service (EIM or
//! Plug & Charge), AuthorizationReq/Res run it. The EIM mode bodies are
//! empty by schema; on the wire they appear as a bare bracket pair. The
//! mode selection is a 2-bit choice: 0 = EIM, 1 = PnC, 2 = neither.

use crate::bitstream::{BitReader, BitWriter};
use crate::common::{
    decode_certificate_chain, encode_certificate_chain, read_evse_processing, read_response_code,
    read_string_list, read_uint16, write_evse_processing, write_response_code, write_string_list,
    write_uint16, CertificateChain,
};
use crate::enums::{EvseProcessing, ResponseCode};
use crate::header::{self, MessageHeader};
use crate::limits::DecodeLimits;
use crate::{binary, string, Error, Result};

/// EV → EVSE: asks which authorization services are available.
/// Header-only body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthorizationSetupReq {
    pub header: MessageHeader,
}

/// EVSE → EV: offered services and the challenge for PnC.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthorizationSetupRes {
    pub header: MessageHeader,
    pub response_code: ResponseCode,
    pub authorization_services: Vec<String>,
    pub certificate_installation_service: bool,
    pub authorization_mode: Option<SetupResAuthorizationMode>,
}

/// Mode detail attached to an [`AuthorizationSetupRes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupResAuthorizationMode {
    /// External identification means; no fields by schema.
    Eim,
    Pnc(PncSetupResAuthorizationMode),
}

/// Plug & Charge detail of the setup response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PncSetupResAuthorizationMode {
    pub gen_challenge: Vec<u8>,
    pub supported_providers: Vec<String>,
}

/// EV → EVSE: runs the selected authorization service.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthorizationReq {
    pub header: MessageHeader,
    pub selected_authorization_service: String,
    pub authorization_mode: Option<ReqAuthorizationMode>,
}

/// Mode detail attached to an [`AuthorizationReq`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReqAuthorizationMode {
    /// External identification means; no fields by schema.
    Eim,
    Pnc(PncReqAuthorizationMode),
}

/// Plug & Charge detail of the authorization request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PncReqAuthorizationMode {
    pub gen_challenge: Option<Vec<u8>>,
    pub contract_certificate_chain: Option<CertificateChain>,
}

/// EVSE → EV: authorization verdict and processing state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthorizationRes {
    pub header: MessageHeader,
    pub response_code: ResponseCode,
    pub evse_processing: EvseProcessing,
}

pub(crate) fn encode_authorization_setup_req(
    w: &mut BitWriter<'_>,
    v: &AuthorizationSetupReq,
) -> Result<()> {
    w.write_bits(1, 0)?;
    header::encode(w, &v.header)?;
    w.write_bits(1, 0)
}

pub(crate) fn decode_authorization_setup_req(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<AuthorizationSetupReq> {
    r.read_bits(1)?;
    let header = header::decode(r, limits)?;
    r.read_bits(1)?;
    Ok(AuthorizationSetupReq { header })
}

pub(crate) fn encode_authorization_setup_res(
    w: &mut BitWriter<'_>,
    v: &AuthorizationSetupRes,
) -> Result<()> {
    w.write_bits(1, 0)?;
    header::encode(w, &v.header)?;

    write_response_code(w, v.response_code)?;

    // AuthorizationServices: counted list of plain strings
    w.write_bits(1, 0)?;
    write_string_list(w, &v.authorization_services)?;
    w.write_bits(1, 0)?;

    // CertificateInstallationService: boolean with value-type marker
    w.write_bits(1, 0)?;
    w.write_bits(1, 0)?;
    w.write_bits(1, u32::from(v.certificate_installation_service))?;
    w.write_bits(1, 0)?;

    match &v.authorization_mode {
        Some(SetupResAuthorizationMode::Eim) => {
            w.write_bits(2, 0)?;
            w.write_bits(1, 0)?;
            w.write_bits(1, 0)?;
            w.write_bits(1, 0)
        }
        Some(SetupResAuthorizationMode::Pnc(pnc)) => {
            w.write_bits(2, 1)?;
            w.write_bits(1, 0)?;
            encode_pnc_setup_res_mode(w, pnc)?;
            w.write_bits(1, 0)?;
            w.write_bits(1, 0)
        }
        None => w.write_bits(2, 2),
    }
}

fn encode_pnc_setup_res_mode(
    w: &mut BitWriter<'_>,
    v: &PncSetupResAuthorizationMode,
) -> Result<()> {
    // GenChallenge: hexBinary field
    w.write_bits(1, 0)?;
    w.write_bits(1, 0)?;
    write_uint16(w, v.gen_challenge.len() as u16)?;
    binary::encode_raw(w, &v.gen_challenge)?;
    w.write_bits(1, 0)?;

    // SupportedProviders: counted list of plain strings
    w.write_bits(1, 0)?;
    write_string_list(w, &v.supported_providers)?;
    w.write_bits(1, 0)
}

pub(crate) fn decode_authorization_setup_res(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<AuthorizationSetupRes> {
    r.read_bits(1)?;
    let header = header::decode(r, limits)?;

    let response_code = read_response_code(r)?;

    r.read_bits(1)?;
    let authorization_services = read_string_list(r, limits)?;
    r.read_bits(1)?;

    r.read_bits(1)?;
    r.read_bits(1)?;
    let certificate_installation_service = r.read_bits(1)? == 1;
    r.read_bits(1)?;

    let authorization_mode = match r.read_bits(2)? {
        0 => {
            r.read_bits(1)?;
            r.read_bits(1)?;
            r.read_bits(1)?;
            Some(SetupResAuthorizationMode::Eim)
        }
        1 => {
            r.read_bits(1)?;
            let pnc = decode_pnc_setup_res_mode(r, limits)?;
            r.read_bits(1)?;
            r.read_bits(1)?;
            Some(SetupResAuthorizationMode::Pnc(pnc))
        }
        _ => None,
    };

    Ok(AuthorizationSetupRes {
        header,
        response_code,
        authorization_services,
        certificate_installation_service,
        authorization_mode,
    })
}

fn decode_pnc_setup_res_mode(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<PncSetupResAuthorizationMode> {
    r.read_bits(1)?;
    r.read_bits(1)?;
    let len = usize::from(read_uint16(r)?);
    if len > limits.max_field_len {
        return Err(Error::Overflow);
    }
    let gen_challenge = binary::decode_raw(r, len)?;
    r.read_bits(1)?;

    r.read_bits(1)?;
    let supported_providers = read_string_list(r, limits)?;
    r.read_bits(1)?;

    Ok(PncSetupResAuthorizationMode {
        gen_challenge,
        supported_providers,
    })
}

pub(crate) fn encode_authorization_req(
    w: &mut BitWriter<'_>,
    v: &AuthorizationReq,
) -> Result<()> {
    w.write_bits(1, 0)?;
    header::encode(w, &v.header)?;

    // SelectedAuthorizationService: plain string
    w.write_bits(1, 0)?;
    string::encode(w, &v.selected_authorization_service)?;
    w.write_bits(1, 0)?;

    match &v.authorization_mode {
        Some(ReqAuthorizationMode::Eim) => {
            w.write_bits(2, 0)?;
            w.write_bits(1, 0)?;
            w.write_bits(1, 0)?;
            w.write_bits(1, 0)
        }
        Some(ReqAuthorizationMode::Pnc(pnc)) => {
            w.write_bits(2, 1)?;
            w.write_bits(1, 0)?;
            encode_pnc_req_mode(w, pnc)?;
            w.write_bits(1, 0)?;
            w.write_bits(1, 0)
        }
        None => w.write_bits(2, 2),
    }
}

fn encode_pnc_req_mode(w: &mut BitWriter<'_>, v: &PncReqAuthorizationMode) -> Result<()> {
    match &v.gen_challenge {
        Some(challenge) => {
            w.write_bits(1, 1)?;
            w.write_bits(1, 0)?;
            w.write_bits(1, 0)?;
            write_uint16(w, challenge.len() as u16)?;
            binary::encode_raw(w, challenge)?;
            w.write_bits(1, 0)?;
        }
        None => w.write_bits(1, 0)?,
    }

    match &v.contract_certificate_chain {
        Some(chain) => {
            w.write_bits(1, 1)?;
            w.write_bits(1, 0)?;
            encode_certificate_chain(w, chain)?;
            w.write_bits(1, 0)
        }
        None => w.write_bits(1, 0),
    }
}

pub(crate) fn decode_authorization_req(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<AuthorizationReq> {
    r.read_bits(1)?;
    let header = header::decode(r, limits)?;

    r.read_bits(1)?;
    let selected_authorization_service = string::decode(r, limits.max_field_len)?;
    r.read_bits(1)?;

    let authorization_mode = match r.read_bits(2)? {
        0 => {
            r.read_bits(1)?;
            r.read_bits(1)?;
            r.read_bits(1)?;
            Some(ReqAuthorizationMode::Eim)
        }
        1 => {
            r.read_bits(1)?;
            let pnc = decode_pnc_req_mode(r, limits)?;
            r.read_bits(1)?;
            r.read_bits(1)?;
            Some(ReqAuthorizationMode::Pnc(pnc))
        }
        _ => None,
    };

    Ok(AuthorizationReq {
        header,
        selected_authorization_service,
        authorization_mode,
    })
}

fn decode_pnc_req_mode(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<PncReqAuthorizationMode> {
    let gen_challenge = if r.read_bits(1)? == 1 {
        r.read_bits(1)?;
        r.read_bits(1)?;
        let len = usize::from(read_uint16(r)?);
        if len > limits.max_field_len {
            return Err(Error::Overflow);
        }
        let challenge = binary::decode_raw(r, len)?;
        r.read_bits(1)?;
        Some(challenge)
    } else {
        None
    };

    let contract_certificate_chain = if r.read_bits(1)? == 1 {
        r.read_bits(1)?;
        let chain = decode_certificate_chain(r, limits)?;
        r.read_bits(1)?;
        Some(chain)
    } else {
        None
    };

    Ok(PncReqAuthorizationMode {
        gen_challenge,
        contract_certificate_chain,
    })
}

pub(crate) fn encode_authorization_res(
    w: &mut BitWriter<'_>,
    v: &AuthorizationRes,
) -> Result<()> {
    w.write_bits(1, 0)?;
    header::encode(w, &v.header)?;
    write_response_code(w, v.response_code)?;
    write_evse_processing(w, v.evse_processing)?;
    w.write_bits(1, 0)
}

pub(crate) fn decode_authorization_res(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<AuthorizationRes> {
    r.read_bits(1)?;
    let header = header::decode(r, limits)?;
    let response_code = read_response_code(r)?;
    let evse_processing = read_evse_processing(r)?;
    r.read_bits(1)?;
    Ok(AuthorizationRes {
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
    fn setup_req_round_trip() {
        let v = AuthorizationSetupReq {
            header: test_header(),
        };
        let decoded = codec(
            |w| encode_authorization_setup_req(w, &v),
            decode_authorization_setup_req,
        );
        assert_eq!(decoded, v);
    }

    #[test]
    fn setup_req_is_compact() {
        // Header-only body: 0x80 fehlt hier (Dispatcher-Sache), aber der
        // Body selbst bleibt unter 16 Bytes.
        let v = AuthorizationSetupReq {
            header: test_header(),
        };
        let mut buf = [0u8; 64];
        let mut w = BitWriter::new(&mut buf, 0);
        encode_authorization_setup_req(&mut w, &v).unwrap();
        assert!(w.len() <= 16, "body took {} bytes", w.len());
    }

    #[test]
    fn setup_res_without_mode() {
        let v = AuthorizationSetupRes {
            header: test_header(),
            response_code: ResponseCode::Ok,
            authorization_services: vec!["EIM".into(), "PnC".into()],
            certificate_installation_service: true,
            authorization_mode: None,
        };
        let decoded = codec(
            |w| encode_authorization_setup_res(w, &v),
            decode_authorization_setup_res,
        );
        assert_eq!(decoded, v);
    }

    #[test]
    fn setup_res_with_eim_mode() {
        let v = AuthorizationSetupRes {
            header: test_header(),
            response_code: ResponseCode::Ok,
            authorization_services: vec!["EIM".into()],
            certificate_installation_service: false,
            authorization_mode: Some(SetupResAuthorizationMode::Eim),
        };
        let decoded = codec(
            |w| encode_authorization_setup_res(w, &v),
            decode_authorization_setup_res,
        );
        assert_eq!(decoded, v);
    }

    #[test]
    fn setup_res_with_pnc_mode() {
        let v = AuthorizationSetupRes {
            header: test_header(),
            response_code: ResponseCode::Ok,
            authorization_services: vec!["PnC".into()],
            certificate_installation_service: true,
            authorization_mode: Some(SetupResAuthorizationMode::Pnc(
                PncSetupResAuthorizationMode {
                    gen_challenge: vec![0x11; 16],
                    supported_providers: vec!["provider-a".into(), "provider-b".into()],
                },
            )),
        };
        let decoded = codec(
            |w| encode_authorization_setup_res(w, &v),
            decode_authorization_setup_res,
        );
        assert_eq!(decoded, v);
    }

    #[test]
    fn req_mode_branches() {
        let base = AuthorizationReq {
            header: test_header(),
            selected_authorization_service: "PnC".into(),
            authorization_mode: None,
        };
        let variants = [
            base.clone(),
            AuthorizationReq {
                authorization_mode: Some(ReqAuthorizationMode::Eim),
                ..base.clone()
            },
            AuthorizationReq {
                authorization_mode: Some(ReqAuthorizationMode::Pnc(PncReqAuthorizationMode {
                    gen_challenge: Some(vec![0xAA; 16]),
                    contract_certificate_chain: Some(CertificateChain {
                        certificates: vec![b"CERT123".to_vec()],
                    }),
                })),
                ..base.clone()
            },
            AuthorizationReq {
                authorization_mode: Some(ReqAuthorizationMode::Pnc(
                    PncReqAuthorizationMode::default(),
                )),
                ..base.clone()
            },
        ];
        for v in variants {
            let decoded = codec(
                |w| encode_authorization_req(w, &v),
                decode_authorization_req,
            );
            assert_eq!(decoded, v);
        }
    }

    #[test]
    fn pnc_req_empty_challenge_round_trips() {
        // Some(vec![]) bleibt Some: Praesenz haengt an der Option, nicht
        // an der Laenge.
        let v = AuthorizationReq {
            header: test_header(),
            selected_authorization_service: "PnC".into(),
            authorization_mode: Some(ReqAuthorizationMode::Pnc(PncReqAuthorizationMode {
                gen_challenge: Some(vec![]),
                contract_certificate_chain: None,
            })),
        };
        let decoded = codec(
            |w| encode_authorization_req(w, &v),
            decode_authorization_req,
        );
        assert_eq!(decoded, v);
    }

    #[test]
    fn res_round_trip() {
        let v = AuthorizationRes {
            header: test_header(),
            response_code: ResponseCode::OkCertificateExpiresSoon,
            evse_processing: EvseProcessing::OngoingWaitingForCustomerInteraction,
        };
        let decoded = codec(
            |w| encode_authorization_res(w, &v),
            decode_authorization_res,
        );
        assert_eq!(decoded, v);
    }
}
