//! Certificate installation messages.
//!
//! Both directions move whole DER chains. The encrypted contract key is
//! a plain string (base64 by domain convention), DHPublicKey a
//! hexBinary field.

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

/// EV → EVSE: requests contract certificate installation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CertificateInstallationReq {
    pub header: MessageHeader,
    pub oem_provisioning_certificate_chain: CertificateChain,
    pub list_of_root_certificate_ids: Vec<String>,
}

/// EVSE → EV: delivers the contract certificate material.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CertificateInstallationRes {
    pub header: MessageHeader,
    pub response_code: ResponseCode,
    pub evse_processing: EvseProcessing,
    pub cps_certificate_chain: CertificateChain,
    pub contract_signature_encrypted_private_key: String,
    pub dh_public_key: Vec<u8>,
    pub contract_certificate_chain: CertificateChain,
}

pub(crate) fn encode_certificate_installation_req(
    w: &mut BitWriter<'_>,
    v: &CertificateInstallationReq,
) -> Result<()> {
    w.write_bits(1, 0)?;
    header::encode(w, &v.header)?;

    w.write_bits(1, 0)?;
    encode_certificate_chain(w, &v.oem_provisioning_certificate_chain)?;
    w.write_bits(1, 0)?;

    w.write_bits(1, 0)?;
    write_string_list(w, &v.list_of_root_certificate_ids)?;
    w.write_bits(1, 0)?;

    w.write_bits(1, 0)
}

pub(crate) fn decode_certificate_installation_req(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<CertificateInstallationReq> {
    r.read_bits(1)?;
    let header = header::decode(r, limits)?;

    r.read_bits(1)?;
    let oem_provisioning_certificate_chain = decode_certificate_chain(r, limits)?;
    r.read_bits(1)?;

    r.read_bits(1)?;
    let list_of_root_certificate_ids = read_string_list(r, limits)?;
    r.read_bits(1)?;

    r.read_bits(1)?;

    Ok(CertificateInstallationReq {
        header,
        oem_provisioning_certificate_chain,
        list_of_root_certificate_ids,
    })
}

pub(crate) fn encode_certificate_installation_res(
    w: &mut BitWriter<'_>,
    v: &CertificateInstallationRes,
) -> Result<()> {
    w.write_bits(1, 0)?;
    header::encode(w, &v.header)?;

    write_response_code(w, v.response_code)?;
    write_evse_processing(w, v.evse_processing)?;

    w.write_bits(1, 0)?;
    encode_certificate_chain(w, &v.cps_certificate_chain)?;
    w.write_bits(1, 0)?;

    // ContractSignatureEncryptedPrivateKey: plain string
    w.write_bits(1, 0)?;
    string::encode(w, &v.contract_signature_encrypted_private_key)?;
    w.write_bits(1, 0)?;

    // DHPublicKey: hexBinary field
    w.write_bits(1, 0)?;
    w.write_bits(1, 0)?;
    write_uint16(w, v.dh_public_key.len() as u16)?;
    binary::encode_raw(w, &v.dh_public_key)?;
    w.write_bits(1, 0)?;

    w.write_bits(1, 0)?;
    encode_certificate_chain(w, &v.contract_certificate_chain)?;
    w.write_bits(1, 0)?;

    w.write_bits(1, 0)
}

pub(crate) fn decode_certificate_installation_res(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<CertificateInstallationRes> {
    r.read_bits(1)?;
    let header = header::decode(r, limits)?;

    let response_code = read_response_code(r)?;
    let evse_processing = read_evse_processing(r)?;

    r.read_bits(1)?;
    let cps_certificate_chain = decode_certificate_chain(r, limits)?;
    r.read_bits(1)?;

    r.read_bits(1)?;
    let contract_signature_encrypted_private_key = string::decode(r, limits.max_field_len)?;
    r.read_bits(1)?;

    r.read_bits(1)?;
    r.read_bits(1)?;
    let len = usize::from(read_uint16(r)?);
    if len > limits.max_field_len {
        return Err(Error::Overflow);
    }
    let dh_public_key = binary::decode_raw(r, len)?;
    r.read_bits(1)?;

    r.read_bits(1)?;
    let contract_certificate_chain = decode_certificate_chain(r, limits)?;
    r.read_bits(1)?;

    r.read_bits(1)?;

    Ok(CertificateInstallationRes {
        header,
        response_code,
        evse_processing,
        cps_certificate_chain,
        contract_signature_encrypted_private_key,
        dh_public_key,
        contract_certificate_chain,
    })
}
