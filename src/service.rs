//! Service discovery, detail and selection messages
//! (grammar states 422-439).

use crate::bitstream::{BitReader, BitWriter};
use crate::common::{
    decode_selected_service, decode_selected_service_list, decode_service_list,
    decode_service_parameter_list, encode_selected_service, encode_selected_service_list,
    encode_service_list, encode_service_parameter_list, read_response_code, read_uint16,
    write_response_code, write_uint16, ParameterSet, SelectedService, Service,
};
use crate::enums::ResponseCode;
use crate::header::{self, MessageHeader};
use crate::limits::DecodeLimits;
use crate::{Error, Result};

/// EV → EVSE: asks for the service catalog.
///
/// The SupportedServiceIDs filter is part of the schema but not of this
/// codec yet; both directions reject it until a peer needs it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServiceDiscoveryReq {
    pub header: MessageHeader,
    pub supported_service_ids: Option<Vec<u16>>,
}

/// EVSE → EV: the offered energy-transfer and value-added services.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServiceDiscoveryRes {
    pub header: MessageHeader,
    pub response_code: ResponseCode,
    pub service_renegotiation_supported: bool,
    pub energy_transfer_service_list: Vec<Service>,
    pub vas_list: Option<Vec<Service>>,
}

/// EV → EVSE: asks for the parameter sets of one service.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServiceDetailReq {
    pub header: MessageHeader,
    pub service_id: u16,
}

/// EVSE → EV: the parameter sets of the requested service.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServiceDetailRes {
    pub header: MessageHeader,
    pub response_code: ResponseCode,
    pub service_id: u16,
    pub service_parameter_list: Vec<ParameterSet>,
}

/// EV → EVSE: commits to an energy-transfer service and optional VAS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSelectionReq {
    pub header: MessageHeader,
    pub selected_energy_transfer_service: SelectedService,
    pub selected_vas_list: Option<Vec<SelectedService>>,
}

/// EVSE → EV: acknowledges the selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServiceSelectionRes {
    pub header: MessageHeader,
    pub response_code: ResponseCode,
}

pub(crate) fn encode_service_discovery_req(
    w: &mut BitWriter<'_>,
    v: &ServiceDiscoveryReq,
) -> Result<()> {
    w.write_bits(1, 0)?;
    header::encode(w, &v.header)?;

    if v.supported_service_ids.is_some() {
        return Err(Error::invalid_argument(
            "SupportedServiceIDs encoding is not implemented",
        ));
    }
    // 2-bit selector: 0 = SupportedServiceIDs, 1 = END element
    w.write_bits(2, 1)
}

pub(crate) fn decode_service_discovery_req(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<ServiceDiscoveryReq> {
    r.read_bits(1)?;
    let header = header::decode(r, limits)?;

    if r.read_bits(2)? != 1 {
        return Err(Error::invalid_input(
            "SupportedServiceIDs decoding is not implemented",
        ));
    }

    Ok(ServiceDiscoveryReq {
        header,
        supported_service_ids: None,
    })
}

pub(crate) fn encode_service_discovery_res(
    w: &mut BitWriter<'_>,
    v: &ServiceDiscoveryRes,
) -> Result<()> {
    w.write_bits(1, 0)?;
    header::encode(w, &v.header)?;

    write_response_code(w, v.response_code)?;

    // ServiceRenegotiationSupported: bare boolean, no value-type marker
    // at this site.
    w.write_bits(1, 0)?;
    w.write_bits(1, u32::from(v.service_renegotiation_supported))?;
    w.write_bits(1, 0)?;

    w.write_bits(1, 0)?;
    encode_service_list(w, &v.energy_transfer_service_list)?;

    match &v.vas_list {
        Some(vas_list) => {
            w.write_bits(2, 0)?;
            encode_service_list(w, vas_list)?;
            w.write_bits(1, 0)
        }
        None => w.write_bits(2, 1),
    }
}

pub(crate) fn decode_service_discovery_res(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<ServiceDiscoveryRes> {
    r.read_bits(1)?;
    let header = header::decode(r, limits)?;

    let response_code = read_response_code(r)?;

    r.read_bits(1)?;
    let service_renegotiation_supported = r.read_bits(1)? == 1;
    r.read_bits(1)?;

    r.read_bits(1)?;
    let energy_transfer_service_list = decode_service_list(r, limits)?;

    let vas_list = if r.read_bits(2)? == 0 {
        let list = decode_service_list(r, limits)?;
        r.read_bits(1)?;
        Some(list)
    } else {
        None
    };

    Ok(ServiceDiscoveryRes {
        header,
        response_code,
        service_renegotiation_supported,
        energy_transfer_service_list,
        vas_list,
    })
}

pub(crate) fn encode_service_detail_req(
    w: &mut BitWriter<'_>,
    v: &ServiceDetailReq,
) -> Result<()> {
    w.write_bits(1, 0)?;
    header::encode(w, &v.header)?;

    w.write_bits(1, 0)?;
    w.write_bits(1, 0)?;
    write_uint16(w, v.service_id)?;
    w.write_bits(1, 0)?;

    w.write_bits(1, 0)
}

pub(crate) fn decode_service_detail_req(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<ServiceDetailReq> {
    r.read_bits(1)?;
    let header = header::decode(r, limits)?;

    r.read_bits(1)?;
    r.read_bits(1)?;
    let service_id = read_uint16(r)?;
    r.read_bits(1)?;

    r.read_bits(1)?;

    Ok(ServiceDetailReq { header, service_id })
}

pub(crate) fn encode_service_detail_res(
    w: &mut BitWriter<'_>,
    v: &ServiceDetailRes,
) -> Result<()> {
    w.write_bits(1, 0)?;
    header::encode(w, &v.header)?;

    write_response_code(w, v.response_code)?;

    w.write_bits(1, 0)?;
    w.write_bits(1, 0)?;
    write_uint16(w, v.service_id)?;
    w.write_bits(1, 0)?;

    w.write_bits(1, 0)?;
    encode_service_parameter_list(w, &v.service_parameter_list)?;
    w.write_bits(1, 0)?;

    w.write_bits(1, 0)
}

pub(crate) fn decode_service_detail_res(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<ServiceDetailRes> {
    r.read_bits(1)?;
    let header = header::decode(r, limits)?;

    let response_code = read_response_code(r)?;

    r.read_bits(1)?;
    r.read_bits(1)?;
    let service_id = read_uint16(r)?;
    r.read_bits(1)?;

    r.read_bits(1)?;
    let service_parameter_list = decode_service_parameter_list(r, limits)?;
    r.read_bits(1)?;

    r.read_bits(1)?;

    Ok(ServiceDetailRes {
        header,
        response_code,
        service_id,
        service_parameter_list,
    })
}

pub(crate) fn encode_service_selection_req(
    w: &mut BitWriter<'_>,
    v: &ServiceSelectionReq,
) -> Result<()> {
    w.write_bits(1, 0)?;
    header::encode(w, &v.header)?;

    w.write_bits(1, 0)?;
    encode_selected_service(w, &v.selected_energy_transfer_service)?;
    w.write_bits(1, 0)?;

    match &v.selected_vas_list {
        Some(list) => {
            w.write_bits(1, 1)?;
            w.write_bits(1, 0)?;
            encode_selected_service_list(w, list)?;
            w.write_bits(1, 0)?;
        }
        None => w.write_bits(1, 0)?,
    }

    w.write_bits(1, 0)
}

pub(crate) fn decode_service_selection_req(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<ServiceSelectionReq> {
    r.read_bits(1)?;
    let header = header::decode(r, limits)?;

    r.read_bits(1)?;
    let selected_energy_transfer_service = decode_selected_service(r)?;
    r.read_bits(1)?;

    let selected_vas_list = if r.read_bits(1)? == 1 {
        r.read_bits(1)?;
        let list = decode_selected_service_list(r, limits)?;
        r.read_bits(1)?;
        Some(list)
    } else {
        None
    };

    r.read_bits(1)?;

    Ok(ServiceSelectionReq {
        header,
        selected_energy_transfer_service,
        selected_vas_list,
    })
}

pub(crate) fn encode_service_selection_res(
    w: &mut BitWriter<'_>,
    v: &ServiceSelectionRes,
) -> Result<()> {
    w.write_bits(1, 0)?;
    header::encode(w, &v.header)?;
    write_response_code(w, v.response_code)?;
    w.write_bits(1, 0)
}

pub(crate) fn decode_service_selection_res(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<ServiceSelectionRes> {
    r.read_bits(1)?;
    let header = header::decode(r, limits)?;
    let response_code = read_response_code(r)?;
    r.read_bits(1)?;
    Ok(ServiceSelectionRes {
        header,
        response_code,
    })
}
