//! Shared sub-grammars of the CommonMessages catalog.
//!
//! These structures appear inside several messages and are factored out
//! here: RationalNumber, CertificateChain, the two service list shapes,
//! ServiceParameterList with its three-way Parameter value union, and
//! EVPowerProfile. The module also carries the recurring bracketed
//! field forms (ResponseCode, processing enums, string lists) so the
//! per-message grammars stay straight-line.
//!
//! Bracket discipline: on encode every structural marker is bit 0; on
//! decode markers are read and not asserted (tolerant decoding).

use crate::bitstream::{BitReader, BitWriter};
use crate::enums::{EvProcessing, EvseProcessing, ResponseCode};
use crate::limits::DecodeLimits;
use crate::{string, Error, Result};

/// Decimal mantissa/exponent pair used for physical quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RationalNumber {
    pub exponent: i8,
    pub value: i16,
}

impl RationalNumber {
    pub fn new(exponent: i8, value: i16) -> Self {
        Self { exponent, value }
    }
}

/// Ordered sequence of DER certificate blobs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CertificateChain {
    pub certificates: Vec<Vec<u8>>,
}

/// One entry of an energy-transfer or VAS service list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Service {
    pub service_id: u16,
    pub free_service: bool,
}

/// A service choice with an optional parameter-set reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedService {
    pub service_id: u16,
    pub parameter_set_id: Option<u16>,
}

/// One parameter set of a ServiceParameterList.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSet {
    pub parameter_set_id: u16,
    pub parameters: Vec<Parameter>,
}

/// Named parameter carrying at most one typed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub value: ParameterValue,
}

/// The Parameter value union; the wire selector is 3 bits wide.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ParameterValue {
    Int(i16),
    Str(String),
    Bool(bool),
    #[default]
    None,
}

/// Charging power schedule announced by the EV.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EvPowerProfile {
    pub time_anchor: u64,
    pub entries: Vec<EvPowerProfileEntry>,
}

/// One step of an [`EvPowerProfile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvPowerProfileEntry {
    pub duration: u32,
    pub power: RationalNumber,
}

/// EVSE notification block carried by PowerDeliveryRes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EvseStatus {
    pub notification_max_delay: u16,
    pub evse_notification: String,
}

// --- Recurring field forms --------------------------------------------------

/// u16 values travel as unsigned varints at every site except the
/// fixed-width ServiceID inside a ServiceList.
pub(crate) fn write_uint16(w: &mut BitWriter<'_>, value: u16) -> Result<()> {
    w.write_unsigned_var(u64::from(value))
}

/// Oversized varints are truncated to 16 bits (tolerant decoding).
pub(crate) fn read_uint16(r: &mut BitReader<'_>) -> Result<u16> {
    Ok(r.read_unsigned_var()? as u16)
}

/// Bracketed ResponseCode field: START, value-type marker, 6-bit enum,
/// END.
pub(crate) fn write_response_code(w: &mut BitWriter<'_>, code: ResponseCode) -> Result<()> {
    w.write_bits(1, 0)?;
    w.write_bits(1, 0)?;
    w.write_bits(ResponseCode::WIDTH, code.to_wire())?;
    w.write_bits(1, 0)
}

pub(crate) fn read_response_code(r: &mut BitReader<'_>) -> Result<ResponseCode> {
    r.read_bits(1)?;
    r.read_bits(1)?;
    let code = ResponseCode::from_wire(r.read_bits(ResponseCode::WIDTH)?);
    r.read_bits(1)?;
    Ok(code)
}

/// Bracketed EVSEProcessing field: START, marker, 2-bit enum, END.
pub(crate) fn write_evse_processing(w: &mut BitWriter<'_>, p: EvseProcessing) -> Result<()> {
    w.write_bits(1, 0)?;
    w.write_bits(1, 0)?;
    w.write_bits(EvseProcessing::WIDTH, p.to_wire())?;
    w.write_bits(1, 0)
}

pub(crate) fn read_evse_processing(r: &mut BitReader<'_>) -> Result<EvseProcessing> {
    r.read_bits(1)?;
    r.read_bits(1)?;
    let p = EvseProcessing::from_wire(r.read_bits(EvseProcessing::WIDTH)?);
    r.read_bits(1)?;
    Ok(p)
}

/// Bracketed EVProcessing field: START, marker, 2-bit enum, END.
pub(crate) fn write_ev_processing(w: &mut BitWriter<'_>, p: EvProcessing) -> Result<()> {
    w.write_bits(1, 0)?;
    w.write_bits(1, 0)?;
    w.write_bits(EvProcessing::WIDTH, p.to_wire())?;
    w.write_bits(1, 0)
}

pub(crate) fn read_ev_processing(r: &mut BitReader<'_>) -> Result<EvProcessing> {
    r.read_bits(1)?;
    r.read_bits(1)?;
    let p = EvProcessing::from_wire(r.read_bits(EvProcessing::WIDTH)?);
    r.read_bits(1)?;
    Ok(p)
}

/// Counted list of bracketed plain strings (provider names, root
/// certificate IDs). The caller writes the outer field brackets.
pub(crate) fn write_string_list(w: &mut BitWriter<'_>, items: &[String]) -> Result<()> {
    w.write_unsigned_var(items.len() as u64)?;
    for item in items {
        w.write_bits(1, 0)?;
        string::encode(w, item)?;
        w.write_bits(1, 0)?;
    }
    Ok(())
}

pub(crate) fn read_string_list(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<Vec<String>> {
    let count = checked_count(r.read_unsigned_var()?, limits)?;
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        r.read_bits(1)?;
        out.push(string::decode(r, limits.max_field_len)?);
        r.read_bits(1)?;
    }
    Ok(out)
}

/// Validates a decoded element count against the array bound.
pub(crate) fn checked_count(count: u64, limits: &DecodeLimits) -> Result<usize> {
    let count = usize::try_from(count).map_err(|_| Error::Overflow)?;
    if count > limits.max_array_len {
        return Err(Error::Overflow);
    }
    Ok(count)
}

// --- RationalNumber ---------------------------------------------------------

/// Exponent travels as a fixed 8-bit two's-complement field, the value
/// as a varint of its 16-bit two's-complement image.
pub(crate) fn encode_rational_number(w: &mut BitWriter<'_>, v: &RationalNumber) -> Result<()> {
    w.write_bits(1, 0)?;
    w.write_bits(1, 0)?;
    w.write_bits(8, u32::from(v.exponent as u8))?;
    w.write_bits(1, 0)?;

    w.write_bits(1, 0)?;
    w.write_bits(1, 0)?;
    write_uint16(w, v.value as u16)?;
    w.write_bits(1, 0)
}

pub(crate) fn decode_rational_number(r: &mut BitReader<'_>) -> Result<RationalNumber> {
    r.read_bits(1)?;
    r.read_bits(1)?;
    let exponent = r.read_bits(8)? as u8 as i8;
    r.read_bits(1)?;

    r.read_bits(1)?;
    r.read_bits(1)?;
    let value = read_uint16(r)? as i16;
    r.read_bits(1)?;

    Ok(RationalNumber { exponent, value })
}

// --- CertificateChain -------------------------------------------------------

pub(crate) fn encode_certificate_chain(
    w: &mut BitWriter<'_>,
    chain: &CertificateChain,
) -> Result<()> {
    w.write_bits(1, 0)?;
    w.write_unsigned_var(chain.certificates.len() as u64)?;
    for cert in &chain.certificates {
        w.write_bits(1, 0)?;
        w.write_bits(1, 0)?;
        write_uint16(w, cert.len() as u16)?;
        crate::binary::encode_raw(w, cert)?;
        w.write_bits(1, 0)?;
    }
    w.write_bits(1, 0)
}

pub(crate) fn decode_certificate_chain(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<CertificateChain> {
    r.read_bits(1)?;
    let count = checked_count(r.read_unsigned_var()?, limits)?;
    let mut certificates = Vec::with_capacity(count);
    for _ in 0..count {
        r.read_bits(1)?;
        r.read_bits(1)?;
        let len = usize::from(read_uint16(r)?);
        if len > limits.max_field_len {
            return Err(Error::Overflow);
        }
        certificates.push(crate::binary::decode_raw(r, len)?);
        r.read_bits(1)?;
    }
    r.read_bits(1)?;
    Ok(CertificateChain { certificates })
}

// --- ServiceList (iterated more/END tag form) -------------------------------

/// Each element is announced by a 0 tag bit; a 1 tag terminates the
/// list. ServiceID is the one fixed-width 16-bit integer in the
/// catalog.
pub(crate) fn encode_service_list(w: &mut BitWriter<'_>, services: &[Service]) -> Result<()> {
    for service in services {
        w.write_bits(1, 0)?;
        encode_service(w, service)?;
    }
    w.write_bits(1, 1)
}

pub(crate) fn decode_service_list(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<Vec<Service>> {
    let mut services = Vec::new();
    loop {
        if r.read_bits(1)? == 1 {
            return Ok(services);
        }
        if services.len() >= limits.max_array_len {
            return Err(Error::Overflow);
        }
        services.push(decode_service(r)?);
    }
}

fn encode_service(w: &mut BitWriter<'_>, service: &Service) -> Result<()> {
    w.write_bits(1, 0)?;
    w.write_bits(1, 0)?;
    w.write_bits(16, u32::from(service.service_id))?;
    w.write_bits(1, 0)?;

    w.write_bits(1, 0)?;
    w.write_bits(1, u32::from(service.free_service))?;
    w.write_bits(1, 0)?;

    w.write_bits(1, 0)
}

fn decode_service(r: &mut BitReader<'_>) -> Result<Service> {
    r.read_bits(1)?;
    r.read_bits(1)?;
    let service_id = r.read_bits(16)? as u16;
    r.read_bits(1)?;

    r.read_bits(1)?;
    let free_service = r.read_bits(1)? == 1;
    r.read_bits(1)?;

    r.read_bits(1)?;
    Ok(Service {
        service_id,
        free_service,
    })
}

// --- SelectedService --------------------------------------------------------

pub(crate) fn encode_selected_service(
    w: &mut BitWriter<'_>,
    v: &SelectedService,
) -> Result<()> {
    w.write_bits(1, 0)?;
    w.write_bits(1, 0)?;
    write_uint16(w, v.service_id)?;
    w.write_bits(1, 0)?;

    match v.parameter_set_id {
        Some(id) => {
            w.write_bits(1, 1)?;
            w.write_bits(1, 0)?;
            w.write_bits(1, 0)?;
            write_uint16(w, id)?;
            w.write_bits(1, 0)
        }
        None => w.write_bits(1, 0),
    }
}

pub(crate) fn decode_selected_service(r: &mut BitReader<'_>) -> Result<SelectedService> {
    r.read_bits(1)?;
    r.read_bits(1)?;
    let service_id = read_uint16(r)?;
    r.read_bits(1)?;

    let parameter_set_id = if r.read_bits(1)? == 1 {
        r.read_bits(1)?;
        r.read_bits(1)?;
        let id = read_uint16(r)?;
        r.read_bits(1)?;
        Some(id)
    } else {
        None
    };

    Ok(SelectedService {
        service_id,
        parameter_set_id,
    })
}

pub(crate) fn encode_selected_service_list(
    w: &mut BitWriter<'_>,
    services: &[SelectedService],
) -> Result<()> {
    w.write_unsigned_var(services.len() as u64)?;
    for service in services {
        w.write_bits(1, 0)?;
        encode_selected_service(w, service)?;
        w.write_bits(1, 0)?;
    }
    Ok(())
}

pub(crate) fn decode_selected_service_list(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<Vec<SelectedService>> {
    let count = checked_count(r.read_unsigned_var()?, limits)?;
    let mut services = Vec::with_capacity(count);
    for _ in 0..count {
        r.read_bits(1)?;
        services.push(decode_selected_service(r)?);
        r.read_bits(1)?;
    }
    Ok(services)
}

// --- ServiceParameterList ---------------------------------------------------

pub(crate) fn encode_service_parameter_list(
    w: &mut BitWriter<'_>,
    sets: &[ParameterSet],
) -> Result<()> {
    w.write_bits(1, 0)?;
    w.write_unsigned_var(sets.len() as u64)?;
    for set in sets {
        w.write_bits(1, 0)?;
        encode_parameter_set(w, set)?;
        w.write_bits(1, 0)?;
    }
    w.write_bits(1, 0)
}

pub(crate) fn decode_service_parameter_list(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<Vec<ParameterSet>> {
    r.read_bits(1)?;
    let count = checked_count(r.read_unsigned_var()?, limits)?;
    let mut sets = Vec::with_capacity(count);
    for _ in 0..count {
        r.read_bits(1)?;
        sets.push(decode_parameter_set(r, limits)?);
        r.read_bits(1)?;
    }
    r.read_bits(1)?;
    Ok(sets)
}

fn encode_parameter_set(w: &mut BitWriter<'_>, set: &ParameterSet) -> Result<()> {
    w.write_bits(1, 0)?;
    w.write_bits(1, 0)?;
    write_uint16(w, set.parameter_set_id)?;
    w.write_bits(1, 0)?;

    w.write_bits(1, 0)?;
    w.write_unsigned_var(set.parameters.len() as u64)?;
    for parameter in &set.parameters {
        w.write_bits(1, 0)?;
        encode_parameter(w, parameter)?;
        w.write_bits(1, 0)?;
    }
    w.write_bits(1, 0)
}

fn decode_parameter_set(r: &mut BitReader<'_>, limits: &DecodeLimits) -> Result<ParameterSet> {
    r.read_bits(1)?;
    r.read_bits(1)?;
    let parameter_set_id = read_uint16(r)?;
    r.read_bits(1)?;

    r.read_bits(1)?;
    let count = checked_count(r.read_unsigned_var()?, limits)?;
    let mut parameters = Vec::with_capacity(count);
    for _ in 0..count {
        r.read_bits(1)?;
        parameters.push(decode_parameter(r, limits)?);
        r.read_bits(1)?;
    }
    r.read_bits(1)?;

    Ok(ParameterSet {
        parameter_set_id,
        parameters,
    })
}

/// Parameter value selector (3 bits): 0=Int, 1=Str, 2=Bool, 3=none.
fn encode_parameter(w: &mut BitWriter<'_>, parameter: &Parameter) -> Result<()> {
    w.write_bits(1, 0)?;
    string::encode(w, &parameter.name)?;
    w.write_bits(1, 0)?;

    match &parameter.value {
        ParameterValue::Int(value) => {
            w.write_bits(3, 0)?;
            w.write_bits(1, 0)?;
            w.write_bits(1, 0)?;
            write_uint16(w, *value as u16)?;
            w.write_bits(1, 0)
        }
        ParameterValue::Str(value) => {
            w.write_bits(3, 1)?;
            w.write_bits(1, 0)?;
            string::encode(w, value)?;
            w.write_bits(1, 0)
        }
        ParameterValue::Bool(value) => {
            w.write_bits(3, 2)?;
            w.write_bits(1, 0)?;
            w.write_bits(1, 0)?;
            w.write_bits(1, u32::from(*value))?;
            w.write_bits(1, 0)
        }
        ParameterValue::None => w.write_bits(3, 3),
    }
}

fn decode_parameter(r: &mut BitReader<'_>, limits: &DecodeLimits) -> Result<Parameter> {
    r.read_bits(1)?;
    let name = string::decode(r, limits.max_field_len)?;
    r.read_bits(1)?;

    let value = match r.read_bits(3)? {
        0 => {
            r.read_bits(1)?;
            r.read_bits(1)?;
            let value = read_uint16(r)? as i16;
            r.read_bits(1)?;
            ParameterValue::Int(value)
        }
        1 => {
            r.read_bits(1)?;
            let value = string::decode(r, limits.max_field_len)?;
            r.read_bits(1)?;
            ParameterValue::Str(value)
        }
        2 => {
            r.read_bits(1)?;
            r.read_bits(1)?;
            let value = r.read_bits(1)? == 1;
            r.read_bits(1)?;
            ParameterValue::Bool(value)
        }
        _ => ParameterValue::None,
    };

    Ok(Parameter { name, value })
}

// --- EVPowerProfile ---------------------------------------------------------

pub(crate) fn encode_ev_power_profile(
    w: &mut BitWriter<'_>,
    profile: &EvPowerProfile,
) -> Result<()> {
    w.write_bits(1, 0)?;
    w.write_bits(1, 0)?;
    w.write_unsigned_var(profile.time_anchor)?;
    w.write_bits(1, 0)?;

    w.write_bits(1, 0)?;
    w.write_unsigned_var(profile.entries.len() as u64)?;
    for entry in &profile.entries {
        w.write_bits(1, 0)?;
        encode_ev_power_profile_entry(w, entry)?;
        w.write_bits(1, 0)?;
    }
    w.write_bits(1, 0)
}

pub(crate) fn decode_ev_power_profile(
    r: &mut BitReader<'_>,
    limits: &DecodeLimits,
) -> Result<EvPowerProfile> {
    r.read_bits(1)?;
    r.read_bits(1)?;
    let time_anchor = r.read_unsigned_var()?;
    r.read_bits(1)?;

    r.read_bits(1)?;
    let count = checked_count(r.read_unsigned_var()?, limits)?;
    let mut entries = Vec::with_capacity(count);
    for _ in 0..count {
        r.read_bits(1)?;
        entries.push(decode_ev_power_profile_entry(r)?);
        r.read_bits(1)?;
    }
    r.read_bits(1)?;

    Ok(EvPowerProfile {
        time_anchor,
        entries,
    })
}

fn encode_ev_power_profile_entry(
    w: &mut BitWriter<'_>,
    entry: &EvPowerProfileEntry,
) -> Result<()> {
    w.write_bits(1, 0)?;
    w.write_bits(1, 0)?;
    w.write_unsigned_var(u64::from(entry.duration))?;
    w.write_bits(1, 0)?;

    w.write_bits(1, 0)?;
    encode_rational_number(w, &entry.power)?;
    w.write_bits(1, 0)
}

fn decode_ev_power_profile_entry(r: &mut BitReader<'_>) -> Result<EvPowerProfileEntry> {
    r.read_bits(1)?;
    r.read_bits(1)?;
    let duration = r.read_unsigned_var()? as u32;
    r.read_bits(1)?;

    r.read_bits(1)?;
    let power = decode_rational_number(r)?;
    r.read_bits(1)?;

    Ok(EvPowerProfileEntry { duration, power })
}
