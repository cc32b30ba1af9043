use crate::core::commands::{lshwres, lssyscfg};
use crate::domain::model::SlotDetails;
use crate::domain::ports::CommandRunner;
use crate::utils::error::{DlparError, Result};

/// Whether the managed system knows a partition by this name.
pub fn lpar_exists<R: CommandRunner>(hmc: &R, managed_system: &str, lpar: &str) -> Result<bool> {
    let names = hmc.run_command(&lssyscfg::lpar_names(managed_system))?;
    Ok(names.iter().any(|name| name.trim() == lpar))
}

/// The numeric id of a partition, resolved once at setup and cached for the
/// reverse leg of move operations.
pub fn dest_lpar_id<R: CommandRunner>(hmc: &R, managed_system: &str, lpar: &str) -> Result<String> {
    let output = hmc.run_command(&lshwres::lpar_id(managed_system, lpar))?;
    output
        .first()
        .map(|line| line.trim().to_string())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| DlparError::LparNotFoundError {
            lpar: lpar.to_string(),
            managed_system: managed_system.to_string(),
        })
}

/// Query the resource listing for the slot carrying `location_code` and
/// split out its identifiers. No matching line is an immediate failure in
/// both branches; later operations must never see half-populated details.
pub fn slot_details<R: CommandRunner>(
    hmc: &R,
    managed_system: &str,
    lpar: &str,
    location_code: &str,
    sriov: bool,
) -> Result<SlotDetails> {
    if sriov {
        let output = hmc.run_command(&lshwres::sriov_logport_details(managed_system, lpar))?;
        tracing::debug!("sriov logport listing: {:?}", output);
        output
            .iter()
            .find(|line| line.contains(location_code))
            .and_then(|line| parse_sriov_line(line))
            .ok_or_else(|| slot_not_found("sriov logport", location_code, lpar))
    } else {
        let output = hmc.run_command(&lshwres::io_slot_details(managed_system, lpar))?;
        tracing::debug!("io slot listing: {:?}", output);
        output
            .iter()
            .find(|line| line.contains(location_code))
            .and_then(|line| parse_io_slot_line(line))
            .ok_or_else(|| slot_not_found("io slot", location_code, lpar))
    }
}

fn slot_not_found(subtype: &str, location_code: &str, lpar: &str) -> DlparError {
    DlparError::SlotNotFoundError {
        subtype: subtype.to_string(),
        location_code: location_code.to_string(),
        lpar: lpar.to_string(),
    }
}

/// Field order fixed by the `-F drc_index,lpar_id,drc_name,bus_id`
/// projection.
pub fn parse_io_slot_line(line: &str) -> Option<SlotDetails> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < 4 {
        return None;
    }
    Some(SlotDetails::Io {
        drc_index: fields[0].trim().to_string(),
        lpar_id: fields[1].trim().to_string(),
        phb: fields[3].trim().to_string(),
    })
}

/// Field order fixed by the
/// `-F adapter_id,logical_port_id,phys_port_id,lpar_id,location_code,drc_name`
/// projection. The drc_name field reads `PHB <id>`; only the id is kept.
pub fn parse_sriov_line(line: &str) -> Option<SlotDetails> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < 6 {
        return None;
    }
    let phb = fields[5].trim().split(' ').nth(1)?.to_string();
    Some(SlotDetails::Sriov {
        adapter_id: fields[0].trim().to_string(),
        logical_port_id: fields[1].trim().to_string(),
        phys_port_id: fields[2].trim().to_string(),
        lpar_id: fields[3].trim().to_string(),
        location_code: fields[4].trim().to_string(),
        phb,
    })
}
