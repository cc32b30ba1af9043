use crate::domain::ports::CommandRunner;
use crate::utils::error::{DlparError, Result};
use regex::Regex;

/// Resolve a PCI device to its slot location code by following the
/// device-tree pointers the host kernel exposes: the device's `devspec`
/// names the device-tree node, and that node's `ibm,loc-code` holds the
/// location code.
pub fn resolve_location_code<R: CommandRunner>(host: &R, pci_device: &str) -> Result<String> {
    let devspec = host.run_command(&format!(
        "cat /sys/bus/pci/devices/{}/devspec",
        pci_device
    ))?;
    let devspec = first_line(pci_device, &devspec, "empty devspec")?;

    let loc_code = host.run_command(&format!(
        "cat /proc/device-tree/{}/ibm,loc-code",
        devspec
    ))?;
    let raw = first_line(pci_device, &loc_code, "empty ibm,loc-code")?;

    match_location_code(raw)
        .map(str::to_string)
        .ok_or_else(|| DlparError::LocationCodeError {
            device: pci_device.to_string(),
            reason: format!("'{}' matches neither location code grammar", raw),
        })
}

/// Match either location code grammar against the raw device-tree text and
/// return the matched prefix.
///
/// Two forms exist: the enterprise form is dotted hierarchical segments
/// ending in a planar/card suffix (`U78CB.001.WZS007F-P1-C1`); the OpenPOWER
/// form is a bare word with optional digits (`Slot1`).
pub fn match_location_code(raw: &str) -> Option<&str> {
    let ibm = Regex::new(r"^(\w+\.)+\w+(-[PC]\d+)*-C\d+").expect("static regex");
    if let Some(m) = ibm.find(raw) {
        return Some(m.as_str());
    }
    let openpower = Regex::new(r"^\w+").expect("static regex");
    openpower.find(raw).map(|m| m.as_str())
}

fn first_line<'a>(device: &str, output: &'a [String], reason: &str) -> Result<&'a str> {
    output
        .first()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .ok_or_else(|| DlparError::LocationCodeError {
            device: device.to_string(),
            reason: reason.to_string(),
        })
}
