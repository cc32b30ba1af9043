use serde::{Deserialize, Serialize};

/// Identifiers of one hot-pluggable slot, as reported by `lshwres`.
///
/// All fields are the raw strings from the comma-delimited listing; they are
/// only ever echoed back into `chhwres`/`drmgr` invocations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotDetails {
    /// Physical io slot (`lshwres -r io --rsubtype slot`).
    Io {
        drc_index: String,
        lpar_id: String,
        phb: String,
    },
    /// SR-IOV logical port (`lshwres -r sriov --rsubtype logport`).
    Sriov {
        adapter_id: String,
        logical_port_id: String,
        phys_port_id: String,
        lpar_id: String,
        location_code: String,
        phb: String,
    },
}

impl SlotDetails {
    pub fn is_sriov(&self) -> bool {
        matches!(self, SlotDetails::Sriov { .. })
    }

    /// The identifier that `lshwres` listings are scanned for when verifying
    /// an operation: the DRC index for io slots, the logical port id for
    /// SR-IOV ports.
    pub fn listing_key(&self) -> &str {
        match self {
            SlotDetails::Io { drc_index, .. } => drc_index,
            SlotDetails::Sriov {
                logical_port_id, ..
            } => logical_port_id,
        }
    }

    pub fn phb(&self) -> &str {
        match self {
            SlotDetails::Io { phb, .. } => phb,
            SlotDetails::Sriov { phb, .. } => phb,
        }
    }
}

/// Destination partition for move operations, with its numeric id cached
/// once during setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestLpar {
    pub name: String,
    pub lpar_id: String,
}

/// Everything the scenarios need about the slot under test, resolved once
/// during setup and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DlparContext {
    pub managed_system: String,
    pub lpar_name: String,
    pub location_code: String,
    pub slot: SlotDetails,
    pub dest: Option<DestLpar>,
}
