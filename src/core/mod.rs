pub mod commands;
pub mod executor;
pub mod harness;
pub mod lookup;
pub mod preflight;
pub mod slot;

pub use crate::domain::model::{DestLpar, DlparContext, SlotDetails};
pub use crate::domain::ports::{CommandRunner, ConfigProvider};
pub use crate::utils::error::Result;
