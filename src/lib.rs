pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::file::FileConfig;
pub use config::shell::{LocalShell, SshShell};
pub use config::CliConfig;
pub use core::harness::DlparHarness;
pub use domain::model::{DestLpar, DlparContext, SlotDetails};
pub use domain::ports::{CommandRunner, ConfigProvider};
pub use utils::error::{DlparError, Result};
