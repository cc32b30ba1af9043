use dlpar_harness::{CommandRunner, DlparError, FileConfig, Result};
use std::cell::RefCell;
use std::collections::VecDeque;

struct Rule {
    pattern: String,
    responses: VecDeque<Vec<String>>,
    error: Option<String>,
}

/// Test double for a shell session: canned responses keyed by command
/// substring, first matching rule wins, every command logged. A rule with a
/// queued sequence pops one response per hit and keeps repeating the last;
/// commands matching no rule succeed with empty output.
#[derive(Default)]
pub struct ScriptedRunner {
    rules: RefCell<Vec<Rule>>,
    log: RefCell<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stub(&self, pattern: &str, lines: &[&str]) {
        self.stub_seq(pattern, vec![lines.iter().map(|s| s.to_string()).collect()]);
    }

    pub fn stub_seq(&self, pattern: &str, responses: Vec<Vec<String>>) {
        self.rules.borrow_mut().push(Rule {
            pattern: pattern.to_string(),
            responses: responses.into(),
            error: None,
        });
    }

    /// Matching commands fail with a `CommandError` carrying `detail`.
    pub fn stub_fail(&self, pattern: &str, detail: &str) {
        self.rules.borrow_mut().push(Rule {
            pattern: pattern.to_string(),
            responses: VecDeque::new(),
            error: Some(detail.to_string()),
        });
    }

    pub fn commands(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    pub fn count_matching(&self, pattern: &str) -> usize {
        self.log
            .borrow()
            .iter()
            .filter(|cmd| cmd.contains(pattern))
            .count()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run_command(&self, command: &str) -> Result<Vec<String>> {
        self.log.borrow_mut().push(command.to_string());
        let mut rules = self.rules.borrow_mut();
        for rule in rules.iter_mut() {
            if command.contains(&rule.pattern) {
                if let Some(detail) = &rule.error {
                    return Err(DlparError::CommandError {
                        command: command.to_string(),
                        detail: detail.clone(),
                    });
                }
                let response = if rule.responses.len() > 1 {
                    rule.responses.pop_front().unwrap_or_default()
                } else {
                    rule.responses.front().cloned().unwrap_or_default()
                };
                return Ok(response);
            }
        }
        Ok(Vec::new())
    }
}

pub const LOC_CODE: &str = "U78CB.001.WZS007F-P1-C9";
pub const IO_DETAIL_LINE: &str = "1234,2,ethP2,U78CB.001.WZS007F-P1-C9";
pub const SRIOV_DETAIL_LINE: &str = "1,27004001,0,2,U78CB.001.WZS007F-P1-C9-T1,PHB 514";

/// HMC session scripted far enough for `setup()` against an io slot.
pub fn setup_hmc() -> ScriptedRunner {
    let hmc = ScriptedRunner::new();
    hmc.stub("lssyscfg", &["lpar1", "lpar2"]);
    hmc.stub("-F lpar_id", &["3"]);
    hmc.stub("-F drc_index", &[IO_DETAIL_LINE]);
    hmc
}

/// Host session scripted far enough for `setup()`: packages installed,
/// services operative, device-tree lookups resolvable.
pub fn setup_host() -> ScriptedRunner {
    let host = ScriptedRunner::new();
    host.stub("devspec", &["pci@800000020000018/ethernet@0"]);
    host.stub("ibm,loc-code", &[LOC_CODE]);
    host
}

pub fn io_config(target_lpar: Option<&str>, iterations: usize) -> FileConfig {
    FileConfig {
        hmc: "hscroot@hmc1".to_string(),
        host: None,
        managed_system: "sys1".to_string(),
        lpar_name: "lpar1".to_string(),
        target_lpar: target_lpar.map(str::to_string),
        pci_device: "0001:08:00.0".to_string(),
        sriov: false,
        iterations,
    }
}
