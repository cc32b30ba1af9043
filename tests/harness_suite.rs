mod common;

use common::{io_config, setup_hmc, setup_host, ScriptedRunner, SRIOV_DETAIL_LINE};
use dlpar_harness::{DlparError, DlparHarness, FileConfig};

fn ready_harness<'a>(
    hmc: &'a ScriptedRunner,
    host: &'a ScriptedRunner,
    config: &FileConfig,
) -> DlparHarness<&'a ScriptedRunner, &'a ScriptedRunner> {
    let mut harness = DlparHarness::new(hmc, host, config);
    harness.setup().unwrap();
    harness
}

#[test]
fn io_cycle_runs_full_round_trip() {
    let hmc = setup_hmc();
    let host = setup_host();
    // Source listing over the cycle: gone after remove, back after add, gone
    // after the forward move, back after the reverse move.
    hmc.stub_seq(
        "lpar_names=lpar1",
        vec![
            vec![],
            vec![format!("U78CB.001.WZS007F-P1-C9,1234,2/none/")],
            vec![],
            vec![format!("U78CB.001.WZS007F-P1-C9,1234,2/none/")],
        ],
    );
    // Destination listing: present after the forward move, gone after the
    // reverse move.
    hmc.stub_seq(
        "lpar_names=lpar2",
        vec![
            vec![format!("U78CB.001.WZS007F-P1-C9,1234,3/none/")],
            vec![],
        ],
    );
    let config = io_config(Some("lpar2"), 1);

    let harness = ready_harness(&hmc, &host, &config);
    harness.io_cycle().unwrap();

    let chhwres: Vec<String> = hmc
        .commands()
        .into_iter()
        .filter(|cmd| cmd.starts_with("chhwres"))
        .collect();
    assert_eq!(
        chhwres,
        vec![
            "chhwres -r io --rsubtype slot -m sys1 -o r --id 2 -l 1234".to_string(),
            "chhwres -r io --rsubtype slot -m sys1 -o a --id 2 -l 1234".to_string(),
            "chhwres -r io --rsubtype slot -m sys1 -o m --id 2 -t lpar2 -l 1234".to_string(),
            "chhwres -r io --rsubtype slot -m sys1 -o m --id 3 -t lpar1 -l 1234".to_string(),
        ]
    );
}

#[test]
fn remove_fails_when_resource_still_listed() {
    let hmc = setup_hmc();
    let host = setup_host();
    hmc.stub(
        "lpar_names=lpar1",
        &["U78CB.001.WZS007F-P1-C9,1234,2/none/"],
    );
    let config = io_config(None, 1);

    let harness = ready_harness(&hmc, &host, &config);
    let err = harness.io_cycle().unwrap_err();
    match err {
        DlparError::VerificationError {
            operation,
            resource,
            detail,
        } => {
            assert_eq!(operation, "remove");
            assert_eq!(resource, "1234");
            assert!(detail.contains("still listed"));
        }
        other => panic!("expected VerificationError, got {:?}", other),
    }
}

#[test]
fn add_fails_when_resource_not_listed() {
    let hmc = setup_hmc();
    let host = setup_host();
    // Empty listing throughout: remove verifies fine, add does not.
    hmc.stub("lpar_names=lpar1", &[]);
    let config = io_config(None, 1);

    let harness = ready_harness(&hmc, &host, &config);
    let err = harness.io_cycle().unwrap_err();
    match err {
        DlparError::VerificationError { operation, detail, .. } => {
            assert_eq!(operation, "add");
            assert!(detail.contains("not listed"));
        }
        other => panic!("expected VerificationError, got {:?}", other),
    }
}

#[test]
fn move_is_a_no_op_without_target_lpar() {
    let hmc = setup_hmc();
    let host = setup_host();
    hmc.stub_seq(
        "lpar_names=lpar1",
        vec![
            vec![],
            vec![format!("U78CB.001.WZS007F-P1-C9,1234,2/none/")],
        ],
    );
    let config = io_config(None, 1);

    let harness = ready_harness(&hmc, &host, &config);
    harness.io_cycle().unwrap();

    assert_eq!(hmc.count_matching("-o m"), 0);
    assert_eq!(hmc.count_matching("-o r"), 1);
    assert_eq!(hmc.count_matching("-o a"), 1);
}

#[test]
fn sriov_cycle_uses_logport_commands_and_skips_move() {
    let hmc = ScriptedRunner::new();
    hmc.stub("lssyscfg", &["lpar1", "lpar2"]);
    hmc.stub("-F lpar_id", &["3"]);
    hmc.stub("-F adapter_id", &[SRIOV_DETAIL_LINE]);
    // Logical port listing: gone after remove, back after add.
    hmc.stub_seq(
        "lpar_names=lpar1",
        vec![vec![], vec![format!("27004001,1,0,eth,2")]],
    );
    let host = setup_host();
    let mut config = io_config(Some("lpar2"), 1);
    config.sriov = true;

    let harness = ready_harness(&hmc, &host, &config);
    harness.io_cycle().unwrap();

    assert_eq!(
        hmc.count_matching("chhwres -r sriov -m sys1 --rsubtype logport -o r --id 2"),
        1
    );
    assert_eq!(hmc.count_matching("logical_port_type=eth"), 1);
    // No io slot move for logical ports, even with a destination configured.
    assert_eq!(hmc.count_matching("-o m"), 0);
}

#[test]
fn drmgr_pci_cycles_then_forces_removal() {
    let hmc = setup_hmc();
    let host = setup_host();
    let config = io_config(None, 2);

    let harness = ready_harness(&hmc, &host, &config);
    harness.drmgr_pci().unwrap();

    let drmgr: Vec<String> = host
        .commands()
        .into_iter()
        .filter(|cmd| cmd.contains("drmgr"))
        .collect();
    assert_eq!(
        drmgr,
        vec![
            "echo -e \"\\n\" | drmgr -c pci -s U78CB.001.WZS007F-P1-C9 -r".to_string(),
            "echo -e \"\\n\" | drmgr -c pci -s U78CB.001.WZS007F-P1-C9 -a".to_string(),
            "echo -e \"\\n\" | drmgr -c pci -s U78CB.001.WZS007F-P1-C9 -r".to_string(),
            "echo -e \"\\n\" | drmgr -c pci -s U78CB.001.WZS007F-P1-C9 -a".to_string(),
            "echo -e \"\\n\" | drmgr -c pci -s U78CB.001.WZS007F-P1-C9 -R".to_string(),
            "echo -e \"\\n\" | drmgr -c pci -s U78CB.001.WZS007F-P1-C9 -R".to_string(),
        ]
    );
}

#[test]
fn drmgr_phb_cycles_with_quoted_slot_name() {
    let hmc = setup_hmc();
    let host = setup_host();
    let config = io_config(None, 1);

    let harness = ready_harness(&hmc, &host, &config);
    harness.drmgr_phb().unwrap();

    let drmgr: Vec<String> = host
        .commands()
        .into_iter()
        .filter(|cmd| cmd.contains("drmgr"))
        .collect();
    assert_eq!(
        drmgr,
        vec![
            "drmgr -c phb -s \"PHB U78CB.001.WZS007F-P1-C9\" -r".to_string(),
            "drmgr -c phb -s \"PHB U78CB.001.WZS007F-P1-C9\" -a".to_string(),
        ]
    );
}

#[test]
fn scenarios_fail_before_setup() {
    let hmc = ScriptedRunner::new();
    let host = ScriptedRunner::new();
    let config = io_config(None, 1);

    let harness = DlparHarness::new(&hmc, &host, &config);
    assert!(matches!(
        harness.io_cycle().unwrap_err(),
        DlparError::ConfigError { .. }
    ));
}

#[test]
fn suite_runs_all_three_scenarios_in_order() {
    let hmc = setup_hmc();
    let host = setup_host();
    hmc.stub_seq(
        "lpar_names=lpar1",
        vec![
            vec![],
            vec![format!("U78CB.001.WZS007F-P1-C9,1234,2/none/")],
        ],
    );
    let config = io_config(None, 1);

    let harness = ready_harness(&hmc, &host, &config);
    harness.run_suite().unwrap();

    // chhwres cycle on the HMC, then pci and phb hot-plug on the host.
    assert_eq!(hmc.count_matching("chhwres"), 2);
    assert_eq!(host.count_matching("drmgr -c pci"), 3);
    assert_eq!(host.count_matching("drmgr -c phb"), 2);
    let commands = host.commands();
    let first_phb = commands
        .iter()
        .position(|cmd| cmd.contains("drmgr -c phb"))
        .unwrap();
    let last_pci = commands
        .iter()
        .rposition(|cmd| cmd.contains("drmgr -c pci"))
        .unwrap();
    assert!(last_pci < first_phb);
}
