use assert_cmd::Command;
use predicates::prelude::*;

fn bpa_cmd() -> Command {
    Command::cargo_bin("bpa-cli").expect("binary should be built")
}

#[test]
fn help_flag_prints_usage() {
    bpa_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Best-practice analysis"));
}

#[test]
fn version_flag_prints_version() {
    bpa_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bpa"));
}

#[cfg(unix)]
mod runs {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// Pre-provision a working root so no download is attempted: stub
    /// inspector at the expected tool path, rule file next to the root,
    /// report containers under `src/`.
    fn provision(root: &Path, reports: &[&str], stub_body: &str) -> PathBuf {
        let inspector = root.join("_tools/PBIInspector/win-x64/CLI/PBIXInspectorCLI.exe");
        fs::create_dir_all(inspector.parent().unwrap()).unwrap();
        fs::write(&inspector, format!("#!/bin/sh\n{stub_body}\n")).unwrap();
        fs::set_permissions(&inspector, fs::Permissions::from_mode(0o755)).unwrap();

        fs::write(root.join("bpa-report-rules.json"), b"{\"rules\":[]}").unwrap();

        for report in reports {
            let folder = root.join("src").join(report);
            fs::create_dir_all(&folder).unwrap();
            fs::write(folder.join("definition.pbir"), b"{}").unwrap();
        }
        root.join("invocations.log")
    }

    #[test]
    fn inspects_every_discovered_report() {
        let tmp = TempDir::new().unwrap();
        let log = tmp.path().join("invocations.log");
        provision(
            tmp.path(),
            &["Sales.Report", "Finance.Report"],
            &format!("echo \"$2\" >> {}\nexit 0", log.display()),
        );

        bpa_cmd()
            .arg(tmp.path())
            .arg("src/*.Report")
            .assert()
            .success();

        let invocations = fs::read_to_string(&log).unwrap();
        let lines: Vec<&str> = invocations.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("src/Finance.Report"));
        assert!(lines[1].ends_with("src/Sales.Report"));
    }

    #[test]
    fn failing_inspection_fails_the_run_and_names_the_folder() {
        let tmp = TempDir::new().unwrap();
        let log = tmp.path().join("invocations.log");
        provision(
            tmp.path(),
            &["A.Report", "B.Report"],
            &format!(
                "echo \"$2\" >> {}\ncase \"$2\" in *A.Report*) exit 1;; esac\nexit 0",
                log.display()
            ),
        );

        bpa_cmd()
            .arg(tmp.path())
            .arg("src/*.Report")
            .assert()
            .failure()
            .stderr(predicate::str::contains("A.Report"));

        // First failure halts the run; B is never inspected.
        let invocations = fs::read_to_string(&log).unwrap();
        assert_eq!(invocations.lines().count(), 1);
    }

    #[test]
    fn tree_without_reports_succeeds() {
        let tmp = TempDir::new().unwrap();
        provision(tmp.path(), &[], "exit 0");
        fs::create_dir_all(tmp.path().join("src")).unwrap();

        bpa_cmd()
            .arg(tmp.path())
            .arg("src/*.Report")
            .assert()
            .success();
    }

    #[test]
    fn rules_fall_back_to_a_previously_downloaded_copy() {
        let tmp = TempDir::new().unwrap();
        provision(tmp.path(), &["Sales.Report"], "exit 0");

        // Only the fallback copy exists; the run must use it, offline.
        fs::remove_file(tmp.path().join("bpa-report-rules.json")).unwrap();
        fs::write(
            tmp.path().join("_tools/PBIInspector/bpa-report-rules.json"),
            b"{\"rules\":[]}",
        )
        .unwrap();

        bpa_cmd()
            .arg(tmp.path())
            .arg("src/*.Report")
            .assert()
            .success();
    }
}
