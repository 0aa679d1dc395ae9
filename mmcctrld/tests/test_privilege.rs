use std::fs::{self, Permissions};
use std::os::unix::fs::PermissionsExt;
use std::os::unix::process::CommandExt;
use std::process::Command;

use mmcctrld::DaemonError;
use mmcctrld::daemonize::require_superuser;
use nix::unistd::geteuid;
use tempfile::tempdir;

const NOBODY: u32 = 65534;

#[test]
fn test_require_superuser_follows_euid() {
    match require_superuser() {
        Ok(()) => assert!(geteuid().is_root()),
        Err(e) => {
            assert!(!geteuid().is_root());
            assert!(matches!(e, DaemonError::Privilege));
        }
    }
}

#[test]
fn test_refuses_to_start_without_root() {
    // The build directory may not be reachable for an unprivileged user, so
    // run a world readable copy of the binary.
    let dir = tempdir().unwrap();
    fs::set_permissions(dir.path(), Permissions::from_mode(0o755)).unwrap();
    let binary = dir.path().join("mmcctrld");
    fs::copy(env!("CARGO_BIN_EXE_mmcctrld"), &binary).unwrap();
    fs::set_permissions(&binary, Permissions::from_mode(0o755)).unwrap();

    let mut command = Command::new(&binary);
    command.current_dir(dir.path());
    if geteuid().is_root() {
        command.uid(NOBODY).gid(NOBODY);
    }
    let output = command.output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("mmcctrld needs to be launched with root privileges"));
}
