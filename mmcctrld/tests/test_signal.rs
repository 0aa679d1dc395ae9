use mmcctrld::TerminationFlag;
use mmcctrld::signal::install_dispositions;
use nix::sys::signal::{Signal, raise};

#[test]
fn test_sigterm_raises_flag() {
    install_dispositions().unwrap();
    let flag = TerminationFlag::global();
    assert!(!flag.is_raised());

    // SIGHUP and SIGCHLD are ignored and must not touch the flag.
    raise(Signal::SIGHUP).unwrap();
    raise(Signal::SIGCHLD).unwrap();
    assert!(!flag.is_raised());

    raise(Signal::SIGTERM).unwrap();
    assert!(flag.is_raised());
}
