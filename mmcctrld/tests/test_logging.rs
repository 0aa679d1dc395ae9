use std::fs;
use std::os::unix::net::UnixDatagram;
use std::path::Path;
use std::time::Duration;

use mmcctrld::logging::journald_layer;
use scopeguard::defer;
use tracing_subscriber::layer::SubscriberExt;

const JOURNAL_DIR: &str = "/run/systemd/journal";
const JOURNAL_SOCKET: &str = "/run/systemd/journal/socket";

fn length_encoded(name: &str, value: &[u8]) -> Vec<u8> {
    let mut field = name.as_bytes().to_vec();
    field.push(b'\n');
    field.extend_from_slice(&(value.len() as u64).to_le_bytes());
    field.extend_from_slice(value);
    field.push(b'\n');
    field
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

#[test]
fn test_journal_entries_carry_identity_and_facility() {
    if Path::new(JOURNAL_SOCKET).exists() {
        // A real journal owns the socket; only the layer setup can be checked.
        let layer = journald_layer().unwrap();
        assert_eq!(layer.syslog_identifier(), "mmcctrld");
        return;
    }

    let created_dir = !Path::new(JOURNAL_DIR).exists();
    fs::create_dir_all(JOURNAL_DIR).unwrap();
    let journal = UnixDatagram::bind(JOURNAL_SOCKET).unwrap();
    defer! {
        let _ = fs::remove_file(JOURNAL_SOCKET);
        if created_dir {
            let _ = fs::remove_dir(JOURNAL_DIR);
        }
    }
    journal
        .set_read_timeout(Some(Duration::from_secs(5)))
        .unwrap();

    let layer = journald_layer().unwrap();
    assert_eq!(layer.syslog_identifier(), "mmcctrld");

    let mut buf = vec![0u8; 64 * 1024];
    // The layer checks the socket with an empty datagram first.
    let check_len = journal.recv(&mut buf).unwrap();
    assert_eq!(check_len, 0);

    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, || tracing::info!("Started"));

    let len = journal.recv(&mut buf).unwrap();
    let entry = &buf[..len];
    assert!(contains(entry, &length_encoded("SYSLOG_IDENTIFIER", b"mmcctrld")));
    assert!(contains(entry, &length_encoded("SYSLOG_FACILITY", b"3")));
    assert!(contains(entry, &length_encoded("PRIORITY", b"5")));
}
