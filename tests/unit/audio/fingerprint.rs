use std::time::Duration;

use super::*;

fn temp_dir(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "waveglow_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn set_mtime(path: &Path, t: SystemTime) {
    let f = std::fs::OpenOptions::new().write(true).open(path).unwrap();
    f.set_modified(t).unwrap();
}

#[test]
fn fingerprint_is_stable_for_unchanged_file() {
    let tmp = temp_dir("fp_stable");
    std::fs::create_dir_all(&tmp).unwrap();
    let p = tmp.join("a.bin");
    std::fs::write(&p, vec![7u8; 20_000]).unwrap();

    let a = fingerprint(&p).unwrap();
    let b = fingerprint(&p).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.to_hex().len(), 64);
    assert!(a.to_hex().chars().all(|c| c.is_ascii_hexdigit()));

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn single_byte_change_changes_fingerprint() {
    let tmp = temp_dir("fp_byte");
    std::fs::create_dir_all(&tmp).unwrap();
    let p = tmp.join("a.bin");
    let fixed = UNIX_EPOCH + Duration::from_secs(1_700_000_000);

    let mut bytes = vec![1u8; 10_000];
    std::fs::write(&p, &bytes).unwrap();
    set_mtime(&p, fixed);
    let before = fingerprint(&p).unwrap();

    bytes[9_000] = 2;
    std::fs::write(&p, &bytes).unwrap();
    set_mtime(&p, fixed);
    let after = fingerprint(&p).unwrap();

    assert_ne!(before, after);
    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn touching_mtime_changes_fingerprint() {
    let tmp = temp_dir("fp_touch");
    std::fs::create_dir_all(&tmp).unwrap();
    let p = tmp.join("a.bin");
    std::fs::write(&p, b"same bytes").unwrap();

    set_mtime(&p, UNIX_EPOCH + Duration::from_secs(1_600_000_000));
    let before = fingerprint(&p).unwrap();
    set_mtime(&p, UNIX_EPOCH + Duration::from_secs(1_600_000_001));
    let after = fingerprint(&p).unwrap();

    assert_ne!(before, after);
    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn missing_file_is_io_error() {
    let p = temp_dir("fp_missing").join("nope.wav");
    let err = fingerprint(&p).unwrap_err();
    assert!(matches!(err, crate::WaveglowError::Io(_)));
}

#[test]
fn display_matches_hex() {
    let fp = AudioFingerprint::from_bytes([0xab; 32]);
    assert_eq!(fp.to_string(), "ab".repeat(32));
    assert_eq!(fp.as_bytes()[0], 0xab);
}
