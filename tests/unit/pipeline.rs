use super::*;

#[test]
fn wav_extension_is_case_insensitive() {
    assert!(is_wav(Path::new("a.wav")));
    assert!(is_wav(Path::new("dir/B.WAV")));
    assert!(is_wav(Path::new("c.Wav")));
    assert!(!is_wav(Path::new("d.mp3")));
    assert!(!is_wav(Path::new("wav")));
    assert!(!is_wav(Path::new("e.wav.flac")));
}

#[test]
fn temp_paths_are_unique_and_in_dir() {
    let dir = std::env::temp_dir();
    let a = temp_wav_path(&dir);
    let b = temp_wav_path(&dir);
    assert_ne!(a, b);
    assert_eq!(a.parent(), Some(dir.as_path()));
    assert!(is_wav(&a));
}

#[test]
fn guard_removes_file_and_tolerates_missing() {
    let path = temp_wav_path(&std::env::temp_dir());
    std::fs::write(&path, b"x").unwrap();
    drop(TempFileGuard(Some(path.clone())));
    assert!(!path.exists());

    drop(TempFileGuard(Some(path.clone())));
    drop(TempFileGuard(None));
}
