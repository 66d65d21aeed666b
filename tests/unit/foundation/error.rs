use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        WaveglowError::invalid_input("x")
            .to_string()
            .contains("invalid input:")
    );
    assert!(
        WaveglowError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        WaveglowError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        WaveglowError::cache_corrupt("x")
            .to_string()
            .contains("cache corrupt:")
    );
}

#[test]
fn unsupported_format_names_width_and_kind() {
    let int = WaveglowError::UnsupportedFormat {
        bits_per_sample: 24,
        float: false,
    };
    assert_eq!(int.to_string(), "unsupported sample format: 24-bit integer");

    let float = WaveglowError::UnsupportedFormat {
        bits_per_sample: 32,
        float: true,
    };
    assert_eq!(float.to_string(), "unsupported sample format: 32-bit float");
}

#[test]
fn external_tool_failed_carries_diagnostics() {
    let err = WaveglowError::ExternalToolFailed {
        tool: "ffmpeg".to_string(),
        status: "exit status: 1".to_string(),
        stderr: "no such codec".to_string(),
    };
    let msg = err.to_string();
    assert!(msg.contains("ffmpeg"));
    assert!(msg.contains("no such codec"));
}

#[test]
fn exit_codes_distinguish_fatal_kinds() {
    assert_eq!(WaveglowError::invalid_input("x").exit_code(), 2);
    assert_eq!(
        WaveglowError::UnsupportedFormat {
            bits_per_sample: 24,
            float: false
        }
        .exit_code(),
        3
    );
    assert_eq!(
        WaveglowError::ExternalToolMissing {
            tool: "ffmpeg".to_string()
        }
        .exit_code(),
        4
    );
    assert_eq!(
        WaveglowError::ExternalToolFailed {
            tool: "ffmpeg".to_string(),
            status: "1".to_string(),
            stderr: String::new()
        }
        .exit_code(),
        5
    );
    assert_eq!(WaveglowError::validation("x").exit_code(), 1);
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = WaveglowError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
