// tests/logging_file.rs
//
// Installs the global subscriber, so it lives in its own test binary.

use std::error::Error;
use std::fs;

use speech_installer::cli::LogLevel;
use speech_installer::logging::init_logging;
use speech_installer::transcript::Transcript;

#[test]
fn transcript_lines_reach_the_json_log_file() -> Result<(), Box<dyn Error>> {
    let tmp = tempfile::tempdir()?;
    let path = init_logging(Some(LogLevel::Info), tmp.path())?;

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or("log file has no name")?;
    assert!(name.starts_with("installer-") && name.ends_with(".log"), "{name}");

    Transcript::new().info("Cloning https://example.invalid/repo");
    tracing::debug!("filtered out at info level");

    let contents = fs::read_to_string(&path)?;
    let transcript_line = contents
        .lines()
        .find(|l| l.contains("Cloning https://example.invalid/repo"))
        .ok_or("transcript line missing from log file")?;
    assert!(transcript_line.contains(r#""target":"transcript""#));
    assert!(transcript_line.contains(r#""level":"INFO""#));
    assert!(!contents.contains("filtered out at info level"));
    Ok(())
}
