// tests/python_version.rs

use proptest::prelude::*;
use speech_installer::prereq::{PythonVersion, ensure_supported, parse_python_version};

#[test]
fn parses_common_version_outputs() {
    let v = parse_python_version("Python 3.11.4\n").unwrap();
    assert_eq!(v, PythonVersion { major: 3, minor: 11, patch: Some(4) });

    let v = parse_python_version("Python 3.10").unwrap();
    assert_eq!(v.patch, None);
    assert_eq!(v.to_string(), "3.10");

    let v = parse_python_version("Python 3.12.0rc1").unwrap();
    assert_eq!((v.major, v.minor, v.patch), (3, 12, Some(0)));
}

#[test]
fn rejects_garbage() {
    assert!(parse_python_version("").is_err());
    assert!(parse_python_version("command not found").is_err());
}

#[test]
fn version_numbers_outside_the_banner_are_ignored() {
    assert!(parse_python_version("pyenv: version `3.10' is not installed").is_err());
    assert!(parse_python_version("version 3.10 not installed").is_err());
    assert!(parse_python_version("3.11.4").is_err());
}

#[test]
fn boundaries_of_supported_range() {
    let v = |major, minor| PythonVersion { major, minor, patch: Some(0) };

    assert!(ensure_supported(v(3, 8)).is_err());
    assert!(ensure_supported(v(3, 9)).is_ok());
    assert!(ensure_supported(v(3, 11)).is_ok());
    assert!(ensure_supported(v(3, 12)).is_err());
    assert!(ensure_supported(v(2, 7)).is_err());
    assert!(ensure_supported(v(4, 0)).is_err());
}

proptest! {
    #[test]
    fn supported_iff_in_half_open_range(major in 0u32..6, minor in 0u32..30, patch in 0u32..50) {
        let text = format!("Python {major}.{minor}.{patch}");
        let version = parse_python_version(&text).unwrap();
        prop_assert_eq!(version, PythonVersion { major, minor, patch: Some(patch) });

        let expected = (3, 9) <= (major, minor) && (major, minor) < (3, 12);
        prop_assert_eq!(ensure_supported(version).is_ok(), expected);
    }
}
