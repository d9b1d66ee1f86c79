//! CLI-level tests driving the built `crcforge` binary directly.

use std::io::Write;
use std::process::Command;

fn crcforge() -> Command {
    Command::new(env!("CARGO_BIN_EXE_crcforge"))
}

fn write_fixture(contents: &[u8]) -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(contents).unwrap();
    f
}

#[test]
fn test_checksum_matches_precomputed_digest() {
    let fixture = write_fixture(b"123456789");
    let out = crcforge()
        .args(["checksum", "-q", "-a", "crc32"])
        .arg(fixture.path())
        .output()
        .unwrap();
    assert!(out.status.success());
    assert_eq!(String::from_utf8(out.stdout).unwrap().trim(), "CBF43926");
}

#[test]
fn test_apply_then_checksum_reproduces_target_for_every_preset() {
    for (algo, target) in [
        ("crc32", "DEADBEEF"),
        ("crc32-posix", "0BADF00D"),
        ("crc16-ccitt", "BEEF"),
        ("crc16-xmodem", "BEEF"),
        ("crc16-ibm", "BEEF"),
    ] {
        let fixture = write_fixture(b"hello, patch me");
        let out_path = fixture.path().with_extension("out");

        let apply = crcforge()
            .args(["apply", "-q", "-a", algo, "-o"])
            .arg(&out_path)
            .arg(fixture.path())
            .arg(target)
            .output()
            .unwrap();
        assert!(apply.status.success(), "apply failed for {algo}: {apply:?}");

        let checksum = crcforge()
            .args(["checksum", "-q", "-a", algo])
            .arg(&out_path)
            .output()
            .unwrap();
        assert!(checksum.status.success());
        assert_eq!(
            String::from_utf8(checksum.stdout).unwrap().trim(),
            target,
            "algo={algo}"
        );

        std::fs::remove_file(&out_path).ok();
    }
}

#[test]
fn test_in_place_apply_leaves_no_tmp_file_behind() {
    let fixture = write_fixture(b"hello, patch me in place");
    let path = fixture.path().to_path_buf();
    let tmp_path = {
        let mut s = path.as_os_str().to_os_string();
        s.push(".tmp");
        std::path::PathBuf::from(s)
    };

    let apply = crcforge()
        .args(["apply", "-q", "-a", "crc32"])
        .arg(&path)
        .arg("DEADBEEF")
        .output()
        .unwrap();
    assert!(apply.status.success());
    assert!(!tmp_path.exists());

    let checksum = crcforge()
        .args(["checksum", "-q", "-a", "crc32"])
        .arg(&path)
        .output()
        .unwrap();
    assert_eq!(String::from_utf8(checksum.stdout).unwrap().trim(), "DEADBEEF");
}

#[test]
fn test_list_algorithms_lists_every_preset() {
    let out = crcforge().arg("list-algorithms").output().unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    for name in ["CRC32", "CRC32POSIX", "CRC16CCITT", "CRC16XMODEM", "CRC16IBM"] {
        assert!(stdout.contains(name), "missing {name} in:\n{stdout}");
    }
}
