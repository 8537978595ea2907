use super::*;
use std::path::PathBuf;

#[test]
fn cli_parse_sniff() {
    match parse(&["urlsave", "sniff", "/path/to/file.bin"]) {
        CliCommand::Sniff { path } => assert_eq!(path, PathBuf::from("/path/to/file.bin")),
        _ => panic!("expected Sniff"),
    }
}

#[test]
fn cli_rejects_removed_checksum_subcommand() {
    assert!(Cli::try_parse_from(["urlsave", "checksum", "/path/to/file.bin"]).is_err());
    assert!(Cli::try_parse_from(["urlsave", "get", "https://example.com/", "--sha256"]).is_err());
}

#[test]
fn cli_rejects_missing_subcommand() {
    assert!(Cli::try_parse_from(["urlsave"]).is_err());
}
