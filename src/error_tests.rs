use std::path::PathBuf;

use super::*;

#[test]
fn conflict_message_names_path_and_force_hint() {
    let err = LogweaveError::Conflict {
        path: PathBuf::from("/tmp/report.html"),
    };
    let msg = err.to_string();
    assert!(msg.contains("/tmp/report.html"));
    assert!(msg.contains("--force"));
}

#[test]
fn promote_error_carries_io_source() {
    let err = LogweaveError::Promote {
        path: PathBuf::from("out/data"),
        source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    };
    assert!(err.to_string().contains("out/data"));
    let source = std::error::Error::source(&err).expect("promote should chain its cause");
    assert!(source.to_string().contains("denied"));
}

#[test]
fn io_error_converts_via_from() {
    fn read_missing() -> Result<String> {
        Ok(std::fs::read_to_string("/nonexistent/logweave")?)
    }
    assert!(matches!(read_missing(), Err(LogweaveError::Io(_))));
}

#[test]
fn unknown_module_message_names_the_module() {
    let err = LogweaveError::UnknownModule("bogus_tool".to_string());
    assert!(err.to_string().contains("bogus_tool"));
}
