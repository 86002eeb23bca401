//! Integration tests for error types

use jdkup_errors::*;

#[test]
fn test_error_conversion() {
    let install_err = InstallError::AmbiguousOrMissingBundle {
        staged_root: "/tmp/stage".into(),
        count: 2,
    };
    let err: Error = install_err.into();
    assert!(matches!(err, Error::Install(_)));
}

#[test]
fn test_error_display() {
    let err = InstallError::AmbiguousOrMissingBundle {
        staged_root: "/tmp/stage".into(),
        count: 0,
    };
    assert_eq!(
        err.to_string(),
        "expected exactly one bundle under /tmp/stage, found 0"
    );
}

#[test]
fn test_error_clone() {
    let err = RecipeError::NotFound {
        token: "jdk26ea".into(),
    };
    let cloned = err.clone();
    assert_eq!(err.to_string(), cloned.to_string());
}

#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "test");
    let err: Error = io_err.into();
    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn test_retryability() {
    let err: Error = InstallError::RemovalFailed {
        path: "/Library/Java/JavaVirtualMachines/jdk-26-ea.jdk".into(),
        message: "rm exited with status 1".into(),
    }
    .into();
    assert!(err.is_retryable());

    let err: Error = InstallError::InvalidBundle {
        path: "/tmp/stage/jdk-escape".into(),
        message: "resolves outside the staged root".into(),
    }
    .into();
    assert!(!err.is_retryable());
}
