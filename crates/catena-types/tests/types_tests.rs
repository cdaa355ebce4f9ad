//! Integration tests for catena-types.

use catena_types::{constants, CatenaError, CatenaResult, Scalar};

// ─── Error Tests ──────────────────────────────────────────────

#[test]
fn error_display() {
    let err = CatenaError::InvalidDefinition("needs at least 3 particles, got 1".into());
    assert!(err.to_string().contains("at least 3 particles"));
}

#[test]
fn config_error_display() {
    let err = CatenaError::InvalidConfig("stretch_stiffness must be in [0, 1]".into());
    assert!(err.to_string().contains("Invalid configuration"));
}

#[test]
fn io_error_converts() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
    let err: CatenaError = io.into();
    assert!(matches!(err, CatenaError::Io(_)));
    assert!(err.to_string().contains("no such file"));
}

#[test]
fn result_alias_propagates() {
    fn fallible(ok: bool) -> CatenaResult<u32> {
        if ok {
            Ok(7)
        } else {
            Err(CatenaError::InvalidConfig("bad".into()))
        }
    }

    assert_eq!(fallible(true).unwrap(), 7);
    assert!(fallible(false).is_err());
}

// ─── Constants Tests ──────────────────────────────────────────

#[test]
fn constants_are_sane() {
    assert!(constants::GRAVITY > 9.0 && constants::GRAVITY < 10.0);

    let dt: Scalar = constants::DEFAULT_DT;
    assert!(dt > 0.0 && dt < 0.1);

    assert!(constants::DEFAULT_ITERATIONS >= 1);
}
