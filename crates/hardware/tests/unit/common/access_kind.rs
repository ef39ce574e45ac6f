//! # Access Kind Tests
//!
//! Verifies trace token parsing and how many cache applications each kind
//! of access performs.

use cachesim_core::common::{AccessKind, SimError};
use rstest::rstest;

#[rstest]
#[case("L", AccessKind::Load)]
#[case("S", AccessKind::Store)]
#[case("M", AccessKind::Modify)]
#[case(" M ", AccessKind::Modify)]
fn parses_trace_tokens(#[case] token: &str, #[case] kind: AccessKind) {
    assert_eq!(token.parse::<AccessKind>().unwrap(), kind);
}

#[rstest]
#[case("I")]
#[case("l")]
#[case("X")]
#[case("LS")]
#[case("")]
fn rejects_other_tokens(#[case] token: &str) {
    match token.parse::<AccessKind>() {
        Err(SimError::UnknownAccessKind(found)) => assert_eq!(found, token.trim()),
        other => panic!("expected UnknownAccessKind, got {other:?}"),
    }
}

#[test]
fn modify_applies_twice() {
    assert_eq!(AccessKind::Load.applications(), 1);
    assert_eq!(AccessKind::Store.applications(), 1);
    assert_eq!(AccessKind::Modify.applications(), 2);
}

#[test]
fn display_round_trips_the_token() {
    for kind in [AccessKind::Load, AccessKind::Store, AccessKind::Modify] {
        assert_eq!(kind.to_string().parse::<AccessKind>().unwrap(), kind);
        assert_eq!(kind.to_string(), kind.token().to_string());
    }
}
