#![forbid(unsafe_code)]

//! Integration tests: seeding the cell from the URL at mount.

use paramsync::{Codec, SyncPhase};
use paramsync_harness::{SyncFixture, TEST_PARAM, init_test_logging};
use paramsync_reactive::BatchScope;

const INITIAL: &str = "initialTestValue";
const TEST_VALUE: &str = "testValue";

fn with_param() -> String {
    format!("/?{TEST_PARAM}={TEST_VALUE}")
}

// ============================================================================
// Without sync
// ============================================================================

#[test]
fn unsynced_without_param_keeps_initial_value() {
    let fixture = SyncFixture::unsynced("/", INITIAL.to_string());
    assert_eq!(fixture.cell_text(), INITIAL);
}

#[test]
fn unsynced_with_param_keeps_initial_value() {
    let fixture = SyncFixture::unsynced(&with_param(), INITIAL.to_string());
    assert_eq!(fixture.cell_text(), INITIAL);
    assert_eq!(fixture.href(), with_param());
}

// ============================================================================
// With sync
// ============================================================================

#[test]
fn synced_without_param_reads_empty_value() {
    init_test_logging();
    let fixture = SyncFixture::synced("/", INITIAL.to_string(), Codec::default());
    assert_eq!(fixture.cell_text(), "");
    assert_eq!(fixture.href(), "/");
}

#[test]
fn synced_with_param_reads_param_value() {
    init_test_logging();
    let fixture = SyncFixture::synced(&with_param(), INITIAL.to_string(), Codec::default());
    assert_eq!(fixture.cell_text(), TEST_VALUE);
    assert_eq!(fixture.href(), with_param());
}

#[test]
fn synced_with_empty_param_reads_empty_value() {
    let fixture = SyncFixture::synced(
        &format!("/?{TEST_PARAM}="),
        INITIAL.to_string(),
        Codec::default(),
    );
    assert_eq!(fixture.cell_text(), "");
}

#[test]
fn percent_encoded_param_is_decoded_before_conversion() {
    let fixture = SyncFixture::synced(
        &format!("/?{TEST_PARAM}=hello%20world%21"),
        INITIAL.to_string(),
        Codec::default(),
    );
    assert_eq!(fixture.cell_text(), "hello world!");
}

#[test]
fn mount_never_touches_history() {
    for entry in ["/".to_string(), with_param(), "/deep/path?x=1#frag".to_string()] {
        let fixture = SyncFixture::synced(&entry, INITIAL.to_string(), Codec::default());
        assert_eq!(fixture.router.history_len(), 1, "entry {entry}");
        assert_eq!(fixture.href(), entry);
        assert_eq!(fixture.location.renders(), 1);
    }
}

#[test]
fn mount_inside_batch_never_touches_history() {
    init_test_logging();
    for entry in ["/".to_string(), with_param()] {
        let fixture = {
            let _batch = BatchScope::new();
            SyncFixture::synced(&entry, INITIAL.to_string(), Codec::default())
        };
        assert_eq!(fixture.href(), entry);
        assert_eq!(fixture.router.history_len(), 1, "entry {entry}");
        assert_eq!(
            fixture.sync.as_ref().map(|sync| sync.phase()),
            Some(SyncPhase::Active)
        );
    }
}

#[test]
fn batched_mount_then_cell_update_writes_once() {
    let fixture = {
        let _batch = BatchScope::new();
        SyncFixture::synced("/", INITIAL.to_string(), Codec::default())
    };
    assert_eq!(fixture.cell_text(), "");

    fixture.update_cell("typed".into());
    assert_eq!(fixture.href(), format!("/?{TEST_PARAM}=typed"));
    assert_eq!(fixture.router.history_len(), 2);
}

#[test]
fn custom_decode_sees_absence_as_none() {
    let fixture = SyncFixture::synced(
        "/",
        INITIAL.to_string(),
        Codec::default().with_decode(|raw| match raw {
            None => "<absent>".to_string(),
            Some(raw) => raw.to_string(),
        }),
    );
    assert_eq!(fixture.cell_text(), "<absent>");
}
