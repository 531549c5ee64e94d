#![forbid(unsafe_code)]

//! Property tests: the synchronization contract under arbitrary inputs.

use paramsync::{Codec, EmptyValue, SyncOptions};
use paramsync_harness::{SyncFixture, TEST_PARAM};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Action {
    Navigate(Option<u16>),
    SetCell(u16),
    Back,
    Forward,
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        proptest::option::of(0u16..50).prop_map(Action::Navigate),
        (0u16..50).prop_map(Action::SetCell),
        Just(Action::Back),
        Just(Action::Forward),
    ]
}

/// Inverse converters over `Option<u16>`: absent <-> `None`, digits <-> `Some`.
fn optional_number_codec() -> Codec<OptNum> {
    Codec::new(
        |raw: Option<&str>| OptNum(raw.and_then(|raw| raw.parse().ok())),
        |value: &OptNum| value.0.map(|n| n.to_string()).unwrap_or_default(),
    )
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct OptNum(Option<u16>);

impl std::fmt::Display for OptNum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(n) => write!(f, "{n}"),
            None => f.write_str("-"),
        }
    }
}

proptest! {
    #[test]
    fn mount_seeds_decoded_param(raw in proptest::option::of("[a-zA-Z0-9 _.~-]{0,16}")) {
        let entry = match &raw {
            Some(raw) => {
                let mut params = paramsync_router::SearchParams::new();
                params.set(TEST_PARAM, raw.clone());
                format!("/?{params}")
            }
            None => "/".to_string(),
        };
        let fixture = SyncFixture::synced(&entry, "initial".to_string(), Codec::default());
        prop_assert_eq!(fixture.cell.get(), raw.unwrap_or_default());
        prop_assert_eq!(fixture.router.history_len(), 1);
    }

    #[test]
    fn cell_write_reaches_fixed_point_in_one_step(value in "[a-z0-9]{1,12}") {
        let fixture = SyncFixture::synced("/", String::new(), Codec::default());
        let before = fixture.router.history_len();

        fixture.update_cell(value.clone());
        let search = fixture.router.search_params();
        prop_assert_eq!(search.get(TEST_PARAM), Some(value.as_str()));
        prop_assert_eq!(fixture.cell.get(), value);
        prop_assert_eq!(fixture.router.history_len(), before + 1);
    }

    #[test]
    fn quiescent_state_agrees(actions in proptest::collection::vec(action(), 1..40)) {
        let fixture = SyncFixture::synced_with(
            "/",
            OptNum(None),
            optional_number_codec(),
            SyncOptions::default().with_empty(EmptyValue::Remove),
        );

        for action in actions {
            match action {
                Action::Navigate(Some(n)) => fixture.navigate(&format!("/?{TEST_PARAM}={n}")),
                Action::Navigate(None) => fixture.navigate("/"),
                Action::SetCell(n) => fixture.update_cell(OptNum(Some(n))),
                Action::Back => {
                    fixture.router.back();
                }
                Action::Forward => {
                    fixture.router.forward();
                }
            }
            let raw = fixture.router.search_params().get(TEST_PARAM).map(str::to_owned);
            let expected = fixture.cell.get().0.map(|n| n.to_string());
            prop_assert_eq!(raw, expected);
        }
    }
}
