#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use paramsync::{Codec, EmptyValue, ParamAtomSynchronizer, SyncOptions};
use paramsync_reactive::Observable;
use paramsync_router::{MemoryRouter, NavigateOptions};

#[derive(Arbitrary, Debug)]
enum Action {
    Navigate(Option<String>),
    SetCell(String),
    Back,
    Forward,
}

fuzz_target!(|actions: Vec<Action>| {
    let router = MemoryRouter::default();
    let cell = Observable::new(String::new());
    let Ok(_handle) = ParamAtomSynchronizer::new(cell.clone(), router.clone(), "q", Codec::default())
        .options(SyncOptions::default().with_empty(EmptyValue::Remove))
        .attach()
    else {
        return;
    };

    for action in actions.into_iter().take(64) {
        match action {
            Action::Navigate(Some(value)) => {
                let mut params = router.search_params();
                params.set("q", value);
                router.set_search_params(params, NavigateOptions::push());
            }
            Action::Navigate(None) => {
                let _ = router.navigate("/", NavigateOptions::push());
            }
            Action::SetCell(value) => cell.set(value),
            Action::Back => {
                router.back();
            }
            Action::Forward => {
                router.forward();
            }
        }
        let raw = router.search_params().get("q").map(str::to_owned);
        assert_eq!(raw.unwrap_or_default(), cell.get());
    }
});
