//! Integration tests for Appstate

use appstate::{
    use_counter, use_notifications, use_user, Action, AppProvider, AppStore, SliceId, StateError,
    ThemeMode, User,
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

fn counter_consumer(store: &AppStore) -> (Arc<AtomicUsize>, appstate::Effect) {
    let renders = Arc::new(AtomicUsize::new(0));
    let effect = store.effect({
        let store = store.clone();
        let renders = renders.clone();
        move || {
            let _ = store.counter();
            renders.fetch_add(1, Ordering::SeqCst);
        }
    });
    (renders, effect)
}

#[test]
fn step_scenario() {
    let store = AppStore::new();

    store.set_step(5);
    store.increment();
    store.increment();
    assert_eq!(store.counter().count, 10);

    store.set_step(1);
    store.decrement();
    assert_eq!(store.counter().count, 9);
}

#[test]
fn login_scenario() {
    let store = AppStore::new();

    store.login("John Doe", "john@example.com");
    let user = store.user();
    assert!(user.is_logged_in);
    assert_eq!(user.name, "John Doe");

    store.update_name("Jane Doe");
    let user = store.user();
    assert_eq!(user.name, "Jane Doe");
    assert_eq!(user.email, "john@example.com");
    assert!(user.is_logged_in);

    store.logout();
    assert_eq!(store.user(), User::default());
}

#[test]
fn notification_scenario() {
    let store = AppStore::new();

    store.add_notification("a");
    store.add_notification("b");
    assert_eq!(store.notifications().into_vec(), vec!["a", "b"]);

    store.remove_notification(2);
    assert_eq!(store.notifications().into_vec(), vec!["a", "b"]);

    store.add_notification("x");
    store.clear_notifications();
    assert!(store.notifications().is_empty());
}

#[test]
fn dispatch_matches_named_actions() {
    let by_method = AppStore::new();
    by_method.login("n", "e");
    by_method.toggle_theme();
    by_method.set_step(3);
    by_method.increment();
    by_method.add_notification("m");

    let by_dispatch = AppStore::new();
    for action in [
        Action::Login {
            name: "n".into(),
            email: "e".into(),
        },
        Action::ToggleTheme,
        Action::SetStep(3),
        Action::Increment,
        Action::AddNotification("m".into()),
    ] {
        by_dispatch.dispatch(action);
    }

    assert_eq!(by_method.snapshot(), by_dispatch.snapshot());
}

#[test]
fn consumers_rerun_only_for_slices_they_read() {
    let store = AppStore::new();
    let (counter_renders, _counter_view) = counter_consumer(&store);

    let theme_renders = Arc::new(AtomicUsize::new(0));
    let _theme_view = store.effect({
        let store = store.clone();
        let theme_renders = theme_renders.clone();
        move || {
            let _ = store.theme();
            theme_renders.fetch_add(1, Ordering::SeqCst);
        }
    });

    store.login("John Doe", "john@example.com");
    store.add_notification("hi");
    store.set_primary_color("#000000");
    store.toggle_theme();

    assert_eq!(counter_renders.load(Ordering::SeqCst), 1);
    assert_eq!(theme_renders.load(Ordering::SeqCst), 3);

    store.increment();
    assert_eq!(counter_renders.load(Ordering::SeqCst), 2);
    assert_eq!(theme_renders.load(Ordering::SeqCst), 3);
}

#[test]
fn selector_recomputes_only_after_its_slice_changes() {
    let store = AppStore::new();
    let computations = Arc::new(AtomicUsize::new(0));

    let notification_count = store.selector({
        let store = store.clone();
        let computations = computations.clone();
        move || {
            computations.fetch_add(1, Ordering::SeqCst);
            store.notifications().len()
        }
    });

    assert_eq!(notification_count.get(), 0);
    store.increment();
    store.toggle_theme();
    assert_eq!(notification_count.get(), 0);
    assert_eq!(computations.load(Ordering::SeqCst), 1);

    store.add_notification("one");
    assert_eq!(notification_count.get(), 1);
    assert_eq!(computations.load(Ordering::SeqCst), 2);
}

#[test]
fn effect_reading_a_selector_follows_it() {
    let store = AppStore::new();
    let is_dark = store.selector({
        let store = store.clone();
        move || store.theme().mode == ThemeMode::Dark
    });

    let seen = Arc::new(Mutex::new(Vec::new()));
    let _view = store.effect({
        let is_dark = is_dark.clone();
        let seen = seen.clone();
        move || seen.lock().unwrap().push(is_dark.get())
    });

    store.increment();
    store.toggle_theme();
    store.toggle_theme();

    assert_eq!(*seen.lock().unwrap(), vec![false, true, false]);
}

#[test]
fn keyed_subscription_stops_when_guard_dropped() {
    let store = AppStore::new();
    let calls = Arc::new(AtomicUsize::new(0));

    let guard = store.subscribe(SliceId::Notifications, {
        let calls = calls.clone();
        move || {
            calls.fetch_add(1, Ordering::SeqCst);
        }
    });

    store.add_notification("one");
    drop(guard);
    store.add_notification("two");

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(store.subscriber_count(SliceId::Notifications), 0);
}

#[test]
fn read_only_slice_watch() {
    let store = AppStore::new();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let _guard = store.counter_slice().watch({
        let seen = seen.clone();
        move |counter| seen.lock().unwrap().push(counter.count)
    });

    store.increment();
    store.set_count(-7);

    assert_eq!(*seen.lock().unwrap(), vec![0, 1, -7]);
}

#[test]
fn separate_stores_are_independent() {
    let first = AppStore::new();
    let second = AppStore::new();

    first.increment();
    first.login("a", "b");

    assert_eq!(second.counter().count, 0);
    assert!(!second.user().is_logged_in);
}

#[test]
fn provider_variant() {
    assert!(matches!(
        use_counter(),
        Err(StateError::Uninitialized { .. })
    ));

    let store = AppStore::new();
    AppProvider::provide(store.clone(), || {
        let counter = use_counter().unwrap();
        counter.set_step(5);
        counter.increment();

        let user = use_user().unwrap();
        user.login("John Doe", "john@example.com");

        use_notifications().unwrap().add_notification("welcome");
    });

    let snapshot = store.snapshot();
    assert_eq!(snapshot.counter.count, 5);
    assert_eq!(snapshot.user.name, "John Doe");
    assert_eq!(snapshot.notifications.len(), 1);
}

#[test]
fn effect_owning_its_selector_can_be_dropped() {
    let store = AppStore::new();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let view = {
        let doubled = store.selector({
            let store = store.clone();
            move || store.counter().count * 2
        });
        let seen = seen.clone();
        store.effect(move || seen.lock().unwrap().push(doubled.get()))
    };

    store.increment();
    drop(view);
    store.increment();

    assert_eq!(*seen.lock().unwrap(), vec![0, 2]);
    assert_eq!(store.subscriber_count(SliceId::Counter), 0);
    assert_eq!(store.runtime().observer_count(), 0);
}

#[test]
fn clearing_runtime_with_effect_owning_selector() {
    let store = AppStore::new();
    let _view = {
        let is_dark = store.selector({
            let store = store.clone();
            move || store.theme().mode.is_dark()
        });
        store.effect(move || {
            let _ = is_dark.get();
        })
    };

    store.runtime().clear();
    store.toggle_theme();

    assert_eq!(store.runtime().observer_count(), 0);
}

#[test]
fn panicking_consumer_leaves_no_dependency() {
    let store = AppStore::new();

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        store.effect({
            let store = store.clone();
            move || {
                let _ = store.theme();
                panic!("view failed to render");
            }
        })
    }));
    assert!(result.is_err());

    let _ = store.counter();
    assert_eq!(store.subscriber_count(SliceId::Counter), 0);
    assert_eq!(store.subscriber_count(SliceId::Theme), 0);
}

#[test]
fn subscriber_can_drop_a_later_subscriber() {
    let store = AppStore::new();
    let later_calls = Arc::new(AtomicUsize::new(0));
    let slot: Arc<Mutex<Option<appstate::WatchGuard>>> = Arc::new(Mutex::new(None));

    let _first = store.subscribe(SliceId::Counter, {
        let slot = slot.clone();
        move || {
            slot.lock().unwrap().take();
        }
    });
    let later = store.subscribe(SliceId::Counter, {
        let later_calls = later_calls.clone();
        move || {
            later_calls.fetch_add(1, Ordering::SeqCst);
        }
    });
    *slot.lock().unwrap() = Some(later);

    store.increment();
    store.increment();

    assert_eq!(later_calls.load(Ordering::SeqCst), 0);
    assert_eq!(store.subscriber_count(SliceId::Counter), 1);
}

#[test]
fn consumers_outlive_dropped_store_handle() {
    let store = AppStore::new();
    let renders = Arc::new(AtomicUsize::new(0));
    let view = store.effect({
        let store = store.clone();
        let renders = renders.clone();
        move || {
            let _ = store.user();
            renders.fetch_add(1, Ordering::SeqCst);
        }
    });
    let handle = store.clone();
    drop(store);

    handle.login("a", "b");
    assert_eq!(renders.load(Ordering::SeqCst), 2);

    drop(handle);
    drop(view);
    assert_eq!(renders.load(Ordering::SeqCst), 2);
}
