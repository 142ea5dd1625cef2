//! Dashboard demonstrating both ways of reaching the store.
//!
//! Run with `RUST_LOG=appstate=debug` to see every dispatched action.

use appstate::{
    use_counter, use_notifications, use_theme, use_user, AppProvider, AppStore, StateError,
    StoreConfig,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), StateError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Dashboard ===\n");

    let config = StoreConfig::from_toml_str(r##"primary_color = "#10b981""##)?;
    let store = AppStore::with_config(&config);

    // "Components" are effects: each re-renders only when a slice it reads changes
    println!("1. Mounting views");
    let _user_view = store.effect({
        let store = store.clone();
        move || {
            let user = store.user();
            if user.is_logged_in {
                println!("   [user] {} <{}>", user.name, user.email);
            } else {
                println!("   [user] not logged in");
            }
        }
    });

    let _theme_view = store.effect({
        let store = store.clone();
        move || {
            let theme = store.theme();
            println!("   [theme] {} / {}", theme.mode, theme.primary_color);
        }
    });

    let _counter_view = store.effect({
        let store = store.clone();
        move || {
            let counter = store.counter();
            println!("   [counter] {} (step {})", counter.count, counter.step);
        }
    });

    let unread = store.selector({
        let store = store.clone();
        move || store.notifications().len()
    });
    let _badge = store.effect({
        let unread = unread.clone();
        move || println!("   [badge] {} notification(s)", unread.get())
    });

    println!("\n2. Passing the store explicitly");
    store.set_step(5);
    store.increment();
    store.increment();
    store.set_step(1);
    store.decrement();

    store.login("John Doe", "john@example.com");
    store.update_name("Jane Doe");
    store.toggle_theme();

    println!("\n3. Reaching the store through a provider");
    AppProvider::provide(store.clone(), || -> Result<(), StateError> {
        let notifications = use_notifications()?;
        notifications.add_notification("Welcome back");
        notifications.add_notification("You have mail");
        use_notifications()?.remove_notification(0);

        use_counter()?.reset();
        use_theme()?.set_primary_color("#f43f5e");
        use_user()?.logout();
        Ok(())
    })?;

    println!("\n4. Outside the provider");
    match use_counter() {
        Ok(_) => println!("   unexpectedly found a store"),
        Err(err) => println!("   {err}"),
    }

    println!("\n5. Final state:\n   {:?}", store.snapshot());
    Ok(())
}
