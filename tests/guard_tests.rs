//! Integration tests for the auth-gated navigation guard
//!
//! Drives the guard through `RootLayout` the way the root screen does: the
//! auth store and the router change, and `on_state_change` runs after each.

mod common;

use common::Harness;
use ledger_navigator::*;

#[test]
fn test_signed_out_on_tabs_redirects_to_login_once() {
    let h = Harness::new(AuthStatus::SIGNED_OUT, "/(tabs)");
    h.root.set_assets_ready(true);

    assert_eq!(h.root.on_state_change(), Render::Content);
    assert_eq!(h.visited(), ["/login"]);

    // The router now reports /login; re-running with nothing changed is quiet.
    h.root.on_state_change();
    h.root.on_state_change();
    assert_eq!(h.visited(), ["/login"]);
}

#[test]
fn test_redirect_is_replacing() {
    let h = Harness::new(AuthStatus::SIGNED_OUT, "/(tabs)");
    h.navigator.push("/transaction/1");
    h.root.set_assets_ready(true);

    h.root.on_state_change();

    assert_eq!(h.navigator.current_path(), "/login");
    let last = h.navigator.changes().pop().unwrap();
    assert_eq!(last.direction, NavigationDirection::Replace);
    assert_eq!(last.from.as_deref(), Some("/transaction/1"));
}

#[test]
fn test_unchanged_inputs_do_not_repeat_redirect() {
    // A router that ignores navigation keeps reporting the protected route.
    struct StuckRouter(MemoryRouter);

    impl Navigator for StuckRouter {
        fn location(&self) -> RouteLocation {
            RouteLocation::from_path("/(tabs)")
        }
        fn replace(&self, path: &str) {
            self.0.replace(path);
        }
        fn push(&self, path: &str) {
            self.0.push(path);
        }
    }

    let guard = NavigationGuard::with_config(&NavigatorConfig::default());
    let router = StuckRouter(MemoryRouter::new("/(tabs)"));
    let location = router.location();
    let cx = GuardContext::new(AuthStatus::SIGNED_OUT, true, &location);

    for _ in 0..5 {
        assert_eq!(guard.run(&cx, &router).redirect_path(), Some("/login"));
    }
    assert_eq!(router.0.changes().len(), 1);
}

#[test]
fn test_signed_in_on_auth_routes_redirects_to_main() {
    for path in ["/login", "/signup"] {
        let h = Harness::new(AuthStatus::SIGNED_IN, path);
        h.root.set_assets_ready(true);
        h.root.on_state_change();
        assert_eq!(h.visited(), ["/(tabs)"], "from {path}");
    }
}

#[test]
fn test_consistent_states_do_not_redirect() {
    let cases = [
        (AuthStatus::SIGNED_IN, "/(tabs)"),
        (AuthStatus::SIGNED_IN, "/budget/3"),
        (AuthStatus::SIGNED_OUT, "/login"),
        (AuthStatus::SIGNED_OUT, "/signup"),
    ];
    for (status, path) in cases {
        let h = Harness::new(status, path);
        h.root.set_assets_ready(true);
        assert_eq!(h.root.on_state_change(), Render::Content);
        assert!(h.visited().is_empty(), "{status:?} at {path}");
    }
}

#[test]
fn test_loading_never_redirects() {
    for authenticated in [false, true] {
        for path in ["/(tabs)", "/login"] {
            let h = Harness::new(
                AuthStatus {
                    is_authenticated: authenticated,
                    is_loading: true,
                },
                path,
            );
            h.root.set_assets_ready(true);
            assert_eq!(h.root.on_state_change(), Render::Blank);
            assert!(h.visited().is_empty());
        }
    }
}

#[test]
fn test_guard_reruns_on_auth_change() {
    let h = Harness::new(AuthStatus::LOADING, "/(tabs)");
    h.root.set_assets_ready(true);
    assert_eq!(h.root.on_state_change(), Render::Blank);

    h.auth.set_status(AuthStatus::SIGNED_IN);
    assert_eq!(h.root.on_state_change(), Render::Content);
    assert!(h.visited().is_empty());

    // Token refresh failed later on: the store now reports signed out.
    h.auth.set_status(AuthStatus::SIGNED_OUT);
    h.root.on_state_change();
    assert_eq!(h.visited(), ["/login"]);
}

#[test]
fn test_user_navigates_to_signup_while_signed_in() {
    let h = Harness::new(AuthStatus::SIGNED_IN, "/(tabs)");
    h.root.set_assets_ready(true);
    h.root.on_state_change();

    h.navigator.set_location("/signup");
    h.root.on_state_change();

    assert_eq!(h.navigator.current_path(), "/(tabs)");
    assert_eq!(h.visited(), ["/(tabs)"]);
}

#[test]
fn test_end_to_end_login_flow() {
    let h = Harness::new(AuthStatus::SIGNED_OUT, "/(tabs)");
    h.root.set_assets_ready(true);

    h.root.on_state_change();
    assert_eq!(h.visited(), ["/login"]);

    h.auth.set_status(AuthStatus::SIGNED_IN);
    h.root.on_state_change();
    assert_eq!(h.visited(), ["/login", "/(tabs)"]);

    h.root.on_state_change();
    assert_eq!(h.visited().len(), 2);
}

#[test]
fn test_custom_entry_paths() {
    let config = NavigatorConfig::new().main_path("/home");
    let h = Harness::with_config(AuthStatus::SIGNED_OUT, "/books", &config);
    h.root.set_assets_ready(true);

    h.root.on_state_change();
    h.auth.set_status(AuthStatus::SIGNED_IN);
    h.root.on_state_change();
    assert_eq!(h.visited(), ["/login", "/home"]);
}
