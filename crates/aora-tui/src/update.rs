//! Reducer: applies one event to [`AppState`] and returns the effects to run.
//!
//! Pure with respect to I/O; everything that talks to the backend or the
//! filesystem comes back out as a [`UiEffect`].

use aora_core::{BackendResult, UserProfile, VideoPost};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::navigation::Route;
use crate::screens::{Navigation, ScreenUpdate};
use crate::state::{Alert, AppState};

pub fn update(state: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => vec![],
        UiEvent::Terminal(event) => handle_terminal_event(state, event),
        UiEvent::SessionHydrated(result) => {
            state.session.apply_hydration(result);
            let route = if state.session.is_logged_in() {
                Route::Home
            } else {
                Route::SignIn
            };
            navigate(state, Navigation::Replace(route))
        }
        UiEvent::SignedIn(result) => {
            state.sign_in.finished();
            signed_in(state, result)
        }
        UiEvent::SignedUp(result) => {
            state.sign_up.finished();
            signed_in(state, result)
        }
        UiEvent::SignedOut(result) => {
            state.profile.signing_out = false;
            match result {
                Ok(()) => {
                    state.session.clear();
                    state.profile.reset();
                    let mut effects = vec![UiEffect::PersistCredential];
                    effects.extend(navigate(state, Navigation::Replace(Route::SignIn)));
                    effects
                }
                Err(err) => {
                    state.alert = Some(Alert::from(&err));
                    vec![]
                }
            }
        }
        UiEvent::HomeLoaded { latest, all } => {
            apply_posts(state, latest, |s, posts| s.home.latest.set_posts(posts), |s| {
                s.home.latest.is_loading = false;
            });
            apply_posts(state, all, |s, posts| s.home.posts.set_posts(posts), |s| {
                s.home.posts.is_loading = false;
            });
            vec![]
        }
        UiEvent::SearchLoaded { query, result } => {
            if state.search.expects(&query) {
                apply_posts(state, result, |s, posts| s.search.results.set_posts(posts), |s| {
                    s.search.results.is_loading = false;
                });
            } else {
                tracing::debug!(query, "dropping stale search results");
            }
            vec![]
        }
        UiEvent::UserPostsLoaded { user_id, result } => {
            if state.profile.expects(&user_id) {
                apply_posts(state, result, |s, posts| s.profile.posts.set_posts(posts), |s| {
                    s.profile.posts.is_loading = false;
                });
            }
            vec![]
        }
        UiEvent::VideoCreated(result) => {
            state.create.finished();
            match result {
                Ok(post) => {
                    tracing::info!(post_id = %post.id, "post published");
                    state.alert = Some(Alert::new("Success", "Post uploaded successfully"));
                    navigate(state, Navigation::Push(Route::Home))
                }
                Err(message) => {
                    state.alert = Some(Alert::error(message));
                    vec![]
                }
            }
        }
    }
}

/// Successful sign-in/sign-up: cache the user, save the credential, go home.
fn signed_in(state: &mut AppState, result: BackendResult<UserProfile>) -> Vec<UiEffect> {
    match result {
        Ok(user) => {
            state.session.signed_in(user);
            let mut effects = vec![UiEffect::PersistCredential];
            effects.extend(navigate(state, Navigation::Replace(Route::Home)));
            effects
        }
        Err(err) => {
            state.alert = Some(Alert::from(&err));
            vec![]
        }
    }
}

fn apply_posts(
    state: &mut AppState,
    result: BackendResult<Vec<VideoPost>>,
    on_ok: impl FnOnce(&mut AppState, Vec<VideoPost>),
    on_err: impl FnOnce(&mut AppState),
) {
    match result {
        Ok(posts) => on_ok(state, posts),
        Err(err) => {
            on_err(state);
            if state.alert.is_none() {
                state.alert = Some(Alert::from(&err));
            }
        }
    }
}

fn handle_terminal_event(state: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(state, key),
        Event::Paste(text) => {
            if state.alert.is_none() && !state.session.is_loading() {
                paste(state, &text);
            }
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return vec![UiEffect::Quit];
    }
    if state.alert.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            state.alert = None;
        }
        return vec![];
    }
    if state.session.is_loading() {
        return vec![];
    }

    if state.session.is_logged_in() {
        let tab = match key.code {
            KeyCode::F(1) => Some(Route::Home),
            KeyCode::F(2) => Some(Route::Create),
            KeyCode::F(3) => Some(Route::Profile),
            _ => None,
        };
        if let Some(route) = tab {
            return navigate(state, Navigation::Replace(route));
        }
    }

    let pathname = state.router.pathname();
    let update = match state.router.current() {
        Route::SignIn => state.sign_in.handle_key(key),
        Route::SignUp => state.sign_up.handle_key(key),
        Route::Home => state.home.handle_key(key, &pathname),
        Route::Search { .. } => state.search.handle_key(key, &pathname),
        Route::Create => {
            let user_id = state.user_id().map(str::to_string);
            state.create.handle_key(key, user_id.as_deref())
        }
        Route::Profile => state.profile.handle_key(key),
    };
    apply_screen_update(state, update)
}

fn paste(state: &mut AppState, text: &str) {
    match state.router.current() {
        Route::SignIn => state.sign_in.paste(text),
        Route::SignUp => state.sign_up.paste(text),
        Route::Home => state.home.search.paste(text),
        Route::Search { .. } => state.search.search.paste(text),
        Route::Create => state.create.paste(text),
        Route::Profile => {}
    }
}

fn apply_screen_update(state: &mut AppState, update: ScreenUpdate) -> Vec<UiEffect> {
    let ScreenUpdate {
        mut effects,
        navigation,
        alert,
    } = update;
    if let Some(alert) = alert {
        state.alert = Some(alert);
    }
    if let Some(navigation) = navigation {
        effects.extend(navigate(state, navigation));
    }
    effects
}

/// Applies a navigation request and returns the loads the new screen needs.
fn navigate(state: &mut AppState, navigation: Navigation) -> Vec<UiEffect> {
    match navigation {
        Navigation::Push(route) => {
            let route = guard(state, route);
            if route.requires_session() {
                state.router.push(route);
            } else {
                state.router.replace(route);
            }
        }
        Navigation::Replace(route) => {
            let route = guard(state, route);
            state.router.replace(route);
        }
        Navigation::SetQuery(query) => {
            if !state.router.set_query(&query) {
                return vec![];
            }
        }
        Navigation::Back => {
            state.router.back();
            return vec![];
        }
    }
    enter_route(state)
}

/// Signed-out users only reach the auth screens.
fn guard(state: &AppState, route: Route) -> Route {
    if route.requires_session() && !state.session.is_logged_in() {
        Route::SignIn
    } else {
        route
    }
}

fn enter_route(state: &mut AppState) -> Vec<UiEffect> {
    match state.router.current().clone() {
        Route::Home => vec![state.home.enter()],
        Route::Search { query } => vec![state.search.enter(&query)],
        Route::Profile => match state.user_id().map(str::to_string) {
            Some(user_id) => vec![state.profile.enter(&user_id)],
            None => vec![],
        },
        Route::SignIn | Route::SignUp | Route::Create => vec![],
    }
}
