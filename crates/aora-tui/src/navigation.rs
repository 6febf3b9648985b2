//! Path-based navigation state.
//!
//! Screens are addressed by pathname (`/home`, `/search/{query}`, ...). The
//! router keeps a history stack; `replace` is used for auth transitions so
//! signed-out screens are not reachable with back.

/// A screen and its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    SignIn,
    SignUp,
    Home,
    Search { query: String },
    Create,
    Profile,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::SignIn => "/sign-in".to_string(),
            Route::SignUp => "/sign-up".to_string(),
            Route::Home => "/home".to_string(),
            Route::Search { query } => format!("/search/{query}"),
            Route::Create => "/create".to_string(),
            Route::Profile => "/profile".to_string(),
        }
    }

    /// Parses a pathname. Unknown paths yield `None`.
    pub fn parse(path: &str) -> Option<Self> {
        match path {
            "/sign-in" => Some(Route::SignIn),
            "/sign-up" => Some(Route::SignUp),
            "/home" => Some(Route::Home),
            "/create" => Some(Route::Create),
            "/profile" => Some(Route::Profile),
            _ => path.strip_prefix("/search/").map(|query| Route::Search {
                query: query.to_string(),
            }),
        }
    }

    /// Screens that require a signed-in user.
    pub fn requires_session(&self) -> bool {
        !matches!(self, Route::SignIn | Route::SignUp)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::SignIn => "Sign in",
            Route::SignUp => "Sign up",
            Route::Home => "Home",
            Route::Search { .. } => "Search",
            Route::Create => "Create",
            Route::Profile => "Profile",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Router {
    current: Route,
    history: Vec<Route>,
}

impl Router {
    pub fn new(initial: Route) -> Self {
        Self {
            current: initial,
            history: Vec::new(),
        }
    }

    pub fn current(&self) -> &Route {
        &self.current
    }

    pub fn pathname(&self) -> String {
        self.current.path()
    }

    pub fn push(&mut self, route: Route) {
        let previous = std::mem::replace(&mut self.current, route);
        self.history.push(previous);
    }

    /// Replaces the whole history with `route`.
    pub fn replace(&mut self, route: Route) {
        self.history.clear();
        self.current = route;
    }

    /// Pops one entry. Returns `false` at the root.
    pub fn back(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.current = previous;
                true
            }
            None => false,
        }
    }

    /// Updates the query param of the current search route in place.
    /// Returns `false` when the current route has no query param.
    pub fn set_query(&mut self, query: &str) -> bool {
        match &mut self.current {
            Route::Search { query: current } => {
                *current = query.to_string();
                true
            }
            _ => false,
        }
    }

    pub fn depth(&self) -> usize {
        self.history.len() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_paths() {
        assert_eq!(Route::parse("/home"), Some(Route::Home));
        assert_eq!(
            Route::parse("/search/cats and dogs"),
            Some(Route::Search {
                query: "cats and dogs".to_string()
            })
        );
        assert_eq!(Route::parse("/nowhere"), None);
    }

    #[test]
    fn test_path_round_trips_through_parse() {
        let route = Route::Search {
            query: "ai".to_string(),
        };
        assert_eq!(Route::parse(&route.path()), Some(route));
    }

    #[test]
    fn test_back_stops_at_root() {
        let mut router = Router::new(Route::Home);
        router.push(Route::Create);
        assert!(router.back());
        assert_eq!(router.current(), &Route::Home);
        assert!(!router.back());
        assert_eq!(router.depth(), 1);
    }

    #[test]
    fn test_replace_drops_history() {
        let mut router = Router::new(Route::SignIn);
        router.push(Route::SignUp);
        router.replace(Route::Home);
        assert_eq!(router.depth(), 1);
        assert_eq!(router.pathname(), "/home");
    }

    #[test]
    fn test_set_query_only_on_search() {
        let mut router = Router::new(Route::Home);
        assert!(!router.set_query("x"));

        router.push(Route::Search {
            query: "old".to_string(),
        });
        assert!(router.set_query("new"));
        assert_eq!(router.pathname(), "/search/new");
        assert_eq!(router.depth(), 2);
    }
}
