//! Cookie-backed session store. The operator's numeric id lives in a single
//! cookie; on startup the cookie is the sole source of truth, afterwards the
//! in-memory mirror and the cookie are only ever changed together through
//! `login` and `logout`.

use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;
use yew::prelude::*;

const SESSION_COOKIE: &str = "ID";
const SESSION_TTL_SECS: u64 = 7 * 24 * 60 * 60;

#[derive(Clone, PartialEq, Debug)]
pub struct Session {
    pub user_id: Option<i64>,
}

impl Session {
    /// Startup read: no cookie means no session, anything unparseable is
    /// treated the same way.
    pub fn from_cookie() -> Self {
        let user_id = read_cookies()
            .and_then(|cookies| cookie_value(&cookies, SESSION_COOKIE))
            .and_then(|raw| parse_user_id(&raw));
        Self { user_id }
    }
}

/// Shared handle handed out through the context. Components never mutate the
/// session directly; `login` and `logout` are the only write paths.
#[derive(Clone, PartialEq)]
pub struct SessionHandle {
    state: UseStateHandle<Session>,
}

impl SessionHandle {
    pub fn user_id(&self) -> Option<i64> {
        self.state.user_id
    }

    pub fn login(&self, user_id: i64) {
        write_cookie(&session_cookie_string(user_id));
        self.state.set(Session {
            user_id: Some(user_id),
        });
    }

    /// Clears the session and performs a full navigation back to the entry
    /// view (or `redirect_to`). Irreversible for the current tab.
    pub fn logout(&self, redirect_to: Option<&str>) {
        write_cookie(&clear_cookie_string());
        self.state.set(Session { user_id: None });
        navigate(redirect_to.unwrap_or("/"));
    }
}

#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    pub children: Children,
}

#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    let state = use_state(Session::from_cookie);
    let handle = SessionHandle { state };

    html! {
        <ContextProvider<SessionHandle> context={handle}>
            { props.children.clone() }
        </ContextProvider<SessionHandle>>
    }
}

/// Using the session outside a `SessionProvider` is a programming error, so
/// this fails loudly instead of degrading to "no session".
#[hook]
pub fn use_session() -> SessionHandle {
    use_context::<SessionHandle>().expect("use_session must be called inside a SessionProvider")
}

fn html_document() -> Option<HtmlDocument> {
    web_sys::window()?.document()?.dyn_into::<HtmlDocument>().ok()
}

fn read_cookies() -> Option<String> {
    html_document()?.cookie().ok()
}

fn write_cookie(cookie: &str) {
    if let Some(document) = html_document() {
        if let Err(err) = document.set_cookie(cookie) {
            log::error!("failed to write session cookie: {:?}", err);
        }
    }
}

fn navigate(path: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(path);
    }
}

fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim().to_string())
}

fn parse_user_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

fn session_cookie_string(user_id: i64) -> String {
    format!(
        "{}={}; Max-Age={}; Path=/; SameSite=Lax",
        SESSION_COOKIE, user_id, SESSION_TTL_SECS
    )
}

fn clear_cookie_string() -> String {
    format!("{}=; Max-Age=0; Path=/; SameSite=Lax", SESSION_COOKIE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_round_trip_yields_the_same_user_id() {
        let written = session_cookie_string(42);
        let value = cookie_value(&written, SESSION_COOKIE).unwrap();
        assert_eq!(parse_user_id(&value), Some(42));
    }

    #[test]
    fn session_cookie_carries_ttl_and_same_site() {
        let cookie = session_cookie_string(7);
        assert!(cookie.starts_with("ID=7;"));
        assert!(cookie.contains("Max-Age=604800"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Path=/"));
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        let cookie = clear_cookie_string();
        assert!(cookie.starts_with("ID=;"));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[test]
    fn cookie_value_finds_the_named_pair() {
        let header = "theme=dark; ID=15; lang=en";
        assert_eq!(cookie_value(header, "ID"), Some("15".to_string()));
        assert_eq!(cookie_value(header, "theme"), Some("dark".to_string()));
        assert_eq!(cookie_value(header, "missing"), None);
    }

    #[test]
    fn unparseable_ids_mean_no_session() {
        assert_eq!(parse_user_id("42"), Some(42));
        assert_eq!(parse_user_id(" 42 "), Some(42));
        assert_eq!(parse_user_id("not-a-number"), None);
        assert_eq!(parse_user_id(""), None);
    }
}
