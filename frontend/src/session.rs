//! Auth token lookup and the app-wide `auth:unauthorized` signal.
//!
//! The agent panel never listens for this event; whoever owns sign-in does.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use leptos::ev;
use leptos::prelude::window_event_listener;
use wasm_bindgen::JsValue;
use web_sys::{CustomEvent, CustomEventInit};

/// Idle time after which a signed-in session is considered expired.
pub const SESSION_TIMEOUT_MS: u32 = 60 * 60 * 1000;

pub const UNAUTHORIZED_EVENT: &str = "auth:unauthorized";

const AUTH_TOKEN_KEY: &str = "auth_token";

/// Bearer token written to local storage by the sign-in flow, if any.
pub fn auth_token() -> Option<String> {
    let storage = web_sys::window()?.local_storage().ok()??;
    usable_token(storage.get_item(AUTH_TOKEN_KEY).ok()?)
}

fn usable_token(raw: Option<String>) -> Option<String> {
    raw.filter(|token| !token.trim().is_empty())
}

/// Dispatches `auth:unauthorized` on `window` with `{ message }` as detail.
pub fn emit_unauthorized(message: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };

    let detail = js_sys::Object::new();
    if let Err(e) = js_sys::Reflect::set(&detail, &JsValue::from_str("message"), &JsValue::from_str(message)) {
        log::warn!("Failed to build event detail: {e:?}");
    }
    let init = CustomEventInit::new();
    init.set_detail(&detail);

    match CustomEvent::new_with_event_init_dict(UNAUTHORIZED_EVENT, &init) {
        Ok(event) => {
            if let Err(e) = window.dispatch_event(&event) {
                log::error!("Failed to dispatch {UNAUTHORIZED_EVENT}: {e:?}");
            }
        }
        Err(e) => log::error!("Failed to create {UNAUTHORIZED_EVENT}: {e:?}"),
    }
}

/// Emits `auth:unauthorized` once a signed-in user has been idle for
/// `timeout_ms`. Any key press, pointer movement or click restarts the
/// countdown; the token is re-read each time, so signing in or out later in
/// the session arms or disarms the timer.
pub fn watch_inactivity(timeout_ms: u32) {
    let timer: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));

    let arm = Rc::new(move || {
        if auth_token().is_none() {
            // Signed out: drop any pending expiry
            timer.borrow_mut().take();
            return;
        }
        let expiry = Timeout::new(timeout_ms, move || {
            if auth_token().is_some() {
                log::info!("Session idle for {timeout_ms} ms");
                emit_unauthorized("Session expired");
            }
        });
        // Dropping the previous handle cancels it
        timer.borrow_mut().replace(expiry);
    });
    arm();

    let on_key = Rc::clone(&arm);
    let _ = window_event_listener(ev::keydown, move |_| on_key());
    let on_pointer = Rc::clone(&arm);
    let _ = window_event_listener(ev::pointermove, move |_| on_pointer());
    let on_click = arm;
    let _ = window_event_listener(ev::click, move |_| on_click());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_tokens_count_as_signed_out() {
        assert_eq!(usable_token(None), None);
        assert_eq!(usable_token(Some(String::new())), None);
        assert_eq!(usable_token(Some("  ".into())), None);
        assert_eq!(usable_token(Some("tok-1".into())).as_deref(), Some("tok-1"));
    }
}
