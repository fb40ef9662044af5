//! Shared application context for view code.
//!
//! Theme and auth state live in one explicit context object handed to view
//! constructors, with an observer list for change notifications. This
//! replaces implicit global lookup: anything that cares about theme or
//! sign-in changes subscribes and gets called synchronously on each change.

use crate::user::ThemePreference;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// A state change broadcast to subscribers.
#[derive(Clone, Debug, PartialEq)]
pub enum AppEvent {
    ThemeChanged(ThemePreference),
    SignedIn { handle: String },
    SignedOut,
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Subscription(usize);

type Observer = Box<dyn Fn(&AppEvent) + Send + Sync>;

#[derive(Default)]
struct ContextState {
    theme: ThemePreference,
    user_handle: Option<String>,
}

/// Mutable theme/auth state with subscription-based change notification.
#[derive(Default)]
pub struct AppContext {
    state: Mutex<ContextState>,
    observers: Mutex<Vec<(usize, Observer)>>,
    next_subscription: AtomicUsize,
}

impl AppContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn theme(&self) -> ThemePreference {
        self.state.lock().unwrap().theme
    }

    /// The handle of the signed-in user, if any.
    pub fn user_handle(&self) -> Option<String> {
        self.state.lock().unwrap().user_handle.clone()
    }

    /// Apply a theme and notify subscribers. Setting the current theme
    /// again is a no-op and does not re-notify.
    pub fn set_theme(&self, theme: ThemePreference) {
        {
            let mut state = self.state.lock().unwrap();
            if state.theme == theme {
                return;
            }
            state.theme = theme;
        }
        self.notify(&AppEvent::ThemeChanged(theme));
    }

    /// Record a sign-in and notify subscribers.
    pub fn signed_in(&self, handle: impl Into<String>) {
        let handle = handle.into();
        self.state.lock().unwrap().user_handle = Some(handle.clone());
        self.notify(&AppEvent::SignedIn { handle });
    }

    /// Record a sign-out and notify subscribers.
    pub fn signed_out(&self) {
        self.state.lock().unwrap().user_handle = None;
        self.notify(&AppEvent::SignedOut);
    }

    pub fn subscribe(&self, observer: impl Fn(&AppEvent) + Send + Sync + 'static) -> Subscription {
        let id = self.next_subscription.fetch_add(1, Ordering::Relaxed);
        self.observers
            .lock()
            .unwrap()
            .push((id, Box::new(observer)));
        Subscription(id)
    }

    pub fn unsubscribe(&self, subscription: Subscription) {
        self.observers
            .lock()
            .unwrap()
            .retain(|(id, _)| *id != subscription.0);
    }

    fn notify(&self, event: &AppEvent) {
        // Observers run synchronously; the state lock is released first so
        // they can read the context.
        let observers = self.observers.lock().unwrap();
        for (_, observer) in observers.iter() {
            observer(event);
        }
    }
}
