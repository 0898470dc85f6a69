use dash_kernel::prelude::*;
use parking_lot::RwLock;
use tracing::info;

/// Holds the active theme and announces every change on the bus.
#[dash_derive::dash_module]
pub struct ThemeProvider {
    bus: AppBus,
    theme: RwLock<Theme>,
}

impl ThemeProvider {
    pub fn new(bus: AppBus, initial: Theme) -> Self {
        Self::from_inner(ThemeProviderInner { bus, theme: RwLock::new(initial) })
    }

    #[must_use]
    pub fn current(&self) -> Theme {
        *self.theme.read()
    }

    /// Flips light/dark and emits `theme.changed`; returns the new theme.
    pub fn toggle(&self) -> Theme {
        let next = {
            let mut theme = self.theme.write();
            *theme = theme.toggled();
            *theme
        };
        self.announce(next);
        next
    }

    /// Switches to `theme`, emitting `theme.changed` only if it differs.
    pub fn set(&self, theme: Theme) -> bool {
        let changed = std::mem::replace(&mut *self.theme.write(), theme) != theme;
        if changed {
            self.announce(theme);
        }
        changed
    }

    fn announce(&self, theme: Theme) {
        info!(%theme, "Theme changed");
        self.bus.publish(&AppEvent::ThemeChanged { theme });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn toggle_announces_new_theme() {
        let bus = AppBus::new();
        let provider = ThemeProvider::new(bus.clone(), Theme::Light);
        let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        let listener = Subscriber::infallible(move |event: &AppEvent| sink.lock().push(event.clone()));
        bus.subscribe(THEME_CHANGED, &listener).unwrap();

        assert_eq!(provider.toggle(), Theme::Dark);
        assert_eq!(provider.toggle(), Theme::Light);
        assert_eq!(
            *seen.lock(),
            vec![
                AppEvent::ThemeChanged { theme: Theme::Dark },
                AppEvent::ThemeChanged { theme: Theme::Light }
            ]
        );
    }

    #[test]
    fn setting_the_same_theme_is_silent() {
        let bus = AppBus::new();
        let provider = ThemeProvider::new(bus.clone(), Theme::Dark);
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&hits);
        let listener = Subscriber::infallible(move |_: &AppEvent| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        bus.subscribe(THEME_CHANGED, &listener).unwrap();

        assert!(!provider.set(Theme::Dark));
        assert!(provider.set(Theme::Light));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(provider.current(), Theme::Light);
    }
}
