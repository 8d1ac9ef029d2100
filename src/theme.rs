pub const THEME_KEY: &str = "theme";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn from_system(prefers_dark: bool) -> Self {
        if prefers_dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn toggle_label(self) -> String {
        let next = self.toggled().as_str();
        format!("Switch to {next} theme")
    }

    pub fn pressed(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Icon for the toggle button: the sun switches back to light.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Light => "☾",
            Self::Dark => "☀",
        }
    }
}

/// Where the preference survives reloads. Failures are the store's concern;
/// callers keep the in-memory value either way.
pub trait ThemeStore {
    fn load(&self) -> Option<Theme>;

    /// Returns whether the value was persisted.
    fn save(&self, theme: Theme) -> bool;
}

/// The document-wide marker style rules key off.
pub trait ThemeSurface {
    fn apply(&self, theme: Theme);
}

impl<T: ThemeStore + ?Sized> ThemeStore for &T {
    fn load(&self) -> Option<Theme> {
        (**self).load()
    }

    fn save(&self, theme: Theme) -> bool {
        (**self).save(theme)
    }
}

impl<T: ThemeSurface + ?Sized> ThemeSurface for &T {
    fn apply(&self, theme: Theme) {
        (**self).apply(theme)
    }
}

pub struct ThemeState<S, D> {
    current: Theme,
    store: S,
    surface: D,
}

impl<S: ThemeStore, D: ThemeSurface> ThemeState<S, D> {
    /// Stored preference first, system preference otherwise. The result is
    /// applied to the surface immediately.
    pub fn init(store: S, surface: D, system_prefers_dark: bool) -> Self {
        let current = store
            .load()
            .unwrap_or_else(|| Theme::from_system(system_prefers_dark));
        surface.apply(current);

        Self {
            current,
            store,
            surface,
        }
    }

    pub fn get(&self) -> Theme {
        self.current
    }

    pub fn toggle(&mut self) -> Theme {
        self.current = self.current.toggled();
        self.store.save(self.current);
        self.surface.apply(self.current);
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct MemoryStore {
        value: RefCell<Option<String>>,
        read_only: bool,
    }

    impl MemoryStore {
        fn holding(value: &str) -> Self {
            Self {
                value: RefCell::new(Some(value.to_string())),
                read_only: false,
            }
        }

        fn unavailable() -> Self {
            Self {
                value: RefCell::new(None),
                read_only: true,
            }
        }
    }

    impl ThemeStore for MemoryStore {
        fn load(&self) -> Option<Theme> {
            let value = self.value.borrow();
            Theme::from_str(value.as_deref()?)
        }

        fn save(&self, theme: Theme) -> bool {
            if self.read_only {
                return false;
            }
            *self.value.borrow_mut() = Some(theme.as_str().to_string());
            true
        }
    }

    #[derive(Default)]
    struct RecordingSurface {
        applied: RefCell<Vec<Theme>>,
    }

    impl ThemeSurface for RecordingSurface {
        fn apply(&self, theme: Theme) {
            self.applied.borrow_mut().push(theme);
        }
    }

    #[test]
    fn stored_preference_wins_over_system_signal() {
        let store = MemoryStore::holding("light");
        let surface = RecordingSurface::default();

        let state = ThemeState::init(&store, &surface, true);

        assert_eq!(state.get(), Theme::Light);
        assert_eq!(*surface.applied.borrow(), vec![Theme::Light]);
    }

    #[test]
    fn system_signal_is_used_without_a_valid_stored_value() {
        let surface = RecordingSurface::default();

        let empty = MemoryStore::default();
        assert_eq!(ThemeState::init(&empty, &surface, true).get(), Theme::Dark);

        let garbage = MemoryStore::holding("sepia");
        assert_eq!(ThemeState::init(&garbage, &surface, false).get(), Theme::Light);
    }

    #[test]
    fn toggle_persists_and_applies_synchronously() {
        let store = MemoryStore::default();
        let surface = RecordingSurface::default();
        let mut state = ThemeState::init(&store, &surface, false);

        assert_eq!(state.toggle(), Theme::Dark);

        assert_eq!(store.value.borrow().as_deref(), Some("dark"));
        assert_eq!(*surface.applied.borrow(), vec![Theme::Light, Theme::Dark]);
    }

    #[test]
    fn preference_survives_reinitialisation() {
        let store = MemoryStore::default();
        let surface = RecordingSurface::default();

        let before = {
            let mut state = ThemeState::init(&store, &surface, false);
            state.toggle();
            state.get()
        };
        let reloaded = ThemeState::init(&store, &surface, false);

        assert_eq!(reloaded.get(), before);
    }

    #[test]
    fn unavailable_storage_keeps_in_memory_theme() {
        let store = MemoryStore::unavailable();
        let surface = RecordingSurface::default();
        let mut state = ThemeState::init(&store, &surface, false);

        assert_eq!(state.toggle(), Theme::Dark);
        assert_eq!(state.get(), Theme::Dark);
        assert_eq!(ThemeState::init(&store, &surface, false).get(), Theme::Light);
    }

    #[test]
    fn toggle_label_names_the_next_theme() {
        assert_eq!(Theme::Light.toggle_label(), "Switch to dark theme");
        assert!(Theme::Dark.pressed());
        assert!(!Theme::Light.pressed());
    }
}
