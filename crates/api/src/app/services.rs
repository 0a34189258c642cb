use std::sync::Arc;

use camstore_content::ContentStore;
use camstore_core::Locale;

/// Shared state: the content snapshot and request defaults.
#[derive(Clone)]
pub struct AppServices {
    store: Arc<dyn ContentStore>,
    default_locale: Locale,
}

impl AppServices {
    pub fn new(store: Arc<dyn ContentStore>, default_locale: Locale) -> Self {
        Self {
            store,
            default_locale,
        }
    }

    pub fn store(&self) -> &dyn ContentStore {
        self.store.as_ref()
    }

    pub fn default_locale(&self) -> Locale {
        self.default_locale
    }
}
