//! Datastore configuration.

/// Default fully qualified application id reported by a context.
pub const DEFAULT_APP_ID: &str = "dev~memds";

/// Configuration for a datastore instance.
#[derive(Debug, Clone)]
pub struct Config {
    /// First id handed out by the id allocator.
    pub first_id: i64,

    /// First transaction handle issued by `begin_transaction`.
    pub first_transaction: u64,

    /// Fully qualified application id.
    pub app_id: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            first_id: 1,
            first_transaction: 1,
            app_id: DEFAULT_APP_ID.to_string(),
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the first id handed out by the allocator.
    #[must_use]
    pub const fn first_id(mut self, id: i64) -> Self {
        self.first_id = id;
        self
    }

    /// Sets the first transaction handle.
    #[must_use]
    pub const fn first_transaction(mut self, handle: u64) -> Self {
        self.first_transaction = handle;
        self
    }

    /// Sets the fully qualified application id.
    #[must_use]
    pub fn app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = app_id.into();
        self
    }
}
