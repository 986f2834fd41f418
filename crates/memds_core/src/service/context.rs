//! Service registry.

use crate::config::Config;
use crate::datastore::Datastore;
use crate::error::{CoreError, CoreResult};
use crate::service::namespace::NamespaceService;
use crate::service::{Request, Response, DATASTORE_SERVICE, GO_SERVICE};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// A backend that answers named method calls.
///
/// Implementations must be `Send + Sync`; a context may be shared across
/// threads.
pub trait Service: Send + Sync {
    /// Handles one call.
    ///
    /// # Errors
    ///
    /// Returns `UnknownMethod` for methods the service does not implement,
    /// `RequestMismatch` if the payload does not fit the method, or the
    /// error of the operation itself.
    fn call(&self, method: &str, request: Request) -> CoreResult<Response>;

    /// Releases the service.
    ///
    /// # Errors
    ///
    /// Returns an error if the service could not shut down cleanly.
    fn close(&self) -> CoreResult<()> {
        Ok(())
    }
}

/// Options for a new [`Context`].
#[derive(Debug, Clone, Default)]
pub struct ContextOptions {
    /// Configuration of the built-in datastore.
    pub datastore: Config,
}

impl ContextOptions {
    /// Creates default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the datastore configuration.
    #[must_use]
    pub fn datastore(mut self, config: Config) -> Self {
        self.datastore = config;
        self
    }
}

/// Routes `(service, method)` calls to registered services.
///
/// A new context registers the namespace stub under `__go__` and a fresh
/// [`Datastore`] under `datastore_v3`.
pub struct Context {
    services: BTreeMap<String, Arc<dyn Service>>,
    datastore: Arc<Datastore>,
    app_id: String,
}

impl Context {
    /// Creates a context with the built-in services.
    #[must_use]
    pub fn new(options: ContextOptions) -> Self {
        let app_id = options.datastore.app_id.clone();
        let datastore = Arc::new(Datastore::with_config(options.datastore));
        let mut context = Self {
            services: BTreeMap::new(),
            datastore: Arc::clone(&datastore),
            app_id,
        };
        context.set_service(GO_SERVICE, Arc::new(NamespaceService));
        context.set_service(DATASTORE_SERVICE, datastore);
        context
    }

    /// Registers `service` under `name`, replacing any previous one.
    pub fn set_service(&mut self, name: impl Into<String>, service: Arc<dyn Service>) {
        let name = name.into();
        debug!(service = %name, "service registered");
        self.services.insert(name, service);
    }

    /// Returns true if a service is registered under `name`.
    #[must_use]
    pub fn has_service(&self, name: &str) -> bool {
        self.services.contains_key(name)
    }

    /// Calls `method` on the named service.
    ///
    /// # Errors
    ///
    /// Returns `UnknownService` if nothing is registered under `service`,
    /// otherwise whatever the service returns.
    pub fn call(&self, service: &str, method: &str, request: Request) -> CoreResult<Response> {
        let Some(backend) = self.services.get(service) else {
            warn!(service, method, "call to unknown service");
            return Err(CoreError::unknown_service(service));
        };
        debug!(service, method, "call");
        backend.call(method, request)
    }

    /// Closes every registered service.
    ///
    /// All services are closed even if some fail.
    ///
    /// # Errors
    ///
    /// Returns the error of the last failing service, in name order.
    pub fn close(&self) -> CoreResult<()> {
        let mut result = Ok(());
        for (name, service) in &self.services {
            if let Err(err) = service.close() {
                warn!(service = %name, error = %err, "service failed to close");
                result = Err(err);
            }
        }
        result
    }

    /// Returns the fully qualified application id.
    #[must_use]
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// Sets the fully qualified application id.
    pub fn set_app_id(&mut self, app_id: impl Into<String>) {
        self.app_id = app_id.into();
    }

    /// Returns the datastore created with this context.
    ///
    /// Replacing the `datastore_v3` service does not change this handle.
    #[must_use]
    pub fn datastore(&self) -> &Arc<Datastore> {
        &self.datastore
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new(ContextOptions::default())
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("services", &self.services.keys().collect::<Vec<_>>())
            .field("app_id", &self.app_id)
            .finish_non_exhaustive()
    }
}
