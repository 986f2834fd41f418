//! Namespace service stub.

use crate::error::{CoreError, CoreResult};
use crate::service::{Request, Response, Service, GO_SERVICE};
use tracing::trace;

/// Answers namespace lookups with the empty namespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct NamespaceService;

impl Service for NamespaceService {
    fn call(&self, method: &str, _request: Request) -> CoreResult<Response> {
        match method {
            "GetNamespace" | "GetDefaultNamespace" => {
                trace!(method, "namespace lookup");
                Ok(Response::Text(String::new()))
            }
            _ => Err(CoreError::unknown_method(GO_SERVICE, method)),
        }
    }
}
