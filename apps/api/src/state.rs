use std::sync::Arc;

use crate::assessment::service::AssessmentService;
use crate::identity::IdentityResolver;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Scoring pipeline plus the catalog, store and narrator it was built with.
    pub service: AssessmentService,
    /// Pluggable bearer-token resolver. Postgres sessions, or a static table in dev.
    pub identity: Arc<dyn IdentityResolver>,
}
