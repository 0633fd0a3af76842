//! Organization lifecycle core for a multi-tenant IAM service
//!
//! Manages Organization entities and everything they transitively own:
//! default policies, users, teams and the association rows between them.
//! The two lifecycle operations that matter are transactional pipelines —
//! an ordered creation sequence (organization row, default policy set,
//! optional admin user) and an ordered cascading deletion sequence — both
//! bracketed by a single [`TransactionCoordinator`] invocation so that no
//! partially created or partially deleted organization is ever visible.
//!
//! Policy evaluation, authentication and the transport layer live
//! elsewhere; this crate ends at the repository and service seams.

pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::{
    AdminUserParams, CreateOptions, CreateOrganizationParams, DomainError, Organization,
    OrganizationCreateResult, OrganizationId, OrganizationRepository, Policy, PolicyTemplate,
    Team, UpdateOrganizationParams, User,
};
pub use infrastructure::logging::init_logging;
pub use infrastructure::organization::{
    CreateOrganizationRequest, OrganizationService, PostgresOrganizationRepository,
    UpdateOrganizationRequest,
};
pub use infrastructure::policy::{PolicyDefaultsProvider, PostgresPolicyDefaults};
pub use infrastructure::storage::{
    run_schema_migrations, DatabaseConfig, TransactionCoordinator,
};
