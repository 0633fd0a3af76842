//! Organization infrastructure - repository and service

mod postgres_repository;
mod service;

pub use postgres_repository::PostgresOrganizationRepository;
pub use service::{CreateOrganizationRequest, OrganizationService, UpdateOrganizationRequest};
