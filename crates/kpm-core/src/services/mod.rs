//! Application services.
//!
//! The resolver and the tiers it cascades through. Services depend only on
//! ports, never on concrete adapters.

mod request;
mod resolver;
mod tiers;

pub use request::{ResolutionReport, ResolveRequest, SourceFailure};
pub use resolver::{ArtifactResolver, ResolveError};
pub use tiers::{
    CallerInputTier, CatalogTier, IdentifierStoreTier, NamingHeuristicTier, ResolutionTier,
    SourceError, Tier,
};
