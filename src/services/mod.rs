pub mod lookup;
pub use lookup::{LookupError, LookupRequest, LookupService};

pub mod projector;

pub mod resolver;
pub use resolver::{MatchTier, Resolution, Resolver, resolve};

pub mod similarity;
