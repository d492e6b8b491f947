pub mod client;
pub mod endpoint;
pub mod identity;
pub mod library;
pub mod metadata;
pub mod session;

#[cfg(test)]
pub mod testing;

pub use client::{FetchError, PmsConnect};
pub use endpoint::{Endpoint, EndpointError};
pub use identity::{ServerIdentity, ServerInfo};
pub use library::{EpisodeEntry, EpisodeListing, RecentEntry, RecentItem, RecentlyAdded};
pub use metadata::{MetadataRecord, MetadataResponse, MetadataType};
pub use session::{AudioStream, Session, SessionSummary, SessionType, VideoStream};
