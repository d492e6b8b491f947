use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::Config;
use crate::transport::{HttpTransport, RequestMethod, Transport, TransportError};
use crate::users::{FriendlyNameMap, FriendlyNames};
use crate::xml::{parse_document, ParseError, XmlElement};

use super::endpoint::Endpoint;
use super::identity::{decode_server_identity, decode_server_list, ServerIdentity, ServerInfo};
use super::library::{decode_episode_list, decode_recently_added, EpisodeListing, RecentlyAdded};
use super::metadata::{decode_metadata, MetadataDecode, MetadataResponse};
use super::session::{decode_activity, SessionSummary};

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("Error parsing XML: {0}")]
    Parse(#[from] ParseError),
}

/// Entry points that fetch one entity family from the media server and
/// normalize it.
///
/// None of them fail: transport and parse errors are logged and returned
/// as `None`, while "the server has nothing" comes back as an explicit
/// empty record.
pub struct PmsConnect {
    transport: Arc<dyn Transport>,
    names: Arc<dyn FriendlyNames>,
    use_bif: bool,
}

impl PmsConnect {
    pub fn new(transport: Arc<dyn Transport>, names: Arc<dyn FriendlyNames>, use_bif: bool) -> Self {
        Self {
            transport,
            names,
            use_bif,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, TransportError> {
        let transport = HttpTransport::new(&config.pms)?;
        let names = FriendlyNameMap::new(config.friendly_names.clone());
        Ok(Self::new(Arc::new(transport), Arc::new(names), config.pms.use_bif))
    }

    pub async fn get_raw(&self, endpoint: &Endpoint) -> Result<Vec<u8>, TransportError> {
        self.request(endpoint, RequestMethod::Get).await
    }

    /// Raw request with an explicit method. The normalizers only ever GET.
    pub async fn request(&self, endpoint: &Endpoint, method: RequestMethod) -> Result<Vec<u8>, TransportError> {
        self.transport.request(&endpoint.path(), method).await
    }

    pub async fn get_document(&self, endpoint: &Endpoint) -> Result<XmlElement, FetchError> {
        let body = self.get_raw(endpoint).await?;
        Ok(parse_document(&body)?)
    }

    async fn fetch_container(&self, endpoint: &Endpoint, what: &str) -> Option<XmlElement> {
        let document = match self.get_document(endpoint).await {
            Ok(document) => document,
            Err(e) => {
                warn!("Failed to fetch Plex {}: {}", what, e);
                return None;
            }
        };

        if document.name != "MediaContainer" {
            warn!("Error parsing XML for Plex {}: unexpected root <{}>", what, document.name);
            return None;
        }
        Some(document)
    }

    pub async fn get_current_activity(&self) -> Option<SessionSummary> {
        let container = self.fetch_container(&Endpoint::Sessions, "session data").await?;
        Some(decode_activity(&container, self.use_bif, self.names.as_ref()))
    }

    /// Metadata for one catalog item.
    ///
    /// Seasons take `summary` and `duration` from their show, which costs a
    /// second lookup on the season's parent rating key. That lookup is not
    /// itself merged further, so the depth is show -> season only.
    pub async fn get_metadata_details(&self, rating_key: &str) -> Option<MetadataResponse> {
        match self.fetch_metadata(rating_key).await? {
            MetadataDecode::NotFound => Some(MetadataResponse::not_found()),
            MetadataDecode::Item(record) => Some(MetadataResponse::found(record)),
            MetadataDecode::Season {
                record,
                parent_rating_key,
            } => {
                let show = if parent_rating_key.is_empty() {
                    None
                } else {
                    match self.fetch_metadata(&parent_rating_key).await {
                        Some(MetadataDecode::Item(show)) => Some(show),
                        _ => None,
                    }
                };
                if show.is_none() {
                    warn!(
                        "No show metadata for season {} (parent '{}')",
                        record.rating_key, parent_rating_key
                    );
                }
                Some(MetadataResponse::found(record.inherit_from(show.as_ref())))
            }
        }
    }

    async fn fetch_metadata(&self, rating_key: &str) -> Option<MetadataDecode> {
        let endpoint = Endpoint::Metadata(rating_key.to_string());
        let container = self.fetch_container(&endpoint, "metadata").await?;

        match decode_metadata(&container) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!("Metadata for {} failed: {}", rating_key, e);
                None
            }
        }
    }

    pub async fn get_recently_added_details(&self, count: u32) -> Option<RecentlyAdded> {
        let endpoint = Endpoint::RecentlyAdded(count);
        let container = self.fetch_container(&endpoint, "recently added").await?;
        Some(decode_recently_added(&container))
    }

    pub async fn get_season_children(&self, rating_key: &str) -> Option<EpisodeListing> {
        let endpoint = Endpoint::Children(rating_key.to_string());
        let container = self.fetch_container(&endpoint, "episode list").await?;
        Some(decode_episode_list(&container))
    }

    pub async fn get_servers_info(&self) -> Option<Vec<ServerInfo>> {
        let container = self.fetch_container(&Endpoint::Servers, "server list").await?;
        let servers = decode_server_list(&container);
        debug!("Found {} servers", servers.len());
        Some(servers)
    }

    pub async fn get_server_identity(&self) -> Option<ServerIdentity> {
        let container = self.fetch_container(&Endpoint::Identity, "server identity").await?;
        Some(decode_server_identity(&container))
    }
}
