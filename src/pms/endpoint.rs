use std::fmt;

/// Media server API endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Sessions,
    Metadata(String),
    RecentlyAdded(u32),
    Children(String),
    Servers,
    Prefs,
    Identity,
    SyncItem(String),
    SyncTranscodeQueue,
}

impl Endpoint {
    pub fn path(&self) -> String {
        match self {
            Endpoint::Sessions => "/status/sessions".to_string(),
            Endpoint::Metadata(key) => format!("/library/metadata/{}", urlencoding::encode(key)),
            Endpoint::RecentlyAdded(count) => format!(
                "/library/recentlyAdded?X-Plex-Container-Start=0&X-Plex-Container-Size={}",
                count
            ),
            Endpoint::Children(key) => {
                format!("/library/metadata/{}/children", urlencoding::encode(key))
            }
            Endpoint::Servers => "/servers".to_string(),
            Endpoint::Prefs => "/:/prefs".to_string(),
            Endpoint::Identity => "/identity".to_string(),
            Endpoint::SyncItem(id) => format!("/sync/items/{}", urlencoding::encode(id)),
            Endpoint::SyncTranscodeQueue => "/sync/transcodeQueue".to_string(),
        }
    }

    /// Look up an endpoint by its command-line name.
    pub fn from_name(name: &str, arg: Option<&str>) -> Result<Self, EndpointError> {
        let required = || {
            arg.map(str::to_string)
                .ok_or_else(|| EndpointError::MissingArgument(name.to_string()))
        };

        let endpoint = match name {
            "sessions" => Endpoint::Sessions,
            "metadata" => Endpoint::Metadata(required()?),
            "recently-added" => {
                let count = match arg {
                    Some(count) => count
                        .parse()
                        .map_err(|_| EndpointError::InvalidArgument(count.to_string()))?,
                    None => 0,
                };
                Endpoint::RecentlyAdded(count)
            }
            "children" => Endpoint::Children(required()?),
            "servers" => Endpoint::Servers,
            "prefs" => Endpoint::Prefs,
            "identity" => Endpoint::Identity,
            "sync-item" => Endpoint::SyncItem(required()?),
            "sync-transcode-queue" => Endpoint::SyncTranscodeQueue,
            _ => return Err(EndpointError::Unknown(name.to_string())),
        };
        Ok(endpoint)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum EndpointError {
    #[error("unknown endpoint: {0}")]
    Unknown(String),
    #[error("endpoint {0} needs an argument")]
    MissingArgument(String),
    #[error("invalid endpoint argument: {0}")]
    InvalidArgument(String),
}
