use serde::Serialize;
use tracing::debug;

use crate::users::FriendlyNames;
use crate::util::percent;
use crate::xml::{attr_of, XmlElement};

pub const DIRECT_PLAY: &str = "direct play";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
    Track,
    Episode,
    Movie,
    Clip,
}

/// Element family a session is listed under in the sessions container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamFamily {
    Track,
    Video,
}

impl StreamFamily {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Track" => Some(StreamFamily::Track),
            "Video" => Some(StreamFamily::Video),
            _ => None,
        }
    }
}

/// Resolve the session type. Video elements carry it in their `type`
/// attribute; anything other than episode, movie or clip is unsupported.
pub fn session_type(family: StreamFamily, element: &XmlElement) -> Option<SessionType> {
    match family {
        StreamFamily::Track => Some(SessionType::Track),
        StreamFamily::Video => match element.get_attr("type") {
            Some("episode") => Some(SessionType::Episode),
            Some("movie") => Some(SessionType::Movie),
            Some("clip") => Some(SessionType::Clip),
            _ => None,
        },
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudioStream {
    pub audio_decision: String,
    pub audio_codec: String,
    pub audio_channels: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoStream {
    pub video_decision: String,
    pub video_codec: String,
    pub width: String,
    pub height: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub session_key: String,
    pub rating_key: String,
    #[serde(rename = "type")]
    pub media_type: SessionType,
    pub user: String,
    pub friendly_name: String,
    pub player: String,
    pub state: String,
    pub grandparent_title: String,
    pub parent_title: String,
    pub title: String,
    pub art: String,
    pub thumb: String,
    pub parent_thumb: String,
    #[serde(flatten)]
    pub audio: AudioStream,
    /// Absent for track sessions.
    #[serde(flatten)]
    pub video: Option<VideoStream>,
    pub duration: String,
    pub progress: String,
    pub progress_percent: String,
    pub indexes: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub stream_count: String,
    pub sessions: Vec<Session>,
}

impl SessionSummary {
    pub fn empty() -> Self {
        Self {
            stream_count: "0".to_string(),
            sessions: Vec::new(),
        }
    }
}

/// Build the activity summary from a sessions container.
///
/// A declared size of `"0"` short-circuits to the empty summary whatever
/// the container holds. Otherwise every `Track` and `Video` child is
/// normalized in document order; sessions of unsupported type are dropped
/// while `stream_count` keeps the server's declared size.
pub fn decode_activity(
    container: &XmlElement,
    use_bif: bool,
    names: &dyn FriendlyNames,
) -> SessionSummary {
    if container.get_attr("size") == Some("0") {
        debug!("No active sessions");
        return SessionSummary::empty();
    }

    let sessions = container
        .children
        .iter()
        .filter_map(|element| {
            let family = StreamFamily::from_tag(&element.name)?;
            decode_session(family, element, use_bif, names)
        })
        .collect();

    SessionSummary {
        stream_count: container.attr("size"),
        sessions,
    }
}

pub fn decode_session(
    family: StreamFamily,
    element: &XmlElement,
    use_bif: bool,
    names: &dyn FriendlyNames,
) -> Option<Session> {
    let Some(media_type) = session_type(family, element) else {
        debug!(
            "Skipping session {} with unsupported type '{}'",
            element.attr("sessionKey"),
            element.attr("type")
        );
        return None;
    };

    let transcode = element.child("TranscodeSession");
    let media = element.child("Media");
    let progress = element.attr("viewOffset");

    let audio = match transcode {
        Some(t) => AudioStream {
            audio_decision: t.attr("audioDecision"),
            audio_codec: t.attr("audioCodec"),
            audio_channels: t.attr("audioChannels"),
        },
        None => AudioStream {
            audio_decision: DIRECT_PLAY.to_string(),
            audio_codec: attr_of(media, "audioCodec"),
            audio_channels: attr_of(media, "audioChannels"),
        },
    };

    let (video, duration) = match media_type {
        SessionType::Track => {
            let duration = match transcode {
                Some(t) => t.attr("duration"),
                None => attr_of(media, "duration"),
            };
            (None, duration)
        }
        _ => match transcode {
            Some(t) => {
                let video = VideoStream {
                    video_decision: t.attr("videoDecision"),
                    video_codec: t.attr("videoCodec"),
                    width: t.attr("width"),
                    height: t.attr("height"),
                };
                (Some(video), element.attr("duration"))
            }
            None => {
                let video = VideoStream {
                    video_decision: DIRECT_PLAY.to_string(),
                    video_codec: attr_of(media, "videoCodec"),
                    width: attr_of(media, "width"),
                    height: attr_of(media, "height"),
                };
                (Some(video), attr_of(media, "duration"))
            }
        },
    };

    // Tracks have no index images and clips never use them.
    let index_thumb = match media_type {
        SessionType::Episode | SessionType::Movie if use_bif => index_thumb(media, &progress),
        _ => None,
    };
    let indexes = index_thumb.is_some();
    let thumb = index_thumb.unwrap_or_else(|| element.attr("thumb"));

    let account = attr_of(element.child("User"), "title");
    let player = element.child("Player");

    Some(Session {
        session_key: element.attr("sessionKey"),
        rating_key: element.attr("ratingKey"),
        media_type,
        friendly_name: names.resolve(&account),
        user: account,
        player: attr_of(player, "platform"),
        state: attr_of(player, "state"),
        grandparent_title: element.attr("grandparentTitle"),
        parent_title: element.attr("parentTitle"),
        title: element.attr("title"),
        art: element.attr("art"),
        thumb,
        parent_thumb: element.attr("parentThumb"),
        audio,
        video,
        progress_percent: percent(&progress, &duration).to_string(),
        duration,
        progress,
        indexes,
    })
}

/// Scrub-bar thumbnail for the current offset, when the first media part
/// ships SD index images.
fn index_thumb(media: Option<&XmlElement>, progress: &str) -> Option<String> {
    let part = media?.child("Part")?;
    if part.get_attr("indexes") != Some("sd") {
        return None;
    }
    Some(format!(
        "/library/parts/{}/indexes/sd/{}",
        part.attr("id"),
        progress
    ))
}
