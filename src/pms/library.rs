use serde::Serialize;
use tracing::debug;

use crate::xml::XmlElement;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RecentEntry {
    Season {
        rating_key: String,
        title: String,
        thumb: String,
        added_at: String,
    },
    Movie {
        rating_key: String,
        title: String,
        year: String,
        thumb: String,
        added_at: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RecentItem {
    Entry(RecentEntry),
    /// Holds the slot of an item that is neither a season nor a movie.
    /// Serializes as `{}`.
    Placeholder {},
}

impl RecentItem {
    pub fn added_at(&self) -> &str {
        match self {
            RecentItem::Entry(RecentEntry::Season { added_at, .. })
            | RecentItem::Entry(RecentEntry::Movie { added_at, .. }) => added_at,
            RecentItem::Placeholder {} => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentlyAdded {
    pub recently_added: Vec<RecentItem>,
}

/// One entry per `Directory`/`Video` child, newest first.
///
/// `addedAt` is compared as the server's string, not as a number, and the
/// sort is stable so ties keep document order. Placeholders sort last.
pub fn decode_recently_added(container: &XmlElement) -> RecentlyAdded {
    if container.get_attr("size") == Some("0") {
        debug!("No recently added items");
        return RecentlyAdded {
            recently_added: Vec::new(),
        };
    }

    let mut items: Vec<RecentItem> = container
        .children
        .iter()
        .filter_map(|item| match (item.name.as_str(), item.get_attr("type")) {
            ("Directory", Some("season")) => Some(RecentItem::Entry(RecentEntry::Season {
                rating_key: item.attr("ratingKey"),
                title: item.attr("title"),
                thumb: item.attr("thumb"),
                added_at: item.attr("addedAt"),
            })),
            ("Video", Some("movie")) => Some(RecentItem::Entry(RecentEntry::Movie {
                rating_key: item.attr("ratingKey"),
                title: item.attr("title"),
                year: item.attr("year"),
                thumb: item.attr("thumb"),
                added_at: item.attr("addedAt"),
            })),
            ("Directory", _) | ("Video", _) => Some(RecentItem::Placeholder {}),
            _ => None,
        })
        .collect();

    items.sort_by(|a, b| b.added_at().cmp(a.added_at()));

    RecentlyAdded {
        recently_added: items,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpisodeEntry {
    pub rating_key: String,
    pub index: String,
    pub title: String,
    pub thumb: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpisodeListing {
    pub episode_count: String,
    pub title: String,
    pub episode_list: Vec<EpisodeEntry>,
}

pub fn decode_episode_list(container: &XmlElement) -> EpisodeListing {
    if container.get_attr("size") == Some("0") {
        debug!("No episode data");
        return EpisodeListing {
            episode_count: "0".to_string(),
            title: String::new(),
            episode_list: Vec::new(),
        };
    }

    let episode_list = container
        .children_named("Video")
        .map(|video| EpisodeEntry {
            rating_key: video.attr("ratingKey"),
            index: video.attr("index"),
            title: video.attr("title"),
            thumb: video.attr("thumb"),
        })
        .collect();

    EpisodeListing {
        episode_count: container.attr("size"),
        title: container.attr("title2"),
        episode_list,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse_document;

    fn container(xml: &str) -> XmlElement {
        parse_document(xml.as_bytes()).unwrap()
    }

    #[test]
    fn test_recently_added_order_and_placeholders() {
        let xml = r#"
<MediaContainer size="5">
  <Directory type="season" ratingKey="1" title="Season 1" addedAt="1400000000" />
  <Video type="movie" ratingKey="2" title="Film" year="1999" addedAt="1500000000" />
  <Directory type="album" ratingKey="3" addedAt="1600000000" />
  <Video type="episode" ratingKey="4" addedAt="1700000000" />
  <Video type="movie" ratingKey="5" title="Other" addedAt="1400000000" />
</MediaContainer>"#;
        let recent = decode_recently_added(&container(xml)).recently_added;

        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].added_at(), "1500000000");
        // Equal timestamps keep document order.
        assert!(matches!(&recent[1], RecentItem::Entry(RecentEntry::Season { rating_key, .. }) if rating_key == "1"));
        assert!(matches!(&recent[2], RecentItem::Entry(RecentEntry::Movie { rating_key, .. }) if rating_key == "5"));
        assert_eq!(recent[3], RecentItem::Placeholder {});
        assert_eq!(recent[4], RecentItem::Placeholder {});
    }

    #[test]
    fn test_recently_added_string_comparison() {
        let xml = r#"
<MediaContainer size="2">
  <Video type="movie" ratingKey="a" addedAt="900" />
  <Video type="movie" ratingKey="b" addedAt="1000" />
</MediaContainer>"#;
        let recent = decode_recently_added(&container(xml)).recently_added;
        assert_eq!(recent[0].added_at(), "900");
        assert_eq!(recent[1].added_at(), "1000");
    }

    #[test]
    fn test_recently_added_json() {
        let xml = r#"
<MediaContainer size="2">
  <Video type="movie" ratingKey="2" title="Film" year="1999" thumb="/t" addedAt="15" />
  <Video type="clip" />
</MediaContainer>"#;
        let recent = decode_recently_added(&container(xml));
        let json = serde_json::to_value(&recent).unwrap();

        assert_eq!(json["recently_added"][0]["type"], "movie");
        assert_eq!(json["recently_added"][0]["year"], "1999");
        assert_eq!(json["recently_added"][0]["added_at"], "15");
        assert_eq!(json["recently_added"][1], serde_json::json!({}));
    }

    #[test]
    fn test_recently_added_empty() {
        let xml = r#"<MediaContainer size="0"><Video type="movie" /></MediaContainer>"#;
        let listing = decode_recently_added(&container(xml));
        assert!(listing.recently_added.is_empty());
        assert_eq!(
            serde_json::to_value(&listing).unwrap(),
            serde_json::json!({ "recently_added": [] })
        );
    }

    #[test]
    fn test_episode_list() {
        let xml = r#"
<MediaContainer size="2" title2="Season 1">
  <Video ratingKey="21" index="1" title="Pilot" thumb="/t/21" />
  <Video ratingKey="22" index="2" title="Second" />
</MediaContainer>"#;
        let listing = decode_episode_list(&container(xml));

        assert_eq!(listing.episode_count, "2");
        assert_eq!(listing.title, "Season 1");
        assert_eq!(listing.episode_list.len(), 2);
        assert_eq!(listing.episode_list[0].title, "Pilot");
        assert_eq!(listing.episode_list[1].thumb, "");
    }

    #[test]
    fn test_episode_list_empty() {
        let listing = decode_episode_list(&container(r#"<MediaContainer size="0" title2="S" />"#));
        assert_eq!(listing.episode_count, "0");
        assert_eq!(listing.title, "");
        assert!(listing.episode_list.is_empty());
    }
}
