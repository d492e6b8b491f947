use serde::Serialize;

use crate::util::millis_to_minutes;
use crate::xml::XmlElement;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetadataType {
    Show,
    Episode,
    Movie,
    Season,
}

impl MetadataType {
    pub fn from_attr(value: &str) -> Option<Self> {
        match value {
            "show" => Some(MetadataType::Show),
            "episode" => Some(MetadataType::Episode),
            "movie" => Some(MetadataType::Movie),
            "season" => Some(MetadataType::Season),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetadataRecord {
    #[serde(rename = "type")]
    pub media_type: MetadataType,
    pub rating_key: String,
    pub grandparent_title: String,
    pub parent_index: String,
    pub parent_title: String,
    pub index: String,
    pub studio: String,
    pub title: String,
    pub content_rating: String,
    pub summary: String,
    pub rating: String,
    /// Whole minutes.
    pub duration: String,
    pub year: String,
    pub thumb: String,
    pub parent_thumb: String,
    pub art: String,
    pub originally_available_at: String,
    pub genres: Vec<String>,
    pub actors: Vec<String>,
    pub writers: Vec<String>,
    pub directors: Vec<String>,
}

impl MetadataRecord {
    /// Copy the fields a season takes from its show. Without a show they
    /// stay empty.
    pub fn inherit_from(mut self, show: Option<&MetadataRecord>) -> Self {
        if let Some(show) = show {
            self.summary = show.summary.clone();
            self.duration = show.duration.clone();
        }
        self
    }
}

/// `{ "metadata": null }` means the server did not return exactly one item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetadataResponse {
    pub metadata: Option<MetadataRecord>,
}

impl MetadataResponse {
    pub fn found(record: MetadataRecord) -> Self {
        Self {
            metadata: Some(record),
        }
    }

    pub fn not_found() -> Self {
        Self { metadata: None }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MetadataDecode {
    NotFound,
    Item(MetadataRecord),
    /// A season whose summary and duration still have to be taken from
    /// the show at `parent_rating_key`.
    Season {
        record: MetadataRecord,
        parent_rating_key: String,
    },
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DecodeError {
    #[error("no Directory or Video element in metadata container")]
    MissingItem,
    #[error("unsupported metadata type '{0}'")]
    UnsupportedType(String),
}

pub fn decode_metadata(container: &XmlElement) -> Result<MetadataDecode, DecodeError> {
    if let Some(size) = container.get_attr("size") {
        if size != "1" {
            return Ok(MetadataDecode::NotFound);
        }
    }

    let item = container
        .child("Directory")
        .or_else(|| container.child("Video"))
        .ok_or(DecodeError::MissingItem)?;

    let raw_type = item.attr("type");
    let media_type =
        MetadataType::from_attr(&raw_type).ok_or(DecodeError::UnsupportedType(raw_type))?;

    let mut record = MetadataRecord {
        media_type,
        rating_key: item.attr("ratingKey"),
        grandparent_title: item.attr("grandparentTitle"),
        parent_index: item.attr("parentIndex"),
        parent_title: item.attr("parentTitle"),
        index: item.attr("index"),
        studio: item.attr("studio"),
        title: item.attr("title"),
        content_rating: item.attr("contentRating"),
        summary: item.attr("summary"),
        rating: item.attr("rating"),
        duration: millis_to_minutes(&item.attr("duration")),
        year: item.attr("year"),
        thumb: item.attr("thumb"),
        parent_thumb: item.attr("parentThumb"),
        art: item.attr("art"),
        originally_available_at: item.attr("originallyAvailableAt"),
        genres: tags(item, "Genre"),
        actors: tags(item, "Role"),
        writers: tags(item, "Writer"),
        directors: tags(item, "Director"),
    };

    if media_type == MetadataType::Season {
        record.summary = String::new();
        record.duration = String::new();
        return Ok(MetadataDecode::Season {
            record,
            parent_rating_key: item.attr("parentRatingKey"),
        });
    }

    Ok(MetadataDecode::Item(record))
}

/// `tag` attributes of the named children, in document order, without repeats.
fn tags(item: &XmlElement, name: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for tag in item.children_named(name).filter_map(|c| c.get_attr("tag")) {
        if !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse_document;

    fn decode(xml: &str) -> Result<MetadataDecode, DecodeError> {
        decode_metadata(&parse_document(xml.as_bytes()).unwrap())
    }

    #[test]
    fn test_movie_without_tags() {
        let xml = r#"<MediaContainer size="1"><Video type="movie" ratingKey="100" title="Film" /></MediaContainer>"#;
        let MetadataDecode::Item(record) = decode(xml).unwrap() else {
            panic!("expected an item");
        };

        assert_eq!(record.media_type, MetadataType::Movie);
        assert_eq!(record.rating_key, "100");
        assert_eq!(record.title, "Film");
        assert!(record.genres.is_empty());
        assert!(record.actors.is_empty());
        assert!(record.writers.is_empty());
        assert!(record.directors.is_empty());
        assert_eq!(record.summary, "");
        assert_eq!(record.duration, "");
        assert_eq!(record.year, "");
    }

    #[test]
    fn test_show_with_tags() {
        let xml = r#"
<MediaContainer size="1">
  <Directory type="show" ratingKey="10" title="Show" summary="About" duration="1320000" year="2001" studio="HBO">
    <Genre tag="Drama" />
    <Genre tag="Crime" />
    <Genre tag="Drama" />
    <Genre />
    <Role tag="Actor A" />
    <Writer tag="Writer W" />
    <Director tag="Director D" />
  </Directory>
</MediaContainer>"#;
        let MetadataDecode::Item(record) = decode(xml).unwrap() else {
            panic!("expected an item");
        };

        assert_eq!(record.media_type, MetadataType::Show);
        assert_eq!(record.duration, "22");
        assert_eq!(record.studio, "HBO");
        assert_eq!(record.genres, vec!["Drama", "Crime"]);
        assert_eq!(record.actors, vec!["Actor A"]);
        assert_eq!(record.writers, vec!["Writer W"]);
        assert_eq!(record.directors, vec!["Director D"]);
    }

    #[test]
    fn test_season_defers_to_show() {
        let xml = r#"<MediaContainer size="1"><Directory type="season" ratingKey="11" parentRatingKey="10" index="2" summary="own" duration="5" /></MediaContainer>"#;
        let MetadataDecode::Season { record, parent_rating_key } = decode(xml).unwrap() else {
            panic!("expected a season");
        };
        assert_eq!(parent_rating_key, "10");
        assert_eq!(record.index, "2");
        assert_eq!(record.summary, "");
        assert_eq!(record.duration, "");
    }

    #[test]
    fn test_container_size() {
        let xml = r#"<MediaContainer size="2"><Video type="movie" /><Video type="movie" /></MediaContainer>"#;
        assert_eq!(decode(xml), Ok(MetadataDecode::NotFound));
        assert_eq!(decode(r#"<MediaContainer size="0" />"#), Ok(MetadataDecode::NotFound));
        assert_eq!(decode(r#"<MediaContainer size="1" />"#), Err(DecodeError::MissingItem));
    }

    #[test]
    fn test_duration_in_minutes() {
        let xml = r#"<MediaContainer size="1"><Video type="movie" duration="5430000" /></MediaContainer>"#;
        let MetadataDecode::Item(record) = decode(xml).unwrap() else {
            panic!("expected an item");
        };
        assert_eq!(record.duration, "91");

        let xml = r#"<MediaContainer size="1"><Video type="movie" duration="18446744073709551615" /></MediaContainer>"#;
        let MetadataDecode::Item(record) = decode(xml).unwrap() else {
            panic!("expected an item");
        };
        assert_eq!(record.duration, "307445734561826");
    }

    #[test]
    fn test_unsupported_type() {
        let xml = r#"<MediaContainer size="1"><Directory type="artist" /></MediaContainer>"#;
        assert_eq!(decode(xml), Err(DecodeError::UnsupportedType("artist".to_string())));
    }

    #[test]
    fn test_inherit_from() {
        let xml = r#"<MediaContainer size="1"><Directory type="show" summary="About" duration="3600000" /></MediaContainer>"#;
        let MetadataDecode::Item(show) = decode(xml).unwrap() else {
            panic!("expected an item");
        };
        let season = r#"<MediaContainer size="1"><Directory type="season" parentRatingKey="10" /></MediaContainer>"#;
        let MetadataDecode::Season { record, .. } = decode(season).unwrap() else {
            panic!("expected a season");
        };

        let merged = record.clone().inherit_from(Some(&show));
        assert_eq!(merged.summary, "About");
        assert_eq!(merged.duration, "60");

        let orphan = record.inherit_from(None);
        assert_eq!(orphan.summary, "");
    }
}
