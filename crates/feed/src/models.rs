use chrono::{DateTime, Utc};

/// A parsed syndication document: the channel title plus its items in
/// source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub title: String,
    pub items: Vec<ChannelItem>,
}

/// A single item from a feed document.
///
/// `pub_date` is kept as the raw source text; callers decide per item
/// whether an unparseable date disqualifies it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelItem {
    pub title: String,
    pub link: String,
    pub description: Option<String>,
    pub pub_date: String,
}

impl ChannelItem {
    /// Parse the item's publication date.
    ///
    /// Feeds carry RFC 1123 dates with a numeric zone, e.g.
    /// `Mon, 02 Jan 2006 15:04:05 -0700`.
    pub fn published_at(&self) -> chrono::ParseResult<DateTime<Utc>> {
        DateTime::parse_from_rfc2822(&self.pub_date).map(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn item(pub_date: &str) -> ChannelItem {
        ChannelItem {
            title: "A post".to_string(),
            link: "https://example.com/a-post".to_string(),
            description: None,
            pub_date: pub_date.to_string(),
        }
    }

    #[test]
    fn it_parses_numeric_zone_dates() {
        let parsed = item("Mon, 02 Jan 2006 15:04:05 -0700").published_at().unwrap();

        let expected = Utc.with_ymd_and_hms(2006, 1, 2, 22, 4, 5).unwrap();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn it_rejects_garbage_dates() {
        assert!(item("not-a-date").published_at().is_err());
        assert!(item("").published_at().is_err());
        assert!(item("2006-01-02T15:04:05Z").published_at().is_err());
    }
}
