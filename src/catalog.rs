//! Channel catalog
//!
//! The catalog is loaded once at startup from the configuration file and is
//! immutable afterwards. Category and channel order follow the declaration
//! order in the file.

use serde::{Deserialize, Serialize};

/// A single live channel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Channel {
    /// Display name
    pub name: String,

    /// HLS manifest URL
    pub url: String,

    /// Logo image URL
    pub logo: String,
}

impl Channel {
    /// Create a new channel
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        logo: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            logo: logo.into(),
        }
    }
}

/// A named group of channels
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    /// Category name, matched exactly by lookups
    pub name: String,

    /// Channels in display order
    pub channels: Vec<Channel>,
}

/// The full channel catalog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    /// Create a catalog from a list of categories
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// Channels for a category; unknown names yield an empty slice
    pub fn channels(&self, category: &str) -> &[Channel] {
        self.categories
            .iter()
            .find(|c| c.name == category)
            .map(|c| c.channels.as_slice())
            .unwrap_or(&[])
    }

    /// All categories in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// True if the catalog has no categories
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Built-in demo catalog matching the default allow-list
    pub fn default_catalog() -> Self {
        Self::new(vec![
            Category {
                name: "International News".to_string(),
                channels: vec![
                    Channel::new(
                        "Al Jazeera English",
                        "https://live-hls-web-aje.getaj.net/AJE/01.m3u8",
                        "https://live.fanmingming.com/tv/AlJazeera.png",
                    ),
                    Channel::new(
                        "France 24 English",
                        "https://static.france24.com/live/F24_EN_LO_HLS/live_web.m3u8",
                        "https://live.fanmingming.com/tv/France24.png",
                    ),
                    Channel::new(
                        "CGTN",
                        "https://live.cgtn.com/1000/prog_index.m3u8",
                        "https://live.fanmingming.com/tv/CGTN.png",
                    ),
                ],
            },
            Category {
                name: "Test Channels".to_string(),
                channels: vec![
                    Channel::new(
                        "Big Buck Bunny",
                        "https://bitdash-a.akamaihd.net/content/MI201109210084_1/m3u8s/f08e80da-bf1d-4e3d-8899-f0f6155f6efa.m3u8",
                        "https://live.fanmingming.com/tv/BBB.png",
                    ),
                    Channel::new(
                        "Sintel",
                        "https://bitdash-a.akamaihd.net/content/sintel/hls/playlist.m3u8",
                        "https://live.fanmingming.com/tv/Sintel.png",
                    ),
                    Channel::new(
                        "Akamai Live Test",
                        "https://cph-p2p-msl.akamaized.net/hls/live/2000341/test/master.m3u8",
                        "https://live.fanmingming.com/tv/Akamai.png",
                    ),
                ],
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        Catalog::new(vec![
            Category {
                name: "News".to_string(),
                channels: vec![
                    Channel::new("A", "https://a.example/a.m3u8", "https://a.example/a.png"),
                    Channel::new("B", "https://b.example/b.m3u8", "https://b.example/b.png"),
                ],
            },
            Category {
                name: "Sports".to_string(),
                channels: vec![Channel::new(
                    "C",
                    "https://c.example/c.m3u8",
                    "https://c.example/c.png",
                )],
            },
        ])
    }

    #[test]
    fn test_lookup_by_category() {
        let catalog = sample();
        let channels = catalog.channels("News");
        assert_eq!(channels.len(), 2);
        assert_eq!(channels[0].name, "A");
        assert_eq!(channels[1].name, "B");
    }

    #[test]
    fn test_unknown_category_is_empty() {
        let catalog = sample();
        assert!(catalog.channels("Movies").is_empty());
    }

    #[test]
    fn test_lookup_is_exact_match() {
        let catalog = sample();
        assert!(catalog.channels("news").is_empty());
        assert!(catalog.channels("New").is_empty());
    }

    #[test]
    fn test_category_order_preserved() {
        let catalog = sample();
        let names: Vec<&str> = catalog.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["News", "Sports"]);
    }

    #[test]
    fn test_default_catalog() {
        let catalog = Catalog::default_catalog();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.channels("International News").len(), 3);
        assert!(!catalog.channels("Test Channels").is_empty());
    }
}
