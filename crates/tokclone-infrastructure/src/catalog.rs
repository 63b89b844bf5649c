//! Video catalog implementations.
//!
//! The feed runs on a fixed catalog: either the built-in mock videos or a
//! TOML file with one `[[video]]` table per record.

use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tokclone_core::video::{VideoCatalog, VideoRecord};
use tokclone_core::{Result, TokError};

/// On-disk catalog layout.
#[derive(Deserialize, Debug, Default)]
struct CatalogFile {
    #[serde(rename = "video", default)]
    videos: Vec<VideoRecord>,
}

/// In-memory, ordered, validated catalog.
#[derive(Debug, Clone)]
pub struct StaticVideoCatalog {
    videos: Vec<VideoRecord>,
}

impl StaticVideoCatalog {
    /// Builds a catalog, rejecting empty lists and duplicate ids.
    pub fn new(videos: Vec<VideoRecord>) -> Result<Self> {
        if videos.is_empty() {
            return Err(TokError::config("video catalog is empty"));
        }

        let mut seen = HashSet::new();
        for video in &videos {
            if !seen.insert(video.id.as_str()) {
                return Err(TokError::config(format!(
                    "duplicate video id '{}' in catalog",
                    video.id
                )));
            }
        }

        Ok(Self { videos })
    }

    /// Loads a catalog from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let file: CatalogFile = toml::from_str(&content)?;
        Self::new(file.videos)
    }

    /// The built-in mock feed.
    pub fn builtin() -> Self {
        Self {
            videos: builtin_videos(),
        }
    }
}

impl VideoCatalog for StaticVideoCatalog {
    fn videos(&self) -> &[VideoRecord] {
        &self.videos
    }
}

fn video(
    id: &str,
    file: &str,
    username: &str,
    description: &str,
    song: &str,
    counts: (u64, u64, u64),
) -> VideoRecord {
    VideoRecord {
        id: id.to_string(),
        url: format!("https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/{file}"),
        username: username.to_string(),
        avatar: format!("https://picsum.photos/100/100?random={id}"),
        description: description.to_string(),
        song: song.to_string(),
        likes: counts.0,
        comments: counts.1,
        shares: counts.2,
    }
}

fn builtin_videos() -> Vec<VideoRecord> {
    vec![
        video(
            "1",
            "ForBiggerBlazes.mp4",
            "@fire_chaser",
            "When the campfire hits different 🔥 #nature #vibes",
            "Original Sound - fire_chaser",
            (12400, 342, 89),
        ),
        video(
            "2",
            "ForBiggerEscapes.mp4",
            "@wanderlust_jen",
            "Escaping the city for the weekend. Who's coming? 🏔️",
            "Adventure Awaits - Lofi Beats",
            (8530, 120, 45),
        ),
        video(
            "3",
            "ForBiggerFun.mp4",
            "@daily_giggles",
            "Tried the viral challenge and it went exactly as planned 😂",
            "Funny Bones - Comedy Mix",
            (45200, 1204, 560),
        ),
        video(
            "4",
            "ForBiggerJoyrides.mp4",
            "@road_trip_rick",
            "Top down, volume up. Summer mode activated ☀️",
            "Highway Dreams - Synthwave FM",
            (3210, 56, 12),
        ),
        video(
            "5",
            "ForBiggerMeltdowns.mp4",
            "@drama_llama",
            "POV: the wifi cuts out mid-game 💀",
            "Dramatic Chipmunk - Remix",
            (99100, 4021, 2300),
        ),
    ]
}
