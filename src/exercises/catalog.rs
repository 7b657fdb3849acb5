use serde::{Deserialize, Serialize};

/// A piece of box art attached to a video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxArt {
  /// Width in pixels.
  pub width: u32,
  /// Height in pixels.
  pub height: u32,
  /// Where the image lives.
  pub url: String,
}

impl BoxArt {
  /// Pixel area, `width * height`.
  pub fn area(&self) -> u64 {
    u64::from(self.width) * u64::from(self.height)
  }
}

/// A single video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
  /// Catalogue id.
  pub id: u64,
  /// Display title.
  pub title: String,
  /// Available box art, possibly empty.
  #[serde(default)]
  pub boxarts: Vec<BoxArt>,
}

/// A named list of videos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movies {
  /// List name, e.g. "New Releases".
  pub name: String,
  /// The videos in display order.
  pub videos: Vec<Video>,
}
