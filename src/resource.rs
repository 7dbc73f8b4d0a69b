use serde::{Deserialize, Serialize};
use std::fmt;

/// A sub-resource of a page that gets mirrored to disk.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Posts,
    Videos,
    Events,
}

impl Resource {
    /// Sync order.
    pub const ALL: [Resource; 3] = [Resource::Posts, Resource::Videos, Resource::Events];

    pub fn endpoint(&self) -> &'static str {
        match self {
            Resource::Posts => "posts",
            Resource::Videos => "videos",
            Resource::Events => "events",
        }
    }

    pub fn fields(&self) -> &'static str {
        match self {
            Resource::Posts => "id,message,full_picture,created_time,type,permalink_url",
            Resource::Videos => "id,title,description,source,picture,created_time,length",
            Resource::Events => "id,name,description,start_time,end_time,place,cover",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Resource::Posts => "facebook_posts.json",
            Resource::Videos => "facebook_videos.json",
            Resource::Events => "facebook_events.json",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.endpoint())
    }
}
