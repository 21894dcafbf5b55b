use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub const MISSING_CREDENTIALS: &str =
    "Missing API credentials. Please provide API Key and Access Token.";
pub const UNKNOWN_PLATFORM: &str = "Unknown platform";

/// Platforms a video can be cross-posted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    YouTube,
    TikTok,
    Instagram,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::YouTube, Platform::TikTok, Platform::Instagram];

    /// Identifier used on the wire and in the form.
    pub fn id(&self) -> &'static str {
        match self {
            Platform::YouTube => "youtube",
            Platform::TikTok => "tiktok",
            Platform::Instagram => "instagram",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::YouTube => "YouTube",
            Platform::TikTok => "TikTok",
            Platform::Instagram => "Instagram",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Platform::YouTube => "📹",
            Platform::TikTok => "🎵",
            Platform::Instagram => "📷",
        }
    }

    /// Exact, case-sensitive lookup by identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|platform| platform.id() == id)
    }

    /// Seed descriptor shown when the form loads: disabled, no credentials.
    pub fn descriptor(&self) -> PlatformDescriptor {
        PlatformDescriptor {
            id: self.id().to_string(),
            name: self.display_name().to_string(),
            icon: self.icon().to_string(),
            enabled: false,
            api_key: String::new(),
            access_token: String::new(),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| {
            let known: Vec<&str> = Self::ALL.iter().map(|p| p.id()).collect();
            format!("unknown platform '{}', expected one of: {}", s, known.join(", "))
        })
    }
}

/// A user-configured target platform together with its demo credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformDescriptor {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub access_token: String,
}

impl PlatformDescriptor {
    pub fn credentials(&self) -> Credentials<'_> {
        Credentials {
            api_key: &self.api_key,
            access_token: &self.access_token,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Credentials<'a> {
    pub api_key: &'a str,
    pub access_token: &'a str,
}

impl Credentials<'_> {
    pub fn is_complete(&self) -> bool {
        !self.api_key.is_empty() && !self.access_token.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Pending,
    Success,
    Error,
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostStatus::Pending => f.write_str("⏳ Posting..."),
            PostStatus::Success => f.write_str("✅ Posted"),
            PostStatus::Error => f.write_str("❌ Failed"),
        }
    }
}

/// Outcome of one platform within a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResult {
    pub platform: String,
    pub status: PostStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PostResult {
    pub fn pending(platform: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            status: PostStatus::Pending,
            message: None,
        }
    }

    pub fn success(platform: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            status: PostStatus::Success,
            message: Some(message.into()),
        }
    }

    pub fn error(platform: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            status: PostStatus::Error,
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_id_is_exact() {
        assert_eq!(Platform::from_id("youtube"), Some(Platform::YouTube));
        assert_eq!(Platform::from_id("tiktok"), Some(Platform::TikTok));
        assert_eq!(Platform::from_id("instagram"), Some(Platform::Instagram));
        assert_eq!(Platform::from_id("YouTube"), None);
        assert_eq!(Platform::from_id("vimeo"), None);
        assert!("facebook".parse::<Platform>().is_err());
    }

    #[test]
    fn test_descriptor_decodes_browser_payload() {
        let json = r#"[{"id":"youtube","name":"YouTube","icon":"📹","enabled":true,"apiKey":"k","accessToken":"t"},{"id":"tiktok"}]"#;
        let descriptors: Vec<PlatformDescriptor> = serde_json::from_str(json).unwrap();

        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors[0].api_key, "k");
        assert_eq!(descriptors[0].access_token, "t");
        assert!(descriptors[0].credentials().is_complete());
        assert_eq!(descriptors[1].name, "");
        assert!(!descriptors[1].credentials().is_complete());
    }

    #[test]
    fn test_descriptor_serializes_camel_case() {
        let value = serde_json::to_value(Platform::TikTok.descriptor()).unwrap();
        assert_eq!(value["id"], "tiktok");
        assert_eq!(value["name"], "TikTok");
        assert_eq!(value["apiKey"], "");
        assert_eq!(value["accessToken"], "");
        assert_eq!(value["enabled"], false);
    }

    #[test]
    fn test_pending_result_omits_message() {
        let value = serde_json::to_value(PostResult::pending("YouTube")).unwrap();
        assert_eq!(value["status"], "pending");
        assert!(value.get("message").is_none());

        let value = serde_json::to_value(PostResult::error("TikTok", UNKNOWN_PLATFORM)).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["message"], "Unknown platform");
    }
}
