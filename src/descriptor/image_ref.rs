//! Combined image reference parsing (`repository[:tag][@digest]`).

use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_TAG: &str = "latest";

/// A container image reference split into its parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageReference {
    pub repository: String,
    pub tag: String,
    pub digest: Option<String>,
}

impl ImageReference {
    /// Parse a combined reference. Never fails: input that does not look like
    /// `repo:tag` becomes a repository with the `latest` tag.
    pub fn parse(reference: &str) -> Self {
        let (remainder, digest) = match reference.split_once('@') {
            Some((image, digest)) => (image, Some(digest.to_string())),
            None => (reference, None),
        };

        let (repository, tag) = parse_image_tag(remainder);
        Self {
            repository: repository.to_string(),
            tag: tag.unwrap_or(DEFAULT_TAG).to_string(),
            digest,
        }
    }
}

/// Split `name:tag`. The right side of the last colon is a registry port,
/// not a tag, when it is all digits or still contains a path separator.
fn parse_image_tag(image_ref: &str) -> (&str, Option<&str>) {
    match image_ref.rfind(':') {
        Some(colon_pos) => {
            let potential_tag = &image_ref[colon_pos + 1..];
            let looks_like_port = potential_tag.contains('/')
                || potential_tag.chars().all(|c| c.is_ascii_digit());
            if looks_like_port {
                (image_ref, None)
            } else {
                (&image_ref[..colon_pos], Some(potential_tag))
            }
        }
        None => (image_ref, None),
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.repository, self.tag)?;
        if let Some(digest) = &self.digest {
            write!(f, "@{}", digest)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_name() {
        let image = ImageReference::parse("ubuntu");
        assert_eq!(image.repository, "ubuntu");
        assert_eq!(image.tag, "latest");
        assert!(image.digest.is_none());
    }

    #[test]
    fn test_parse_with_tag() {
        let image = ImageReference::parse("oxsecurity/megalinter-ci_light:v9.1.0");
        assert_eq!(image.repository, "oxsecurity/megalinter-ci_light");
        assert_eq!(image.tag, "v9.1.0");
    }

    #[test]
    fn test_parse_with_tag_and_digest() {
        let image = ImageReference::parse("rhysd/actionlint:1.7.10@sha256:abc123");
        assert_eq!(image.repository, "rhysd/actionlint");
        assert_eq!(image.tag, "1.7.10");
        assert_eq!(image.digest.as_deref(), Some("sha256:abc123"));
    }

    #[test]
    fn test_digest_without_tag() {
        let image = ImageReference::parse("alpine@sha256:deadbeef");
        assert_eq!(image.repository, "alpine");
        assert_eq!(image.tag, "latest");
        assert_eq!(image.digest.as_deref(), Some("sha256:deadbeef"));
    }

    #[test]
    fn test_registry_port_is_not_a_tag() {
        let image = ImageReference::parse("localhost:5000/name");
        assert_eq!(image.repository, "localhost:5000/name");
        assert_eq!(image.tag, "latest");
    }

    #[test]
    fn test_registry_port_with_tag() {
        let image = ImageReference::parse("registry.local:5000/team/tool:2.1");
        assert_eq!(image.repository, "registry.local:5000/team/tool");
        assert_eq!(image.tag, "2.1");
    }

    #[test]
    fn test_all_digit_suffix_is_treated_as_port() {
        let image = ImageReference::parse("myhost:8080");
        assert_eq!(image.repository, "myhost:8080");
        assert_eq!(image.tag, "latest");
    }

    #[test]
    fn test_degrades_on_malformed_input() {
        let image = ImageReference::parse("weird:");
        assert_eq!(image.repository, "weird:");
        assert_eq!(image.tag, "latest");
        assert!(image.digest.is_none());
    }

    #[test]
    fn test_display_round_trip() {
        let image = ImageReference::parse("org/img:1.2.3@sha256:ff");
        assert_eq!(image.to_string(), "org/img:1.2.3@sha256:ff");
    }
}
