//! Retag decisions for images already present inside a node.
//!
//! A node may already hold an image's content under a different name (for
//! example `nginx:1.19` loaded earlier, now requested as `nginx:stable`).
//! Binding the missing name is a cheap local tag operation; transferring the
//! archive again is not.

use std::collections::{BTreeMap, BTreeSet};

use nodeload_core::error::Result;

use super::reference::{normalize, CanonicalReference};
use crate::node::{Node, NodeProvider};

/// Tags bound inside a node, keyed by image content ID.
pub type ImageTags = BTreeMap<String, BTreeSet<String>>;

/// Outcome of comparing a requested name against a node's tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetagDecision {
    /// The node does not hold the image content.
    Absent,
    /// The content is present and already bound to the requested name.
    Present(CanonicalReference),
    /// The content is present but the requested name must be added.
    RetagRequired(CanonicalReference),
}

impl RetagDecision {
    pub fn exists(&self) -> bool {
        !matches!(self, RetagDecision::Absent)
    }

    pub fn retag_required(&self) -> bool {
        matches!(self, RetagDecision::RetagRequired(_))
    }

    /// Normalized requested name; `None` when the image is absent.
    pub fn canonical(&self) -> Option<&CanonicalReference> {
        match self {
            RetagDecision::Absent => None,
            RetagDecision::Present(c) | RetagDecision::RetagRequired(c) => Some(c),
        }
    }
}

/// Decide whether `requested_name` is satisfied by the fetched tags.
pub fn decide(fetched: &Result<ImageTags>, requested_name: &str) -> RetagDecision {
    let tags = match fetched {
        Ok(tags) if tags.values().any(|set| !set.is_empty()) => tags,
        _ => return RetagDecision::Absent,
    };

    let canonical = normalize(requested_name);
    if tags.values().any(|set| set.contains(canonical.as_str())) {
        RetagDecision::Present(canonical)
    } else {
        RetagDecision::RetagRequired(canonical)
    }
}

/// Fetch the node's tags for `image_id` and decide for `requested_name`.
pub async fn check_retag<P>(
    provider: &P,
    node: &Node,
    image_id: &str,
    requested_name: &str,
) -> RetagDecision
where
    P: NodeProvider + ?Sized,
{
    let fetched = provider.fetch_image_tags(node, image_id).await;
    if let Err(ref e) = fetched {
        tracing::debug!(node = %node, image_id, error = %e, "Image tag lookup failed, treating as absent");
    }
    decide(&fetched, requested_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodeload_core::error::LoadError;

    fn tags(id: &str, names: &[&str]) -> ImageTags {
        let mut map = ImageTags::new();
        map.insert(id.to_string(), names.iter().map(|s| s.to_string()).collect());
        map
    }

    #[test]
    fn test_present_under_requested_name() {
        let fetched = Ok(tags("imgA", &["docker.io/library/nginx:1.19"]));
        let decision = decide(&fetched, "nginx:1.19");
        assert!(decision.exists());
        assert!(!decision.retag_required());
        assert_eq!(
            decision,
            RetagDecision::Present(normalize("docker.io/library/nginx:1.19"))
        );
    }

    #[test]
    fn test_present_under_other_name() {
        let fetched = Ok(tags("imgA", &["docker.io/library/nginx:1.19"]));
        let decision = decide(&fetched, "nginx:latest");
        assert!(decision.exists());
        assert!(decision.retag_required());
        assert_eq!(
            decision.canonical().map(|c| c.as_str()),
            Some("docker.io/library/nginx:latest")
        );
    }

    #[test]
    fn test_empty_tags_is_absent() {
        let decision = decide(&Ok(ImageTags::new()), "nginx");
        assert_eq!(decision, RetagDecision::Absent);
        assert!(!decision.exists());
        assert!(decision.canonical().is_none());
    }

    #[test]
    fn test_id_with_empty_tag_set_is_absent() {
        let decision = decide(&Ok(tags("imgA", &[])), "nginx");
        assert_eq!(decision, RetagDecision::Absent);
    }

    #[test]
    fn test_fetch_error_is_absent() {
        let fetched = Err(LoadError::CommandFailed {
            command: "crictl inspecti".to_string(),
            message: "no such image".to_string(),
        });
        assert_eq!(decide(&fetched, "nginx:1.19"), RetagDecision::Absent);
    }

    #[test]
    fn test_requested_name_is_normalized_before_lookup() {
        let fetched = Ok(tags("imgB", &["registry.local:5000/team/app:latest"]));
        assert_eq!(
            decide(&fetched, "registry.local:5000/team/app"),
            RetagDecision::Present(normalize("registry.local:5000/team/app:latest"))
        );
    }

    #[test]
    fn test_match_in_any_id() {
        let mut fetched = tags("imgA", &["docker.io/library/redis:7"]);
        fetched.insert(
            "imgB".to_string(),
            ["docker.io/library/nginx:latest".to_string()].into_iter().collect(),
        );
        assert!(!decide(&Ok(fetched), "nginx").retag_required());
    }
}
