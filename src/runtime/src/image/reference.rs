//! Image reference normalization.
//!
//! Expands references like `nginx` into the fully qualified form the node's
//! container runtime records as a tag (`docker.io/library/nginx:latest`), so
//! that tags can be compared as plain strings.

use std::fmt;

/// Default registry when none is specified.
const DEFAULT_DOMAIN: &str = "docker.io";

/// Namespace for unqualified repositories on the default registry.
const OFFICIAL_REPO_NAMESPACE: &str = "library";

/// Default tag when none is specified.
const DEFAULT_TAG: &str = "latest";

/// Fully qualified `<domain>/<path>:<tag>` image reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalReference(String);

impl CanonicalReference {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CanonicalReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalReference {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for CanonicalReference {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CanonicalReference {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Normalize an image reference.
///
/// - `nginx` → `docker.io/library/nginx:latest`
/// - `nginx:1.19` → `docker.io/library/nginx:1.19`
/// - `myuser/app` → `docker.io/myuser/app:latest`
/// - `localhost/foo` → `localhost/foo:latest`
/// - `registry.example.com:5000/foo:v1` → unchanged
///
/// The input is not validated: an empty string yields
/// `docker.io/library/:latest`. Normalization is idempotent.
pub fn normalize(reference: &str) -> CanonicalReference {
    let mut name = if reference.contains('/') {
        reference.to_string()
    } else {
        format!("{}/{}", OFFICIAL_REPO_NAMESPACE, reference)
    };

    // The first component is a registry only if it looks like a hostname
    let first = name.split('/').next().unwrap_or_default();
    if !is_registry_domain(first) {
        name = format!("{}/{}", DEFAULT_DOMAIN, name);
    }

    let last = name.rsplit('/').next().unwrap_or_default();
    if !last.contains(':') {
        name.push(':');
        name.push_str(DEFAULT_TAG);
    }

    CanonicalReference(name)
}

/// Whether two references name the same image once normalized.
pub fn same_image(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

fn is_registry_domain(component: &str) -> bool {
    component.contains('.') || component.contains(':') || component == "localhost"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_name() {
        assert_eq!(normalize("nginx"), "docker.io/library/nginx:latest");
    }

    #[test]
    fn test_bare_name_with_tag() {
        assert_eq!(normalize("nginx:1.19"), "docker.io/library/nginx:1.19");
    }

    #[test]
    fn test_namespaced_repo() {
        assert_eq!(normalize("library/nginx"), "docker.io/library/nginx:latest");
        assert_eq!(normalize("myuser/myimage:v1.0"), "docker.io/myuser/myimage:v1.0");
    }

    #[test]
    fn test_explicit_domain_preserved() {
        assert_eq!(
            normalize("myregistry.example.com/foo"),
            "myregistry.example.com/foo:latest"
        );
        assert_eq!(normalize("ghcr.io/org/sub/image:v1"), "ghcr.io/org/sub/image:v1");
    }

    #[test]
    fn test_localhost_is_domain() {
        assert_eq!(normalize("localhost/foo"), "localhost/foo:latest");
        assert_eq!(normalize("localhost/foo:dev"), "localhost/foo:dev");
    }

    #[test]
    fn test_registry_with_port() {
        assert_eq!(normalize("localhost:5000/foo"), "localhost:5000/foo:latest");
        assert_eq!(
            normalize("registry.local:5000/team/app:1.2"),
            "registry.local:5000/team/app:1.2"
        );
    }

    #[test]
    fn test_fully_qualified_verbatim() {
        let reference = "docker.io/library/nginx:latest";
        assert_eq!(normalize(reference), reference);
    }

    #[test]
    fn test_digest_reference_keeps_digest() {
        assert_eq!(
            normalize("nginx@sha256:abcdef"),
            "docker.io/library/nginx@sha256:abcdef"
        );
    }

    #[test]
    fn test_empty_reference_is_degenerate() {
        assert_eq!(normalize(""), "docker.io/library/:latest");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "",
            "nginx",
            "nginx:1.19",
            "library/nginx",
            "myuser/app",
            "a/b:c/d",
            "localhost",
            "localhost/foo",
            "localhost:5000/foo",
            "registry.example.com/foo",
            "registry.example.com:443/a/b/c:tag",
            "docker.io/library/nginx:latest",
            "nginx@sha256:abcdef",
            "x/",
            ":5000",
            "UPPER/Case",
        ];
        for input in inputs {
            let once = normalize(input);
            let twice = normalize(once.as_str());
            assert_eq!(once, twice, "normalize is not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_same_image() {
        assert!(same_image("nginx", "docker.io/library/nginx:latest"));
        assert!(same_image("library/nginx:latest", "nginx"));
        assert!(!same_image("nginx:1.19", "nginx"));
        assert!(!same_image("localhost/nginx", "nginx"));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", normalize("redis")), "docker.io/library/redis:latest");
    }
}
