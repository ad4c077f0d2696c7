use std::collections::HashSet;

/// Remove repeated names, keeping the first occurrence of each.
///
/// Comparison is exact; `nginx` and `docker.io/library/nginx:latest` are
/// distinct here.
pub fn dedupe<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .iter()
        .map(|name| name.as_ref())
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedupe_preserves_first_seen_order() {
        assert_eq!(dedupe(&["a", "b", "a", "c", "b"]), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_dedupe_empty() {
        assert!(dedupe::<String>(&[]).is_empty());
    }

    #[test]
    fn test_dedupe_does_not_normalize() {
        let names = ["nginx", "docker.io/library/nginx:latest", "nginx"];
        assert_eq!(dedupe(&names), vec!["nginx", "docker.io/library/nginx:latest"]);
    }
}
