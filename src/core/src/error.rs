use std::path::PathBuf;

use thiserror::Error;

/// nodeload error types
#[derive(Error, Debug)]
pub enum LoadError {
    /// The cluster has no nodes
    #[error("no nodes found for cluster {cluster:?}")]
    NoNodesFound { cluster: String },

    /// A requested node name does not exist in the cluster
    #[error("unknown node: {0:?}")]
    UnknownNode(String),

    /// Host-side archive could not be opened
    #[error("failed to open image archive {} for node {node}: {source}", .path.display())]
    ArchiveOpenFailed {
        node: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Node-side import of an archive failed
    #[error("failed to load image archive into node {node}: {message}")]
    ArchiveTransferFailed { node: String, message: String },

    /// Image is not present in the host image store
    #[error("image {0:?} not present locally")]
    ImageNotFound(String),

    /// An external runtime command exited unsuccessfully
    #[error("command `{command}` failed: {message}")]
    CommandFailed { command: String, message: String },

    /// A per-node task died before producing an outcome
    #[error("load task for node {node} failed: {message}")]
    TaskFailed { node: String, message: String },

    /// Invalid caller input
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl LoadError {
    /// Name of the node this error is attributed to, if any.
    pub fn node(&self) -> Option<&str> {
        match self {
            LoadError::ArchiveOpenFailed { node, .. }
            | LoadError::ArchiveTransferFailed { node, .. }
            | LoadError::TaskFailed { node, .. } => Some(node),
            LoadError::UnknownNode(node) => Some(node),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::SerializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for LoadError {
    fn from(err: serde_yaml::Error) -> Self {
        LoadError::SerializationError(err.to_string())
    }
}

/// Result type alias for nodeload operations
pub type Result<T> = std::result::Result<T, LoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_nodes_found_display() {
        let error = LoadError::NoNodesFound {
            cluster: "kind".to_string(),
        };
        assert_eq!(error.to_string(), "no nodes found for cluster \"kind\"");
    }

    #[test]
    fn test_unknown_node_display() {
        let error = LoadError::UnknownNode("n4".to_string());
        assert_eq!(error.to_string(), "unknown node: \"n4\"");
        assert_eq!(error.node(), Some("n4"));
    }

    #[test]
    fn test_archive_open_failed_display() {
        let error = LoadError::ArchiveOpenFailed {
            node: "kind-worker".to_string(),
            path: PathBuf::from("/tmp/images.tar"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        };
        let msg = error.to_string();
        assert!(msg.contains("/tmp/images.tar"));
        assert!(msg.contains("kind-worker"));
        assert!(msg.contains("file not found"));
        assert_eq!(error.node(), Some("kind-worker"));
    }

    #[test]
    fn test_archive_transfer_failed_display() {
        let error = LoadError::ArchiveTransferFailed {
            node: "kind-control-plane".to_string(),
            message: "ctr: content digest not found".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "failed to load image archive into node kind-control-plane: ctr: content digest not found"
        );
    }

    #[test]
    fn test_command_failed_display() {
        let error = LoadError::CommandFailed {
            command: "docker save".to_string(),
            message: "exit status 1".to_string(),
        };
        assert_eq!(error.to_string(), "command `docker save` failed: exit status 1");
        assert_eq!(error.node(), None);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let load_error: LoadError = io_error.into();
        assert!(matches!(load_error, LoadError::IoError(_)));
        assert!(load_error.to_string().contains("denied"));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let result: std::result::Result<serde_json::Value, _> = serde_json::from_str("{ nope");
        let load_error: LoadError = result.unwrap_err().into();
        assert!(matches!(load_error, LoadError::SerializationError(_)));
    }

    #[test]
    fn test_serde_yaml_error_conversion() {
        let result: std::result::Result<serde_yaml::Value, _> =
            serde_yaml::from_str("invalid: yaml: content:");
        let load_error: LoadError = result.unwrap_err().into();
        assert!(matches!(load_error, LoadError::SerializationError(_)));
    }
}
