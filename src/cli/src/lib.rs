//! nodeload CLI - load host container images into cluster nodes.

pub mod commands;
