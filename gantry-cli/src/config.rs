//! Configuration module
//!
//! Holds the resolved CLI configuration and constructs the control-plane
//! client from it. Credentials flow in from flags or environment via clap;
//! nothing below this layer reads the environment.

use gantry_client::HttpControlPlane;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the cluster control plane
    pub control_plane_url: String,

    /// Optional bearer token injected into the client
    pub auth_token: Option<String>,
}

impl Config {
    /// Build a control-plane client from this configuration
    pub fn control_plane(&self) -> HttpControlPlane {
        let client = HttpControlPlane::new(&self.control_plane_url);
        match &self.auth_token {
            Some(token) => client.with_auth_token(token),
            None => client,
        }
    }
}
