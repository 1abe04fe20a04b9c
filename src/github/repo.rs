//! GitHub repository payloads.
use serde::{Deserialize, Serialize};

/// Body of a repository-creation request.
#[derive(Serialize, Debug, Clone)]
pub struct NewRepo {
    /// Repository name.
    pub name: String,

    /// Repository description.
    pub description: String,

    /// Repository private status.
    pub private: bool,

    /// Whether to create an initial commit. Always false for mirrors.
    pub auto_init: bool,
}

/// Relevant part of a repository-creation response.
#[derive(Deserialize, Debug, Clone)]
pub struct CreatedRepo {
    /// HTTPS clone URL of the new repository.
    pub clone_url: String,
}
