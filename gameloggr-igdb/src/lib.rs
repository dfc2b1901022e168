//! Client for the IGDB game metadata API.

pub mod client;
pub mod credentials;
pub mod error;
pub mod types;

pub use client::{IgdbClient, platform_page_query, search_query};
pub use credentials::{
    CredentialSource, CredentialSources, Credentials, config_path, credential_sources,
    has_credentials, remove_from_file, save_to_file,
};
pub use error::IgdbError;
pub use types::{
    IgdbCompany, IgdbGame, IgdbGenre, IgdbImage, IgdbInvolvedCompany, IgdbPlatform, high_res_url,
};
