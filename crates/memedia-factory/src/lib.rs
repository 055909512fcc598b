pub mod config;
pub mod error;
pub mod factory;
pub mod host;
pub mod lifecycle;
pub mod matcher;
pub mod support;

pub use config::FactoryConfig;
pub use error::FactoryError;
pub use factory::{MeMediaFactory, DISPLAY_NAME, FACTORY_NAME};
pub use host::{
    same_factory, MediaPlayer, MediaRegistry, ModuleLookup, PlayerFactory, PlayerHandle,
    PlayerProvider, MEDIA_MODULE, PLAYER_PROVIDER_MODULE,
};
pub use lifecycle::{FactoryModule, RegistrationState};
pub use matcher::{match_url, CapabilityResult, Diagnostic, Rejection, Severity};
pub use support::SupportTables;
