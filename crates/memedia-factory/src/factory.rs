use std::sync::Arc;

use crate::host::{ModuleLookup, PlayerFactory, PlayerHandle, PLAYER_PROVIDER_MODULE};
use crate::matcher::{self, CapabilityResult};
use crate::support::SupportTables;

/// Identifier the factory registers under.
pub const FACTORY_NAME: &str = "MeMedia";

/// Human-readable name of the Media Engine player.
pub const DISPLAY_NAME: &str = "Media Engine Player";

/// Player factory backed by the Media Engine.
///
/// Answers capability queries from its [`SupportTables`] and forwards player
/// creation to the [`PLAYER_PROVIDER_MODULE`] module.
pub struct MeMediaFactory {
    tables: SupportTables,
    modules: Arc<dyn ModuleLookup>,
}

impl MeMediaFactory {
    pub fn new(tables: SupportTables, modules: Arc<dyn ModuleLookup>) -> Self {
        Self { tables, modules }
    }

    pub fn tables(&self) -> &SupportTables {
        &self.tables
    }
}

impl PlayerFactory for MeMediaFactory {
    fn can_play_url(&self, url: &str) -> CapabilityResult {
        matcher::match_url(url, &self.tables)
    }

    fn create_player(&self) -> Option<PlayerHandle> {
        let Some(provider) = self.modules.player_provider() else {
            tracing::debug!(module = PLAYER_PROVIDER_MODULE, "player provider not loaded");
            return None;
        };

        let player = provider.create_player();
        if player.is_none() {
            tracing::debug!(
                module = PLAYER_PROVIDER_MODULE,
                "provider declined to create a player"
            );
        }
        player
    }

    fn display_name(&self) -> &str {
        DISPLAY_NAME
    }

    fn name(&self) -> &str {
        FACTORY_NAME
    }

    fn supported_platforms(&self) -> &[String] {
        &self.tables.platforms
    }
}

impl std::fmt::Debug for MeMediaFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeMediaFactory")
            .field("tables", &self.tables)
            .finish_non_exhaustive()
    }
}
