use std::sync::{Arc, RwLock};

use memedia_factory::{
    MediaRegistry, ModuleLookup, PlayerProvider, MEDIA_MODULE, PLAYER_PROVIDER_MODULE,
};

use crate::registry::MediaModule;

/// The modules a host currently has loaded, by well-known name.
#[derive(Default)]
pub struct HostModules {
    media: RwLock<Option<Arc<MediaModule>>>,
    player_provider: RwLock<Option<Arc<dyn PlayerProvider>>>,
}

impl HostModules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host with a fresh [`MediaModule`] loaded and no player provider.
    pub fn with_media() -> Self {
        let modules = Self::new();
        modules.load_media(Arc::new(MediaModule::new()));
        modules
    }

    pub fn load_media(&self, media: Arc<MediaModule>) {
        tracing::debug!(module = MEDIA_MODULE, "module loaded");
        *write(&self.media) = Some(media);
    }

    pub fn unload_media(&self) -> Option<Arc<MediaModule>> {
        tracing::debug!(module = MEDIA_MODULE, "module unloaded");
        write(&self.media).take()
    }

    pub fn load_player_provider(&self, provider: Arc<dyn PlayerProvider>) {
        tracing::debug!(module = PLAYER_PROVIDER_MODULE, "module loaded");
        *write(&self.player_provider) = Some(provider);
    }

    pub fn unload_player_provider(&self) -> Option<Arc<dyn PlayerProvider>> {
        tracing::debug!(module = PLAYER_PROVIDER_MODULE, "module unloaded");
        write(&self.player_provider).take()
    }

    /// The loaded media module, with its concrete type.
    pub fn media(&self) -> Option<Arc<MediaModule>> {
        read(&self.media).clone()
    }

    /// Whether a module with the given name is loaded.
    pub fn is_loaded(&self, name: &str) -> bool {
        match name {
            MEDIA_MODULE => read(&self.media).is_some(),
            PLAYER_PROVIDER_MODULE => read(&self.player_provider).is_some(),
            _ => false,
        }
    }
}

impl ModuleLookup for HostModules {
    fn media_registry(&self) -> Option<Arc<dyn MediaRegistry>> {
        self.media().map(|m| m as Arc<dyn MediaRegistry>)
    }

    fn player_provider(&self) -> Option<Arc<dyn PlayerProvider>> {
        read(&self.player_provider).clone()
    }
}

fn read<T>(lock: &RwLock<Option<T>>) -> std::sync::RwLockReadGuard<'_, Option<T>> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write<T>(lock: &RwLock<Option<T>>) -> std::sync::RwLockWriteGuard<'_, Option<T>> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}
