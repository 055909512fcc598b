//! Interfaces between a player factory and the media host that loads it.
//!
//! The host owns the registry of factories and the modules a factory depends
//! on. A factory never resolves modules by itself; it is handed a
//! [`ModuleLookup`] and every lookup returns an explicit `Option`, since a host
//! may run with only part of its modules loaded.

use std::sync::Arc;

use crate::matcher::CapabilityResult;

/// Name of the host module that owns the player factory registry.
pub const MEDIA_MODULE: &str = "Media";

/// Name of the module that provides Media Engine players.
pub const PLAYER_PROVIDER_MODULE: &str = "MeMedia";

/// A media player created by a factory.
pub trait MediaPlayer: Send + Sync {
    /// Name of the player implementation (e.g., "MeMedia").
    fn player_name(&self) -> &str;
}

/// Shared handle to a created player.
pub type PlayerHandle = Arc<dyn MediaPlayer>;

/// A factory the host can ask to open URLs.
pub trait PlayerFactory: Send + Sync {
    /// Check whether this factory can open `url`.
    fn can_play_url(&self, url: &str) -> CapabilityResult;

    /// Create a new player, or `None` if this factory declines.
    fn create_player(&self) -> Option<PlayerHandle>;

    /// Human-readable name of the player.
    fn display_name(&self) -> &str;

    /// Short identifier, unique among registered factories.
    fn name(&self) -> &str;

    /// Platforms the player runs on.
    fn supported_platforms(&self) -> &[String];
}

/// The host's player factory registry.
pub trait MediaRegistry: Send + Sync {
    fn register_player_factory(&self, factory: Arc<dyn PlayerFactory>);

    /// Remove this exact factory instance. Returns whether it was registered.
    fn unregister_player_factory(&self, factory: &Arc<dyn PlayerFactory>) -> bool;
}

/// Whether two handles point at the same factory instance.
///
/// Compares data pointers only; vtable pointers for one type may differ
/// between codegen units.
pub fn same_factory(a: &Arc<dyn PlayerFactory>, b: &Arc<dyn PlayerFactory>) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}

/// The engine module that actually builds players.
pub trait PlayerProvider: Send + Sync {
    /// Create a new player, or `None` if one couldn't be created.
    fn create_player(&self) -> Option<PlayerHandle>;
}

/// Resolves the modules a factory collaborates with.
pub trait ModuleLookup: Send + Sync {
    /// The [`MEDIA_MODULE`] registry, if loaded.
    fn media_registry(&self) -> Option<Arc<dyn MediaRegistry>>;

    /// The [`PLAYER_PROVIDER_MODULE`] provider, if loaded.
    fn player_provider(&self) -> Option<Arc<dyn PlayerProvider>>;
}
