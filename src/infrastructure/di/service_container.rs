//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::SnowflakeService;
use crate::config::Settings;
use crate::infrastructure::svg::SvgSurface;
use crate::infrastructure::traits::{FileSystem, RealFileSystem, RenderSurface};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    pub snowflakes: SnowflakeService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        let surface = Arc::new(SvgSurface::from(&settings.render));
        Self::with_deps(settings, Arc::new(RealFileSystem), surface)
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        surface: Arc<dyn RenderSurface>,
    ) -> Self {
        let settings = Arc::new(settings);
        let snowflakes = SnowflakeService::new(settings.clone(), fs, surface);

        Self {
            settings,
            snowflakes,
        }
    }
}
