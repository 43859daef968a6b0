//! Layout module
//!
//! Bundles a configuration, a platform and the enabled directive families,
//! and builds bootstrapped runtimes from them.

use fxlayout_core::{LayoutConfig, LayoutError, LayoutFamily, LayoutRuntime, Platform};
use fxlayout_dom::DomTree;

/// Entry point: configuration plus directive families
pub struct LayoutModule {
    config: LayoutConfig,
    platform: Platform,
    families: Vec<Box<dyn LayoutFamily>>,
}

impl LayoutModule {
    /// Browser module with every family enabled at compile time
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            platform: Platform::Browser,
            families: default_families(),
        }
    }

    /// Module without any family; add them with [`LayoutModule::with_family`]
    pub fn empty(config: LayoutConfig) -> Self {
        Self {
            config,
            platform: Platform::Browser,
            families: Vec::new(),
        }
    }

    /// Build from a JSON configuration
    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        Ok(Self::new(LayoutConfig::from_json(json)?))
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_family(mut self, family: Box<dyn LayoutFamily>) -> Self {
        self.families.push(family);
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn family_names(&self) -> Vec<&'static str> {
        self.families.iter().map(|f| f.name()).collect()
    }

    /// Runtime over `dom` without attaching anything yet
    pub fn runtime(&self, dom: DomTree) -> Result<LayoutRuntime, LayoutError> {
        if self.platform.is_server() && !self.config.server_loaded {
            tracing::warn!(
                "rendering on the server without the server stylesheet; \
                 styles are written inline and display lookups see only inline values"
            );
        }
        let families: Vec<&dyn LayoutFamily> = self.families.iter().map(|f| f.as_ref()).collect();
        LayoutRuntime::new(dom, self.config.clone(), self.platform, &families)
    }

    /// Runtime over `dom` with every directive attached
    pub fn bootstrap(&self, dom: DomTree) -> Result<LayoutRuntime, LayoutError> {
        let mut runtime = self.runtime(dom)?;
        let attached = runtime.bootstrap()?;
        tracing::debug!("bootstrapped {} directives", attached);
        Ok(runtime)
    }
}

impl Default for LayoutModule {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl std::fmt::Debug for LayoutModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutModule")
            .field("platform", &self.platform)
            .field("families", &self.family_names())
            .finish()
    }
}

#[allow(unused_mut)]
fn default_families() -> Vec<Box<dyn LayoutFamily>> {
    let mut families: Vec<Box<dyn LayoutFamily>> = Vec::new();
    #[cfg(feature = "flex")]
    families.push(Box::new(fxlayout_flex::FlexModule));
    #[cfg(feature = "grid")]
    families.push(Box::new(fxlayout_grid::GridModule));
    #[cfg(feature = "extended")]
    families.push(Box::new(fxlayout_extended::ExtendedModule));
    families
}
