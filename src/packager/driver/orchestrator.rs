//! Main brand packaging orchestration.

use super::{BrandReport, Mode, Outcome};
use crate::packager::{
    Error, Result,
    assets::{ActionRegistry, AssetCopier, CopyReport, IconProvisioner},
    config::{ElementList, ProjectConfig},
    fabricate::ManifestFabricator,
    platform::{PlatformDestinations, PlatformRebuilder},
    registry::BrandRegistry,
    settings::Settings,
};

/// The current brand with everything derived from it.
///
/// Built fresh from the pointer each time it is needed and handed to the
/// stages that depend on it.
#[derive(Debug, Clone)]
pub struct BrandContext {
    /// Brand directory name.
    pub name: String,
    /// The brand's `project_config.json`.
    pub project: ProjectConfig,
    /// Platform roots for this brand.
    pub destinations: PlatformDestinations,
}

/// Main brand packaging orchestrator.
///
/// # Examples
///
/// ```no_run
/// use brand_packager::packager::{BrandPackager, Mode, SettingsBuilder};
///
/// # async fn example() -> brand_packager::packager::Result<()> {
/// let settings = SettingsBuilder::new().project_root(".").build()?;
/// let packager = BrandPackager::new(settings);
///
/// // Same as `brand_package -` during environment setup.
/// let outcome = packager.run(&Mode::Prime).await?;
/// println!("{outcome:?}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct BrandPackager {
    settings: Settings,
    registry: BrandRegistry,
    actions: ActionRegistry,
}

impl BrandPackager {
    /// Creates a packager with the built-in target actions.
    pub fn new(settings: Settings) -> Self {
        let registry = BrandRegistry::new(settings.layout());
        Self {
            settings,
            registry,
            actions: ActionRegistry::builtin(),
        }
    }

    /// Replaces the target action table.
    pub fn with_actions(mut self, actions: ActionRegistry) -> Self {
        self.actions = actions;
        self
    }

    /// Returns the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the brand registry.
    pub fn registry(&self) -> &BrandRegistry {
        &self.registry
    }

    /// Runs the operation selected by `mode`.
    pub async fn run(&self, mode: &Mode) -> Result<Outcome> {
        match mode {
            Mode::Report => self.report().await.map(Outcome::Reported),
            Mode::Prime => self.prime().await,
            Mode::Refresh => self.refresh().await,
            Mode::Switch(name) => self.switch(name).await,
        }
    }

    /// Current pointer state and available brands. Changes nothing.
    pub async fn report(&self) -> Result<BrandReport> {
        Ok(BrandReport {
            current: self.registry.current().await,
            available: self.registry.list_available().await?,
        })
    }

    /// Establishes the default brand if no valid brand is current.
    pub async fn prime(&self) -> Result<Outcome> {
        if let Some(current) = self.registry.current().await.valid_name() {
            log::info!("No change to already established brand: {}", current);
            return Ok(Outcome::Unchanged {
                brand: current.to_string(),
            });
        }

        let default = self.settings.default_brand();
        log::info!("Establishing default package brand: {}", default);
        self.establish_brand(default, "Set").await
    }

    /// Redoes processing for the current brand.
    ///
    /// # Errors
    ///
    /// [`Error::NoCurrentBrand`] when the pointer is absent or invalid.
    pub async fn refresh(&self) -> Result<Outcome> {
        let current = self.registry.current().await;
        let name = current.valid_name().ok_or(Error::NoCurrentBrand)?;
        self.establish_brand(name, "Reestablishing").await
    }

    /// Makes `name` the current brand unless it already is.
    pub async fn switch(&self, name: &str) -> Result<Outcome> {
        if self.registry.current().await.valid_name() == Some(name) {
            log::info!("Brand is already current, no change: {}", name);
            return Ok(Outcome::Unchanged {
                brand: name.to_string(),
            });
        }
        self.establish_brand(name, "Set").await
    }

    /// Points to `name`, fabricates manifests, then rebuilds platforms.
    async fn establish_brand(&self, name: &str, disposition: &str) -> Result<Outcome> {
        let rebuilder = PlatformRebuilder::new(&self.settings)?;

        self.registry.establish(name).await?;
        log::info!("{} package brand: {}", disposition, name);

        // Fabrication tolerates absent fields; only the hooks need projectName.
        let project = ProjectConfig::load(&self.settings.layout().current_project_config()).await?;
        ManifestFabricator::new(self.settings.layout())
            .fabricate_all(&project)
            .await?;

        let platforms = rebuilder.rebuild().await?;
        log::info!("Done.");

        Ok(Outcome::Established {
            brand: name.to_string(),
            platforms,
        })
    }

    /// Loads the current brand and derives its platform destinations.
    ///
    /// # Errors
    ///
    /// [`Error::NoCurrentBrand`] when the pointer is absent or invalid.
    pub async fn current_brand(&self) -> Result<BrandContext> {
        let name = self
            .registry
            .current()
            .await
            .valid_name()
            .map(str::to_string)
            .ok_or(Error::NoCurrentBrand)?;

        let project = ProjectConfig::load(&self.settings.layout().current_project_config()).await?;
        let destinations =
            PlatformDestinations::for_project(self.settings.layout(), &project.require_project_name()?);

        Ok(BrandContext {
            name,
            project,
            destinations,
        })
    }

    /// Applies `custom/elements.json` to the prepared platform trees.
    pub async fn customize(&self) -> Result<CopyReport> {
        let layout = self.settings.layout();
        let brand = self.current_brand().await?;
        let elements_file = layout.elements_file();
        log::info!(
            "Applying customizations from {}",
            layout.relative(&elements_file).display()
        );

        let elements = ElementList::load(&elements_file, &self.actions).await?;
        AssetCopier::new(layout, &brand.destinations, &self.actions)
            .apply(&elements)
            .await
    }

    /// Copies launcher icons into the prepared platform trees.
    pub async fn provision_icons(&self) -> Result<CopyReport> {
        let brand = self.current_brand().await?;
        IconProvisioner::new(self.settings.layout(), &brand.destinations)
            .provision()
            .await
    }
}
