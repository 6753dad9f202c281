//! Snowflake service
//!
//! Generates snowflakes on the configured canvas, projects them and hands the
//! segments to a rendering surface.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use termtree::Tree;
use tracing::{debug, info, instrument};

use crate::application::{ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{
    Canvas, GeometryProjector, LineSegment, RandSource, Snowflake, SnowflakeBuilder,
};
use crate::infrastructure::traits::{FileSystem, RenderSurface};
use crate::util::path::snowflake_file_name;

/// Summary of one snowflake written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSnowflake {
    /// Where the rendered file was written
    pub path: PathBuf,
    pub branch_count: u32,
    pub pattern_count: usize,
    /// Number of strokes in the rendering
    pub segment_count: usize,
}

/// Service for generating and rendering snowflakes.
pub struct SnowflakeService {
    settings: Arc<Settings>,
    fs: Arc<dyn FileSystem>,
    surface: Arc<dyn RenderSurface>,
}

impl SnowflakeService {
    pub fn new(
        settings: Arc<Settings>,
        fs: Arc<dyn FileSystem>,
        surface: Arc<dyn RenderSurface>,
    ) -> Self {
        Self {
            settings,
            fs,
            surface,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Canvas described by the settings.
    pub fn canvas(&self) -> ApplicationResult<Canvas> {
        Ok(Canvas::new(self.settings.width, self.settings.height)?)
    }

    /// Generate a snowflake on the configured canvas.
    #[instrument(level = "debug", skip(self, rng))]
    pub fn generate(&self, rng: &mut dyn RandSource) -> ApplicationResult<Snowflake> {
        let snowflake = SnowflakeBuilder::new(self.canvas()?).build(rng)?;
        debug!(
            "generated snowflake: {} branches, {} patterns",
            snowflake.branch_count(),
            snowflake.pattern_count()
        );
        Ok(snowflake)
    }

    /// Project a snowflake onto its own canvas with the configured scaling.
    pub fn segments(&self, snowflake: &Snowflake) -> ApplicationResult<Vec<LineSegment>> {
        let canvas = snowflake.canvas();
        let projector = GeometryProjector::new(canvas.width(), canvas.height())?
            .with_scaling(self.settings.scaling);
        Ok(projector.project(snowflake)?)
    }

    /// Render a snowflake with the configured surface.
    pub fn render(&self, snowflake: &Snowflake) -> ApplicationResult<String> {
        let segments = self.segments(snowflake)?;
        Ok(self
            .surface
            .render(snowflake.canvas(), snowflake.centre(), &segments))
    }

    /// Generate `count` snowflakes and write each one to `out_dir`.
    ///
    /// Files are named `snowflake-001.svg`, `snowflake-002.svg`, ... Existing files
    /// with the same names are overwritten.
    #[instrument(level = "debug", skip(self, rng))]
    pub fn write_blizzard(
        &self,
        rng: &mut dyn RandSource,
        count: u32,
        out_dir: &Path,
    ) -> ApplicationResult<Vec<RenderedSnowflake>> {
        self.fs
            .create_dir_all(out_dir)
            .with_path_context("create output directory", out_dir)?;

        let mut written = Vec::with_capacity(count as usize);
        for n in 1..=count as usize {
            let snowflake = self.generate(rng)?;
            let segments = self.segments(&snowflake)?;
            let document = self
                .surface
                .render(snowflake.canvas(), snowflake.centre(), &segments);

            let path = out_dir.join(snowflake_file_name(n));
            self.fs
                .write(&path, &document)
                .with_path_context("write snowflake", &path)?;
            info!("wrote {}", path.display());

            written.push(RenderedSnowflake {
                path,
                branch_count: snowflake.branch_count(),
                pattern_count: snowflake.pattern_count(),
                segment_count: segments.len(),
            });
        }
        Ok(written)
    }

    /// Structure of a snowflake as a printable tree: one node per distinct
    /// pattern, listing the slots that alias it and its sub-branches.
    pub fn outline(snowflake: &Snowflake) -> Tree<String> {
        let mut root = Tree::new(format!(
            "snowflake: {} branches, {} patterns",
            snowflake.branch_count(),
            snowflake.pattern_count()
        ));

        for (n, (idx, branch)) in snowflake.patterns().enumerate() {
            let slots: Vec<String> = snowflake
                .slots()
                .iter()
                .enumerate()
                .filter(|(_, slot)| **slot == idx)
                .map(|(i, _)| i.to_string())
                .collect();
            let leaves: Vec<Tree<String>> = branch
                .sub_branches()
                .iter()
                .map(|sub| Tree::new(sub.to_string()))
                .collect();
            root.push(
                Tree::new(format!("pattern {} [slots {}] {}", n + 1, slots.join(", "), branch))
                    .with_leaves(leaves),
            );
        }
        root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RandomNumberService;
    use crate::infrastructure::svg::SvgSurface;
    use crate::infrastructure::traits::RealFileSystem;

    fn service(settings: Settings) -> SnowflakeService {
        SnowflakeService::new(
            Arc::new(settings),
            Arc::new(RealFileSystem),
            Arc::new(SvgSurface::default()),
        )
    }

    #[test]
    fn test_generate_uses_configured_canvas() {
        let settings = Settings {
            width: 400.0,
            height: 300.0,
            ..Settings::default()
        };
        let mut rng = RandomNumberService::seeded(5);
        let flake = service(settings).generate(&mut rng).unwrap();
        assert_eq!(flake.canvas().width(), 400.0);
        assert_eq!(flake.canvas().height(), 300.0);
    }

    #[test]
    fn test_canvas_rejects_zero_width() {
        let settings = Settings {
            width: 0.0,
            ..Settings::default()
        };
        assert!(service(settings).canvas().is_err());
    }

    #[test]
    fn test_outline_lists_every_slot_once() {
        let mut rng = RandomNumberService::seeded(17);
        let flake = service(Settings::default()).generate(&mut rng).unwrap();
        let text = SnowflakeService::outline(&flake).to_string();
        assert!(text.starts_with(&format!("snowflake: {} branches", flake.branch_count())));
        assert_eq!(text.matches("pattern ").count(), flake.pattern_count());
    }
}
