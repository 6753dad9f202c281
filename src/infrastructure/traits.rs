//! I/O boundary traits for testability
//!
//! These traits abstract external I/O and drawing, allowing services
//! to be tested with mock implementations.

use std::fs;
use std::io;
use std::path::Path;

use crate::domain::{Canvas, LineSegment, Point};

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Write string content to file.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Create directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
}

/// Drawing surface that strokes projected segments.
///
/// Segments are relative to the snowflake centre; the surface is responsible
/// for translating its own origin to `centre` before stroking.
pub trait RenderSurface: Send + Sync {
    /// Render `segments` on a surface of the canvas size and return the document.
    fn render(&self, canvas: &Canvas, centre: Point, segments: &[LineSegment]) -> String;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        fs::write(path, content)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }
}
