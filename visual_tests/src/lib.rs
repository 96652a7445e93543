mod compare;
mod scene;

pub use compare::{diff_image, similarity};
pub use scene::Scene;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VisualTestError {
    #[error("Failed to render scene: {0}")]
    Render(String),
    #[error("Failed to compare images: {0}")]
    Compare(String),
    #[error("Unknown scene: {0}")]
    UnknownScene(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, VisualTestError>;

/// Configuration for a visual test
#[derive(Clone)]
pub struct VisualTestConfig {
    /// Name of the scene to render
    pub scene_name: String,
    /// Similarity threshold (0.0 to 1.0, default 0.99)
    pub similarity_threshold: f64,
}

impl Default for VisualTestConfig {
    fn default() -> Self {
        Self {
            scene_name: String::new(),
            similarity_threshold: 0.99,
        }
    }
}

/// Result of a visual test
pub struct VisualTestResult {
    /// Whether the test passed (similarity >= threshold)
    pub passed: bool,
    /// The similarity score (0.0 to 1.0)
    pub similarity: f64,
    pub captured_path: PathBuf,
    pub reference_path: PathBuf,
    /// Path to diff image (if generated on failure)
    pub diff_path: Option<PathBuf>,
}

pub fn references_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("references")
}

pub fn reference_path(scene_name: &str) -> PathBuf {
    references_dir().join(format!("{}.png", scene_name))
}

/// Directory for captured frames and diffs
pub fn output_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("output")
}

pub fn captured_path(scene_name: &str) -> PathBuf {
    output_dir().join(format!("{}_captured.png", scene_name))
}

pub fn diff_path(scene_name: &str) -> PathBuf {
    output_dir().join(format!("{}_diff.png", scene_name))
}

/// Run a visual regression test.
///
/// A scene without a reference yet records its frame as the reference and
/// passes.
pub fn run_visual_test(config: &VisualTestConfig) -> Result<VisualTestResult> {
    std::fs::create_dir_all(output_dir())?;

    let scene = Scene::find(&config.scene_name)?;
    let captured = scene.render()?;
    let cap_path = captured_path(scene.name);
    captured.save(&cap_path)?;

    let ref_path = reference_path(scene.name);
    if !ref_path.exists() {
        std::fs::create_dir_all(references_dir())?;
        captured.save(&ref_path)?;
        println!("Created missing reference: {}", ref_path.display());
        return Ok(VisualTestResult {
            passed: true,
            similarity: 1.0,
            captured_path: cap_path,
            reference_path: ref_path,
            diff_path: None,
        });
    }

    let reference = image::open(&ref_path)?.to_rgba8();
    let score = similarity(&reference, &captured)?;
    let passed = score >= config.similarity_threshold;

    let diff = if !passed {
        let diff_file = diff_path(scene.name);
        diff_image(&reference, &captured).save(&diff_file)?;
        Some(diff_file)
    } else {
        None
    };

    Ok(VisualTestResult {
        passed,
        similarity: score,
        captured_path: cap_path,
        reference_path: ref_path,
        diff_path: diff,
    })
}

/// Re-render a scene straight into its reference image
pub fn update_reference(scene_name: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(references_dir())?;

    let scene = Scene::find(scene_name)?;
    let ref_path = reference_path(scene.name);
    scene.render()?.save(&ref_path)?;

    println!("Updated reference: {}", ref_path.display());
    Ok(ref_path)
}

/// Check if we're in update references mode
pub fn should_update_references() -> bool {
    std::env::var("UPDATE_REFERENCES").is_ok()
}
