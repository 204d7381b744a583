pub mod artifact;
pub mod loader;

pub use artifact::{read_artifact, save_artifact, ArtifactKind};
pub use loader::{load_artifacts, ArtifactPaths, ArtifactStore};
