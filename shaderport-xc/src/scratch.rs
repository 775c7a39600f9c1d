use crate::XcError;
use shaderport_core::ShaderEntry;
use std::io;
use std::path::{Path, PathBuf};

/// Directory holding the per-shader files exchanged with the translator.
///
/// For an entry `name` of kind `k` the translator reads `name.<k>` and
/// writes `name_<k>.glsl`, where `<k>` is `ps` or `vs`.
#[derive(Debug, Clone)]
pub struct ScratchDir {
    root: PathBuf,
}

impl ScratchDir {
    /// Opens the scratch directory, creating it (and its parents) if absent.
    pub async fn create(root: impl Into<PathBuf>) -> Result<Self, XcError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|source| XcError::Scratch {
                path: root.clone(),
                source,
            })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the translator input for `entry`.
    pub fn source_path(&self, entry: &ShaderEntry) -> PathBuf {
        let kind = entry.kind();
        self.root
            .join(format!("{}.{}", entry.identifier(), kind.source_extension()))
    }

    /// Path the translator is told to write its output to.
    pub fn output_path(&self, entry: &ShaderEntry) -> PathBuf {
        let kind = entry.kind();
        self.root
            .join(format!("{}_{}.glsl", entry.identifier(), kind.stage()))
    }

    /// Writes the translator input and clears any output left by an earlier
    /// run, so a translator that writes nothing is noticed.
    pub async fn prepare(&self, entry: &ShaderEntry, source: &str) -> Result<(PathBuf, PathBuf), XcError> {
        let input = self.source_path(entry);
        let output = self.output_path(entry);
        tokio::fs::write(&input, source)
            .await
            .map_err(|source| XcError::Scratch {
                path: input.clone(),
                source,
            })?;
        remove_if_present(&output).await?;
        Ok((input, output))
    }

    /// Removes both scratch files of `entry`.
    pub async fn remove(&self, entry: &ShaderEntry) -> Result<(), XcError> {
        remove_if_present(&self.source_path(entry)).await?;
        remove_if_present(&self.output_path(entry)).await
    }
}

async fn remove_if_present(path: &Path) -> Result<(), XcError> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(XcError::Scratch {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_paths_follow_kind() {
        let dir = tempdir().unwrap();
        let scratch = ScratchDir::create(dir.path().join("tmp")).await.unwrap();
        assert!(scratch.root().is_dir());

        let pixel = ShaderEntry::new("unlit_ps", "").unwrap();
        let vertex = ShaderEntry::new("unlit_vertex", "").unwrap();
        assert_eq!(scratch.source_path(&pixel), dir.path().join("tmp/unlit_ps.ps"));
        assert_eq!(scratch.output_path(&pixel), dir.path().join("tmp/unlit_ps_ps.glsl"));
        assert_eq!(scratch.source_path(&vertex), dir.path().join("tmp/unlit_vertex.vs"));
        assert_eq!(
            scratch.output_path(&vertex),
            dir.path().join("tmp/unlit_vertex_vs.glsl")
        );
    }

    #[tokio::test]
    async fn test_prepare_clears_stale_output() {
        let dir = tempdir().unwrap();
        let scratch = ScratchDir::create(dir.path()).await.unwrap();
        let entry = ShaderEntry::new("unlit_ps", "").unwrap();
        std::fs::write(scratch.output_path(&entry), "stale").unwrap();

        let (input, output) = scratch.prepare(&entry, "float4 PS() {}").await.unwrap();
        assert_eq!(std::fs::read_to_string(input).unwrap(), "float4 PS() {}");
        assert!(!output.exists());

        scratch.remove(&entry).await.unwrap();
        assert!(!scratch.source_path(&entry).exists());
        // Removing twice is fine
        scratch.remove(&entry).await.unwrap();
    }

    #[tokio::test]
    async fn test_create_fails_under_a_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("not_a_dir");
        std::fs::write(&file, "").unwrap();
        let err = ScratchDir::create(file.join("tmp")).await.unwrap_err();
        assert!(matches!(err, XcError::Scratch { .. }));
    }
}
