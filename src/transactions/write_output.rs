use std::path::Path;

use tokio::io::AsyncWriteExt as _;
use tracing::{debug, info};

use crate::{Error, workflow::ReusableWorkflow};

/// Appends `sha=<sha>` to a GitHub Actions step output file, creating it if missing.
///
/// # Errors
///
/// Returns an [`Error::Io`] if the file cannot be opened or written.
pub async fn write_output<P>(path: P, workflow: &ReusableWorkflow) -> Result<(), Error>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    debug!("writing step output to {}…", path.display());

    let mut file = tokio::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .await?;
    file.write_all(format!("sha={}\n", workflow.sha).as_bytes())
        .await?;
    file.flush().await?;

    info!("wrote step output sha={}", workflow.sha);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workflow(sha: &str) -> ReusableWorkflow {
        ReusableWorkflow {
            sha: sha.to_owned(),
            repository: String::from("org/repo"),
            file_name: String::from("build.yaml"),
            git_ref: String::from("v1"),
        }
    }

    #[tokio::test]
    async fn appends_without_truncating() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output");
        std::fs::write(&path, "previous=1\n").unwrap();

        write_output(&path, &workflow("aaa")).await.unwrap();
        write_output(&path, &workflow("bbb")).await.unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "previous=1\nsha=aaa\nsha=bbb\n"
        );
    }

    #[tokio::test]
    async fn creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh");

        write_output(&path, &workflow("ccc")).await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "sha=ccc\n");
    }

    #[tokio::test]
    async fn fails_when_directory_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("output");

        assert!(matches!(
            write_output(&path, &workflow("ddd")).await,
            Err(Error::Io(_))
        ));
    }
}
