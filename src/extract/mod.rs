//! Source extraction via an external tool
//!
//! Once the description file is on disk, `dpkg-source -x --no-check` is run
//! against it inside the package directory. The tool's stdout is forwarded
//! to the log line by line while it runs; stderr goes straight to ours.

use crate::config::ExtractConfig;
use crate::source::PackageSource;
use crate::{DpkgError, Result};
use std::ffi::OsStr;
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;

/// Runs the source extraction tool
///
/// # Examples
///
/// ```no_run
/// use dpkg_builder::config::ExtractConfig;
/// use dpkg_builder::Extractor;
/// use std::ffi::OsStr;
/// use std::path::Path;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let extractor = Extractor::new(&ExtractConfig::default());
/// extractor.run(Path::new("hello"), OsStr::new("hello_2.10-2.dsc")).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Extractor {
    program: String,
    args: Vec<String>,
}

impl Extractor {
    pub fn new(config: &ExtractConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
        }
    }

    /// Unpacks a package from its downloaded description file
    ///
    /// Does nothing (apart from a warning) if no description file was
    /// downloaded for the package.
    pub async fn extract(&self, source: &PackageSource) -> Result<()> {
        let Some(dsc_path) = source.description_path() else {
            tracing::warn!(
                "No description file downloaded for {}, skipping extraction",
                source.name()
            );
            return Ok(());
        };

        let dir = dsc_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let Some(dsc_file) = dsc_path.file_name() else {
            return Err(DpkgError::NoFileName {
                url: dsc_path.display().to_string(),
            });
        };

        self.run(dir, dsc_file).await
    }

    /// Runs the tool on `dsc_file` with `dir` as working directory
    ///
    /// Stdout is drained by a separate task so a chatty tool cannot block
    /// on a full pipe while we wait for it to exit.
    pub async fn run(&self, dir: &Path, dsc_file: &OsStr) -> Result<()> {
        tracing::info!(
            "Running {} {} {} in {}",
            self.program,
            self.args.join(" "),
            dsc_file.to_string_lossy(),
            dir.display()
        );

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(dsc_file)
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| DpkgError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let stdout = child.stdout.take();
        let forwarder = tokio::spawn(async move {
            let Some(stdout) = stdout else {
                return;
            };
            // Raw bytes: file names echoed by the tool need not be UTF-8
            let mut reader = BufReader::new(stdout);
            let mut line = Vec::new();
            loop {
                line.clear();
                match reader.read_until(b'\n', &mut line).await {
                    Ok(0) => break,
                    Ok(_) => tracing::info!("{}", String::from_utf8_lossy(&line).trim_end()),
                    Err(e) => {
                        tracing::warn!("Error reading extractor output: {}", e);
                        break;
                    }
                }
            }
        });

        let status = child.wait().await.map_err(|source| DpkgError::Wait {
            program: self.program.clone(),
            source,
        })?;

        if let Err(e) = forwarder.await {
            tracing::warn!("Extractor output task failed: {}", e);
        }

        if !status.success() {
            return Err(DpkgError::ExitFailure {
                program: self.program.clone(),
                status,
            });
        }

        tracing::debug!("{} finished with {}", self.program, status);
        Ok(())
    }
}
