//! Volatility invocation: one subprocess per (dump, module), JSON table written to a scratch file.

use crate::config::VolatilityConfig;
use crate::error::{Error, Result};
use crate::table::RawTable;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Produces the raw table of one module for one dump.
/// `workdir` is scratch space owned by the caller for the duration of the dump.
pub trait TableSource {
    fn fetch(&self, artifact: &Path, module: &str, workdir: &Path) -> Result<RawTable>;
}

pub struct VolatilityRunner {
    config: VolatilityConfig,
}

impl VolatilityRunner {
    pub fn new(config: VolatilityConfig) -> Self {
        Self { config }
    }

    fn command(&self, artifact: &Path, module: &str, output: &Path) -> Command {
        let mut cmd = Command::new(&self.config.exe);
        cmd.arg("-f")
            .arg(artifact)
            .arg("--output=json")
            .arg(format!("--profile={}", self.config.profile))
            .arg("--output-file")
            .arg(output)
            .arg("--")
            .arg(module);
        cmd
    }
}

impl TableSource for VolatilityRunner {
    fn fetch(&self, artifact: &Path, module: &str, workdir: &Path) -> Result<RawTable> {
        let output_path = workdir.join(module);
        let mut cmd = self.command(artifact, module, &output_path);
        debug!(module, command = ?cmd, "spawning volatility");

        let out = cmd.output().map_err(|e| Error::ExternalTool {
            module: module.to_string(),
            status: "spawn failed".to_string(),
            stderr: e.to_string(),
        })?;
        if !out.status.success() {
            return Err(Error::ExternalTool {
                module: module.to_string(),
                status: out.status.to_string(),
                stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
            });
        }

        let file = File::open(&output_path).map_err(|e| Error::ExternalTool {
            module: module.to_string(),
            status: out.status.to_string(),
            stderr: format!("no output at {}: {}", output_path.display(), e),
        })?;
        RawTable::from_reader(BufReader::new(file)).map_err(|e| Error::in_module(module, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_layout() {
        let runner = VolatilityRunner::new(VolatilityConfig {
            exe: "vol.py".into(),
            profile: "WinXPSP2x86".into(),
        });
        let cmd = runner.command(Path::new("/d/x.dmp"), "pslist", Path::new("/tmp/w/pslist"));
        let args: Vec<String> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(cmd.get_program(), "vol.py");
        assert_eq!(
            args,
            vec![
                "-f",
                "/d/x.dmp",
                "--output=json",
                "--profile=WinXPSP2x86",
                "--output-file",
                "/tmp/w/pslist",
                "--",
                "pslist"
            ]
        );
    }

    #[test]
    fn missing_executable_is_external_tool_failure() {
        let runner = VolatilityRunner::new(VolatilityConfig {
            exe: "definitely-not-a-volatility-binary-4711".into(),
            profile: "Win7SP1x86".into(),
        });
        let dir = tempfile::tempdir().unwrap();
        let err = runner
            .fetch(Path::new("x.dmp"), "modules", dir.path())
            .unwrap_err();
        assert!(matches!(err, Error::ExternalTool { ref module, .. } if module == "modules"));
    }
}
