use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use anyhow::{anyhow, Context, Result};
use depot_core::ArchiveKind;

/// Collaborator seam for archive extraction into a prepared directory.
pub trait Unpacker {
    fn unpack(&self, archive: &Path, dst: &Path) -> Result<()>;
}

/// Extracts with the platform's archive tools: `Expand-Archive` on Windows,
/// then `unzip`, then a `tar` fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandUnpacker;

impl Unpacker for CommandUnpacker {
    fn unpack(&self, archive: &Path, dst: &Path) -> Result<()> {
        if !archive.is_file() {
            return Err(anyhow!("archive not found: {}", archive.display()));
        }

        let file_name = archive
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();
        let kind = ArchiveKind::infer_from_file_name(file_name)
            .ok_or_else(|| anyhow!("unsupported archive type: {}", archive.display()))?;

        match kind {
            ArchiveKind::Zip => extract_zip(archive, dst),
            ArchiveKind::TarGz | ArchiveKind::Tar => extract_tar(archive, dst),
        }
    }
}

fn extract_tar(archive: &Path, dst: &Path) -> Result<()> {
    run_command(
        Command::new("tar")
            .arg("-xf")
            .arg(archive)
            .arg("-C")
            .arg(dst),
        "failed to extract tar archive",
    )
}

fn extract_zip(archive: &Path, dst: &Path) -> Result<()> {
    if cfg!(windows) {
        let mut command = Command::new("powershell");
        command.arg("-NoProfile").arg("-Command").arg(format!(
            "Expand-Archive -LiteralPath '{}' -DestinationPath '{}' -Force",
            escape_ps_single_quote(archive),
            escape_ps_single_quote(dst)
        ));
        if run_command(&mut command, "failed to extract zip archive with powershell").is_ok() {
            return Ok(());
        }
    }

    let mut unzip_command = Command::new("unzip");
    unzip_command.arg("-q").arg(archive).arg("-d").arg(dst);
    if run_command(&mut unzip_command, "failed to extract zip archive with unzip").is_ok() {
        return Ok(());
    }

    run_command(
        Command::new("tar")
            .arg("-xf")
            .arg(archive)
            .arg("-C")
            .arg(dst),
        "failed to extract zip archive with tar fallback",
    )
}

fn run_command(command: &mut Command, context_message: &str) -> Result<()> {
    let output = command
        .output()
        .with_context(|| format!("{context_message}: command failed to start"))?;
    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    Err(anyhow!(
        "{context_message}: status={} stdout='{}' stderr='{}'",
        output.status,
        stdout.trim(),
        stderr.trim()
    ))
}

fn escape_ps_single_quote(path: &Path) -> String {
    let mut os = OsString::new();
    os.push(path.as_os_str());
    os.to_string_lossy().replace('\'', "''")
}
