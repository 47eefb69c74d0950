//! Azure CLI command execution.
//!
//! Runs `az` commands and returns their stdout.

use crate::config;
use colored::Colorize;
use regex::Regex;
use std::error::Error;
use std::process::Command;
use std::sync::OnceLock;

/// Regex for splitting command strings while preserving quoted substrings.
static COMMAND_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_command_regex() -> &'static Regex {
    COMMAND_REGEX.get_or_init(|| {
        Regex::new(r#"'([^']*)'\s*|\"([^\"]*)\"\s*|([^'\s]*)\s*"#).expect("Invalid Regex")
    })
}

/// Run a command and return its stdout.
///
/// The command string is split on spaces, with quoted substrings kept as one
/// argument. Output larger than [`config::MAX_CLI_OUTPUT`] is rejected.
pub fn run(cmd: &str) -> Result<String, Box<dyn Error>> {
    log::debug!("run({cmd})", cmd = cmd.on_blue());

    let cmds: Vec<&str> = split_and_strip(cmd)
        .into_iter()
        .filter(|arg| !arg.is_empty())
        .collect();
    let (program, args) = cmds
        .split_first()
        .ok_or_else(|| format!("Empty command: {cmd:?}"))?;
    log::trace!("split cmds={:?}", cmds);

    let output = Command::new(program).args(args).output().map_err(|e| {
        log::error!("Command execution failed: {}", e);
        format!("Failed to execute {program}: {e}")
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        log::trace!(
            "code={code:?}, status={status}\n┎######\nstderr=\n{stderr}\n┖######",
            code = output.status.code(),
            status = output.status,
            stderr = stderr.red()
        );
        log::warn!(
            "{failed} to run {cmd}",
            failed = "failed".on_red(),
            cmd = cmd.on_blue()
        );
        return Err(format!("ERROR running {program}: {stderr}").into());
    }

    log::debug!(
        "Success cmd: {program} stdout.len()={}",
        output.stdout.len()
    );
    if output.stdout.len() > config::MAX_CLI_OUTPUT {
        return Err(format!(
            "Response too large: {} bytes for command: {:?}",
            output.stdout.len(),
            cmds
        )
        .into());
    }

    let stdout = String::from_utf8(output.stdout).map_err(|e| format!("Invalid UTF-8: {}", e))?;
    Ok(stdout)
}

/// Split a command string on spaces, preserving quoted substrings.
fn split_and_strip(input: &str) -> Vec<&str> {
    get_command_regex()
        .find_iter(input)
        .map(|m| m.as_str().trim().trim_matches('\'').trim_matches('"'))
        .collect()
}
