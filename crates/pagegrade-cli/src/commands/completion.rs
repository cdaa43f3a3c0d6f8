use anyhow::Result;
use clap::Command;
use clap_complete::{Shell, generate};
use std::io::{self, Write};

/// Completion script for `shell`, named after the command's binary
pub fn script(shell: Shell, cmd: &mut Command) -> Vec<u8> {
    let bin_name = cmd.get_name().to_string();
    let mut buf = Vec::new();
    generate(shell, cmd, bin_name, &mut buf);
    buf
}

pub fn execute(shell: Shell, cmd: &mut Command) -> Result<()> {
    tracing::debug!("Generating {} completions", shell);
    io::stdout().write_all(&script(shell, cmd))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_uses_command_name() {
        let mut cmd = Command::new("pagegrade").subcommand(Command::new("report"));
        let bash = String::from_utf8(script(Shell::Bash, &mut cmd)).unwrap();
        assert!(bash.contains("_pagegrade()"));
        assert!(bash.contains("report"));
    }
}
