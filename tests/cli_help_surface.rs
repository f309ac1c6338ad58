use std::process::Command;

use anyhow::{Context, Result};

fn run_subtrack(args: &[&str]) -> Result<String> {
    let out = Command::new(env!("CARGO_BIN_EXE_subtrack"))
        .args(args)
        .output()
        .with_context(|| format!("run subtrack {:?}", args))?;

    if !out.status.success() {
        anyhow::bail!(
            "subtrack {:?} failed (status {:?})\nstdout:\n{}\nstderr:\n{}",
            args,
            out.status,
            String::from_utf8_lossy(&out.stdout),
            String::from_utf8_lossy(&out.stderr)
        );
    }

    Ok(String::from_utf8_lossy(&out.stdout).to_string())
}

#[test]
fn cli_help_surface_is_stable() -> Result<()> {
    let help = run_subtrack(&["--help"])?;
    assert!(help.contains("Usage: subtrack"));
    assert!(help.contains("--token"));
    for cmd in ["init", "list", "add", "delete", "chat", "sync", "usage", "config"] {
        assert!(help.contains(cmd), "missing {} in help", cmd);
    }

    let config_help = run_subtrack(&["config", "--help"])?;
    assert!(config_help.contains("Usage: subtrack config"));
    assert!(config_help.contains("show"));
    assert!(config_help.contains("set"));
    assert!(config_help.contains("api-key"));

    let chat_help = run_subtrack(&["chat", "--help"])?;
    assert!(chat_help.contains("--accept"));

    Ok(())
}

#[test]
fn server_help_lists_its_flags() -> Result<()> {
    let out = Command::new(env!("CARGO_BIN_EXE_subtrack-server"))
        .arg("--help")
        .output()
        .context("run subtrack-server --help")?;
    assert!(out.status.success());
    let help = String::from_utf8_lossy(&out.stdout);
    for flag in ["--addr-file", "--data-dir", "--dev-token", "--canned-reply"] {
        assert!(help.contains(flag), "missing {} in help", flag);
    }
    Ok(())
}
