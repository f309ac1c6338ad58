use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

pub struct ServerGuard {
    pub base_url: String,
    pub token: String,
    pub data_dir: PathBuf,
    _data_dir: tempfile::TempDir,
    child: Child,
}

impl Drop for ServerGuard {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

#[allow(dead_code)]
pub fn spawn_server() -> Result<ServerGuard> {
    spawn_server_with(&[])
}

/// Start `subtrack-server` on an ephemeral port with `extra` args appended.
pub fn spawn_server_with(extra: &[&str]) -> Result<ServerGuard> {
    let data_dir = tempfile::tempdir().context("create server tempdir")?;
    let token = "dev".to_string();
    let addr_file = data_dir.path().join("addr.txt");

    let mut args = vec![
        "--addr".to_string(),
        "127.0.0.1:0".to_string(),
        "--addr-file".to_string(),
        addr_file.to_string_lossy().to_string(),
        "--data-dir".to_string(),
        data_dir.path().to_string_lossy().to_string(),
        "--dev-token".to_string(),
        token.clone(),
    ];
    args.extend(extra.iter().map(|s| s.to_string()));

    let child = Command::new(env!("CARGO_BIN_EXE_subtrack-server"))
        .args(&args)
        .env_remove("GEMINI_API_KEY")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .context("spawn subtrack-server")?;

    let base_url = read_addr_file(&addr_file)?;
    wait_for_healthz(&base_url)?;

    Ok(ServerGuard {
        base_url,
        token,
        data_dir: data_dir.path().to_path_buf(),
        _data_dir: data_dir,
        child,
    })
}

fn read_addr_file(addr_file: &Path) -> Result<String> {
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("addr file not written at {}", addr_file.display());
        }

        if let Ok(s) = std::fs::read_to_string(addr_file) {
            let s = s.trim();
            if !s.is_empty() {
                return Ok(format!("http://{}", s));
            }
        }
        thread::sleep(Duration::from_millis(10));
    }
}

pub fn wait_for_healthz(base_url: &str) -> Result<()> {
    let client = reqwest::blocking::Client::new();
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("server did not become healthy at {}/healthz", base_url);
        }
        match client.get(format!("{}/healthz", base_url)).send() {
            Ok(resp) if resp.status().is_success() => return Ok(()),
            _ => {
                thread::sleep(Duration::from_millis(50));
            }
        }
    }
}

#[allow(dead_code)]
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Run the `subtrack` CLI in `cwd` without any ambient token.
#[allow(dead_code)]
pub fn run_subtrack_raw(cwd: &Path, args: &[&str]) -> Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_subtrack"))
        .args(args)
        .current_dir(cwd)
        .env_remove("SUBTRACK_TOKEN")
        .env_remove("RUST_LOG")
        .output()
        .with_context(|| format!("run subtrack {:?}", args))
}

/// Like [`run_subtrack_raw`] but fails unless the command succeeded; returns stdout.
#[allow(dead_code)]
pub fn run_subtrack(cwd: &Path, args: &[&str]) -> Result<String> {
    let out = run_subtrack_raw(cwd, args)?;
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

/// A fresh tracker directory with `subtrack init` already run.
#[allow(dead_code)]
pub fn init_workspace() -> Result<tempfile::TempDir> {
    let dir = tempfile::tempdir().context("create workspace tempdir")?;
    run_subtrack(dir.path(), &["init"])?;
    Ok(dir)
}
