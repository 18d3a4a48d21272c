//! Custom cargo commands for the litesearch crate.
//!
//! Usage:
//!   cargo xtask test        - Run all tests (native + wasm feature check)
//!   cargo xtask check       - Quick check (check + test + clippy)
//!   cargo xtask bench       - Run benchmarks
//!   cargo xtask build-wasm  - Build the browser package with wasm-pack
//!   cargo xtask fuzz        - Run every fuzz target for a short while

use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use std::process::Command;

const FUZZ_TARGETS: &[&str] = &["highlight_queries", "snippet_capture"];

fn main() -> Result<()> {
    let task = env::args().nth(1);
    match task.as_deref() {
        Some("test") => test()?,
        Some("check") => check()?,
        Some("bench") => bench()?,
        Some("build-wasm") => build_wasm()?,
        Some("fuzz") => fuzz()?,
        _ => print_help(),
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"
cargo xtask <COMMAND>

Commands:
  test        Run all Rust tests, then type-check the wasm binding
  check       Quick check (cargo check + test + clippy)
  bench       Run benchmarks
  build-wasm  Build pkg/ with wasm-pack (--features wasm)
  fuzz        Run each fuzz target for 60 seconds (needs cargo-fuzz)
"#
    );
}

/// Run all tests
fn test() -> Result<()> {
    run_cargo(&["test"])?;
    run_cargo(&[
        "check",
        "--lib",
        "--no-default-features",
        "--features",
        "wasm",
        "--target",
        "wasm32-unknown-unknown",
    ])
}

/// Quick check
fn check() -> Result<()> {
    println!("Running quick checks...\n");

    println!("[1/3] cargo check...");
    run_cargo(&["check", "--all-targets"])?;

    println!("[2/3] cargo test...");
    run_cargo(&["test", "--quiet"])?;

    println!("[3/3] cargo clippy...");
    run_cargo(&["clippy", "--quiet", "--", "-D", "warnings"])?;

    println!("\n✓ Quick checks passed");
    Ok(())
}

/// Run benchmarks
fn bench() -> Result<()> {
    run_cargo(&["bench"])
}

/// Build the browser package into pkg/
fn build_wasm() -> Result<()> {
    let root = project_root()?;

    let status = Command::new("wasm-pack")
        .args([
            "build",
            "--release",
            "--target",
            "web",
            "--out-dir",
            "pkg",
            "--",
            "--no-default-features",
            "--features",
            "wasm",
        ])
        .current_dir(&root)
        .status()
        .context("Failed to run wasm-pack (is it installed?)")?;

    if !status.success() {
        bail!("wasm-pack build failed");
    }

    println!("✓ Browser package written to {}", root.join("pkg").display());
    Ok(())
}

/// Run each fuzz target briefly
fn fuzz() -> Result<()> {
    let fuzz_dir = project_root()?.join("fuzz");
    if !fuzz_dir.exists() {
        println!("  (no fuzz directory, skipping)");
        return Ok(());
    }

    for target in FUZZ_TARGETS {
        println!("Fuzzing {}...", target);
        let status = Command::new("cargo")
            .args(["+nightly", "fuzz", "run", target, "--", "-max_total_time=60"])
            .current_dir(&fuzz_dir)
            .status()
            .with_context(|| format!("Failed to run cargo fuzz for {}", target))?;

        if !status.success() {
            bail!("fuzz target {} found a failure", target);
        }
    }

    println!("\n✓ All fuzz targets ran clean");
    Ok(())
}

// ============================================================================
// Helper functions
// ============================================================================

fn project_root() -> Result<PathBuf> {
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => env::current_dir().context("Failed to read current directory")?,
    };

    // xtask is in project_root/xtask, so go up one level
    let root = manifest_dir.parent().unwrap_or(&manifest_dir);
    Ok(root.to_path_buf())
}

fn run_cargo(args: &[&str]) -> Result<()> {
    let root = project_root()?;

    let status = Command::new("cargo")
        .args(args)
        .current_dir(&root)
        .status()
        .with_context(|| format!("Failed to run cargo {:?}", args))?;

    if !status.success() {
        bail!("cargo {:?} failed", args);
    }

    Ok(())
}
