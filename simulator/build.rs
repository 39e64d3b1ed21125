//! Build script for cwcu-simulator
//!
//! On Windows, links against a vendored SDL2 and places SDL2.dll next to the
//! simulator executable. Other platforms use the system SDL2.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

fn main() {
    if env::var("CARGO_CFG_TARGET_OS").unwrap_or_default() != "windows" {
        return;
    }

    let Some(workspace) = env::var_os("CARGO_MANIFEST_DIR").map(PathBuf::from).and_then(|dir| dir.parent().map(Path::to_path_buf)) else {
        return;
    };
    let sdl2_dir = workspace.join("vendor").join("sdl2");
    println!("cargo:rerun-if-changed={}", sdl2_dir.display());

    if !sdl2_dir.exists() {
        println!("cargo:warning=SDL2 not found at {}; put SDL2.lib and SDL2.dll there", sdl2_dir.display());
        return;
    }
    println!("cargo:rustc-link-search=native={}", sdl2_dir.display());

    // OUT_DIR is target/<profile>/build/cwcu-simulator-<hash>/out
    let Some(out_dir) = env::var_os("OUT_DIR").map(PathBuf::from) else {
        return;
    };
    let Some(profile_dir) = out_dir
        .ancestors()
        .find(|p| p.file_name().is_some_and(|n| n == "release" || n == "debug"))
    else {
        return;
    };

    let dll = sdl2_dir.join("SDL2.dll");
    let target = profile_dir.join("SDL2.dll");
    if dll.exists() && !target.exists() {
        if let Err(e) = fs::copy(&dll, &target) {
            println!("cargo:warning=Failed to copy SDL2.dll: {e}");
        }
    }
}
