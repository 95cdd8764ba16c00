//! Purpose: Build the stub native solver the test suite loads in place of libSudokuPy.
//! Role: Cargo build-script; compiles `tests/fixtures/stub_solver.c` as a shared library.
//! Invariants: Output lands at `$OUT_DIR/stub-root/bin/libSudokuPy<suffix>`, an install-root layout.
//! Invariants: `SUDOKU_STUB_ROOT` is exported to the crate only when the stub built.
//! Invariants: A missing C toolchain is a warning, never a failed crate build.
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

const STUB_SOURCE: &str = "tests/fixtures/stub_solver.c";

fn main() {
    println!("cargo:rerun-if-changed={STUB_SOURCE}");
    println!("cargo:rerun-if-changed=build.rs");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR"));
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR"));
    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();

    let Some(suffix) = library_suffix(&target_os) else {
        println!("cargo:warning=no stub solver for target os `{target_os}`; native tests will fail");
        return;
    };

    let stub_root = out_dir.join("stub-root");
    let bin_dir = stub_root.join("bin");
    fs::create_dir_all(&bin_dir).expect("failed to create stub solver bin dir");
    let library = bin_dir.join(format!("libSudokuPy{suffix}"));

    match build_shared(&manifest_dir.join(STUB_SOURCE), &library, &out_dir) {
        Ok(()) => println!("cargo:rustc-env=SUDOKU_STUB_ROOT={}", stub_root.display()),
        Err(err) => println!("cargo:warning=stub solver not built ({err}); native tests will fail"),
    }
}

fn library_suffix(target_os: &str) -> Option<&'static str> {
    match target_os {
        "linux" => Some(".so"),
        "macos" => Some(".dylib"),
        "windows" => Some(".dll"),
        _ => None,
    }
}

fn build_shared(source: &Path, library: &Path, out_dir: &Path) -> Result<(), String> {
    let compiler = cc::Build::new()
        .cargo_metadata(false)
        .opt_level(0)
        .warnings(false)
        .try_get_compiler()
        .map_err(|err| err.to_string())?;

    let mut command: Command = compiler.to_command();
    if compiler.is_like_msvc() {
        command
            .arg("/LD")
            .arg(source)
            .arg(format!("/Fe{}", library.display()))
            .arg(format!("/Fo{}\\", out_dir.display()));
    } else {
        command
            .arg("-shared")
            .arg("-fPIC")
            .arg("-o")
            .arg(library)
            .arg(source);
    }

    let status = command
        .status()
        .map_err(|err| format!("failed to run C compiler: {err}"))?;
    if status.success() {
        Ok(())
    } else {
        Err(format!("C compiler exited with {status}"))
    }
}
