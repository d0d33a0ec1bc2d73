// File: crates/silplot-core/build.rs
// Summary: Build script; Skia's font manager needs advapi32 on Windows.

fn main() {
    #[cfg(target_os = "windows")]
    {
        // RegOpenKeyExW, RegQueryInfoKeyW
        println!("cargo:rustc-link-lib=advapi32");
    }
}
