fn main() {
    // Embed git commit hash at compile time.
    let hash = std::process::Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map_or_else(
            || "unknown".to_string(),
            |o| String::from_utf8_lossy(&o.stdout).trim().to_string(),
        );
    println!("cargo:rustc-env=CFGBACKUP_BUILD_HASH={hash}");
    println!("cargo:rerun-if-changed=build.rs");
}
