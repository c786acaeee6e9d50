/// Get the version string for nexus-cli and libnexus
pub fn get_version_string() -> String {
    format!(
        "nexus-cli {}\nlibnexus {}",
        env!("CARGO_PKG_VERSION"),
        libnexus::version()
    )
}

/// Print version information to stdout
pub fn print_version() {
    println!("{}", get_version_string());
}

#[cfg(test)]
#[path = "version_tests.rs"]
mod tests;
