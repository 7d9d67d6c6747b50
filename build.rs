fn main() {
    // Host builds (tests, clippy) have no ESP-IDF toolchain to report.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
