//! Binary entrypoint for the browser-hosted terminal page.

#[cfg(all(target_arch = "wasm32", feature = "csr"))]
fn main() {
    site::mount();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    match site::load_terminal_config() {
        Ok(config) => eprintln!(
            "Terminal content OK ({} commands). This binary renders in the browser: build `site_app` for wasm32 with the `csr` feature.",
            config.registry.len()
        ),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
