//! Regenerates `include/heat.h` from the `extern "C"` surface.

use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    let crate_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR"));
    let config_path = crate_dir.join("cbindgen.toml");
    println!("cargo:rerun-if-changed={}", config_path.display());
    println!("cargo:rerun-if-changed=src");

    let config = cbindgen::Config::from_file(&config_path).expect("cbindgen.toml is readable");
    let include = crate_dir.join("include");
    fs::create_dir_all(&include).expect("include/ is creatable");

    let bindings = cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_config(config)
        .generate()
        .expect("heat-ffi exports are parseable");
    bindings.write_to_file(include.join("heat.h"));
}
