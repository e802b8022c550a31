fn main() {
    let manifest_dir = std::path::PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").unwrap());
    let out_dir = std::path::PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let fixtures = manifest_dir.join("../../tests/fixtures");

    // Regenerate the wrapper header into OUT_DIR, leaving the fixture intact.
    let header = out_dir.join("glfw.hpp");
    hppgen::run(&fixtures.join("glfw/hppgen.toml"), Some(&header)).expect("hppgen failed");

    println!("cargo:rerun-if-changed=../../tests/fixtures/glfw/");
    println!("cargo:rerun-if-changed=../../hppgen/src/");
}
