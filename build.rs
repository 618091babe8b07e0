use indoc::indoc;
use std::env;
use std::fs;
use std::path::Path;

const SAMPLE_REL: &str = "assets/sample.md";

fn main() {
    let manifest = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
    let sample_basename = Path::new(SAMPLE_REL)
        .file_name()
        .and_then(|s| s.to_str())
        .expect("invalid sample asset filename");
    let sample_path = Path::new(&manifest).join(SAMPLE_REL);
    println!("cargo:rerun-if-changed={}", sample_path.display());

    // Copy the sample into OUT_DIR so the crate can embed it with
    // `include_str!(concat!(env!("OUT_DIR"), "/<basename>"))`.
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR not set");
    let sample_dest = Path::new(&out_dir).join(sample_basename);
    fs::copy(&sample_path, &sample_dest).expect("failed to copy sample.md to OUT_DIR");

    let gen_path = Path::new(&out_dir).join("generated_sample.rs");
    let gen_src = format!(
        indoc!(
            r#"
                /// Markdown document shown when no file is given on the command line.
                pub const EMBEDDED_SAMPLE: &str = include_str!(concat!(env!("OUT_DIR"), "/{basename}"));
            "#
        ),
        basename = sample_basename,
    );
    fs::write(&gen_path, gen_src).expect("failed to write generated_sample.rs to OUT_DIR");
}
