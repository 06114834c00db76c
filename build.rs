// build.rs

use chrono::Utc;
use std::env;
use std::fs;
use std::path::Path;

fn main() {
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let version = env::var("CARGO_PKG_VERSION").expect("CARGO_PKG_VERSION is set by cargo");
    let dest_path = Path::new(&out_dir).join("build_info.rs");

    let build_date = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();

    // BUILD_DATE for logs, LONG_VERSION for `--version`
    fs::write(
        &dest_path,
        format!(
            "pub const BUILD_DATE: &str = \"{date}\";\n\
             pub const LONG_VERSION: &str = \"{version} (built {date})\";\n",
            date = build_date,
            version = version,
        ),
    )
    .expect("writing build_info.rs");

    println!("cargo:rerun-if-changed=build.rs");
}
