//! Protobuf code generation for federatedrec.
//!
//! Compiles the `.proto` files in `proto/` with `prost-build`. A vendored
//! `protoc` is used unless `PROTOC` is already set.

use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=../../proto");
    println!("cargo:rerun-if-env-changed=PROTOC");

    let proto_root = PathBuf::from("../../proto");
    let protos = [proto_root.join("mf_model_meta.proto")];

    if std::env::var_os("PROTOC").is_none() {
        std::env::set_var("PROTOC", protoc_bin_vendored::protoc_bin_path()?);
    }

    prost_build::Config::new().compile_protos(&protos, &[proto_root])?;

    Ok(())
}
