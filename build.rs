use std::{env, error::Error, fs, path::Path};

#[allow(dead_code)]
#[path = "src/constants.rs"]
mod constants;
#[allow(dead_code)]
#[path = "src/definitions.rs"]
mod definitions;

use definitions::RawSecrets;

const TEMPLATE_FILE: &str = "secrets.template.toml";
const LOCAL_FILE: &str = "secrets.toml";

fn main() -> Result<(), Box<dyn Error>> {
    // Tell Cargo to rerun if any definitions file changes
    println!("cargo:rerun-if-env-changed=SECRETS_FILE");
    println!("cargo:rerun-if-changed={LOCAL_FILE}");
    println!("cargo:rerun-if-changed={TEMPLATE_FILE}");
    println!("cargo:rerun-if-changed=src/constants.rs");
    println!("cargo:rerun-if-changed=src/definitions.rs");

    let source = match env::var("SECRETS_FILE") {
        Ok(path) => {
            println!("cargo:rerun-if-changed={path}");
            path
        }
        Err(_) if Path::new(LOCAL_FILE).exists() => LOCAL_FILE.to_owned(),
        Err(_) => {
            println!(
                "cargo:warning=no {LOCAL_FILE} found, building with template secrets from {TEMPLATE_FILE}"
            );
            TEMPLATE_FILE.to_owned()
        }
    };

    // Tests compare the compiled-in secrets against this file
    let source_path = fs::canonicalize(&source)?;
    println!("cargo:rustc-env=SECRETS_SOURCE={}", source_path.display());

    // Read and parse; environment overrides the file
    let raw = RawSecrets::parse(&fs::read_to_string(&source_path)?)?;
    let [ssid, pass, endpoint, id_scope, symmetric_key] = raw
        .resolve_with(|key| {
            println!("cargo:rerun-if-env-changed={key}");
            env::var(key).ok()
        })
        .map_err(|missing| {
            format!(
                "MissingConfiguration: {} is not set in {source} or the build environment",
                missing.key()
            )
        })?;

    // Generate Rust code
    let out_dir = env::var("OUT_DIR")?;
    let dest_path = Path::new(&out_dir).join("secrets.rs");
    let code = format!(
        r#"
        pub const SECRETS: SecretsConfig<'static> = SecretsConfig {{
            wifi_ssid: {ssid:?},
            wifi_password: {pass:?},
            dps_global_endpoint: {endpoint:?},
            dps_id_scope: {id_scope:?},
            dps_symmetric_key: {symmetric_key:?},
        }};
    "#
    );

    fs::write(dest_path, code)?;
    Ok(())
}
