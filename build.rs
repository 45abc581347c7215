use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use syntect::dumps::dump_to_uncompressed_file;
use syntect::highlighting::ThemeSet;
use syntect::html::{ClassStyle, css_for_theme_with_class_style};
use two_face::syntax;
use walkdir::WalkDir;

const CODE_THEME: &str = "base16-ocean.dark";

fn main() {
    let out_dir = match env::var("OUT_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(err) => panic!("OUT_DIR not set: {err}"),
    };

    if let Err(err) = prepare_public_assets(&out_dir) {
        panic!("failed to prepare static public assets: {err}");
    }
    if let Err(err) = write_syntax_pack(&out_dir) {
        panic!("failed to write syntax pack: {err}");
    }

    let static_dir = Path::new("static");
    println!("cargo:rerun-if-changed={}", static_dir.display());
    if static_dir.is_dir() {
        for entry in WalkDir::new(static_dir).into_iter().flatten() {
            println!("cargo:rerun-if-changed={}", entry.path().display());
        }
    }
}

fn prepare_public_assets(out_dir: &Path) -> Result<(), String> {
    let source_public = Path::new("static").join("public");
    let dest_public = out_dir.join("static_public");

    if dest_public.exists() {
        fs::remove_dir_all(&dest_public)
            .map_err(|err| format!("failed to clean {}: {err}", dest_public.display()))?;
    }

    copy_dir(&source_public, &dest_public)?;
    append_theme_css(&dest_public.join("styles/code.css"))
}

fn copy_dir(source: &Path, destination: &Path) -> Result<(), String> {
    fs::create_dir_all(destination)
        .map_err(|err| format!("failed to create {}: {err}", destination.display()))?;

    for entry in WalkDir::new(source).into_iter().flatten() {
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|err| format!("failed to strip prefix: {err}"))?;
        let target_path = destination.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target_path)
                .map_err(|err| format!("failed to create {}: {err}", target_path.display()))?;
        } else if entry.file_type().is_file() {
            if let Some(parent) = target_path.parent() {
                fs::create_dir_all(parent)
                    .map_err(|err| format!("failed to create {}: {err}", parent.display()))?;
            }
            fs::copy(entry.path(), &target_path)
                .map_err(|err| format!("failed to copy {}: {err}", target_path.display()))?;
        }
    }

    Ok(())
}

fn append_theme_css(base_path: &Path) -> Result<(), String> {
    let base_css = fs::read_to_string(base_path)
        .map_err(|err| format!("failed to read {}: {err}", base_path.display()))?;
    let theme_set = ThemeSet::load_defaults();
    let theme = theme_set
        .themes
        .get(CODE_THEME)
        .ok_or_else(|| format!("theme `{CODE_THEME}` not found"))?;
    let theme_css =
        css_for_theme_with_class_style(theme, ClassStyle::SpacedPrefixed { prefix: "syntax-" })
            .map_err(|err| err.to_string())?;

    let mut combined = String::with_capacity(base_css.len() + theme_css.len() + 80);
    combined.push_str(base_css.trim_end());
    combined.push_str(&format!("\n\n/* syntect theme {CODE_THEME}, generated at build time */\n"));
    combined.push_str(&theme_css);
    combined.push('\n');

    fs::write(base_path, combined)
        .map_err(|err| format!("failed to write {}: {err}", base_path.display()))
}

fn write_syntax_pack(out_dir: &Path) -> Result<(), String> {
    let syntax_set = syntax::extra_newlines();
    let pack_path = out_dir.join("syntaxes.packdump");
    dump_to_uncompressed_file(&syntax_set, &pack_path)
        .map_err(|err| format!("failed to encode syntax set: {err}"))?;

    println!("cargo:rustc-env=SYNTAX_PACK_FILE={}", pack_path.display());
    Ok(())
}
