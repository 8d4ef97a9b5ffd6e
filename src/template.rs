use crate::{
    config::{ManifestDefaults, Settings},
    descriptor::PackageDescriptor,
    vfs::FileTreeNode,
};
use miette::Diagnostic;
use serde::Serialize;
use tera::{Context, Tera};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum TemplateError {
    #[error("Error occurred attempting to register template: {name}")]
    #[diagnostic(code(sprout::template::register))]
    Register {
        name: String,
        #[source]
        source: tera::Error,
    },

    #[error("Error occurred attempting to render template: {name}")]
    #[diagnostic(code(sprout::template::render))]
    Render {
        name: String,
        #[source]
        source: tera::Error,
    },

    #[error("Error occurred attempting to serialize package manifest")]
    #[diagnostic(code(sprout::template::manifest))]
    Manifest(#[source] serde_json::Error),
}

const INDEX_TEMPLATE: (&str, &str) = ("index.ts", include_str!("../templates/index.ts.tera"));
const README_TEMPLATE: (&str, &str) = ("README.md", include_str!("../templates/README.md.tera"));

const GITIGNORE_ENTRIES: &[&str] = &["lib"];
const NPMIGNORE_ENTRIES: &[&str] = &[
    ".gitignore",
    ".npmignore",
    "node_modules",
    "src",
    "tsconfig",
    "tsconfig.json",
];

/// `package.json` contents: descriptor fields first, then the static metadata.
#[derive(Debug, Serialize)]
struct PackageJson<'a> {
    name: &'a str,
    version: &'a str,
    description: &'a str,
    #[serde(flatten)]
    defaults: &'a ManifestDefaults,
}

/// One entry per line, terminated by a line break.
fn ignore_file(entries: &[&str]) -> String {
    entries.iter().map(|entry| format!("{}\n", entry)).collect()
}

fn manifest(descriptor: &PackageDescriptor, defaults: &ManifestDefaults) -> Result<String, TemplateError> {
    let package_json = PackageJson {
        name: descriptor.name(),
        version: descriptor.version(),
        description: descriptor.description(),
        defaults,
    };

    let mut rendered = serde_json::to_string_pretty(&package_json).map_err(TemplateError::Manifest)?;
    rendered.push('\n');

    Ok(rendered)
}

fn make_tera() -> Result<Tera, TemplateError> {
    let mut tera = Tera::default();
    tera.autoescape_on(vec![]);

    for (name, content) in [INDEX_TEMPLATE, README_TEMPLATE] {
        tera.add_raw_template(name, content)
            .map_err(|error| TemplateError::Register {
                name: name.to_string(),
                source: error,
            })?;
    }

    Ok(tera)
}

fn make_tera_context(descriptor: &PackageDescriptor) -> Context {
    let mut context = Context::new();
    context.insert("name", descriptor.name());
    context.insert("version", descriptor.version());
    context.insert("description", descriptor.description());

    context
}

fn render_template(tera: &Tera, name: &str, ctx: &Context) -> Result<String, TemplateError> {
    tera.render(name, ctx).map_err(|error| TemplateError::Render {
        name: name.to_string(),
        source: error,
    })
}

/// Renders the package skeleton for `descriptor` without touching the filesystem.
///
/// # Errors
///
/// Returns a [`TemplateError`] if an embedded template fails to parse or render, or the
/// manifest cannot be serialized.
pub fn render(descriptor: &PackageDescriptor, settings: &Settings) -> Result<FileTreeNode, TemplateError> {
    let tera = make_tera()?;
    let ctx = make_tera_context(descriptor);

    log::debug!("rendering package skeleton for {}", descriptor.name());

    let tree = FileTreeNode::directory()
        .with(
            "src",
            FileTreeNode::directory().with(
                INDEX_TEMPLATE.0,
                FileTreeNode::Leaf(render_template(&tera, INDEX_TEMPLATE.0, &ctx)?),
            ),
        )
        .with(".gitignore", FileTreeNode::Leaf(ignore_file(GITIGNORE_ENTRIES)))
        .with(".npmignore", FileTreeNode::Leaf(ignore_file(NPMIGNORE_ENTRIES)))
        .with("LICENSE", FileTreeNode::Leaf(settings.license.clone()))
        .with(
            "package.json",
            FileTreeNode::Leaf(manifest(descriptor, &settings.manifest)?),
        )
        .with(
            README_TEMPLATE.0,
            FileTreeNode::Leaf(render_template(&tera, README_TEMPLATE.0, &ctx)?),
        );

    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_for(
        name: &str,
        scope: &str,
        version: &str,
        description: &str,
    ) -> (FileTreeNode, serde_json::Value) {
        let settings = Settings::default();
        let descriptor =
            PackageDescriptor::new(Some(name), Some(scope), Some(version), Some(description), &settings)
                .unwrap();
        let tree = render(&descriptor, &settings).unwrap();
        let manifest = serde_json::from_str(tree.contents("package.json").unwrap()).unwrap();

        (tree, manifest)
    }

    #[test]
    fn test_render_layout() {
        let (tree, _) = render_for("widgets", "", "", "");

        let FileTreeNode::Directory(entries) = &tree else {
            panic!("root should be a directory");
        };
        let names: Vec<&str> = entries.keys().map(String::as_str).collect();

        assert_eq!(
            names,
            vec!["src", ".gitignore", ".npmignore", "LICENSE", "package.json", "README.md"]
        );
        assert!(tree.contents("src/index.ts").is_some());
    }

    #[test]
    fn test_render_defaults() {
        let (tree, manifest) = render_for("widgets", "", "", "");

        assert_eq!(manifest["name"], "widgets");
        assert_eq!(manifest["version"], "0.0.1");
        assert_eq!(manifest["description"], "widgets package");
        assert!(tree.contents("README.md").unwrap().contains("widgets package"));
    }

    #[test]
    fn test_render_scoped_name() {
        let (tree, manifest) = render_for("core", "acme", "", "");

        assert_eq!(manifest["name"], "@acme/core");

        let readme = tree.contents("README.md").unwrap();
        assert!(readme.starts_with("# @acme/core\n"));
        assert!(readme.contains("yarn add @acme/core"));
        assert!(readme.contains("npm install @acme/core"));
    }

    #[test]
    fn test_render_explicit_fields() {
        let (tree, manifest) = render_for("core", "", "3.2.1", "Parsers & <friends>");

        assert_eq!(manifest["version"], "3.2.1");
        assert_eq!(manifest["description"], "Parsers & <friends>");
        assert!(tree.contents("README.md").unwrap().contains("\nParsers & <friends>\n"));
    }

    #[test]
    fn test_manifest_static_fields() {
        let (tree, manifest) = render_for("widgets", "", "", "");

        assert_eq!(manifest["author"], "Automorph Ltd (https://www.automorph.com)");
        assert_eq!(manifest["license"], "MIT");
        assert_eq!(manifest["browser"], "lib/index.js");
        assert_eq!(manifest["main"], "lib/index");
        assert_eq!(manifest["module"], "lib/index.mjs");
        assert_eq!(manifest["typings"], "lib/index.d.ts");
        assert_eq!(
            manifest["scripts"]["prepublishOnly"],
            "tsc-mjs -b tsconfig.json --force"
        );

        let raw = tree.contents("package.json").unwrap();
        assert!(raw.starts_with("{\n  \"name\": \"widgets\",\n  \"version\""));
        assert!(raw.ends_with("}\n"));
    }

    #[test]
    fn test_index_stub_names_package() {
        let (tree, _) = render_for("widgets", "", "", "");

        let index = tree.contents("src/index.ts").unwrap();

        assert!(index.starts_with("/**\n * widgets package entrypoint module\n */\n"));
        assert!(index.contains("export {};"));
    }

    #[test]
    fn test_ignore_files_and_license() {
        let (tree, _) = render_for("widgets", "", "", "");

        assert_eq!(tree.contents(".gitignore").unwrap(), "lib\n");
        assert_eq!(
            tree.contents(".npmignore").unwrap(),
            ".gitignore\n.npmignore\nnode_modules\nsrc\ntsconfig\ntsconfig.json\n"
        );
        assert_eq!(tree.contents("LICENSE").unwrap(), crate::config::LICENSE_TEXT);
    }
}
