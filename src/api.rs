use crate::{
    config::Settings,
    descriptor::{self, PackageDescriptor},
    materialize, preview, template,
    utils::normalize_path,
};
use std::path::PathBuf;

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum SproutError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Descriptor(#[from] descriptor::DescriptorError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Template(#[from] template::TemplateError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Materialize(#[from] materialize::MaterializeError),

    #[error("You haven't provided an output directory for the new package.")]
    #[diagnostic(
        code(sprout::missing_out_dir),
        help("Pass the directory to create as the last argument")
    )]
    MissingOutDir,
}

/// Raw, unvalidated inputs for a bootstrap run.
#[derive(Debug, Clone, Default)]
pub struct BootstrapRequest {
    pub name: Option<String>,
    pub scope: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
    pub out_dir: Option<PathBuf>,
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Created(PackageDescriptor),
    Previewed(PackageDescriptor),
}

/// Bootstraps a new package at `request.out_dir`.
///
/// With `dry_run` set the package is rendered and previewed, and nothing is written.
///
/// # Errors
///
/// Returns a [`SproutError`] if:
///
/// - No package name or output directory was provided.
/// - Something already exists at the output location.
/// - A template fails to render.
/// - A directory, file or link cannot be created.
pub fn bootstrap(request: &BootstrapRequest, settings: &Settings) -> Result<Outcome, SproutError> {
    let descriptor = PackageDescriptor::new(
        request.name.as_deref(),
        request.scope.as_deref(),
        request.version.as_deref(),
        request.description.as_deref(),
        settings,
    )?;

    let out_dir = match request.out_dir.as_deref() {
        Some(out_dir) if !out_dir.as_os_str().is_empty() => normalize_path(out_dir),
        _ => return Err(SproutError::MissingOutDir),
    };

    log::debug!(
        "bootstrapping {}@{} into {}",
        descriptor.name(),
        descriptor.version(),
        out_dir.display()
    );

    let tree = template::render(&descriptor, settings)?;

    if request.dry_run {
        preview::preview_as_tree(&tree, &out_dir);

        return Ok(Outcome::Previewed(descriptor));
    }

    materialize::materialize(&tree, &out_dir)?;
    materialize::link_shared_config(&out_dir, &settings.shared_root)?;

    Ok(Outcome::Created(descriptor))
}
