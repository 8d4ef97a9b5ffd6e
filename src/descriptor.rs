use crate::config::Settings;
use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum DescriptorError {
    #[error("You haven't provided a package name, so I cannot bootstrap a new package for you.")]
    #[diagnostic(
        code(sprout::descriptor::missing_name),
        help("Pass the package name with --name <NAME>")
    )]
    MissingName,
}

/// Validated package metadata driving template rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageDescriptor {
    name: String,
    version: String,
    description: String,
}
impl PackageDescriptor {
    /// Builds a descriptor from raw inputs, applying defaults for empty fields.
    ///
    /// A non-empty `scope` turns the name into `@scope/name`. An empty `version` falls
    /// back to [`Settings::default_version`], an empty `description` to
    /// `"<name> package"` using the final, possibly scoped, name.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::MissingName`] if `name` is absent or empty.
    pub fn new(
        name: Option<&str>,
        scope: Option<&str>,
        version: Option<&str>,
        description: Option<&str>,
        settings: &Settings,
    ) -> Result<Self, DescriptorError> {
        let name = match name {
            Some(name) if !name.is_empty() => name,
            _ => return Err(DescriptorError::MissingName),
        };

        let name = match scope {
            Some(scope) if !scope.is_empty() => format!("@{}/{}", scope, name),
            _ => name.to_string(),
        };

        let version = match version {
            Some(version) if !version.is_empty() => version.to_string(),
            _ => settings.default_version.clone(),
        };

        let description = match description {
            Some(description) if !description.is_empty() => description.to_string(),
            _ => format!("{} package", name),
        };

        Ok(Self {
            name,
            version,
            description,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}
