use crate::utils::error::{Result, SiteError};
use std::path::{Component, Path};
use url::Url;

/// File extensions a renderable page may have.
pub const PAGE_EXTENSIONS: &[&str] = &["html", "htm"];

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: &str, reason: impl Into<String>) -> SiteError {
    SiteError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// The origin pages and components are fetched from. Query strings and
/// fragments would be dropped when resources are resolved against it.
pub fn validate_site_origin(field_name: &str, origin: &str) -> Result<()> {
    if origin.trim().is_empty() {
        return Err(invalid(field_name, origin, "Site origin cannot be empty"));
    }

    let url = Url::parse(origin)
        .map_err(|e| invalid(field_name, origin, format!("Invalid site origin: {}", e)))?;
    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(invalid(
                field_name,
                origin,
                format!("Site origin must be http or https, got {}", scheme),
            ))
        }
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid(
            field_name,
            origin,
            "Site origin must not carry a query string or fragment",
        ));
    }
    Ok(())
}

/// A local directory: the site root or the output directory.
pub fn validate_directory(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(invalid(field_name, path, "Directory cannot be empty"));
    }
    if path.contains('\0') {
        return Err(invalid(field_name, path, "Directory contains null bytes"));
    }
    Ok(())
}

/// A resource path inside the site (component, data file or data directory).
pub fn validate_resource_path(field_name: &str, path: &str) -> Result<()> {
    validate_directory(field_name, path)?;

    let stays_inside = Path::new(path.trim_start_matches('/'))
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if !stays_inside {
        return Err(invalid(
            field_name,
            path,
            "Resource must stay inside the site root (no '..')",
        ));
    }
    Ok(())
}

/// Pages are written back under their own name, so they must be relative
/// HTML files that stay inside the output directory.
pub fn validate_page_path(field_name: &str, page: &str) -> Result<()> {
    validate_directory(field_name, page)?;

    let path = Path::new(page);
    let relative = path
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if !relative {
        return Err(invalid(
            field_name,
            page,
            "Page must be relative to the site root and must not contain '..'",
        ));
    }

    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if PAGE_EXTENSIONS.contains(&ext) => Ok(()),
        Some(ext) => Err(invalid(
            field_name,
            page,
            format!(
                "Page has extension .{}; expected one of: {}",
                ext,
                PAGE_EXTENSIONS.join(", ")
            ),
        )),
        None => Err(invalid(field_name, page, "Page has no file extension")),
    }
}

pub fn validate_pages(field_name: &str, pages: &[String]) -> Result<()> {
    if pages.is_empty() {
        return Err(SiteError::ValidationError {
            message: format!("{} must list at least one page", field_name),
        });
    }
    pages
        .iter()
        .try_for_each(|page| validate_page_path(field_name, page))
}
