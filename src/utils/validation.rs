use crate::utils::error::{MaritimeError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: impl ToString, reason: impl Into<String>) -> MaritimeError {
    MaritimeError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(invalid(
                field_name,
                url_str,
                format!("Unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(invalid(
            field_name,
            url_str,
            format!("Invalid URL format: {}", e),
        )),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(invalid(field_name, path, "Path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(invalid(field_name, path, "Path contains null bytes"));
    }

    Ok(())
}

pub fn validate_file_extension(field_name: &str, file: &str, allowed_extensions: &[&str]) -> Result<()> {
    match std::path::Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(extension) if allowed_extensions.contains(&extension) => Ok(()),
        Some(extension) => Err(invalid(
            field_name,
            file,
            format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                extension,
                allowed_extensions.join(", ")
            ),
        )),
        None => Err(invalid(
            field_name,
            file,
            "File has no extension or invalid filename",
        )),
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| MaritimeError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(invalid(
            field_name,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

pub fn validate_finite(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(invalid(field_name, value, "Value must be a finite number"));
    }
    Ok(())
}

/// Finite and strictly greater than zero.
pub fn validate_positive(field_name: &str, value: f64) -> Result<()> {
    validate_finite(field_name, value)?;
    if value <= 0.0 {
        return Err(invalid(field_name, value, "Value must be greater than zero"));
    }
    Ok(())
}

/// Finite and zero or greater.
pub fn validate_non_negative(field_name: &str, value: f64) -> Result<()> {
    validate_finite(field_name, value)?;
    if value < 0.0 {
        return Err(invalid(field_name, value, "Value cannot be negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("weather.endpoint", "https://api.open-meteo.com/v1").is_ok());
        assert!(validate_url("weather.endpoint", "http://localhost:8080").is_ok());
        assert!(validate_url("weather.endpoint", "").is_err());
        assert!(validate_url("weather.endpoint", "invalid-url").is_err());
        assert!(validate_url("weather.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("ports.table", "ports.csv", &["csv"]).is_ok());
        assert!(validate_file_extension("ports.table", "ports.json", &["csv"]).is_err());
        assert!(validate_file_extension("ports.table", "ports", &["csv"]).is_err());
    }

    #[test]
    fn test_validate_numbers() {
        assert!(validate_positive("estimator.average_speed_knots", 12.0).is_ok());
        assert!(validate_positive("estimator.average_speed_knots", 0.0).is_err());
        assert!(validate_positive("estimator.average_speed_knots", f64::NAN).is_err());
        assert!(validate_non_negative("estimator.cost_rate_per_nm", 0.0).is_ok());
        assert!(validate_non_negative("estimator.cost_rate_per_nm", -1.0).is_err());
        assert!(validate_finite("lat", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("lat", 45.0, -90.0, 90.0).is_ok());
        assert!(validate_range("lat", 90.5, -90.0, 90.0).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("SGSIN".to_string());
        let missing: Option<String> = None;
        assert_eq!(validate_required_field("origin", &present).unwrap(), "SGSIN");
        assert!(matches!(
            validate_required_field("origin", &missing),
            Err(MaritimeError::MissingConfigError { .. })
        ));
    }
}
