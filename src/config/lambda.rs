use crate::domain::model::{EstimatorConfig, VesselType};
use crate::domain::ports::PortTableSource;
use crate::utils::error::{MaritimeError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use aws_sdk_s3::Client as S3Client;
use std::env;

#[derive(Debug, Clone)]
pub struct LambdaConfig {
    /// Built-in ports are used when unset.
    pub port_table_bucket: Option<String>,
    pub port_table_key: String,
    pub s3_region: String,
    pub vessel_type: Option<VesselType>,
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        let vessel_type = match env::var("VESSEL_TYPE") {
            Ok(name) => Some(name.parse::<VesselType>().map_err(|_| {
                MaritimeError::InvalidConfigValueError {
                    field: "VESSEL_TYPE".to_string(),
                    value: name.clone(),
                    reason: "expected container, bulk, tanker, lng, lpg or general".to_string(),
                }
            })?),
            Err(_) => None,
        };

        Ok(Self {
            port_table_bucket: env::var("PORT_TABLE_BUCKET").ok().filter(|b| !b.is_empty()),
            port_table_key: env::var("PORT_TABLE_KEY").unwrap_or_else(|_| "ports.csv".to_string()),
            s3_region: env::var("S3_REGION").unwrap_or_else(|_| "ap-southeast-2".to_string()),
            vessel_type,
        })
    }

    pub fn estimator_config(&self) -> EstimatorConfig {
        match self.vessel_type {
            Some(vessel) => EstimatorConfig::default().for_vessel(vessel),
            None => EstimatorConfig::default(),
        }
    }
}

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        if let Some(bucket) = &self.port_table_bucket {
            validate_s3_bucket_name("PORT_TABLE_BUCKET", bucket)?;
            validate_non_empty_string("PORT_TABLE_KEY", &self.port_table_key)?;
        }
        validate_aws_region("S3_REGION", &self.s3_region)?;

        tracing::info!("Lambda configuration validation passed");
        Ok(())
    }
}

fn validate_s3_bucket_name(field_name: &str, bucket_name: &str) -> Result<()> {
    let invalid = |reason: &str| MaritimeError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: bucket_name.to_string(),
        reason: reason.to_string(),
    };

    if bucket_name.len() < 3 || bucket_name.len() > 63 {
        return Err(invalid("S3 bucket name must be between 3 and 63 characters"));
    }

    if !bucket_name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
    {
        return Err(invalid(
            "S3 bucket name can only contain lowercase letters, numbers, hyphens, and dots",
        ));
    }

    if bucket_name.starts_with('-') || bucket_name.ends_with('-') {
        return Err(invalid("S3 bucket name cannot start or end with a hyphen"));
    }

    Ok(())
}

fn validate_aws_region(field_name: &str, region: &str) -> Result<()> {
    validate_non_empty_string(field_name, region)?;

    if !region
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(MaritimeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: region.to_string(),
            reason: "AWS region can only contain lowercase letters, numbers, and hyphens"
                .to_string(),
        });
    }

    Ok(())
}

/// Port table stored as a CSV object in S3.
#[derive(Debug, Clone)]
pub struct S3PortTable {
    client: S3Client,
    bucket: String,
    key: String,
}

impl S3PortTable {
    pub fn new(client: S3Client, bucket: String, key: String) -> Self {
        Self {
            client,
            bucket,
            key,
        }
    }
}

impl PortTableSource for S3PortTable {
    fn describe(&self) -> String {
        format!("s3://{}/{}", self.bucket, self.key)
    }

    async fn read_table(&self) -> Result<Vec<u8>> {
        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&self.key)
            .send()
            .await
            .map_err(|e| MaritimeError::PortTableError {
                message: format!("Failed to read {} from S3: {}", self.describe(), e),
            })?;

        let data = resp
            .body
            .collect()
            .await
            .map_err(|e| MaritimeError::PortTableError {
                message: format!("Failed to collect S3 data: {}", e),
            })?;

        Ok(data.into_bytes().to_vec())
    }
}
