//! MinIO/S3-compatible media storage client
//!
//! Uploads product variant images under a publicly readable prefix and
//! returns direct URLs for them.
//!
//! Uses rust-s3 crate for lightweight S3 operations.

use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::{Client, Url};
use s3::creds::Credentials;
use s3::{Bucket, BucketConfiguration, Region};
use serde_json::json;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::core::config::StorageConfig;
use crate::core::error::AppError;
use crate::shared::constants::VARIANT_IMAGE_FOLDER;

type HmacSha256 = Hmac<Sha256>;

/// File extension for an image content type; unknown types fall back to "bin"
pub fn extension_for_content_type(content_type: &str) -> &'static str {
    match content_type {
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/avif" => "avif",
        "image/svg+xml" => "svg",
        _ => "bin",
    }
}

/// MinIO/S3-compatible media storage client
pub struct MediaStorage {
    bucket: Box<Bucket>,
    region: Region,
    credentials: Credentials,
    endpoint: String,
    public_endpoint: String,
    public_prefix: String,
    /// Access key for AWS Signature v4 signing
    access_key: String,
    /// Secret key for AWS Signature v4 signing
    secret_key: String,
    /// Region name for AWS Signature v4 signing
    region_name: String,
    /// HTTP client for bucket policy operations
    http_client: Client,
}

impl MediaStorage {
    /// Build a client from configuration; does not touch the network.
    /// Call [`MediaStorage::init`] afterwards to create the bucket and set
    /// its read policy.
    pub fn new(config: StorageConfig) -> Result<Self, AppError> {
        let credentials = Credentials::new(
            Some(&config.access_key),
            Some(&config.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| AppError::Internal(format!("Failed to create storage credentials: {}", e)))?;

        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
        };

        let mut bucket = Bucket::new(&config.bucket, region.clone(), credentials.clone())
            .map_err(|e| AppError::Internal(format!("Failed to create storage bucket: {}", e)))?;

        // Use path-style URLs for MinIO (http://endpoint/bucket instead of http://bucket.endpoint)
        bucket.set_path_style();

        let http_client = Client::builder()
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            bucket,
            region,
            credentials,
            endpoint: config.endpoint,
            public_endpoint: config.public_endpoint,
            public_prefix: config.public_prefix,
            access_key: config.access_key,
            secret_key: config.secret_key,
            region_name: config.region,
            http_client,
        })
    }

    /// Ensure the bucket exists and images under the public prefix are
    /// anonymously readable
    pub async fn init(&self) -> Result<(), AppError> {
        self.ensure_bucket_exists().await?;
        self.set_public_read_policy().await?;

        info!(
            "Media storage initialized for endpoint: {}, bucket: {}, public_prefix: {}",
            self.endpoint,
            self.bucket.name(),
            self.public_prefix
        );

        Ok(())
    }

    /// Upload one image and return its public URL
    pub async fn upload_image(
        &self,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<String, AppError> {
        let key = format!(
            "{}/{}/{}.{}",
            self.public_prefix,
            VARIANT_IMAGE_FOLDER,
            Uuid::new_v4(),
            extension_for_content_type(content_type)
        );

        self.bucket
            .put_object_with_content_type(&key, &data, content_type)
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Failed to upload image '{}': {}", key, e))
            })?;

        debug!("Uploaded image '{}' to bucket '{}'", key, self.bucket.name());
        Ok(self.get_public_url(&key))
    }

    /// Delete an image by its object key
    #[allow(dead_code)]
    pub async fn delete(&self, key: &str) -> Result<(), AppError> {
        self.bucket.delete_object(key).await.map_err(|e| {
            AppError::ExternalServiceError(format!("Failed to delete image '{}': {}", key, e))
        })?;

        debug!(
            "Deleted image '{}' from bucket '{}'",
            key,
            self.bucket.name()
        );
        Ok(())
    }

    /// Get the bucket name
    pub fn bucket_name(&self) -> String {
        self.bucket.name()
    }

    /// Direct URL for an uploaded object
    pub fn get_public_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.public_endpoint, self.bucket.name(), key)
    }

    /// Extract the object key from a URL previously produced by this client
    #[allow(dead_code)]
    pub fn extract_key_from_url(&self, url: &str) -> Option<String> {
        // Try public endpoint first
        let public_prefix = format!("{}/{}/", self.public_endpoint, self.bucket.name());
        if let Some(key) = url.strip_prefix(&public_prefix) {
            return Some(key.to_string());
        }

        // Try internal endpoint
        let internal_prefix = format!("{}/{}/", self.endpoint, self.bucket.name());
        url.strip_prefix(&internal_prefix).map(|key| key.to_string())
    }

    /// Ensure the bucket exists, create if not
    async fn ensure_bucket_exists(&self) -> Result<(), AppError> {
        // Bucket creation errors for an existing bucket are expected and
        // safely ignorable
        match self.create_bucket().await {
            Ok(_) => {
                info!("Bucket '{}' created successfully", self.bucket.name());
                Ok(())
            }
            Err(e) => {
                let error_str = e.to_string();
                if error_str.contains("BucketAlreadyOwnedByYou")
                    || error_str.contains("BucketAlreadyExists")
                    || error_str.contains("already own it")
                {
                    debug!("Bucket '{}' already exists", self.bucket.name());
                    Ok(())
                } else {
                    warn!(
                        "Could not create bucket '{}': {}. Assuming it exists.",
                        self.bucket.name(),
                        e
                    );
                    Ok(())
                }
            }
        }
    }

    async fn create_bucket(&self) -> Result<(), AppError> {
        let bucket_config = BucketConfiguration::default();

        Bucket::create_with_path_style(
            &self.bucket.name(),
            self.region.clone(),
            self.credentials.clone(),
            bucket_config,
        )
        .await
        .map_err(|e| {
            AppError::Internal(format!(
                "Failed to create bucket '{}': {}",
                self.bucket.name(),
                e
            ))
        })?;

        Ok(())
    }

    /// Set public read policy for the public prefix so image URLs resolve
    /// without authentication
    async fn set_public_read_policy(&self) -> Result<(), AppError> {
        let bucket_name = self.bucket.name();
        let public_prefix = &self.public_prefix;

        let policy = json!({
            "Version": "2012-10-17",
            "Statement": [
                {
                    "Effect": "Allow",
                    "Principal": {"AWS": "*"},
                    "Action": ["s3:GetObject"],
                    "Resource": [format!("arn:aws:s3:::{bucket_name}/{public_prefix}/*")]
                }
            ]
        });

        let policy_str = policy.to_string();

        match self
            .put_bucket_policy_with_sigv4(&bucket_name, &policy_str)
            .await
        {
            Ok(_) => {
                info!(
                    "Set public read policy for {}/{}/*",
                    bucket_name, public_prefix
                );
                Ok(())
            }
            Err(e) => {
                // Startup should not fail over a policy that can be set manually
                warn!(
                    "Failed to set bucket policy for '{}': {}. \
                    You may need to set the policy manually using: \
                    mc anonymous set download minio/{}/{}",
                    bucket_name, e, bucket_name, public_prefix
                );
                Ok(())
            }
        }
    }

    /// Put bucket policy using AWS Signature v4
    async fn put_bucket_policy_with_sigv4(
        &self,
        bucket_name: &str,
        policy: &str,
    ) -> Result<(), AppError> {
        let now = Utc::now();
        let date_stamp = now.format("%Y%m%d").to_string();
        let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();

        // Parse endpoint to get host
        let endpoint_url = Url::parse(&self.endpoint)
            .map_err(|e| AppError::Internal(format!("Invalid endpoint URL: {}", e)))?;
        let host = endpoint_url
            .host_str()
            .ok_or_else(|| AppError::Internal("Endpoint URL has no host".to_string()))?;
        let port = endpoint_url.port();
        let host_header = match port {
            Some(p) => format!("{}:{}", host, p),
            None => host.to_string(),
        };

        // Build the URL for PUT bucket policy
        let url = format!("{}/{}?policy", self.endpoint, bucket_name);

        // Calculate payload hash
        let payload_hash = hex::encode(Sha256::digest(policy.as_bytes()));

        // Create canonical request
        let canonical_uri = format!("/{}", bucket_name);
        let canonical_querystring = "policy=";
        let canonical_headers = format!(
            "host:{}\nx-amz-content-sha256:{}\nx-amz-date:{}\n",
            host_header, payload_hash, amz_date
        );
        let signed_headers = "host;x-amz-content-sha256;x-amz-date";

        let canonical_request = format!(
            "PUT\n{}\n{}\n{}\n{}\n{}",
            canonical_uri, canonical_querystring, canonical_headers, signed_headers, payload_hash
        );

        // Create string to sign
        let algorithm = "AWS4-HMAC-SHA256";
        let credential_scope = format!("{}/{}/s3/aws4_request", date_stamp, self.region_name);
        let canonical_request_hash = hex::encode(Sha256::digest(canonical_request.as_bytes()));
        let string_to_sign = format!(
            "{}\n{}\n{}\n{}",
            algorithm, amz_date, credential_scope, canonical_request_hash
        );

        // Calculate signature
        let signature = self.calculate_signature(&date_stamp, &string_to_sign)?;

        // Create authorization header
        let authorization_header = format!(
            "{} Credential={}/{}, SignedHeaders={}, Signature={}",
            algorithm, self.access_key, credential_scope, signed_headers, signature
        );

        // Make the request
        let response = self
            .http_client
            .put(&url)
            .header("Host", &host_header)
            .header("x-amz-date", &amz_date)
            .header("x-amz-content-sha256", &payload_hash)
            .header("Authorization", &authorization_header)
            .header("Content-Type", "application/json")
            .body(policy.to_string())
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to send policy request: {}", e)))?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(AppError::Internal(format!(
                "Failed to set bucket policy: {} - {}",
                status, body
            )))
        }
    }

    /// Calculate AWS Signature v4 signature
    fn calculate_signature(
        &self,
        date_stamp: &str,
        string_to_sign: &str,
    ) -> Result<String, AppError> {
        // Step 1: Create signing key
        let k_date = Self::hmac_sha256(
            format!("AWS4{}", self.secret_key).as_bytes(),
            date_stamp.as_bytes(),
        )?;
        let k_region = Self::hmac_sha256(&k_date, self.region_name.as_bytes())?;
        let k_service = Self::hmac_sha256(&k_region, b"s3")?;
        let k_signing = Self::hmac_sha256(&k_service, b"aws4_request")?;

        // Step 2: Calculate signature
        let signature = Self::hmac_sha256(&k_signing, string_to_sign.as_bytes())?;
        Ok(hex::encode(signature))
    }

    /// HMAC-SHA256 helper
    fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>, AppError> {
        let mut mac = HmacSha256::new_from_slice(key)
            .map_err(|e| AppError::Internal(format!("HMAC key error: {}", e)))?;
        mac.update(data);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> MediaStorage {
        MediaStorage::new(StorageConfig {
            endpoint: "http://localhost:9000".to_string(),
            public_endpoint: "https://cdn.example.com".to_string(),
            access_key: "minioadmin".to_string(),
            secret_key: "minioadmin".to_string(),
            bucket: "sepatuku-media".to_string(),
            region: "us-east-1".to_string(),
            public_prefix: "public".to_string(),
        })
        .expect("client should build")
    }

    #[test]
    fn maps_image_content_types_to_extensions() {
        assert_eq!(extension_for_content_type("image/jpeg"), "jpg");
        assert_eq!(extension_for_content_type("image/png"), "png");
        assert_eq!(extension_for_content_type("image/webp"), "webp");
        assert_eq!(extension_for_content_type("application/pdf"), "bin");
    }

    #[test]
    fn builds_public_urls_from_the_public_endpoint() {
        let storage = storage();
        assert_eq!(
            storage.get_public_url("public/product-variants/abc.jpg"),
            "https://cdn.example.com/sepatuku-media/public/product-variants/abc.jpg"
        );
    }

    #[test]
    fn extracts_keys_from_both_endpoints() {
        let storage = storage();

        assert_eq!(
            storage.extract_key_from_url(
                "https://cdn.example.com/sepatuku-media/public/product-variants/abc.jpg"
            ),
            Some("public/product-variants/abc.jpg".to_string())
        );
        assert_eq!(
            storage.extract_key_from_url(
                "http://localhost:9000/sepatuku-media/public/product-variants/abc.jpg"
            ),
            Some("public/product-variants/abc.jpg".to_string())
        );
        assert_eq!(
            storage.extract_key_from_url("https://elsewhere.example.com/other/key.jpg"),
            None
        );
    }
}
