pub mod s3;
pub mod upload;

pub use s3::S3ObjectStore;
pub use upload::{DEFAULT_CONTENT_TYPE, PutObjectRequest, UploadRequest, normalize_bucket_name};
