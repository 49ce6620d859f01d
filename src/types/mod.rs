pub mod envelope;
pub mod plan;
pub mod requests;
pub mod subscription;
pub mod user;
