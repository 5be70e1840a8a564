//! AWS SDK backed [`QueryClient`](tablequery_core::QueryClient).
//!
//! [`SdkQueryClient`] sends each page fetch through `aws-sdk-dynamodb`,
//! converting between the TableQuery model types and the SDK's own on the way
//! in and out. Retries happen inside the SDK, governed by
//! `TableQueryConfig::max_attempts`.

pub mod client;
pub mod convert;
pub mod error;

pub use client::SdkQueryClient;
