// Pipeline - configuration and the batch driver
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

pub mod config;
pub mod driver;

pub use config::{
    Config, DeliveryConfig, FailurePolicy, ParametersConfig, PipelineSettings, StorageBackend,
    StorageConfig,
};
pub use driver::{BatchDriver, BatchReport, KeyOutcome, KeyReport, render};
