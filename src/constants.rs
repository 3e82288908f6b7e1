// Pipeline constants
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

/// Only object keys under this prefix are processed
pub const KEY_PREFIX: &str = "certs/";

/// Parameter-store name holding the notification webhook URL
pub const WEBHOOK_PARAMETER: &str = "webhook_url";

/// Leaf index used when rebuilding a log entry; the pipeline never reads it
pub const PLACEHOLDER_LEAF_INDEX: u64 = 0;

/// Title line of every notification
pub const NOTIFICATION_TITLE: &str = "*New Certificate Detected*";

/// Default HTTP timeout for object retrieval
pub const DEFAULT_STORE_TIMEOUT_SECS: u64 = 30;

/// Default HTTP timeout for webhook delivery
pub const DEFAULT_DELIVERY_TIMEOUT_SECS: u64 = 10;
