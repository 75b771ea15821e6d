pub mod network {
    pub const ATTIO_BASE_URL: &str = "https://api.attio.com";
    pub const TIMEOUT_API_REQUEST_MS: u64 = 30_000;
    pub const USER_AGENT: &str = "attio-node/1.0.0";
}

pub mod protocols {
    pub const ALLOWED_HTTP: &[&str] = &["http:", "https:"];
}

pub mod routing {
    /// Marks "evaluate this" URL templates in generated routing tables.
    pub const EXPRESSION_PREFIX: char = '=';
    /// Top-level body key that opts out of record body wrapping.
    pub const BODY_ENVELOPE_KEY: &str = "data";
    pub const BODY_VALUES_KEY: &str = "values";
}

pub mod limits {
    pub const ERROR_BODY_EXCERPT_BYTES: usize = 512;
    pub const MAX_OPERATION_SUGGESTIONS: usize = 5;
}

pub mod env {
    pub const ACCESS_TOKEN: &str = "ATTIO_ACCESS_TOKEN";
    pub const BASE_URL: &str = "ATTIO_BASE_URL";
    pub const TIMEOUT_MS: &str = "ATTIO_TIMEOUT_MS";
    pub const CONTINUE_ON_FAIL: &str = "ATTIO_CONTINUE_ON_FAIL";
    pub const LOG_LEVEL: &str = "LOG_LEVEL";
}
