/// Reserved identity key holding the client name in the daily-value store
pub const CLIENT_NAME_KEY: &str = "Cliente";

/// Reserved identity key holding the client tax id (CPF)
pub const TAX_ID_KEY: &str = "CPF";

/// Reserved identity key holding the banker name
pub const BANKER_KEY: &str = "Banker";

/// The three identity keys; every other key of a daily-value row is a date candidate
pub const RESERVED_KEYS: [&str; 3] = [CLIENT_NAME_KEY, TAX_ID_KEY, BANKER_KEY];

/// Inflow event field holding the client name
pub const INFLOW_CLIENT_KEY: &str = "net_inflow.client_name";

/// Inflow event field holding the ISO date
pub const INFLOW_DATE_KEY: &str = "net_inflow.date";

/// Inflow event field holding the signed USD amount
pub const INFLOW_AMOUNT_KEY: &str = "net_inflow.net_inflow_usd";

/// Group key used for clients without a banker
pub const NO_BANKER: &str = "No Banker";

/// Group key of the firm-wide capital-raised series
pub const ALL_GROUP_KEY: &str = "ALL";

/// Start of the tracked period
pub const DEFAULT_PERIOD_START: &str = "2025-12-01";

/// Number of bankers in the top ranking
pub const DEFAULT_TOP_BANKERS: usize = 3;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;
