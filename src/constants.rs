// Server configuration
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: &str = "8080";
pub const DEFAULT_DATA_PATH: &str = "data";
pub const DEFAULT_DB_NAME: &str = "finance_tracker";
pub const DEFAULT_LOG_FILTER: &str = "info";

// Store bootstrap
pub const CONNECT_TIMEOUT_SECS: u64 = 10;
pub const REMOTE_URL_SCHEMES: [&str; 3] = ["libsql://", "http://", "https://"];

// Root route
pub const GREETING: &str = "Finance Tracker API";

// Validation messages
pub const ERR_INVALID_DATE: &str = "Invalid date format. Use YYYY-MM-DD";
pub const ERR_INVALID_FILTER: &str = "Invalid month or year";
pub const ERR_INVALID_ID: &str = "Invalid ID";
pub const ERR_INVALID_JSON: &str = "Invalid JSON";

// Store failure messages
pub const ERR_INSERT: &str = "Failed to insert";
pub const ERR_FETCH: &str = "Failed to fetch transactions";
pub const ERR_DECODE: &str = "Failed to decode transactions";
pub const ERR_UPDATE: &str = "Failed to update";
pub const ERR_DELETE: &str = "Failed to delete";

// Response messages
pub const MSG_NO_TRANSACTIONS: &str = "No transactions found";
pub const MSG_UPDATED: &str = "Updated successfully";
pub const MSG_DELETED: &str = "Deleted successfully";
pub const MSG_NOT_FOUND: &str = "Not found";
pub const MSG_TRANSACTION_NOT_FOUND: &str = "Transaction not found";
