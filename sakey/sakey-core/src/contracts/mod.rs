pub mod service_account_info;
pub use service_account_info::ServiceAccountInfo;

pub mod service_account_env;
pub use service_account_env::ServiceAccountEnv;
