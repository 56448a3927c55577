mod account_email;
mod account_id;
mod account_name;
mod new_account;
mod password;

pub use account_email::AccountEmail;
pub use account_id::AccountId;
pub use account_name::AccountName;
pub use new_account::NewAccount;
pub use password::Password;
