//! Account routes, mounted under `/users`.
mod login;
mod logout;
mod password;
mod signup;

pub use login::log_in;
pub use logout::log_out;
pub use password::change_password;
pub use signup::sign_up;
