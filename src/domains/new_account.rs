use crate::domains::{AccountEmail, AccountName, Password};

pub struct NewAccount {
    pub name: AccountName,
    pub email: AccountEmail,
    pub password: Password,
}
