mod account;
mod message;

pub use account::{
    AccountStatus, AddServiceAccountReq, Credentials, ServiceAccountInfo, UpdateServiceAccountReq,
};
pub use message::{Operation, Outcome};
