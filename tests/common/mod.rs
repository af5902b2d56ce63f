#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use objadm::error::{AdminError, GatewayError};
use objadm::gateway::{AdminApi, Connect};
use objadm::models::{
    AccountStatus, AddServiceAccountReq, Credentials, ServiceAccountInfo, UpdateServiceAccountReq,
};

/// Alias the fake refuses to connect to.
pub const OFFLINE_ALIAS: &str = "offline";

const KEY_ALPHABET: [char; 36] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I',
    'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Add(AddServiceAccountReq),
    SetUserStatus(String, AccountStatus),
    List(String),
    Info(String),
    Delete(String),
    Update(String, UpdateServiceAccountReq),
}

#[derive(Default)]
struct State {
    connects: Vec<String>,
    calls: Vec<Call>,
    failure: Option<(u16, String)>,
    accounts: Vec<String>,
}

/// In-memory cluster recording every connection and call it receives.
#[derive(Clone, Default)]
pub struct FakeCluster {
    state: Rc<RefCell<State>>,
}

impl FakeCluster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every remote call fails with the given status and message.
    pub fn failing(status: u16, message: &str) -> Self {
        let cluster = Self::new();
        cluster.state.borrow_mut().failure = Some((status, message.to_string()));
        cluster
    }

    pub fn with_accounts(accounts: &[&str]) -> Self {
        let cluster = Self::new();
        cluster.state.borrow_mut().accounts = accounts.iter().map(|a| a.to_string()).collect();
        cluster
    }

    pub fn connects(&self) -> Vec<String> {
        self.state.borrow().connects.clone()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    fn record(&self, call: Call) -> Result<(), GatewayError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(call);
        match &state.failure {
            Some((status, message)) => Err(GatewayError::Status {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl Connect for FakeCluster {
    type Client = FakeCluster;

    fn connect(&self, alias: &str) -> Result<FakeCluster, AdminError> {
        self.state.borrow_mut().connects.push(alias.to_string());
        if alias == OFFLINE_ALIAS {
            return Err(AdminError::Connection {
                alias: alias.to_string(),
                reason: "connection refused".to_string(),
            });
        }
        Ok(self.clone())
    }
}

impl AdminApi for FakeCluster {
    fn add_service_account(&self, req: &AddServiceAccountReq) -> Result<Credentials, GatewayError> {
        self.record(Call::Add(req.clone()))?;

        let access_key = if req.access_key.is_empty() {
            nanoid::nanoid!(20, &KEY_ALPHABET)
        } else {
            req.access_key.clone()
        };
        let secret_key = if req.secret_key.is_empty() {
            nanoid::nanoid!(40)
        } else {
            req.secret_key.clone()
        };
        Ok(Credentials {
            access_key,
            secret_key,
        })
    }

    fn set_user_status(&self, user: &str, status: AccountStatus) -> Result<(), GatewayError> {
        self.record(Call::SetUserStatus(user.to_string(), status))
    }

    fn list_service_accounts(&self, user: &str) -> Result<Vec<String>, GatewayError> {
        self.record(Call::List(user.to_string()))?;
        Ok(self.state.borrow().accounts.clone())
    }

    fn info_service_account(&self, access_key: &str) -> Result<ServiceAccountInfo, GatewayError> {
        self.record(Call::Info(access_key.to_string()))?;
        Ok(ServiceAccountInfo {
            parent_user: "foobar".to_string(),
            account_status: "on".to_string(),
            implied_policy: true,
            policy: String::new(),
            member_of: vec!["readers".to_string()],
        })
    }

    fn delete_service_account(&self, access_key: &str) -> Result<(), GatewayError> {
        self.record(Call::Delete(access_key.to_string()))
    }

    fn update_service_account(
        &self,
        access_key: &str,
        req: &UpdateServiceAccountReq,
    ) -> Result<(), GatewayError> {
        self.record(Call::Update(access_key.to_string(), req.clone()))
    }
}

pub fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
