use std::sync::Arc;

use serde_json::json;

use crate::synth::{attr, Resource, Synthesize};

/// How an account owner can recover access to a lost account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountRecovery {
    EmailOnly,
    PhoneOnly,
    PhoneAndEmail,
}

impl AccountRecovery {
    fn as_str(self) -> &'static str {
        match self {
            Self::EmailOnly => "EMAIL_ONLY",
            Self::PhoneOnly => "PHONE_ONLY",
            Self::PhoneAndEmail => "PHONE_AND_EMAIL",
        }
    }
}

/// How sign-up verification messages are delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationStyle {
    Code,
    Link,
}

impl VerificationStyle {
    fn as_str(self) -> &'static str {
        match self {
            Self::Code => "CODE",
            Self::Link => "LINK",
        }
    }
}

/// Required/mutable flags for a standard directory attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardAttribute {
    pub required: bool,
    pub mutable: bool,
}

#[derive(Debug)]
struct UserPoolInner {
    logical_id: String,
    self_sign_up_enabled: bool,
    account_recovery: AccountRecovery,
    verification_style: VerificationStyle,
    auto_verify_email: bool,
    email: Option<StandardAttribute>,
}

/// An identity directory declaration.
///
/// Immutable after [`UserPoolBuilder::build`]; the handle is cloned into
/// every component that needs to reference the directory.
#[derive(Debug, Clone)]
pub struct UserPool(Arc<UserPoolInner>);

impl UserPool {
    /// Starts building a user pool named by its construct name.
    pub fn builder(name: impl Into<String>) -> UserPoolBuilder {
        UserPoolBuilder {
            logical_id: name.into(),
            self_sign_up_enabled: false,
            account_recovery: AccountRecovery::PhoneAndEmail,
            verification_style: VerificationStyle::Code,
            auto_verify_email: false,
            email: None,
        }
    }

    pub fn logical_id(&self) -> &str {
        &self.0.logical_id
    }

    /// Token for the directory id, resolved at deploy time.
    pub fn id_token(&self) -> String {
        attr(self.logical_id(), "UserPoolId")
    }
}

impl Synthesize for UserPool {
    fn render(&self) -> Resource {
        let mut properties = json!({
            "SelfSignUpEnabled": self.0.self_sign_up_enabled,
            "AccountRecovery": self.0.account_recovery.as_str(),
            "VerificationStyle": self.0.verification_style.as_str(),
            "AutoVerify": { "Email": self.0.auto_verify_email },
        });
        if let Some(email) = self.0.email {
            properties["StandardAttributes"] = json!({
                "Email": { "Required": email.required, "Mutable": email.mutable },
            });
        }
        Resource {
            logical_id: self.logical_id().to_string(),
            kind: "Identity::UserPool",
            properties,
        }
    }
}

/// Builder for [`UserPool`].
#[derive(Debug)]
pub struct UserPoolBuilder {
    logical_id: String,
    self_sign_up_enabled: bool,
    account_recovery: AccountRecovery,
    verification_style: VerificationStyle,
    auto_verify_email: bool,
    email: Option<StandardAttribute>,
}

impl UserPoolBuilder {
    pub fn self_sign_up_enabled(mut self, enabled: bool) -> Self {
        self.self_sign_up_enabled = enabled;
        self
    }

    pub fn account_recovery(mut self, recovery: AccountRecovery) -> Self {
        self.account_recovery = recovery;
        self
    }

    pub fn verification_style(mut self, style: VerificationStyle) -> Self {
        self.verification_style = style;
        self
    }

    pub fn auto_verify_email(mut self, enabled: bool) -> Self {
        self.auto_verify_email = enabled;
        self
    }

    pub fn email_attribute(mut self, attribute: StandardAttribute) -> Self {
        self.email = Some(attribute);
        self
    }

    pub fn build(self) -> UserPool {
        UserPool(Arc::new(UserPoolInner {
            logical_id: self.logical_id,
            self_sign_up_enabled: self.self_sign_up_enabled,
            account_recovery: self.account_recovery,
            verification_style: self.verification_style,
            auto_verify_email: self.auto_verify_email,
            email: self.email,
        }))
    }
}

/// A named group scoped to a user pool.
///
/// Duplicate group names are not pre-validated here; the managed platform
/// rejects them at deploy time.
#[derive(Debug, Clone)]
pub struct UserPoolGroup {
    logical_id: String,
    group_name: String,
    user_pool: UserPool,
}

impl UserPoolGroup {
    pub fn new(
        logical_id: impl Into<String>,
        user_pool: &UserPool,
        group_name: impl Into<String>,
    ) -> Self {
        Self {
            logical_id: logical_id.into(),
            group_name: group_name.into(),
            user_pool: user_pool.clone(),
        }
    }

    pub fn group_name(&self) -> &str {
        &self.group_name
    }
}

impl Synthesize for UserPoolGroup {
    fn render(&self) -> Resource {
        Resource {
            logical_id: self.logical_id.clone(),
            kind: "Identity::UserPoolGroup",
            properties: json!({
                "UserPoolId": self.user_pool.id_token(),
                "GroupName": self.group_name,
            }),
        }
    }
}

/// A credential-issuing client registration, bound 1:1 to its pool.
#[derive(Debug, Clone)]
pub struct UserPoolClient {
    logical_id: String,
    user_pool: UserPool,
}

impl UserPoolClient {
    pub fn new(logical_id: impl Into<String>, user_pool: &UserPool) -> Self {
        Self {
            logical_id: logical_id.into(),
            user_pool: user_pool.clone(),
        }
    }

    pub fn logical_id(&self) -> &str {
        &self.logical_id
    }

    /// Token for the client id, resolved at deploy time.
    pub fn id_token(&self) -> String {
        attr(&self.logical_id, "ClientId")
    }
}

impl Synthesize for UserPoolClient {
    fn render(&self) -> Resource {
        Resource {
            logical_id: self.logical_id.clone(),
            kind: "Identity::UserPoolClient",
            properties: json!({
                "UserPoolId": self.user_pool.id_token(),
            }),
        }
    }
}
