use std::ffi::OsString;

use crate::contracts::ServiceAccountInfo;
use crate::env::{EnvSource, vars};
use crate::error::SakeyError;
use crate::loader::normalize_private_key;

/// Raw values read from the environment, one per variable.
///
/// Nothing here is validated yet. A missing private key is a normal state for
/// this struct and only becomes an error in [`ServiceAccountEnv::into_info`].
/// The key is kept as an `OsString` so a non-unicode value is not mistaken
/// for an unset one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceAccountEnv {
    pub r#type: Option<String>,
    pub project_id: Option<String>,
    pub private_key_id: Option<String>,
    pub private_key: Option<OsString>,
    pub client_email: Option<String>,
    pub client_id: Option<String>,
    pub auth_uri: Option<String>,
    pub token_uri: Option<String>,
    pub auth_provider_x509_cert_url: Option<String>,
    pub client_x509_cert_url: Option<String>,
    pub universe_domain: Option<String>,
}

impl ServiceAccountEnv {
    pub fn from_source<S: EnvSource + ?Sized>(source: &S) -> Self {
        Self {
            r#type: source.var(vars::GOOGLE_TYPE),
            project_id: source.var(vars::GOOGLE_PROJECT_ID),
            private_key_id: source.var(vars::GOOGLE_PRIVATE_KEY_ID),
            private_key: source.var_os(vars::GOOGLE_PRIVATE_KEY),
            client_email: source.var(vars::GOOGLE_CLIENT_EMAIL),
            client_id: source.var(vars::GOOGLE_CLIENT_ID),
            auth_uri: source.var(vars::GOOGLE_AUTH_URI),
            token_uri: source.var(vars::GOOGLE_TOKEN_URI),
            auth_provider_x509_cert_url: source.var(vars::GOOGLE_AUTH_PROVIDER_CERT_URL),
            client_x509_cert_url: source.var(vars::GOOGLE_CLIENT_CERT_URL),
            universe_domain: source.var(vars::GOOGLE_UNIVERSE_DOMAIN),
        }
    }

    /// Names of the optional variables that were not set, in field order.
    pub fn missing_optional(&self) -> Vec<&'static str> {
        let optional = [
            (vars::GOOGLE_TYPE, &self.r#type),
            (vars::GOOGLE_PROJECT_ID, &self.project_id),
            (vars::GOOGLE_PRIVATE_KEY_ID, &self.private_key_id),
            (vars::GOOGLE_CLIENT_EMAIL, &self.client_email),
            (vars::GOOGLE_CLIENT_ID, &self.client_id),
            (vars::GOOGLE_AUTH_URI, &self.auth_uri),
            (vars::GOOGLE_TOKEN_URI, &self.token_uri),
            (vars::GOOGLE_AUTH_PROVIDER_CERT_URL, &self.auth_provider_x509_cert_url),
            (vars::GOOGLE_CLIENT_CERT_URL, &self.client_x509_cert_url),
            (vars::GOOGLE_UNIVERSE_DOMAIN, &self.universe_domain),
        ];

        optional
            .into_iter()
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| name)
            .collect()
    }

    pub fn into_info(self) -> Result<ServiceAccountInfo, SakeyError> {
        let raw_key = self.private_key.ok_or(SakeyError::MissingPrivateKey {
            variable: vars::GOOGLE_PRIVATE_KEY,
        })?;
        let raw_key = raw_key
            .into_string()
            .map_err(|_| SakeyError::PrivateKeyNotUnicode {
                variable: vars::GOOGLE_PRIVATE_KEY,
            })?;

        Ok(ServiceAccountInfo {
            r#type: self.r#type,
            project_id: self.project_id,
            private_key_id: self.private_key_id,
            private_key: normalize_private_key(&raw_key),
            client_email: self.client_email,
            client_id: self.client_id,
            auth_uri: self.auth_uri,
            token_uri: self.token_uri,
            auth_provider_x509_cert_url: self.auth_provider_x509_cert_url,
            client_x509_cert_url: self.client_x509_cert_url,
            universe_domain: self.universe_domain,
        })
    }
}
