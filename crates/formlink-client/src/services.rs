//! Endpoint groups, one struct per API area.
//!
//! Each group borrows the [`Formlink`] client and exposes the operations of
//! one URL prefix, so call sites read like the API they hit:
//! `client.forms().details(id).await`.

use uuid::Uuid;

use formlink_core::FormlinkResult;
use formlink_schema::{Form, Submission};

use crate::client::Formlink;
use crate::models::{
    Ack, CreatedForm, FormWithCount, LoginRequest, RegisterRequest, ResponseRecord,
    ResponseSummary, SubmitAck, TokenResponse,
};

/// `/v1/auth` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct Auth<'a> {
    client: &'a Formlink,
}

impl<'a> Auth<'a> {
    pub(crate) const fn new(client: &'a Formlink) -> Self {
        Self { client }
    }

    /// Registers a new account and returns its token.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> FormlinkResult<TokenResponse> {
        let body = RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        self.client.post("/v1/auth/register", &body).await
    }

    /// Exchanges credentials for a bearer token.
    pub async fn login(&self, email: &str, password: &str) -> FormlinkResult<TokenResponse> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.client.post("/v1/auth/login", &body).await
    }
}

/// `/v1/forms` endpoints. All of these require a token.
#[derive(Debug, Clone, Copy)]
pub struct Forms<'a> {
    client: &'a Formlink,
}

impl<'a> Forms<'a> {
    pub(crate) const fn new(client: &'a Formlink) -> Self {
        Self { client }
    }

    /// Stores a new form and returns its assigned id.
    pub async fn create(&self, form: &Form) -> FormlinkResult<CreatedForm> {
        self.client.post("/v1/forms/create", form).await
    }

    /// Lists the account's forms with their response counts.
    pub async fn all(&self) -> FormlinkResult<Vec<FormWithCount>> {
        self.list(None, None).await
    }

    /// Lists a page of the account's forms.
    pub async fn list(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> FormlinkResult<Vec<FormWithCount>> {
        let mut path = String::from("/v1/forms/all");
        let mut sep = '?';
        if let Some(limit) = limit {
            path.push_str(&format!("{sep}limit={limit}"));
            sep = '&';
        }
        if let Some(offset) = offset {
            path.push_str(&format!("{sep}offset={offset}"));
        }
        self.client.get(&path).await
    }

    /// Fetches a single form by id.
    pub async fn details(&self, form_id: Uuid) -> FormlinkResult<Form> {
        self.client.get(&format!("/v1/forms/{form_id}/details")).await
    }

    /// Replaces a form's definition.
    pub async fn update(&self, form_id: Uuid, form: &Form) -> FormlinkResult<Ack> {
        self.client
            .put(&format!("/v1/forms/{form_id}/update"), form)
            .await
    }

    /// Deletes a form and all of its responses.
    pub async fn delete(&self, form_id: Uuid) -> FormlinkResult<Ack> {
        self.client
            .delete(&format!("/v1/forms/{form_id}/delete"))
            .await
    }
}

/// `/v1/public` endpoints, addressed by public id. No token needed.
#[derive(Debug, Clone, Copy)]
pub struct PublicForms<'a> {
    client: &'a Formlink,
}

impl<'a> PublicForms<'a> {
    pub(crate) const fn new(client: &'a Formlink) -> Self {
        Self { client }
    }

    /// Fetches the schema the public page renders.
    pub async fn details(&self, public_id: &str) -> FormlinkResult<Form> {
        self.client
            .get(&format!("/v1/public/{public_id}/details"))
            .await
    }

    /// Submits a response to a public form.
    pub async fn submit(&self, public_id: &str, submission: &Submission) -> FormlinkResult<SubmitAck> {
        self.client
            .post(&format!("/v1/public/{public_id}/submit"), &submission.to_wire())
            .await
    }
}

/// `/v1/responses` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct Responses<'a> {
    client: &'a Formlink,
}

impl<'a> Responses<'a> {
    pub(crate) const fn new(client: &'a Formlink) -> Self {
        Self { client }
    }

    /// Lists the responses stored for a form.
    pub async fn list(&self, form_id: Uuid) -> FormlinkResult<Vec<ResponseRecord>> {
        self.client.get(&format!("/v1/responses/{form_id}")).await
    }

    /// Fetches one response by id.
    pub async fn get(&self, form_id: Uuid, response_id: Uuid) -> FormlinkResult<ResponseRecord> {
        self.client
            .get(&format!("/v1/responses/{form_id}/r/{response_id}"))
            .await
    }

    /// Downloads a form's responses as CSV.
    pub async fn download_csv(&self, form_id: Uuid) -> FormlinkResult<String> {
        self.client
            .get_text(&format!("/v1/responses/download/{form_id}"))
            .await
    }
}

/// `/v1/analytics` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct Analytics<'a> {
    client: &'a Formlink,
}

impl<'a> Analytics<'a> {
    pub(crate) const fn new(client: &'a Formlink) -> Self {
        Self { client }
    }

    /// Fetches aggregate statistics for a form's responses.
    pub async fn summary(&self, form_id: Uuid) -> FormlinkResult<ResponseSummary> {
        self.client
            .get(&format!("/v1/analytics/responses/{form_id}/summary"))
            .await
    }
}
