//! # formlink-client
//!
//! Async HTTP client for the Formlink backend API. The entry point is
//! [`Formlink`]: configure it with a base URL and (for authenticated
//! endpoints) a bearer token, then reach the endpoint groups through
//! [`auth`](Formlink::auth), [`forms`](Formlink::forms),
//! [`public_forms`](Formlink::public_forms),
//! [`responses`](Formlink::responses), and [`analytics`](Formlink::analytics).
//!
//! ```no_run
//! use formlink_client::Formlink;
//!
//! # async fn run() -> formlink_core::FormlinkResult<()> {
//! let client = Formlink::new("https://api.formlink.example")?;
//! let token = client.auth().login("ada@example.org", "hunter2").await?.token;
//! let client = client.with_token(token);
//! let forms = client.forms().all().await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod models;
pub mod services;

pub use client::Formlink;
pub use models::{
    Ack, CreatedForm, FormWithCount, LoginRequest, RegisterRequest, ResponseRecord,
    ResponseSummary, SubmitAck, TokenResponse,
};
