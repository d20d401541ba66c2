use crate::utils::generate_token;
use actix_session::SessionExt;
use actix_session::{Session, SessionGetError, SessionInsertError};
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use std::future::{ready, Ready};

pub struct TypedSession(Session);

impl TypedSession {
    const CSRF_TOKEN_KEY: &'static str = "csrf_token";

    pub fn insert_csrf_token(&self, token: &str) -> Result<(), SessionInsertError> {
        self.0.insert(Self::CSRF_TOKEN_KEY, token)
    }

    pub fn get_csrf_token(&self) -> Result<Option<String>, SessionGetError> {
        self.0.get(Self::CSRF_TOKEN_KEY)
    }

    /// The anti-forgery token of this session, created on first use.
    pub fn csrf_token(&self) -> Result<String, anyhow::Error> {
        if let Some(token) = self.get_csrf_token()? {
            return Ok(token);
        }

        let token = generate_token();
        self.insert_csrf_token(&token)?;
        Ok(token)
    }
}

impl FromRequest for TypedSession {
    type Error = <Session as FromRequest>::Error;
    type Future = Ready<Result<TypedSession, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(TypedSession(req.get_session())))
    }
}
