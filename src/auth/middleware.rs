use std::rc::Rc;

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::token::SessionAuth;
use crate::error::AppError;
use crate::store::UserStore;

/// Rejection message when the request carries no bearer token at all.
pub const MSG_NO_AUTH_HEADER: &str = "No Authorization was found in request.headers";

/// Rejection message when the token decodes but no matching user exists.
/// A deleted account and a forged id produce the same signal.
pub const MSG_INVALID_TOKEN: &str = "Invalid token";

/// Bearer-token gate for protected routes.
///
/// Each request walks: header presence -> signature/expiry decoding ->
/// payload shape (enforced by `Claims` deserialization) -> user lookup.
/// Success inserts the resolved `User` into the request extensions for
/// `AuthenticatedUser` to pick up; every failure terminates with a 401 whose
/// message is part of the public contract.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    // Rc because the user lookup awaits the store, so the future must own
    // a handle to the wrapped service.
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let token = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.strip_prefix("Bearer "))
                .map(str::to_owned);

            let token = match token {
                Some(token) => token,
                None => return Err(AppError::Unauthorized(MSG_NO_AUTH_HEADER.into()).into()),
            };

            let session = req
                .app_data::<web::Data<SessionAuth>>()
                .cloned()
                .ok_or_else(|| {
                    AppError::InternalServerError("SessionAuth is not configured".into())
                })?;
            let users = req
                .app_data::<web::Data<UserStore>>()
                .cloned()
                .ok_or_else(|| {
                    AppError::InternalServerError("UserStore is not configured".into())
                })?;

            let claims = session.decode(&token)?;

            let user = users
                .find_by_id(claims.id)
                .await?
                .ok_or_else(|| AppError::Unauthorized(MSG_INVALID_TOKEN.into()))?;

            req.extensions_mut().insert(user);
            service.call(req).await
        })
    }
}
