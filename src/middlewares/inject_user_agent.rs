use crate::common::CLIENT_USER_AGENT;
use async_trait::async_trait;
use reqwest::{
    header::{HeaderValue, USER_AGENT},
    Request, Response,
};
use reqwest_middleware::{Middleware, Next};
use task_local_extensions::Extensions;

/// Reqwest middleware which identifies this library to Beanstream on every outgoing request.
pub struct InjectUserAgentMiddleware;

#[async_trait]
impl Middleware for InjectUserAgentMiddleware {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        req.headers_mut()
            .insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));

        next.run(req, extensions).await
    }
}
