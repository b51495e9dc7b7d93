use actix_web::{
    body::{BoxBody, MessageBody},
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use std::collections::HashMap;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Fixed-window in-memory rate limiter keyed by client IP. Guards the
/// public signup/login endpoints against credential stuffing; anything
/// distributed would use an external store instead.
pub struct RateLimitMiddleware {
    max_requests: u32,
    window_seconds: u64,
    request_counts: Arc<Mutex<HashMap<String, (u32, Instant)>>>,
}

impl RateLimitMiddleware {
    pub fn new(max_requests: u32, window_seconds: u64) -> Self {
        Self {
            max_requests,
            window_seconds,
            request_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimitMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddlewareService {
            service: Rc::new(service),
            max_requests: self.max_requests,
            window_seconds: self.window_seconds,
            request_counts: self.request_counts.clone(),
        }))
    }
}

pub struct RateLimitMiddlewareService<S> {
    service: Rc<S>,
    max_requests: u32,
    window_seconds: u64,
    request_counts: Arc<Mutex<HashMap<String, (u32, Instant)>>>,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let max_requests = self.max_requests;
        let window_seconds = self.window_seconds;
        let request_counts = self.request_counts.clone();
        let service = self.service.clone();

        Box::pin(async move {
            let client_id = req
                .connection_info()
                .realip_remote_addr()
                .unwrap_or("unknown")
                .to_string();

            let is_limited = {
                let mut counts = match request_counts.lock() {
                    Ok(counts) => counts,
                    Err(poisoned) => poisoned.into_inner(),
                };
                let now = Instant::now();

                counts.retain(|_, (_, window_start)| {
                    now.duration_since(*window_start).as_secs() < window_seconds
                });

                match counts.get_mut(&client_id) {
                    Some((count, window_start)) => {
                        if now.duration_since(*window_start).as_secs() < window_seconds {
                            *count += 1;
                            *count > max_requests
                        } else {
                            *count = 1;
                            *window_start = now;
                            false
                        }
                    }
                    None => {
                        counts.insert(client_id, (1, now));
                        false
                    }
                }
            };

            if is_limited {
                let response = HttpResponse::TooManyRequests().json(serde_json::json!({
                    "error": "rate_limit_exceeded",
                    "message": format!(
                        "Rate limit exceeded. Maximum {} requests per {} seconds",
                        max_requests, window_seconds
                    )
                }));
                return Ok(req.into_response(response));
            }

            let res = service.call(req).await?;
            Ok(res.map_into_boxed_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App};

    async fn test_handler() -> Result<HttpResponse, Error> {
        Ok(HttpResponse::Ok().json(serde_json::json!({"message": "success"})))
    }

    #[actix_web::test]
    async fn test_rate_limit_kicks_in() {
        let app = test::init_service(
            App::new()
                .wrap(RateLimitMiddleware::new(2, 60))
                .route("/login", web::post().to(test_handler)),
        )
        .await;

        for _ in 0..2 {
            let req = test::TestRequest::post().uri("/login").to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), 200);
        }

        let req = test::TestRequest::post().uri("/login").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 429);
    }
}
