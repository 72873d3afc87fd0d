use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::http::header::{self, HeaderValue};
use actix_web::middleware::{ErrorHandlerResponse, ErrorHandlers};
use actix_web::{HttpResponse, web};

const NOT_ALLOWED_BODY: &str = "Not allowed!!!";

pub fn new_root_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(not_found));
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().finish()
}

pub fn new_error_handlers() -> ErrorHandlers<BoxBody> {
    ErrorHandlers::new().handler(StatusCode::UNAUTHORIZED, not_allowed)
}

fn not_allowed<B>(res: ServiceResponse<B>) -> actix_web::Result<ErrorHandlerResponse<B>> {
    let (req, mut res) = res.into_parts();
    res.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );

    let res = ServiceResponse::new(req, res.set_body(NOT_ALLOWED_BODY.to_owned()))
        .map_into_boxed_body()
        .map_into_right_body();

    Ok(ErrorHandlerResponse::Response(res))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};

    #[actix_web::test]
    async fn test_root_is_not_found() {
        let app = test::init_service(App::new().wrap(new_error_handlers()).configure(new_root_routes)).await;

        for uri in ["/", "/?status=HERE"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
        }

        let req = test::TestRequest::get().uri("/").set_payload("ignored").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_unauthorized_gets_plain_text_body() {
        let app = test::init_service(
            App::new()
                .wrap(new_error_handlers())
                .route("/secret", web::get().to(|| async { HttpResponse::Unauthorized().body("go away") })),
        )
        .await;

        let req = test::TestRequest::get().uri("/secret").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/plain; charset=utf-8"
        );
        assert_eq!(test::read_body(resp).await, NOT_ALLOWED_BODY);
    }
}
