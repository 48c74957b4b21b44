/// In-process app with the request-trace middleware and every route.
macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(avalon_backend::RequestTrace)
                .app_data(actix_web::web::Data::new($state))
                .configure(avalon_backend::routes::configure),
        )
        .await
    };
}

pub mod error_shape;
pub mod games_http;
pub mod health;
