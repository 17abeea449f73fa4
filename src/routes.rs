use crate::{
    api::{attendance, dashboard},
    auth::middleware::auth_middleware,
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};

// Helper to build per-scope limiter
fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
    let per_ms = if requests_per_min == 0 {
        1
    } else {
        (60_000 / requests_per_min as u64).max(1)
    };
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min.max(1))
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .expect("per_millisecond and burst_size are non-zero");
    Governor::new(&cfg)
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    let protected_limiter = build_limiter(config.rate_protected_per_min);

    // Protected routes
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware)) // authentication
            .wrap(protected_limiter) // rate limiting
            .service(
                web::scope("/employee")
                    // /employee/checkin
                    .service(web::resource("/checkin").route(web::post().to(attendance::check_in)))
                    // /employee/checkout
                    .service(web::resource("/checkout").route(web::post().to(attendance::check_out)))
                    .service(
                        web::resource("/attendance-status")
                            .route(web::get().to(attendance::attendance_status)),
                    )
                    .service(
                        web::resource("/attendance-summary")
                            .route(web::get().to(dashboard::attendance_summary)),
                    )
                    .service(
                        web::resource("/leave-balance").route(web::get().to(dashboard::leave_balance)),
                    )
                    .service(
                        web::resource("/recent-activities")
                            .route(web::get().to(dashboard::recent_activities)),
                    )
                    .service(web::resource("/dashboard").route(web::get().to(dashboard::dashboard))),
            ),
    );
}

// API REQUEST
//  └─ Authorization: Bearer access_token   (issued by the identity service)
//       └─ claims.employee_id → attendance for that employee only
