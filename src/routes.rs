use crate::{
    api::{attendance, schedule},
    auth::middleware::auth_middleware,
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    // Protected routes
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware))
            // authentication
            .wrap(build_limiter(config.rate_protected_per_min)) // rate limiting
            .service(
                web::scope("/attendance")
                    // /attendance
                    .service(
                        web::resource("")
                            .wrap(build_limiter(config.rate_attendance_per_min))
                            .route(web::put().to(attendance::check_out))
                            .route(web::post().to(attendance::check_in)),
                    )
                    // /attendance/today
                    .service(
                        web::resource("/today").route(web::get().to(attendance::today_status)),
                    )
                    // /attendance/policy
                    .service(
                        web::resource("/policy").route(web::get().to(attendance::get_policy)),
                    ),
            )
            .service(
                web::scope("/schedule")
                    // /schedule/monthly
                    .service(
                        web::resource("/monthly")
                            .route(web::get().to(schedule::monthly_schedule)),
                    ),
            ),
    );
}
