use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::Matcher;
use crate::models::{
    ErrorResponse, HealthResponse, MatchPostsRequest, MatchProvidersRequest, MatchResponse,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matcher: Matcher,
    pub default_limit: usize,
    pub max_limit: usize,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/matches/providers", web::post().to(match_providers))
        .route("/matches/posts", web::post().to(match_posts));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let mode = if state.matcher.has_ranker() {
        "ranker"
    } else {
        "lexical"
    };

    HttpResponse::Ok().json(HealthResponse {
        status: format!("healthy ({})", mode),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Rank providers against one service post
///
/// POST /api/v1/matches/providers
///
/// Request body:
/// ```json
/// {
///   "post": { "id": 1, "title": "...", "description": "...", "budgetMin": 50 },
///   "providers": [ { "id": 7, "accountId": "...", "name": "...", "skills": ["..."] } ],
///   "limit": 10
/// }
/// ```
async fn match_providers(
    state: web::Data<AppState>,
    req: web::Json<MatchProvidersRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for match_providers request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let req = req.into_inner();
    let limit = req.limit.unwrap_or(state.default_limit).min(state.max_limit);

    // Eligibility filter: providers without a linked account never match
    let pool: Vec<_> = req
        .providers
        .into_iter()
        .filter(|p| p.has_account())
        .collect();

    tracing::info!(
        "Matching providers for post {}: pool={}, limit={}",
        req.post.id,
        pool.len(),
        limit
    );

    let result = state.matcher.match_providers(&req.post, pool, limit).await;

    tracing::debug!(
        "Returning {} of {} providers for post {}",
        result.matches.len(),
        result.total_candidates,
        req.post.id
    );

    HttpResponse::Ok().json(MatchResponse {
        match_id: uuid::Uuid::new_v4().to_string(),
        matches: result.matches,
        total_candidates: result.total_candidates,
    })
}

/// Rank open posts against one provider profile
///
/// POST /api/v1/matches/posts
///
/// Request body:
/// ```json
/// {
///   "provider": { "id": 7, "name": "...", "skills": ["plumbing"] },
///   "posts": [ { "id": 1, "title": "...", "status": "open" } ],
///   "limit": 10
/// }
/// ```
async fn match_posts(
    state: web::Data<AppState>,
    req: web::Json<MatchPostsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for match_posts request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let req = req.into_inner();
    let limit = req.limit.unwrap_or(state.default_limit).min(state.max_limit);

    // Eligibility filter: only open posts are offered to providers
    let pool: Vec<_> = req.posts.into_iter().filter(|p| p.is_open()).collect();

    tracing::info!(
        "Matching posts for provider {}: pool={}, limit={}",
        req.provider.id,
        pool.len(),
        limit
    );

    let result = state.matcher.match_posts(&req.provider, pool, limit).await;

    HttpResponse::Ok().json(MatchResponse {
        match_id: uuid::Uuid::new_v4().to_string(),
        matches: result.matches,
        total_candidates: result.total_candidates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PostStatus, ProviderProfile, ServicePost};
    use actix_web::{test, App};

    fn state() -> AppState {
        AppState {
            matcher: Matcher::lexical_only(),
            default_limit: 10,
            max_limit: 50,
        }
    }

    fn provider(id: i64, account: Option<&str>, skills: &[&str]) -> ProviderProfile {
        ProviderProfile {
            id,
            account_id: account.map(String::from),
            name: format!("Provider {}", id),
            title: None,
            description: None,
            skills: skills.iter().map(|s| s.to_string()).collect(),
            location: None,
            is_verified: None,
            rating: None,
        }
    }

    fn post(id: i64, title: &str, status: PostStatus) -> ServicePost {
        ServicePost {
            id,
            title: title.to_string(),
            description: None,
            location: None,
            budget_min: None,
            budget_max: None,
            status,
        }
    }

    #[actix_web::test]
    async fn test_match_providers_filters_accountless_providers() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(configure),
        )
        .await;

        let body = MatchProvidersRequest {
            post: post(1, "Fence painting", PostStatus::Open),
            providers: vec![
                provider(1, Some("acct_1"), &["painting"]),
                provider(2, None, &["painting"]),
            ],
            limit: None,
        };

        let req = test::TestRequest::post()
            .uri("/matches/providers")
            .set_json(&body)
            .to_request();
        let resp: MatchResponse<ProviderProfile> =
            test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp.total_candidates, 1);
        assert_eq!(resp.matches.len(), 1);
        assert_eq!(resp.matches[0].candidate.id, 1);
    }

    #[actix_web::test]
    async fn test_match_posts_filters_closed_posts() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(configure),
        )
        .await;

        let body = MatchPostsRequest {
            provider: provider(1, Some("acct_1"), &["painting"]),
            posts: vec![
                post(1, "Fence painting", PostStatus::Open),
                post(2, "Wall painting", PostStatus::Closed),
            ],
            limit: None,
        };

        let req = test::TestRequest::post()
            .uri("/matches/posts")
            .set_json(&body)
            .to_request();
        let resp: MatchResponse<ServicePost> = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp.total_candidates, 1);
        assert_eq!(resp.matches[0].candidate.id, 1);
    }

    #[actix_web::test]
    async fn test_match_providers_rejects_empty_title() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(configure),
        )
        .await;

        let body = MatchProvidersRequest {
            post: post(1, "", PostStatus::Open),
            providers: vec![],
            limit: None,
        };

        let req = test::TestRequest::post()
            .uri("/matches/providers")
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_health_reports_lexical_mode() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp: HealthResponse = test::call_and_read_body_json(&app, req).await;

        assert!(resp.status.contains("lexical"));
    }
}
