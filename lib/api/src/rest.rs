use actix_files::Files;
use actix_web::http::StatusCode;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use reviewlens_core::{Error, SentimentPipeline};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::page::{Outcome, Page};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served under `/assets` (result illustrations)
    pub assets_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8501,
            assets_dir: PathBuf::from("./assets"),
        }
    }
}

#[derive(Deserialize)]
struct AnalyzeForm {
    #[serde(default)]
    review: String,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(
        pipeline: Arc<SentimentPipeline>,
        config: ServerConfig,
    ) -> std::io::Result<()> {
        let assets_dir = config.assets_dir.clone();
        info!("Serving assets from {:?}", assets_dir);

        HttpServer::new(move || App::new().configure(routes(pipeline.clone(), assets_dir.clone())))
            .bind((config.host.as_str(), config.port))?
            .run()
            .await
    }
}

/// Route table, shared by the server and the tests
pub fn routes(
    pipeline: Arc<SentimentPipeline>,
    assets_dir: PathBuf,
) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(pipeline))
            .route("/", web::get().to(index))
            .route("/", web::post().to(analyze))
            .service(Files::new("/assets", assets_dir));
    }
}

fn html(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(body)
}

async fn index(
    pipeline: web::Data<Arc<SentimentPipeline>>,
) -> ActixResult<HttpResponse> {
    let page = Page::new(pipeline.unavailable_reason());
    Ok(html(StatusCode::OK, page.render()))
}

async fn analyze(
    pipeline: web::Data<Arc<SentimentPipeline>>,
    form: web::Form<AnalyzeForm>,
) -> ActixResult<HttpResponse> {
    let review = form.review.as_str();
    let page = Page::new(pipeline.unavailable_reason()).with_review(review);

    let response = match pipeline.analyze(review) {
        Ok(result) => html(
            StatusCode::OK,
            page.with_outcome(Outcome::Analysis(&result)).render(),
        ),
        Err(Error::InvalidInput(msg)) => html(
            StatusCode::OK,
            page.with_outcome(Outcome::Warning(&msg)).render(),
        ),
        Err(Error::ArtifactUnavailable(reason)) => {
            warn!("Analysis rejected: artifacts unavailable");
            // The startup banner already carries the reason
            let page = if pipeline.is_available() {
                page.with_outcome(Outcome::Failure(&reason))
            } else {
                page
            };
            html(StatusCode::SERVICE_UNAVAILABLE, page.render())
        }
        Err(e) => {
            error!("Analysis failed: {}", e);
            let msg = e.to_string();
            html(
                StatusCode::INTERNAL_SERVER_ERROR,
                page.with_outcome(Outcome::Failure(&msg)).render(),
            )
        }
    };
    Ok(response)
}
