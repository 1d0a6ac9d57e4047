use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mensalidades::config::Config;
use mensalidades::modules::lancamentos;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mensalidades=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");

    tracing::info!("Starting mensalidades installment tracking backend");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    // Connect to MongoDB (the driver itself connects lazily)
    let db = config
        .database
        .connect()
        .await
        .expect("Failed to configure MongoDB connection");

    tracing::info!("MongoDB configured (database: {})", config.database.database);

    let report_config = config.report.clone();
    let bind_address = config.server.bind_address();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            // The frontend lives on another origin
            .wrap(Cors::permissive())
            .app_data(web::Data::new(db.clone()))
            .app_data(web::Data::new(report_config.clone()))
            .route("/", web::get().to(index))
            .route("/health", web::get().to(health_check))
            .configure(lancamentos::configure)
    })
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "mensalidades"
    }))
}

async fn index() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "service": "mensalidades",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}
